//! ベクトル成分アクセス（スウィズル）の字句パターン
//!
//! 受理するのは `.` の後に続く次のいずれか:
//! - `x y z w` のみからなる1〜4文字
//! - `r g b a` のみからなる1〜4文字
//! - `s` または `S` に続く1〜16桁の16進数字
//!
//! 構造体メンバー名が偶然このパターンに一致する場合（`s.x` など）も
//! スウィズルとして扱われる。型情報を持たない構文解析の既知の限界である。

const POSITION_SET: &[u8] = b"xyzw";
const COLOR_SET: &[u8] = b"rgba";

/// アクセサ名（`.` を除く）がスウィズルパターンに一致するか
pub fn is_swizzle(name: &str) -> bool {
    let bytes = name.as_bytes();
    match bytes {
        [] => false,
        [b's' | b'S', digits @ ..] => {
            (1..=16).contains(&digits.len()) && digits.iter().all(u8::is_ascii_hexdigit)
        }
        _ if bytes.len() <= 4 => {
            bytes.iter().all(|b| POSITION_SET.contains(b)) || bytes.iter().all(|b| COLOR_SET.contains(b))
        }
        _ => false,
    }
}

/// `.` の直後からのテキストを受け取り、スウィズルの長さ（`.` を除く）を返す
///
/// 識別子として続く文字をすべて見てから判定するので、`.xyzw2` や `.count` は一致しない。
pub fn accessor_len(rest: &str) -> Option<usize> {
    let len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    is_swizzle(&rest[..len]).then_some(len)
}
