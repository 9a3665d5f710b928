//! 型名を追跡するスコープスタック

use std::collections::HashMap;

/// 名前 → 型名かどうか のスコープの積み重ね
///
/// `typedef` で宣言された名前は型名になり、内側のスコープで通常の宣言をすると隠される。
/// 変更はすべて記録され、[`ScopeStack::undo_to`] で先読み前の状態に戻せる。
#[derive(Debug)]
pub(super) struct ScopeStack {
    scopes: Vec<HashMap<String, bool>>,
    journal: Vec<ScopeEdit>,
}

/// 取り消し用の変更記録
#[derive(Debug)]
enum ScopeEdit {
    Declare { name: String, previous: Option<bool> },
    Push,
    Pop(HashMap<String, bool>),
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
            journal: Vec::new(),
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
        self.journal.push(ScopeEdit::Push);
    }

    /// ファイルスコープは取り除かない
    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            if let Some(scope) = self.scopes.pop() {
                self.journal.push(ScopeEdit::Pop(scope));
            }
        }
    }

    /// 現在の状態を指す印
    pub fn mark(&self) -> usize {
        self.journal.len()
    }

    /// `mark` 以降の変更を新しい順に取り消す
    pub fn undo_to(&mut self, mark: usize) {
        while self.journal.len() > mark {
            let Some(edit) = self.journal.pop() else {
                break;
            };
            match edit {
                ScopeEdit::Declare { name, previous } => {
                    if let Some(scope) = self.scopes.last_mut() {
                        match previous {
                            Some(is_type) => scope.insert(name, is_type),
                            None => scope.remove(&name),
                        };
                    }
                }
                ScopeEdit::Push => {
                    self.scopes.pop();
                }
                ScopeEdit::Pop(scope) => self.scopes.push(scope),
            }
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn declare(&mut self, name: &str, is_type: bool) {
        if let Some(scope) = self.scopes.last_mut() {
            let previous = scope.insert(name.to_string(), is_type);
            self.journal.push(ScopeEdit::Declare {
                name: name.to_string(),
                previous,
            });
        }
    }

    fn lookup(&self, name: &str) -> Option<bool> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name).copied())
    }

    pub fn is_type(&self, name: &str) -> bool {
        self.lookup(name).unwrap_or(false)
    }

    /// 通常の名前（変数・関数）として宣言済みか
    pub fn is_ordinary(&self, name: &str) -> bool {
        self.lookup(name) == Some(false)
    }
}
