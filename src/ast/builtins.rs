//! 組み込み関数の名前空間

use serde::Serialize;

/// 組み込み関数の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuiltinCategory {
    WorkItem,
    Atomic,
    Synchronization,
    Math,
    Image,
    /// `vloadN` / `vstoreN` 系
    VectorData,
}

static WORK_ITEM: &[&str] = &[
    "get_work_dim",
    "get_global_size",
    "get_global_id",
    "get_local_size",
    "get_enqueued_local_size",
    "get_local_id",
    "get_num_groups",
    "get_group_id",
    "get_global_offset",
    "get_global_linear_id",
    "get_local_linear_id",
    "get_sub_group_size",
    "get_max_sub_group_size",
    "get_num_sub_groups",
    "get_sub_group_id",
    "get_sub_group_local_id",
];

static SYNCHRONIZATION: &[&str] = &[
    "barrier",
    "work_group_barrier",
    "sub_group_barrier",
    "mem_fence",
    "read_mem_fence",
    "write_mem_fence",
    "atomic_work_item_fence",
    "async_work_group_copy",
    "async_work_group_strided_copy",
    "wait_group_events",
    "prefetch",
];

static ATOMIC: &[&str] = &[
    "atomic_add",
    "atomic_sub",
    "atomic_xchg",
    "atomic_inc",
    "atomic_dec",
    "atomic_cmpxchg",
    "atomic_min",
    "atomic_max",
    "atomic_and",
    "atomic_or",
    "atomic_xor",
    "atom_add",
    "atom_sub",
    "atom_xchg",
    "atom_inc",
    "atom_dec",
    "atom_cmpxchg",
    "atom_min",
    "atom_max",
    "atom_and",
    "atom_or",
    "atom_xor",
    "atomic_init",
    "atomic_store",
    "atomic_load",
    "atomic_exchange",
    "atomic_compare_exchange_strong",
    "atomic_compare_exchange_weak",
    "atomic_fetch_add",
    "atomic_fetch_sub",
    "atomic_fetch_or",
    "atomic_fetch_xor",
    "atomic_fetch_and",
    "atomic_fetch_min",
    "atomic_fetch_max",
    "atomic_flag_test_and_set",
    "atomic_flag_clear",
];

static MATH: &[&str] = &[
    "acos", "acosh", "acospi", "asin", "asinh", "asinpi", "atan", "atan2", "atanh", "atanpi",
    "atan2pi", "cbrt", "ceil", "copysign", "cos", "cosh", "cospi", "erfc", "erf", "exp", "exp2",
    "exp10", "expm1", "fabs", "fdim", "floor", "fma", "fmax", "fmin", "fmod", "fract", "frexp",
    "hypot", "ilogb", "ldexp", "lgamma", "lgamma_r", "log", "log2", "log10", "log1p", "logb",
    "mad", "maxmag", "minmag", "modf", "nan", "nextafter", "pow", "pown", "powr", "remainder",
    "remquo", "rint", "rootn", "round", "rsqrt", "sin", "sincos", "sinh", "sinpi", "sqrt", "tan",
    "tanh", "tanpi", "tgamma", "trunc", "half_cos", "half_divide", "half_exp", "half_exp2",
    "half_exp10", "half_log", "half_log2", "half_log10", "half_powr", "half_recip", "half_rsqrt",
    "half_sin", "half_sqrt", "half_tan", "native_cos", "native_divide", "native_exp",
    "native_exp2", "native_exp10", "native_log", "native_log2", "native_log10", "native_powr",
    "native_recip", "native_rsqrt", "native_sin", "native_sqrt", "native_tan", "abs", "abs_diff",
    "add_sat", "hadd", "rhadd", "clamp", "clz", "ctz", "mad_hi", "mad_sat", "max", "min",
    "mul_hi", "rotate", "sub_sat", "upsample", "popcount", "mad24", "mul24", "degrees", "mix",
    "radians", "step", "smoothstep", "sign", "cross", "dot", "distance", "length", "normalize",
    "fast_distance", "fast_length", "fast_normalize", "isequal", "isnotequal", "isgreater",
    "isgreaterequal", "isless", "islessequal", "islessgreater", "isfinite", "isinf", "isnan",
    "isnormal", "isordered", "isunordered", "signbit", "any", "all", "bitselect", "select",
];

static IMAGE: &[&str] = &[
    "read_imagef",
    "read_imagei",
    "read_imageui",
    "read_imageh",
    "write_imagef",
    "write_imagei",
    "write_imageui",
    "write_imageh",
    "get_image_width",
    "get_image_height",
    "get_image_depth",
    "get_image_channel_data_type",
    "get_image_channel_order",
    "get_image_dim",
    "get_image_array_size",
    "get_image_num_samples",
    "get_image_num_mip_levels",
];

static VECTOR_DATA_PREFIXES: &[&str] = &["vload", "vstore", "vloada_half", "vstorea_half", "vload_half", "vstore_half"];

/// 名前が組み込み関数ならその分類を返す
pub fn builtin_category(name: &str) -> Option<BuiltinCategory> {
    let tables: [(&[&str], BuiltinCategory); 5] = [
        (WORK_ITEM, BuiltinCategory::WorkItem),
        (SYNCHRONIZATION, BuiltinCategory::Synchronization),
        (ATOMIC, BuiltinCategory::Atomic),
        (MATH, BuiltinCategory::Math),
        (IMAGE, BuiltinCategory::Image),
    ];
    for (table, category) in tables {
        if table.contains(&name) {
            return Some(category);
        }
    }
    if is_vector_data_function(name) {
        return Some(BuiltinCategory::VectorData);
    }
    None
}

/// `vload4`、`vstore_half8_rte` のような名前か
fn is_vector_data_function(name: &str) -> bool {
    // 長い接頭辞から照合する
    let mut prefixes: Vec<&str> = VECTOR_DATA_PREFIXES.to_vec();
    prefixes.sort_by_key(|p| std::cmp::Reverse(p.len()));

    prefixes.into_iter().any(|prefix| {
        let Some(rest) = name.strip_prefix(prefix) else {
            return false;
        };
        let (width, rounding) = match rest.find('_') {
            Some(i) => (&rest[..i], Some(&rest[i + 1..])),
            None => (rest, None),
        };
        let width_ok = if prefix.ends_with("half") {
            width.is_empty() || matches!(width, "2" | "3" | "4" | "8" | "16")
        } else {
            matches!(width, "2" | "3" | "4" | "8" | "16")
        };
        let rounding_ok = match rounding {
            None => true,
            Some(mode) => prefix.contains("store") && matches!(mode, "rte" | "rtz" | "rtp" | "rtn"),
        };
        width_ok && rounding_ok
    })
}
