//! 领域建模用过程宏（shipping-macros）
//!
//! - `#[entity]`：为具名字段结构体注入 `id`/`created_at` 并实现 `Entity`
//! - `#[entity_id]`：为单字段 tuple struct 生成标识类型的常用实现
//! - `#[value_object]`：为值对象合并一组默认派生
//!
//! 生成代码统一通过 `::shipping_domain` 路径引用领域层类型。
use proc_macro::TokenStream;

mod args;
mod derive_utils;
mod entity;
mod entity_id;
mod field_utils;
mod value_object;

/// 实体宏
///
/// 参数：`#[entity(id = IdType, debug = true|false)]`，`id` 默认 `String`。
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 实体标识宏，仅支持单字段 tuple struct，例如 `struct ShipmentId(i64);`
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}

/// 值对象宏
///
/// 参数：`#[value_object(debug = true|false, default = true|false)]`，均默认 `true`。
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
