use quote::ToTokens;
use syn::{Attribute, Path, Token};

// 拆分属性：非 derive 属性原样保留，derive 中的路径逐个取出
fn split_derives(attrs: &[Attribute]) -> (Vec<Attribute>, Vec<Path>) {
    let mut retained = Vec::new();
    let mut existing = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("derive") {
            retained.push(attr.clone());
            continue;
        }
        if let Ok(list) =
            attr.parse_args_with(syn::punctuated::Punctuated::<Path, Token![,]>::parse_terminated)
        {
            existing.extend(list);
        }
    }
    (retained, existing)
}

// 以末段标识归一化，`Serialize` 与 `serde::Serialize` 视为同一个派生
fn derive_key(p: &Path) -> String {
    match p.segments.last() {
        Some(last) => last.ident.to_string(),
        None => p.to_token_stream().to_string(),
    }
}

/// 将 `required` 与已有 derive 合并为单个 `#[derive(..)]` 并置于属性最前
///
/// 合并后的 derive 必须先于 `#[serde(..)]` 等辅助属性出现。
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<Path>) {
    let (retained, existing) = split_derives(attrs);

    let mut seen = std::collections::HashSet::<String>::new();
    let merged: Vec<Path> = required
        .into_iter()
        .chain(existing)
        .filter(|p| seen.insert(derive_key(p)))
        .collect();

    let derive: Attribute = syn::parse_quote!(#[derive(#(#merged),*)]);
    *attrs = std::iter::once(derive).chain(retained).collect();
}

/// 按开关组装默认派生集合
pub(crate) fn required_derives(debug: bool, default: bool, extra: &[Path]) -> Vec<Path> {
    let mut required: Vec<Path> = Vec::new();
    if debug {
        required.push(syn::parse_quote!(Debug));
    }
    if default {
        required.push(syn::parse_quote!(Default));
    }
    required.extend(extra.iter().cloned());
    required
}
