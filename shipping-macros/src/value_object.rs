use crate::args::MacroArgs;
use crate::derive_utils::{apply_derives, required_derives};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, parse_macro_input};

/// #[value_object] 宏实现
/// - 支持结构体（具名或 tuple）与枚举
/// - 合并派生：Clone, Serialize, Deserialize, PartialEq, Eq，
///   以及可关闭的 Debug（`debug = false`）与 Default（`default = false`）
///
/// 需要自定义默认值（例如默认承运商）的值对象应关闭 `default` 并手写实现。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as MacroArgs);
    if let Err(err) = args.check_keys(&["debug", "default"]) {
        return err.to_compile_error().into();
    }
    let flags = (args.bool("debug", true), args.bool("default", true));
    let (derive_debug, derive_default) = match flags {
        (Ok(debug), Ok(default)) => (debug, default),
        (Err(err), _) | (_, Err(err)) => return err.to_compile_error().into(),
    };

    let required = required_derives(
        derive_debug,
        derive_default,
        &[
            syn::parse_quote!(Clone),
            syn::parse_quote!(serde::Serialize),
            syn::parse_quote!(serde::Deserialize),
            syn::parse_quote!(PartialEq),
            syn::parse_quote!(Eq),
        ],
    );

    let mut input = parse_macro_input!(item as Item);
    match &mut input {
        Item::Struct(st) => {
            apply_derives(&mut st.attrs, required);
            TokenStream::from(quote! { #st })
        }
        Item::Enum(en) => {
            apply_derives(&mut en.attrs, required);
            TokenStream::from(quote! { #en })
        }
        other => syn::Error::new(other.span(), "#[value_object] only supports struct or enum")
            .to_compile_error()
            .into(),
    }
}
