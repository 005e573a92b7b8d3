use crate::args::MacroArgs;
use crate::derive_utils::{apply_derives, required_derives};
use crate::field_utils::ensure_leading_fields;
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, Type, parse_macro_input};

/// #[entity] 宏实现
/// - 若缺失则追加字段：`id: IdType`、`created_at: Timestamp`，并置于字段最前
/// - 合并派生：Debug（可关闭）、Default、Serialize、Deserialize
/// - 实现 `::shipping_domain::entity::Entity`（new/id/created_at）
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as MacroArgs);
    if let Err(err) = args.check_keys(&["id", "debug"]) {
        return err.to_compile_error().into();
    }
    let derive_debug = match args.bool("debug", true) {
        Ok(b) => b,
        Err(err) => return err.to_compile_error().into(),
    };

    let mut st = match parse_macro_input!(item as Item) {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let id_type = args.ty("id").unwrap_or_else(|| syn::parse_quote! { String });
    let timestamp_ty: Type = syn::parse_quote! { ::shipping_domain::entity::Timestamp };
    ensure_leading_fields(
        fields_named,
        &[("id", &id_type), ("created_at", &timestamp_ty)],
    );

    apply_derives(
        &mut st.attrs,
        required_derives(
            derive_debug,
            true,
            &[
                syn::parse_quote!(serde::Serialize),
                syn::parse_quote!(serde::Deserialize),
            ],
        ),
    );

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let expanded = quote! {
        #st

        impl #impl_generics ::shipping_domain::entity::Entity
            for #ident #ty_generics #where_clause
        {
            type Id = #id_type;

            fn new(id: Self::Id, created_at: #timestamp_ty) -> Self {
                Self { id, created_at, ..::core::default::Default::default() }
            }

            fn id(&self) -> &Self::Id { &self.id }

            fn created_at(&self) -> #timestamp_ty { self.created_at }
        }
    };

    TokenStream::from(expanded)
}
