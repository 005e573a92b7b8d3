use crate::args::MacroArgs;
use crate::derive_utils::{apply_derives, required_derives};
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Fields, Generics, Item, Type, WhereClause, WherePredicate, parse_macro_input};

/// 把单字段 tuple struct 变成标识类型
///
/// 派生会与已有的 `#[derive]` 合并，另外生成 `new`、`value`、`is_unassigned`
/// 以及与内部类型之间的 `From` 转换、`Display`、`FromStr`。
/// 内部值等于其类型默认值（如 `0`）时视为尚未由存储分配。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as MacroArgs);
    if let Err(err) = args.check_keys(&[]) {
        return err.to_compile_error().into();
    }

    let mut st = match parse_macro_input!(item as Item) {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity_id] can only wrap a struct")
                .to_compile_error()
                .into();
        }
    };

    let inner_ty = match single_field(&st.fields) {
        Ok(ty) => ty,
        Err(err) => return err.to_compile_error().into(),
    };

    apply_derives(
        &mut st.attrs,
        required_derives(
            true,
            true,
            &[
                syn::parse_quote!(Clone),
                syn::parse_quote!(serde::Serialize),
                syn::parse_quote!(serde::Deserialize),
                syn::parse_quote!(PartialEq),
                syn::parse_quote!(Eq),
                syn::parse_quote!(Hash),
            ],
        ),
    );

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();
    let parse_where = bounded(&st.generics, syn::parse_quote!(#inner_ty: ::std::str::FromStr));
    let display_where = bounded(&st.generics, syn::parse_quote!(#inner_ty: ::std::fmt::Display));

    let out = quote! {
        #st

        impl #impl_generics #ident #ty_generics #where_clause {
            pub fn new(value: #inner_ty) -> Self { Self(value) }

            pub fn value(&self) -> &#inner_ty { &self.0 }

            /// 内部值等于类型默认值，即尚未分配
            pub fn is_unassigned(&self) -> bool
            where #inner_ty: ::core::default::Default + ::core::cmp::PartialEq
            {
                self.0 == <#inner_ty as ::core::default::Default>::default()
            }
        }

        impl #impl_generics ::std::str::FromStr for #ident #ty_generics #parse_where {
            type Err = <#inner_ty as ::std::str::FromStr>::Err;

            fn from_str(raw: &str) -> ::std::result::Result<Self, Self::Err> {
                raw.parse::<#inner_ty>().map(Self)
            }
        }

        impl #impl_generics ::std::fmt::Display for #ident #ty_generics #display_where {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl #impl_generics ::core::convert::From<#inner_ty> for #ident #ty_generics #where_clause {
            fn from(value: #inner_ty) -> Self { Self(value) }
        }

        impl #impl_generics ::core::convert::From<#ident #ty_generics> for #inner_ty #where_clause {
            fn from(id: #ident #ty_generics) -> Self { id.0 }
        }
    };

    TokenStream::from(out)
}

/// 在结构体自身的 where 子句后追加一条约束
fn bounded(generics: &Generics, predicate: WherePredicate) -> WhereClause {
    let mut generics = generics.clone();
    let clause = generics.make_where_clause();
    clause.predicates.push(predicate);
    clause.clone()
}

fn single_field(fields: &Fields) -> syn::Result<Type> {
    match fields {
        Fields::Unnamed(f) if f.unnamed.len() == 1 => Ok(f.unnamed[0].ty.clone()),
        other => Err(syn::Error::new(
            other.span(),
            "#[entity_id] expects a newtype such as `struct OrderId(i64);`",
        )),
    }
}
