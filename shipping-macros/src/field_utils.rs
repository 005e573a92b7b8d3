use syn::{Field, FieldsNamed, Token, Type, punctuated::Punctuated};

fn field_is(f: &Field, name: &str) -> bool {
    f.ident.as_ref().map(|i| i == name).unwrap_or(false)
}

/// 确保具名字段结构体包含所需字段，并按 `required` 的顺序置于最前
///
/// 已存在的同名字段原样复用（保留其可见性与属性），其余字段保持原有相对顺序。
pub(crate) fn ensure_leading_fields(fields_named: &mut FieldsNamed, required: &[(&str, &Type)]) {
    let old_named = fields_named.named.clone();
    let mut new_named: Punctuated<Field, Token![,]> = Punctuated::new();

    for (name, ty) in required {
        match old_named.iter().find(|f| field_is(f, name)) {
            Some(existing) => new_named.push(existing.clone()),
            None => {
                let ident = syn::Ident::new(name, proc_macro2::Span::call_site());
                new_named.push(syn::parse_quote! { #ident: #ty });
            }
        }
    }

    for f in old_named {
        if !required.iter().any(|(name, _)| field_is(&f, name)) {
            new_named.push(f);
        }
    }

    fields_named.named = new_named;
}
