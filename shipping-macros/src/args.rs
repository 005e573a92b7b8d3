use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, Ident, Result, Token, Type};

/// 以类型为值的参数键，其余键按表达式解析
const TYPE_KEYS: &[&str] = &["id"];

enum Value {
    Type(Box<Type>),
    Expr(Expr),
}

struct Pair {
    key: Ident,
    value: Value,
}

impl Parse for Pair {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: Ident = input.parse()?;
        let _eq: Token![=] = input.parse()?;
        let value = if TYPE_KEYS.iter().any(|k| key == k) {
            Value::Type(Box::new(input.parse()?))
        } else {
            Value::Expr(input.parse()?)
        };
        Ok(Self { key, value })
    }
}

/// 宏参数：`key = value` 形式的逗号分隔列表
pub(crate) struct MacroArgs {
    pairs: Vec<(Ident, Value)>,
}

impl Parse for MacroArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let parsed: Punctuated<Pair, Token![,]> = Punctuated::parse_terminated(input)?;

        let mut pairs: Vec<(Ident, Value)> = Vec::with_capacity(parsed.len());
        for Pair { key, value } in parsed {
            if pairs.iter().any(|(k, _)| *k == key) {
                return Err(syn::Error::new(
                    key.span(),
                    format!("duplicate key '{key}' in attribute"),
                ));
            }
            pairs.push((key, value));
        }

        Ok(Self { pairs })
    }
}

impl MacroArgs {
    /// 拒绝未在 `allowed` 中声明的键
    pub(crate) fn check_keys(&self, allowed: &[&str]) -> Result<()> {
        for (key, _) in &self.pairs {
            if !allowed.iter().any(|a| key == a) {
                let expected = if allowed.is_empty() {
                    "no arguments".to_string()
                } else {
                    allowed
                        .iter()
                        .map(|a| format!("'{a}'"))
                        .collect::<Vec<_>>()
                        .join(" or ")
                };
                return Err(syn::Error::new(
                    key.span(),
                    format!("unknown key in attribute; expected {expected}"),
                ));
            }
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub(crate) fn bool(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Expr(Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Bool(b),
                ..
            }))) => Ok(b.value()),
            Some(Value::Expr(other)) => Err(syn::Error::new(
                other.span(),
                format!("expected boolean literal for '{key}'"),
            )),
            Some(Value::Type(ty)) => Err(syn::Error::new(
                ty.span(),
                format!("expected boolean literal for '{key}'"),
            )),
        }
    }

    pub(crate) fn ty(&self, key: &str) -> Option<Type> {
        match self.get(key) {
            Some(Value::Type(ty)) => Some((**ty).clone()),
            _ => None,
        }
    }
}
