use crate::decode_column::{ColumnMetadata, decode_column};
use proc_macro2::Span;
use quote::ToTokens;
use syn::{
    Error, Expr, ExprLit, Fields, ItemStruct, Lit, LitStr, Result, parse::ParseBuffer,
    spanned::Spanned,
};

pub(crate) struct TableMetadata {
    pub(crate) name: String,
    pub(crate) table: Option<String>,
    pub(crate) schema: Option<String>,
    /// Entity level key list, member names.
    pub(crate) key: Vec<String>,
    pub(crate) columns: Vec<ColumnMetadata>,
}

fn decode_key(expr: &Expr, columns: &[ColumnMetadata]) -> Result<Vec<String>> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(v), ..
        }) => {
            let v = v.value();
            if !columns.iter().any(|c| !c.ignore && c.name == v) {
                return Err(Error::new(
                    expr.span(),
                    format!("Member `{}` does not exist in the entity", v),
                ));
            }
            Ok(vec![v])
        }
        Expr::Tuple(tuple) => {
            let mut result = Vec::with_capacity(tuple.elems.len());
            for elem in &tuple.elems {
                let Expr::Lit(..) = elem else {
                    return Err(Error::new(
                        elem.span(),
                        "Key list must contain string literal member names",
                    ));
                };
                result.extend(decode_key(elem, columns)?);
            }
            Ok(result)
        }
        Expr::Paren(paren) => decode_key(&paren.expr, columns),
        _ => Err(Error::new(Span::call_site(), "Unexpected key expression")),
    }
}

pub fn decode_table(item: &ItemStruct) -> TableMetadata {
    if !item.generics.params.is_empty() {
        panic!("Entity `{}` cannot have generic parameters", item.ident);
    }
    let Fields::Named(fields) = &item.fields else {
        panic!("Entity `{}` must be a struct with named fields", item.ident);
    };
    let columns: Vec<_> = fields.named.iter().map(decode_column).collect();
    let mut table = None;
    let mut schema = None;
    let mut key = Vec::new();
    for attr in &item.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("scribe") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `scribe`, use it like: `#[scribe(attribute = value, ..)]`",);
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("table") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `table`, use it like: `#[scribe(table = \"my_table\")]`"
                        );
                    };
                    table = Some(value.value());
                } else if arg.path.is_ident("schema") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `schema`, use it like: `#[scribe(schema = \"my_schema\")]`"
                        );
                    };
                    schema = Some(value.value());
                } else if arg.path.is_ident("key") {
                    let value = match arg
                        .value()
                        .and_then(ParseBuffer::parse::<Expr>)
                        .and_then(|v| decode_key(&v, &columns))
                    {
                        Ok(v) => v,
                        Err(e) => panic!("Error while parsing `key`, use it like: `#[scribe(key = (\"k1\", \"k2\", ..))]`: {e}"),
                    };
                    if !key.is_empty() {
                        panic!("Key attribute can appear just once on an entity");
                    }
                    key = value;
                } else {
                    panic!("Unknown attribute `{}` inside scribe macro", arg.path.to_token_stream());
                }
                Ok(())
            });
        }
    }
    TableMetadata {
        name: item.ident.to_string(),
        table,
        schema,
        key,
        columns,
    }
}
