use crate::decode_column::ColumnMetadata;
use proc_macro2::TokenStream;
use quote::quote;

/// `MemberDef` constant expression of a column.
pub fn encode_member_def(column: &ColumnMetadata) -> TokenStream {
    let name = &column.name;
    let mut result = quote!(::scribe::MemberDef::new(#name));
    if let Some(column) = &column.column {
        result = quote!(#result.column(#column));
    }
    if column.key {
        result = quote!(#result.key());
    }
    if let Some(generated) = &column.generated {
        result = quote!(#result.generated(#generated));
    }
    if let Some(foreign_key) = &column.foreign_key {
        result = quote!(#result.foreign_key(#foreign_key));
    }
    if column.nullable {
        result = quote!(#result.nullable());
    }
    if column.boolean {
        result = quote!(#result.boolean());
    }
    result
}
