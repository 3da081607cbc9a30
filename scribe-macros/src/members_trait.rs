use crate::decode_table::TableMetadata;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemStruct;

/// `{Entity}Members` trait, one typed `Member` constant per mapped field.
pub fn members_trait(item: &ItemStruct, table: &TableMetadata) -> TokenStream {
    let name = &item.ident;
    let vis = &item.vis;
    let trait_name = format_ident!("{}Members", name);
    let members = table.columns.iter().filter(|c| !c.ignore).map(|c| {
        let ident = &c.ident;
        let ty = &c.ty;
        let member = &c.name;
        quote! {
            const #ident: ::scribe::Member<#name, #ty> = ::scribe::Member::new(#member);
        }
    });
    quote! {
        #[allow(non_upper_case_globals)]
        #vis trait #trait_name {
            #(#members)*
        }
        impl #trait_name for #name {}
    }
}
