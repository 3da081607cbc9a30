mod decode_column;
mod decode_table;
mod encode_member_def;
mod members_trait;

use decode_table::decode_table;
use encode_member_def::encode_member_def;
use members_trait::members_trait;
use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, parse_macro_input};

#[proc_macro_derive(Entity, attributes(scribe))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let name = &item.ident;
    let table = decode_table(&item);
    let columns: Vec<_> = table.columns.iter().filter(|c| !c.ignore).collect();
    if !table.key.is_empty()
        && let Some(flagged) = columns.iter().find(|c| c.key && !table.key.contains(&c.name))
    {
        panic!(
            "Member `{}` is flagged as key but the entity key list does not contain it",
            flagged.name
        );
    }
    let entity_name = &table.name;
    let members_count = columns.len();
    let member_defs = columns.iter().map(|c| encode_member_def(c));
    let key = &table.key;
    let key_count = key.len();
    let table_name = table.table.as_ref().map(|v| quote!(.table(#v)));
    let schema_name = table.schema.as_ref().map(|v| quote!(.schema(#v)));
    let row = columns.iter().map(|c| {
        let ident = &c.ident;
        let member = &c.name;
        quote!((#member, ::scribe::AsValue::as_value(::std::clone::Clone::clone(&self.#ident))))
    });
    let members = members_trait(&item, &table);
    quote! {
        impl ::scribe::Entity for #name {
            fn entity_def() -> &'static ::scribe::EntityDef {
                static MEMBERS: [::scribe::MemberDef; #members_count] = [#(#member_defs),*];
                static KEY: [&str; #key_count] = [#(#key),*];
                static DEF: ::scribe::EntityDef = ::scribe::EntityDef::new(#entity_name)
                    #table_name
                    #schema_name
                    .key(&KEY)
                    .members(&MEMBERS);
                &DEF
            }

            fn row(&self) -> ::scribe::Row {
                ::std::vec![#(#row),*].into_boxed_slice()
            }
        }
        #members
    }
    .into()
}
