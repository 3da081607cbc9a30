use quote::ToTokens;
use scribe_core::GenerationStrategy;
use syn::{
    Field, GenericArgument, Ident, LitStr, PathArguments, Type, ext::IdentExt, parse::ParseBuffer,
};

pub(crate) struct ColumnMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    /// Member name, the field name without the raw prefix.
    pub(crate) name: String,
    pub(crate) column: Option<String>,
    pub(crate) key: bool,
    pub(crate) generated: Option<GenerationStrategy>,
    pub(crate) foreign_key: Option<String>,
    pub(crate) nullable: bool,
    pub(crate) boolean: bool,
    pub(crate) ignore: bool,
}

/// Type wrapped by `Option`, if `ty` is one.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    match arguments.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn is_bool(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.path.is_ident("bool"))
}

pub fn decode_column(field: &Field) -> ColumnMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Entity fields are expected to have a name");
    let inner = option_inner(&field.ty);
    let mut metadata = ColumnMetadata {
        name: ident.unraw().to_string(),
        ident,
        ty: field.ty.clone(),
        column: None,
        key: false,
        generated: None,
        foreign_key: None,
        nullable: inner.is_some(),
        boolean: is_bool(inner.unwrap_or(&field.ty)),
        ignore: false,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("scribe") {
            let Ok(list) = meta.require_list() else {
                panic!(
                    "Error while parsing `scribe`, use it like: `#[scribe(attribute = value, ...)]`",
                );
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("column") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `column`, use it like: `#[scribe(column = \"my_column\")]`");
                    };
                    metadata.column = Some(v.value());
                } else if arg.path.is_ident("key") {
                    metadata.key = true;
                } else if arg.path.is_ident("generated") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `generated`, use it like: `#[scribe(generated = \"identity\")]`");
                    };
                    match v.value().parse::<GenerationStrategy>() {
                        Ok(v) => metadata.generated = Some(v),
                        Err(e) => panic!("{e}"),
                    }
                } else if arg.path.is_ident("foreign_key") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `foreign_key`, use it like: `#[scribe(foreign_key = \"Category\")]`");
                    };
                    metadata.foreign_key = Some(v.value());
                } else if arg.path.is_ident("ignore") {
                    metadata.ignore = true;
                } else {
                    panic!(
                        "Unknown attribute `{}` inside scribe macro",
                        arg.path.to_token_stream()
                    );
                }
                Ok(())
            });
        }
    }
    metadata
}
