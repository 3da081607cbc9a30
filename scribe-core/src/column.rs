use crate::Error;
use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt, quote};
use std::str::FromStr;

/// How the database produces the value of a column.
///
/// Only `None` columns are written by `insert` and full `update` statements.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationStrategy {
    /// Value supplied by the application.
    #[default]
    None,
    /// Generated on insert (auto increment, identity, serial).
    Identity,
    /// Computed by the database on every write.
    Computed,
}

impl FromStr for GenerationStrategy {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "none" => GenerationStrategy::None,
            "identity" => GenerationStrategy::Identity,
            "computed" => GenerationStrategy::Computed,
            _ => {
                return Err(Error::msg(format!(
                    "Unknown generation strategy `{s}`, expected one of: none, identity, computed"
                )));
            }
        })
    }
}

impl ToTokens for GenerationStrategy {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.append_all(match self {
            GenerationStrategy::None => quote!(::scribe::GenerationStrategy::None),
            GenerationStrategy::Identity => quote!(::scribe::GenerationStrategy::Identity),
            GenerationStrategy::Computed => quote!(::scribe::GenerationStrategy::Computed),
        });
    }
}

/// Declared mapping of one entity member, the raw input of the metadata resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberDef {
    /// Rust field name.
    pub name: &'static str,
    /// Explicit column name.
    pub column: Option<&'static str>,
    /// Member level key flag.
    pub key: bool,
    /// Explicit generation strategy, resolvers pick the default when absent.
    pub generated: Option<GenerationStrategy>,
    /// Name of the entity type this member references.
    pub foreign_key: Option<&'static str>,
    pub nullable: bool,
    pub boolean: bool,
}

impl MemberDef {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            column: None,
            key: false,
            generated: None,
            foreign_key: None,
            nullable: false,
            boolean: false,
        }
    }

    pub const fn column(mut self, column: &'static str) -> Self {
        self.column = Some(column);
        self
    }

    pub const fn key(mut self) -> Self {
        self.key = true;
        self
    }

    pub const fn generated(mut self, generated: GenerationStrategy) -> Self {
        self.generated = Some(generated);
        self
    }

    pub const fn foreign_key(mut self, entity: &'static str) -> Self {
        self.foreign_key = Some(entity);
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn boolean(mut self) -> Self {
        self.boolean = true;
        self
    }
}
