use thiserror::Error;

/// Misconfiguration or misuse detected while generating a statement.
///
/// Errors are returned wrapped in [`crate::Error`], use `downcast_ref::<QueryError>()` to inspect them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No key column could be found on the entity.
    #[error(
        "Entity `{entity}` has no key column: mark one with `#[scribe(key)]` or declare a member named `id`"
    )]
    KeyResolution { entity: &'static str },

    /// Member-level and entity-level key declarations disagree.
    #[error(
        "Entity `{entity}` declares conflicting keys: members {members:?} are marked as key while the entity lists {listed:?}"
    )]
    AmbiguousKeyAnnotation {
        entity: &'static str,
        members: Vec<&'static str>,
        listed: Vec<&'static str>,
    },

    /// No relation between the two entities could be derived.
    #[error(
        "Could not resolve a foreign key between `{entity}` and `{related}`: declare one with `#[scribe(foreign_key = \"...\")]` or name it `<Type>Id`"
    )]
    ForeignKeyResolution {
        entity: &'static str,
        related: &'static str,
    },

    /// A predicate references a member that is not mapped to a column.
    #[error("Member `{member}` of entity `{entity}` is not mapped to any column")]
    UnmappedMember {
        entity: &'static str,
        member: &'static str,
    },

    /// The number of key values does not match the number of key columns.
    #[error(
        "Entity `{entity}` has {expected} key column(s) but {supplied} key value(s) were supplied"
    )]
    CompositeKeyArgumentMismatch {
        entity: &'static str,
        expected: usize,
        supplied: usize,
    },

    /// The dialect must name a key column to return the generated value.
    #[error(
        "Dialect `{dialect}` needs a key column of entity `{entity}` to return the generated value, but none was resolved"
    )]
    MissingKeyForGeneratedReturn {
        entity: &'static str,
        dialect: &'static str,
    },
}
