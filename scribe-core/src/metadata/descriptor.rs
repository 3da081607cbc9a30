use crate::{GenerationStrategy, QueryError, Result};
use std::ops::Deref;

/// Resolved table name, optionally schema qualified.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub name: String,
    pub schema: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

/// Resolved mapping of one member to a column, for a given dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub member: &'static str,
    pub name: String,
    /// `name` quoted by the dialect.
    pub identifier: String,
    pub generation: GenerationStrategy,
    pub is_key: bool,
    pub nullable: bool,
    pub is_bool: bool,
}

impl ColumnDescriptor {
    /// Written by `insert` and full `update`.
    pub fn is_writable(&self) -> bool {
        self.generation == GenerationStrategy::None
    }
}

/// Key column, the generation strategy defaults to [`GenerationStrategy::Identity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColumnDescriptor(pub ColumnDescriptor);

impl KeyColumnDescriptor {
    pub fn new(mut column: ColumnDescriptor, generation: Option<GenerationStrategy>) -> Self {
        column.is_key = true;
        column.generation = generation.unwrap_or(GenerationStrategy::Identity);
        Self(column)
    }
}

impl Deref for KeyColumnDescriptor {
    type Target = ColumnDescriptor;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Member declared as referencing another entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyDeclaration {
    pub member: &'static str,
    pub target: &'static str,
}

/// Everything the generator needs to know about an entity, for one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Entity type name.
    pub entity: &'static str,
    pub table: TableRef,
    /// Table quoted by the dialect, schema included.
    pub table_identifier: String,
    /// Every mapped column, in declaration order, keys included.
    pub columns: Vec<ColumnDescriptor>,
    pub keys: Vec<KeyColumnDescriptor>,
    pub foreign_keys: Vec<ForeignKeyDeclaration>,
}

impl EntityDescriptor {
    pub fn column(&self, member: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|v| v.member == member)
    }

    /// Like [`EntityDescriptor::column`], failing with [`QueryError::UnmappedMember`].
    pub fn mapped_column(&self, member: &'static str) -> Result<&ColumnDescriptor> {
        self.column(member).ok_or_else(|| {
            QueryError::UnmappedMember {
                entity: self.entity,
                member,
            }
            .into()
        })
    }

    /// Columns written by `insert` and full `update`.
    pub fn writable_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|v| v.is_writable())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// The source entity holds the foreign key.
    OneToOne,
    /// The target entity holds the foreign key.
    OneToMany,
}

/// Resolved relation between a root entity and a joined one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRelation {
    pub source: &'static str,
    pub target: &'static str,
    pub kind: RelationKind,
    /// Table identifier of the joined entity.
    pub joined_table: String,
    /// Qualified identifier of the foreign key column.
    pub foreign_key: String,
    /// Qualified identifier of the referenced key column.
    pub referenced_key: String,
    /// The foreign key member is optional.
    pub nullable: bool,
}
