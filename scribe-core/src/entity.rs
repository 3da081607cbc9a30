use crate::{MemberDef, Value};
use std::{
    any::TypeId,
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
};

/// Values of an entity instance, keyed by member name, in declaration order.
pub type Row = Box<[(&'static str, Value)]>;

/// Static declaration of an entity: type name, optional table and schema, keys and members.
///
/// Usually emitted by `#[derive(Entity)]`, it can also be written by hand:
/// ```rust
/// use scribe_core::{EntityDef, MemberDef};
/// static MEMBERS: [MemberDef; 2] = [MemberDef::new("id").key(), MemberDef::new("total")];
/// static ORDER: EntityDef = EntityDef::new("Order").table("orders").members(&MEMBERS);
/// assert_eq!(ORDER.member("total").map(|v| v.name), Some("total"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDef {
    /// Rust type name, without the module path.
    pub name: &'static str,
    pub table: Option<&'static str>,
    pub schema: Option<&'static str>,
    /// Entity level key list, member names.
    pub key: &'static [&'static str],
    pub members: &'static [MemberDef],
}

impl EntityDef {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            table: None,
            schema: None,
            key: &[],
            members: &[],
        }
    }

    pub const fn table(mut self, table: &'static str) -> Self {
        self.table = Some(table);
        self
    }

    pub const fn schema(mut self, schema: &'static str) -> Self {
        self.schema = Some(schema);
        self
    }

    pub const fn key(mut self, key: &'static [&'static str]) -> Self {
        self.key = key;
        self
    }

    pub const fn members(mut self, members: &'static [MemberDef]) -> Self {
        self.members = members;
        self
    }

    pub fn member(&self, name: &str) -> Option<&'static MemberDef> {
        self.members.iter().find(|v| v.name == name)
    }
}

/// A type mapped to a table.
pub trait Entity: 'static {
    fn entity_def() -> &'static EntityDef;

    /// Current values of every member.
    fn row(&self) -> Row;

    fn entity_type() -> EntityType
    where
        Self: Sized,
    {
        EntityType::of::<Self>()
    }
}

/// Runtime handle of an entity type, compared by `TypeId`.
#[derive(Clone, Copy)]
pub struct EntityType {
    id: TypeId,
    def: fn() -> &'static EntityDef,
}

impl EntityType {
    pub fn of<E: Entity>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            def: E::entity_def,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn def(&self) -> &'static EntityDef {
        (self.def)()
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EntityType {}

impl Hash for EntityType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for EntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
