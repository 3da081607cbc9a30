use crate::short_type_name;
use std::{
    any::{TypeId, type_name},
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
};

/// Identity of a dialect: the concrete [`crate::SqlWriter`] type, never the instance.
#[derive(Clone, Copy)]
pub struct DialectId {
    id: TypeId,
    name: &'static str,
}

impl DialectId {
    pub fn of<W: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<W>(),
            name: short_type_name(type_name::<W>()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for DialectId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DialectId {}

impl Hash for DialectId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for DialectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Display for DialectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
