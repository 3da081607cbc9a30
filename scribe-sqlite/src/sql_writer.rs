use scribe_core::{ColumnDescriptor, EntityDescriptor, Result, SqlWriter};

/// SQLite dialect: bare identifiers, generated key read back with `last_insert_rowid()`.
#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteSqlWriter {}

impl SqliteSqlWriter {
    /// Connection identifiers this dialect is registered under.
    pub const CONNECTION_TYPES: &'static [&'static str] = &["sqlite", "sqliteconnection"];

    pub fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for SqliteSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push_str(value);
    }

    fn write_insert(
        &self,
        out: &mut String,
        entity: &EntityDescriptor,
        columns: &[&ColumnDescriptor],
    ) -> Result<()> {
        self.write_insert_values(out, entity, columns);
        out.push_str("; select last_insert_rowid() id");
        Ok(())
    }
}
