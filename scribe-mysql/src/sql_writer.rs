use scribe_core::{
    ColumnDescriptor, EntityDescriptor, PatternKind, Result, SqlWriter, paging_bounds,
    write_integer,
};

/// MySQL and MariaDB dialect.
#[derive(Default, Debug, Clone, Copy)]
pub struct MySqlSqlWriter {}

impl MySqlSqlWriter {
    /// Connection identifiers this dialect is registered under.
    pub const CONNECTION_TYPES: &'static [&'static str] =
        &["mysql", "mariadb", "mysqlconnection"];

    pub fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for MySqlSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('`');
        self.write_escaped(out, value, '`', "``");
        out.push('`');
    }

    fn write_pattern_concat(&self, out: &mut String, kind: PatternKind, operand: &str) {
        out.push_str("concat(");
        if kind.prefix_wildcard() {
            out.push_str("'%', ");
        }
        out.push_str(operand);
        if kind.suffix_wildcard() {
            out.push_str(", '%'");
        }
        out.push(')');
    }

    fn write_insert(
        &self,
        out: &mut String,
        entity: &EntityDescriptor,
        columns: &[&ColumnDescriptor],
    ) -> Result<()> {
        self.write_insert_values(out, entity, columns);
        out.push_str("; select LAST_INSERT_ID() id");
        Ok(())
    }

    fn write_paging(&self, out: &mut String, order_by: &str, page: i64, page_size: u32) {
        let (offset, size) = paging_bounds(page, page_size);
        self.write_order_by(out, order_by);
        out.push_str(" limit ");
        write_integer!(out, offset);
        out.push_str(", ");
        write_integer!(out, size);
    }
}
