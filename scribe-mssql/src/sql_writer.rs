use scribe_core::{
    ColumnDescriptor, EntityDescriptor, PatternKind, Result, SqlWriter, paging_bounds,
    write_integer,
};

fn write_bracketed(writer: &dyn SqlWriter, out: &mut String, value: &str) {
    out.push('[');
    writer.write_escaped(out, value, ']', "]]");
    out.push(']');
}

fn write_plus_concat(out: &mut String, kind: PatternKind, operand: &str) {
    if kind.prefix_wildcard() {
        out.push_str("'%' + ");
    }
    out.push_str(operand);
    if kind.suffix_wildcard() {
        out.push_str(" + '%'");
    }
}

fn write_offset_fetch(writer: &dyn SqlWriter, out: &mut String, order_by: &str, page: i64, page_size: u32) {
    let (offset, size) = paging_bounds(page, page_size);
    writer.write_order_by(out, order_by);
    out.push_str(" offset ");
    write_integer!(out, offset);
    out.push_str(" rows fetch next ");
    // `fetch next 0 rows` is rejected by SQL Server
    write_integer!(out, size.max(1));
    out.push_str(" rows only");
}

fn write_fetch_first(writer: &dyn SqlWriter, out: &mut String, count: u32) {
    writer.write_paging(out, "1", 1, count);
}

/// SQL Server dialect: bracketed identifiers, `offset ... fetch` paging.
#[derive(Default, Debug, Clone, Copy)]
pub struct SqlServerSqlWriter {}

impl SqlServerSqlWriter {
    /// Connection identifiers this dialect is registered under.
    pub const CONNECTION_TYPES: &'static [&'static str] =
        &["mssql", "sqlserver", "sqlconnection"];

    pub fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for SqlServerSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        write_bracketed(self, out, value);
    }

    fn write_pattern_concat(&self, out: &mut String, kind: PatternKind, operand: &str) {
        write_plus_concat(out, kind, operand);
    }

    fn write_insert(
        &self,
        out: &mut String,
        entity: &EntityDescriptor,
        columns: &[&ColumnDescriptor],
    ) -> Result<()> {
        out.push_str("set nocount on ");
        self.write_insert_values(out, entity, columns);
        out.push_str("; select scope_identity()");
        Ok(())
    }

    fn write_paging(&self, out: &mut String, order_by: &str, page: i64, page_size: u32) {
        write_offset_fetch(self, out, order_by, page, page_size);
    }

    fn write_limit(&self, out: &mut String, count: u32) {
        write_fetch_first(self, out, count);
    }
}

/// SQL Server Compact Edition, identity read back through `@@IDENTITY`.
#[derive(Default, Debug, Clone, Copy)]
pub struct SqlServerCeSqlWriter {}

impl SqlServerCeSqlWriter {
    /// Connection identifiers this dialect is registered under.
    pub const CONNECTION_TYPES: &'static [&'static str] = &["sqlce", "sqlceconnection"];

    pub fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for SqlServerCeSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        write_bracketed(self, out, value);
    }

    fn write_pattern_concat(&self, out: &mut String, kind: PatternKind, operand: &str) {
        write_plus_concat(out, kind, operand);
    }

    fn write_insert(
        &self,
        out: &mut String,
        entity: &EntityDescriptor,
        columns: &[&ColumnDescriptor],
    ) -> Result<()> {
        self.write_insert_values(out, entity, columns);
        out.push_str("; select @@IDENTITY");
        Ok(())
    }

    fn write_paging(&self, out: &mut String, order_by: &str, page: i64, page_size: u32) {
        write_offset_fetch(self, out, order_by, page, page_size);
    }

    fn write_limit(&self, out: &mut String, count: u32) {
        write_fetch_first(self, out, count);
    }
}
