use crate::{
    BinaryOpType, ColumnDescriptor, Context, DialectId, EntityDescriptor, ForeignKeyRelation,
    PatternKind, QueryError, Result, TableRef, UnaryOpType, separated_by, short_type_name,
    write_integer,
};
use std::any::type_name;

/// Dialect printer, converting resolved metadata and compiled fragments into concrete SQL.
///
/// Every method has a default close to standard SQL, a dialect overrides only what differs.
pub trait SqlWriter: Send + Sync + 'static {
    fn as_dyn(&self) -> &dyn SqlWriter;

    /// Identity used in cache keys, the concrete writer type.
    fn dialect_id(&self) -> DialectId {
        DialectId::of::<Self>()
    }

    fn dialect_name(&self) -> &'static str {
        short_type_name(type_name::<Self>())
    }

    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(out, value, '"', "\"\"");
        out.push('"');
    }

    fn quote_identifier(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        self.write_identifier_quoted(&mut out, value);
        out
    }

    /// Table identifier, schema qualified when a schema is present.
    fn write_table_ref(&self, out: &mut String, value: &TableRef) {
        if let Some(schema) = &value.schema
            && !schema.is_empty()
        {
            self.write_identifier_quoted(out, schema);
            out.push('.');
        }
        self.write_identifier_quoted(out, &value.name);
    }

    fn write_column_ref(
        &self,
        context: &Context,
        out: &mut String,
        entity: &EntityDescriptor,
        column: &ColumnDescriptor,
    ) {
        if context.qualify_columns {
            out.push_str(&entity.table_identifier);
            out.push('.');
        }
        out.push_str(&column.identifier);
    }

    /// Named parameter placeholder.
    fn write_parameter(&self, out: &mut String, name: &str) {
        out.push('@');
        out.push_str(name);
    }

    fn prefix_parameter(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 1);
        self.write_parameter(&mut out, name);
        out
    }

    /// Freestanding boolean column, true when set.
    fn write_truthy(
        &self,
        context: &Context,
        out: &mut String,
        entity: &EntityDescriptor,
        column: &ColumnDescriptor,
    ) {
        self.write_column_ref(context, out, entity, column);
        out.push_str(" = '1'");
    }

    /// Freestanding constant condition.
    fn write_constant_condition(&self, out: &mut String, value: bool) {
        out.push_str(if value { "1 = 1" } else { "1 = 0" });
    }

    /// Precedence table for unary operators.
    fn expression_unary_op_precedence(&self, value: &UnaryOpType) -> i32 {
        match value {
            UnaryOpType::Negative => 1250,
            UnaryOpType::Not => 250,
        }
    }

    /// Precedence table for binary operators.
    fn expression_binary_op_precedence(&self, value: &BinaryOpType) -> i32 {
        match value {
            BinaryOpType::Or => 100,
            BinaryOpType::And => 200,
            BinaryOpType::Equal => 300,
            BinaryOpType::NotEqual => 300,
            BinaryOpType::Less => 300,
            BinaryOpType::Greater => 300,
            BinaryOpType::LessEqual => 300,
            BinaryOpType::GreaterEqual => 300,
            BinaryOpType::Subtraction => 800,
            BinaryOpType::Addition => 800,
            BinaryOpType::Multiplication => 900,
            BinaryOpType::Division => 900,
            BinaryOpType::Remainder => 900,
        }
    }

    /// Precedence of `like`.
    fn expression_pattern_precedence(&self) -> i32 {
        400
    }

    fn write_binary_op_infix(&self, out: &mut String, value: &BinaryOpType) {
        out.push_str(match value {
            BinaryOpType::Multiplication => " * ",
            BinaryOpType::Division => " / ",
            BinaryOpType::Remainder => " % ",
            BinaryOpType::Addition => " + ",
            BinaryOpType::Subtraction => " - ",
            BinaryOpType::Equal => " = ",
            BinaryOpType::NotEqual => " <> ",
            BinaryOpType::Less => " < ",
            BinaryOpType::LessEqual => " <= ",
            BinaryOpType::Greater => " > ",
            BinaryOpType::GreaterEqual => " >= ",
            BinaryOpType::And => " and ",
            BinaryOpType::Or => " or ",
        });
    }

    fn write_unary_op_prefix(&self, out: &mut String, value: &UnaryOpType) {
        out.push_str(match value {
            UnaryOpType::Negative => "-",
            UnaryOpType::Not => "not ",
        });
    }

    fn write_is_null(&self, out: &mut String, negated: bool) {
        out.push_str(if negated { " is not null" } else { " is null" });
    }

    fn write_like(&self, out: &mut String) {
        out.push_str(" like ");
    }

    /// Pattern built at query time from a non constant `operand`.
    fn write_pattern_concat(&self, out: &mut String, kind: PatternKind, operand: &str) {
        if kind.prefix_wildcard() {
            out.push_str("'%' || ");
        }
        out.push_str(operand);
        if kind.suffix_wildcard() {
            out.push_str(" || '%'");
        }
    }

    /// `select {columns} from {table}`, `*` when no column is given.
    fn write_select(&self, out: &mut String, entity: &EntityDescriptor, columns: &[&ColumnDescriptor]) {
        out.push_str("select ");
        if columns.is_empty() {
            out.push('*');
        } else {
            let context = Context::default();
            separated_by(
                out,
                columns,
                |out, v| self.write_column_ref(&context, out, entity, v),
                ", ",
            );
        }
        out.push_str(" from ");
        out.push_str(&entity.table_identifier);
    }

    fn write_count(&self, out: &mut String, entity: &EntityDescriptor) {
        out.push_str("select count(*) from ");
        out.push_str(&entity.table_identifier);
    }

    /// Existence probe, completed by [`SqlWriter::write_limit`].
    fn write_any(&self, out: &mut String, entity: &EntityDescriptor) {
        out.push_str("select 1 from ");
        out.push_str(&entity.table_identifier);
    }

    fn write_join(&self, out: &mut String, relation: &ForeignKeyRelation) {
        out.push_str(" left join ");
        out.push_str(&relation.joined_table);
        out.push_str(" on ");
        out.push_str(&relation.foreign_key);
        out.push_str(" = ");
        out.push_str(&relation.referenced_key);
    }

    /// `{T}.{k1} = @name1 and {T}.{k2} = @name2`, one name per key column.
    fn write_key_condition(&self, out: &mut String, entity: &EntityDescriptor, names: &[&str]) {
        let context = Context::default();
        separated_by(
            out,
            entity.keys.iter().zip(names),
            |out, (key, name)| {
                self.write_column_ref(&context, out, entity, key);
                out.push_str(" = ");
                self.write_parameter(out, name);
            },
            " and ",
        );
    }

    /// `insert into {T} ({columns}) values ({placeholders})`.
    fn write_insert_values(
        &self,
        out: &mut String,
        entity: &EntityDescriptor,
        columns: &[&ColumnDescriptor],
    ) {
        out.push_str("insert into ");
        out.push_str(&entity.table_identifier);
        out.push_str(" (");
        separated_by(out, columns, |out, v| out.push_str(&v.identifier), ", ");
        out.push_str(") values (");
        separated_by(out, columns, |out, v| self.write_parameter(out, v.member), ", ");
        out.push(')');
    }

    /// Insert statement that also retrieves the generated key.
    fn write_insert(
        &self,
        out: &mut String,
        entity: &EntityDescriptor,
        columns: &[&ColumnDescriptor],
    ) -> Result<()> {
        if entity.keys.is_empty() {
            return Err(QueryError::MissingKeyForGeneratedReturn {
                entity: entity.entity,
                dialect: self.dialect_name(),
            }
            .into());
        }
        self.write_insert_values(out, entity, columns);
        out.push_str(" returning ");
        separated_by(out, &entity.keys, |out, v| out.push_str(&v.identifier), ", ");
        Ok(())
    }

    /// `update {T} set {T}.{c} = @{member}, ...` without the condition.
    fn write_update(&self, out: &mut String, entity: &EntityDescriptor, columns: &[&ColumnDescriptor]) {
        let context = Context::default();
        out.push_str("update ");
        out.push_str(&entity.table_identifier);
        out.push_str(" set ");
        separated_by(
            out,
            columns,
            |out, v| {
                self.write_column_ref(&context, out, entity, v);
                out.push_str(" = ");
                self.write_parameter(out, v.member);
            },
            ", ",
        );
    }

    fn write_delete(&self, out: &mut String, entity: &EntityDescriptor) {
        out.push_str("delete from ");
        out.push_str(&entity.table_identifier);
    }

    fn write_where(&self, out: &mut String, condition: &str) {
        if !condition.is_empty() {
            out.push_str(" where ");
            out.push_str(condition);
        }
    }

    fn write_order_by(&self, out: &mut String, order_by: &str) {
        out.push_str(" order by ");
        out.push_str(order_by);
    }

    /// Order and page fragment, `page` is 1 based and smaller values count as the first page.
    fn write_paging(&self, out: &mut String, order_by: &str, page: i64, page_size: u32) {
        let (offset, size) = paging_bounds(page, page_size);
        self.write_order_by(out, order_by);
        out.push_str(" limit ");
        write_integer!(out, size);
        out.push_str(" offset ");
        write_integer!(out, offset);
    }

    /// Restrict the result to the first `count` rows.
    fn write_limit(&self, out: &mut String, count: u32) {
        out.push_str(" limit ");
        write_integer!(out, count);
    }
}

/// Offset and size of a page, `page` below 1 normalizes to 1.
pub fn paging_bounds(page: i64, page_size: u32) -> (u64, u32) {
    let page = page.max(1) as u64;
    ((page - 1).saturating_mul(page_size as u64), page_size)
}

/// Fallback dialect: standard SQL with double quoted identifiers.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter {}

impl GenericSqlWriter {
    pub fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }
}
