mod entities;
mod joins;
mod predicates;
mod reads;
mod writes;

pub use entities::*;
use joins::joins;
use log::LevelFilter;
use predicates::predicates;
use reads::reads;
use scribe::{SqlWriter, TableRef};
use std::{env, fmt};
use writes::writes;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Dialect agnostic checks, expected text is built through the quoting rules of `writer`.
pub fn execute_tests(writer: &dyn SqlWriter) {
    reads(writer);
    predicates(writer);
    writes(writer);
    joins(writer);
}

/// Table identifier as written by a dialect.
pub struct Table<'a> {
    writer: &'a dyn SqlWriter,
    identifier: String,
}

impl<'a> Table<'a> {
    pub fn new(writer: &'a dyn SqlWriter, schema: Option<&str>, name: &str) -> Self {
        let mut table = TableRef::new(name);
        if let Some(schema) = schema {
            table = table.with_schema(schema);
        }
        let mut identifier = String::new();
        writer.write_table_ref(&mut identifier, &table);
        Self { writer, identifier }
    }

    /// Qualified column identifier.
    pub fn column(&self, name: &str) -> String {
        format!("{}.{}", self.identifier, self.writer.quote_identifier(name))
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}
