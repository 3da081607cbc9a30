use scribe_core::SqlWriter;

/// PostgreSQL dialect: double quoted identifiers, generated keys read back with `returning`.
#[derive(Default, Debug, Clone, Copy)]
pub struct PostgresSqlWriter {}

impl PostgresSqlWriter {
    /// Connection identifiers this dialect is registered under.
    pub const CONNECTION_TYPES: &'static [&'static str] =
        &["postgres", "postgresql", "npgsqlconnection"];

    pub fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for PostgresSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }
}
