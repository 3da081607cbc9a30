#[cfg(test)]
mod tests {
    use scribe::{DialectRegistry, SqlGenerator, SqlWriter};
    use scribe_sqlite::SqliteSqlWriter;
    use scribe_tests::{Product, execute_tests, init_logs};

    #[test]
    fn sqlite() {
        init_logs();
        execute_tests(&SqliteSqlWriter::new());
    }

    #[test]
    fn identifiers() {
        let writer = SqliteSqlWriter::new();
        assert_eq!(writer.quote_identifier("Products"), "Products");
        assert_eq!(writer.prefix_parameter("Id"), "@Id");
    }

    #[test]
    fn insert() {
        init_logs();
        let generator = SqlGenerator::default();
        let statement = generator
            .insert(&SqliteSqlWriter::new(), &Product::sample())
            .expect("Could not generate the insert statement");
        assert_eq!(
            &*statement.sql,
            "insert into Products (name, CategoryId, price, discontinued, notes) \
             values (@name, @category_id, @price, @discontinued, @notes); \
             select last_insert_rowid() id"
        );
    }

    #[test]
    fn paging() {
        init_logs();
        let generator = SqlGenerator::default();
        let writer = SqliteSqlWriter::new();
        let statement = generator
            .get_paged::<Product>(&writer, 2, 10)
            .expect("Could not generate the paged statement");
        assert_eq!(
            &*statement.sql,
            "select * from Products order by Products.id limit 10 offset 10"
        );
        let statement = generator
            .any::<Product>(&writer)
            .expect("Could not generate the any statement");
        assert_eq!(&*statement.sql, "select 1 from Products limit 1");
    }

    #[test]
    fn registry() {
        let registry =
            DialectRegistry::new().register(SqliteSqlWriter::CONNECTION_TYPES, SqliteSqlWriter::new());
        for connection in ["SqliteConnection", "sqlite://data.db", "SQLITE"] {
            assert_eq!(
                registry.resolve(connection).dialect_id(),
                SqliteSqlWriter::new().dialect_id(),
                "{connection}"
            );
        }
    }
}
