#[cfg(test)]
mod tests {
    use scribe::{DialectRegistry, DynamicUpdate, SqlGenerator, SqlWriter};
    use scribe_mssql::{SqlServerCeSqlWriter, SqlServerSqlWriter};
    use scribe_tests::{Product, ProductMembers, execute_tests, init_logs};

    #[test]
    fn sql_server() {
        init_logs();
        execute_tests(&SqlServerSqlWriter::new());
    }

    #[test]
    fn sql_server_ce() {
        init_logs();
        execute_tests(&SqlServerCeSqlWriter::new());
    }

    #[test]
    fn identifiers() {
        let writer = SqlServerSqlWriter::new();
        assert_eq!(writer.quote_identifier("Products"), "[Products]");
        assert_eq!(writer.quote_identifier("odd]name"), "[odd]]name]");
        assert_eq!(SqlServerCeSqlWriter::new().quote_identifier("a b"), "[a b]");
    }

    #[test]
    fn insert() {
        init_logs();
        let generator = SqlGenerator::default();
        let product = Product::sample();
        let statement = generator
            .insert(&SqlServerSqlWriter::new(), &product)
            .expect("Could not generate the insert statement");
        assert_eq!(
            &*statement.sql,
            "set nocount on insert into [Products] ([name], [CategoryId], [price], [discontinued], [notes]) \
             values (@name, @category_id, @price, @discontinued, @notes); select scope_identity()"
        );
        let statement = generator
            .insert(&SqlServerCeSqlWriter::new(), &product)
            .expect("Could not generate the insert statement");
        assert_eq!(
            &*statement.sql,
            "insert into [Products] ([name], [CategoryId], [price], [discontinued], [notes]) \
             values (@name, @category_id, @price, @discontinued, @notes); select @@IDENTITY"
        );
    }

    #[test]
    fn paging() {
        init_logs();
        let generator = SqlGenerator::default();
        let writer = SqlServerSqlWriter::new();
        let statement = generator
            .get_paged::<Product>(&writer, 2, 50)
            .expect("Could not generate the paged statement");
        assert_eq!(
            &*statement.sql,
            "select * from [Products] order by [Products].[id] offset 50 rows fetch next 50 rows only"
        );
        let statement = generator
            .get_paged::<Product>(&SqlServerCeSqlWriter::new(), 3, 0)
            .expect("Could not generate the paged statement");
        assert_eq!(
            &*statement.sql,
            "select * from [Products] order by [Products].[id] offset 0 rows fetch next 1 rows only"
        );
        let statement = generator
            .any_where::<Product>(&writer, Product::discontinued)
            .expect("Could not generate the any statement");
        assert_eq!(
            &*statement.sql,
            "select 1 from [Products] where [Products].[discontinued] = '1' \
             order by 1 offset 0 rows fetch next 1 rows only"
        );
    }

    #[test]
    fn dynamic_update() {
        let generator = SqlGenerator::default();
        let update = DynamicUpdate::new()
            .set(Product::category_id, Product::category_id * 2)
            .set(Product::name, "renamed")
            .filter(Product::id.eq(7));
        let statement = generator
            .update_where(&SqlServerSqlWriter::new(), &update)
            .expect("Could not generate the dynamic update");
        assert_eq!(
            &*statement.sql,
            "update [Products] set [Products].[CategoryId] = [Products].[CategoryId] * @p2, \
             [Products].[name] = @p3 where [Products].[id] = @p1"
        );
    }

    #[test]
    fn column_pattern() {
        let generator = SqlGenerator::default();
        let statement = generator
            .select::<Product>(&SqlServerSqlWriter::new(), Product::name.contains(Product::notes))
            .expect("Could not generate the select statement");
        assert_eq!(
            &*statement.sql,
            "select * from [Products] where [Products].[name] like '%' + [Products].[notes] + '%'"
        );
    }

    #[test]
    fn registry() {
        let registry = DialectRegistry::new()
            .register(SqlServerSqlWriter::CONNECTION_TYPES, SqlServerSqlWriter::new())
            .register(SqlServerCeSqlWriter::CONNECTION_TYPES, SqlServerCeSqlWriter::new());
        assert_eq!(
            registry.resolve("SqlConnection").dialect_name(),
            "SqlServerSqlWriter"
        );
        assert_eq!(
            registry.resolve("SqlCeConnection").dialect_name(),
            "SqlServerCeSqlWriter"
        );
        assert_eq!(
            registry.resolve("mssql://sa@localhost/shop").dialect_name(),
            "SqlServerSqlWriter"
        );
    }
}
