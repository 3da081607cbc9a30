#[cfg(test)]
mod tests {
    use scribe_core::{
        AsValue, BinaryOpType, ColumnDescriptor, Context, Entity, EntityDef, EntityDescriptor,
        Expr, GenerationStrategy, GenericSqlWriter, Member, MemberDef, PredicateCompiler,
        QueryError, Row, SqlGenerator, SqlWriter, TableRef, compile,
    };

    struct Order {
        id: i64,
        customer: String,
        total: f64,
    }

    static ORDER_MEMBERS: [MemberDef; 3] = [
        MemberDef::new("id").key(),
        MemberDef::new("customer").column("CustomerName"),
        MemberDef::new("total"),
    ];
    static ORDER: EntityDef = EntityDef::new("Order")
        .table("orders")
        .members(&ORDER_MEMBERS);

    impl Entity for Order {
        fn entity_def() -> &'static EntityDef {
            &ORDER
        }

        fn row(&self) -> Row {
            vec![
                ("id", self.id.as_value()),
                ("customer", self.customer.clone().as_value()),
                ("total", self.total.as_value()),
            ]
            .into_boxed_slice()
        }
    }

    impl Order {
        const CUSTOMER: Member<Order, String> = Member::new("customer");
        const TOTAL: Member<Order, f64> = Member::new("total");
    }

    fn column(member: &'static str, name: &str) -> ColumnDescriptor {
        ColumnDescriptor {
            member,
            name: name.into(),
            identifier: format!("\"{name}\""),
            generation: GenerationStrategy::None,
            is_key: false,
            nullable: false,
            is_bool: false,
        }
    }

    #[test]
    fn hand_registered_entity() {
        let generator = SqlGenerator::default();
        let writer = GenericSqlWriter::new();
        let statement = generator
            .get::<Order>(&writer, 3_i64)
            .expect("Could not generate the get statement");
        assert_eq!(
            &*statement.sql,
            "select * from \"orders\" where \"orders\".\"id\" = @Id"
        );
        let order = Order {
            id: 3,
            customer: "ACME".into(),
            total: 12.5,
        };
        let statement = generator
            .insert(&writer, &order)
            .expect("Could not generate the insert statement");
        assert_eq!(
            &*statement.sql,
            "insert into \"orders\" (\"CustomerName\", \"total\") values (@customer, @total) returning \"id\""
        );
        assert_eq!(statement.parameters.len(), 2);
        let statement = generator
            .select::<Order>(
                &writer,
                Order::CUSTOMER.starts_with("AC") & Order::TOTAL.ge(10.0),
            )
            .expect("Could not generate the select statement");
        assert_eq!(
            &*statement.sql,
            "select * from \"orders\" where (\"orders\".\"CustomerName\" like @p1) and (\"orders\".\"total\" >= @p2)"
        );
    }

    #[test]
    fn missing_key_for_returning() {
        let entity = EntityDescriptor {
            entity: "Log",
            table: TableRef::new("logs"),
            table_identifier: "\"logs\"".into(),
            columns: vec![column("message", "message")],
            keys: vec![],
            foreign_keys: vec![],
        };
        let writer = GenericSqlWriter::new();
        let columns: Vec<_> = entity.writable_columns().collect();
        let mut out = String::new();
        let error = writer
            .write_insert(&mut out, &entity, &columns)
            .expect_err("Returning requires a key column");
        assert_eq!(
            error.downcast_ref::<QueryError>(),
            Some(&QueryError::MissingKeyForGeneratedReturn {
                entity: "Log",
                dialect: "GenericSqlWriter",
            })
        );
    }

    #[test]
    fn unqualified_columns() {
        let entity = EntityDescriptor {
            entity: "Log",
            table: TableRef::new("logs").with_schema("audit"),
            table_identifier: "\"audit\".\"logs\"".into(),
            columns: vec![column("message", "Message"), column("level", "Level")],
            keys: vec![],
            foreign_keys: vec![],
        };
        let writer = GenericSqlWriter::new();
        let predicate = Expr::binary(
            BinaryOpType::Or,
            Expr::binary(BinaryOpType::Equal, Expr::column("level"), Expr::constant(3)),
            Expr::binary(
                BinaryOpType::NotEqual,
                Expr::column("message"),
                Expr::constant(None::<String>),
            ),
        );
        let mut context = Context::new(false);
        let mut out = String::new();
        PredicateCompiler::new(&writer, &entity, &mut context)
            .write_predicate(&mut out, &predicate)
            .expect("Could not compile the predicate");
        assert_eq!(out, "(\"Level\" = @p1) or (\"Message\" is not null)");
        assert_eq!(context.counter, 1);

        let compiled = compile(&writer, &entity, &predicate).expect("Could not compile the predicate");
        assert_eq!(
            compiled.sql,
            "(\"audit\".\"logs\".\"Level\" = @p1) or (\"audit\".\"logs\".\"Message\" is not null)"
        );
        assert_eq!(compiled, compile(&writer, &entity, &predicate).expect("Could not compile"));
    }
}
