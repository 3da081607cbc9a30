use crate::{Product, ProductMembers, Table};
use rust_decimal::Decimal;
use scribe::{
    Expr, Member, Operand, PatternKind, QueryError, SqlGenerator, SqlWriter, Value, compile,
};

pub fn predicates(writer: &dyn SqlWriter) {
    let generator = SqlGenerator::default();
    let products = Table::new(writer, None, "Products");
    let entity = generator
        .describe::<Product>(writer)
        .expect("Could not describe Product");
    let p = |name: &str| writer.prefix_parameter(name);
    let compiled = |predicate: scribe::Predicate<Product>| {
        compile(writer, &entity, predicate.expr()).expect("Could not compile the predicate")
    };

    // Conjunction, every constant is a parameter
    let predicate = Product::name.eq("Lamp") & Product::price.gt(Decimal::new(10, 0));
    let result = compiled(predicate.clone());
    assert_eq!(
        result.sql,
        format!(
            "({} = {}) and ({} > {})",
            products.column("name"),
            p("p1"),
            products.column("price"),
            p("p2")
        )
    );
    assert_eq!(
        result.parameters.get("p1"),
        Some(&Value::Varchar(Some("Lamp".into())))
    );
    assert_eq!(
        result.parameters.get("p2"),
        Some(&Value::Decimal(Some(Decimal::new(10, 0))))
    );
    assert_eq!(compiled(predicate), result);

    // Bare boolean member in every freestanding position
    let discontinued = products.column("discontinued");
    assert_eq!(
        compiled(Product::discontinued.into()).sql,
        format!("{} = '1'", discontinued)
    );
    assert_eq!(
        compiled(!Product::discontinued).sql,
        format!("not ({} = '1')", discontinued)
    );
    assert_eq!(
        compiled(Product::discontinued | Product::id.lt(5)).sql,
        format!(
            "({} = '1') or ({} < {})",
            discontinued,
            products.column("id"),
            p("p1")
        )
    );

    // Constant predicates
    assert_eq!(compiled(true.into()).sql, "1 = 1");
    assert_eq!(compiled(false.into()).sql, "1 = 0");
    assert!(compiled(true.into()).parameters.is_empty());

    // Null comparisons
    let notes = products.column("notes");
    assert_eq!(
        compiled(Product::notes.eq(None::<String>)).sql,
        format!("{} is null", notes)
    );
    assert_eq!(
        compiled(Product::notes.is_not_null()).sql,
        format!("{} is not null", notes)
    );

    // Patterns, literal or captured
    let needle = String::from("ab");
    for (predicate, expected) in [
        (Product::name.contains("ab"), "%ab%"),
        (Product::name.starts_with(&needle), "ab%"),
        (Product::name.ends_with(needle.clone()), "%ab"),
    ] {
        let result = compiled(predicate);
        assert_eq!(
            result.sql,
            format!("{} like {}", products.column("name"), p("p1"))
        );
        assert_eq!(
            result.parameters.get("p1"),
            Some(&Value::Varchar(Some(expected.into())))
        );
    }
    let mut expected = format!("{} like ", products.column("name"));
    writer.write_pattern_concat(&mut expected, PatternKind::StartsWith, &notes);
    assert_eq!(compiled(Product::name.starts_with(Product::notes)).sql, expected);
    let error = compile(
        writer,
        &entity,
        Product::name.contains(42).expr(),
    )
    .expect_err("Pattern over a number must fail");
    assert!(error.to_string().contains("string"));

    // Constant subexpressions fold into one parameter
    let result = compiled(Product::id.eq(Operand::<Product>::from(2_i64) * 3_i64 + 1_i64));
    assert_eq!(
        result.sql,
        format!("{} = {}", products.column("id"), p("p1"))
    );
    assert_eq!(result.parameters.get("p1"), Some(&Value::Int64(Some(7))));

    // Arithmetic keeps precedence
    let result = compiled(Product::id.eq((Product::category_id + 1) * 2));
    assert_eq!(
        result.sql,
        format!(
            "{} = ({} + {}) * {}",
            products.column("id"),
            products.column("CategoryId"),
            p("p1"),
            p("p2")
        )
    );

    // Comparisons between arithmetic operands
    let result = compiled((Product::category_id * 2).gt(10));
    assert_eq!(
        result.sql,
        format!("{} * {} > {}", products.column("CategoryId"), p("p1"), p("p2"))
    );
    assert_eq!(
        compiled((Product::id + Product::category_id).le(Product::price)).sql,
        format!(
            "{} + {} <= {}",
            products.column("id"),
            products.column("CategoryId"),
            products.column("price")
        )
    );
    assert_eq!(
        compiled((Product::category_id - 1).is_null()).sql,
        format!("{} - {} is null", products.column("CategoryId"), p("p1"))
    );

    // Constants that cannot fold keep their grouping
    let result = compiled(Product::id.eq(
        Product::category_id - (Operand::<Product>::from(i64::MIN) - 1_i64),
    ));
    assert_eq!(
        result.sql,
        format!(
            "{} = {} - ({} - {})",
            products.column("id"),
            products.column("CategoryId"),
            p("p1"),
            p("p2")
        )
    );
    assert_eq!(result.parameters.get("p1"), Some(&Value::Int64(Some(i64::MIN))));
    assert_eq!(result.parameters.get("p2"), Some(&Value::Int64(Some(1))));
    let result = compiled((Product::id * (Operand::<Product>::from(10_i64) / 0_i64)).gt(0));
    assert_eq!(
        result.sql,
        format!(
            "{} * ({} / {}) > {}",
            products.column("id"),
            p("p1"),
            p("p2"),
            p("p3")
        )
    );

    // Only boolean members stand alone as a condition
    let error = compile(writer, &entity, &Expr::column("name"))
        .expect_err("A text member is not a condition");
    assert!(error.to_string().contains("not boolean"));

    // Unknown members
    let missing: Member<Product, i64> = Member::new("missing");
    let error = compile(writer, &entity, missing.eq(1).expr())
        .expect_err("Unmapped member must fail");
    assert_eq!(
        error.downcast_ref::<QueryError>(),
        Some(&QueryError::UnmappedMember {
            entity: "Product",
            member: "missing",
        })
    );

    // Select, filters combined with and / or
    let statement = generator
        .from::<Product>(writer)
        .filter(Product::price.lt(10))
        .and_filter(!Product::discontinued)
        .or_filter(Product::id.eq(1))
        .to_statement()
        .expect("Could not generate the select statement");
    assert_eq!(
        &*statement.sql,
        format!(
            "select * from {} where (({} < {}) and (not ({} = '1'))) or ({} = {})",
            products,
            products.column("price"),
            p("p1"),
            discontinued,
            products.column("id"),
            p("p2"),
        )
    );
    let statement = generator
        .count_where::<Product>(writer, Product::name.starts_with("L"))
        .expect("Could not generate the count statement");
    assert_eq!(
        &*statement.sql,
        format!(
            "select count(*) from {} where {} like {}",
            products,
            products.column("name"),
            p("p1")
        )
    );
    assert_eq!(
        statement.parameters.get("p1"),
        Some(&Value::Varchar(Some("L%".into())))
    );
}
