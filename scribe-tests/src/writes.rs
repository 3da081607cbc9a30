use crate::{Enrollment, Product, ProductMembers, Table};
use rust_decimal::Decimal;
use scribe::{DynamicUpdate, Operand, SqlGenerator, SqlWriter, Value};

pub fn writes(writer: &dyn SqlWriter) {
    let generator = SqlGenerator::default();
    let products = Table::new(writer, None, "Products");
    let q = |name: &str| writer.quote_identifier(name);
    let p = |name: &str| writer.prefix_parameter(name);
    let product = Product::sample();

    // Insert skips generated and computed columns
    let statement = generator
        .insert(writer, &product)
        .expect("Could not generate the insert statement");
    let values = format!(
        "insert into {} ({}, {}, {}, {}, {}) values ({}, {}, {}, {}, {})",
        products,
        q("name"),
        q("CategoryId"),
        q("price"),
        q("discontinued"),
        q("notes"),
        p("name"),
        p("category_id"),
        p("price"),
        p("discontinued"),
        p("notes"),
    );
    assert!(
        statement.sql.contains(&values),
        "`{}` does not contain `{}`",
        statement.sql,
        values
    );
    assert_eq!(
        statement.parameters.names().collect::<Vec<_>>(),
        ["name", "category_id", "price", "discontinued", "notes"]
    );
    assert_eq!(
        statement.parameters.get("price"),
        Some(&Value::Decimal(Some(Decimal::new(1999, 2))))
    );
    assert_eq!(
        statement.parameters.get("notes"),
        Some(&Value::Varchar(None))
    );
    assert!(!statement.sql.contains(&q("updated_at")));
    assert!(!statement.sql.contains(&q("label")));

    // Insert of a composite key without generation
    let enrollment = Enrollment {
        student_id: 1,
        course_id: 2,
        grade: None,
    };
    let statement = generator
        .insert(writer, &enrollment)
        .expect("Could not generate the insert statement");
    assert_eq!(
        statement.parameters.names().collect::<Vec<_>>(),
        ["student_id", "course_id", "grade"]
    );

    // Full update
    let statement = generator
        .update(writer, &product)
        .expect("Could not generate the update statement");
    let assignment = |column: &str, member: &str| format!("{} = {}", products.column(column), p(member));
    assert_eq!(
        &*statement.sql,
        format!(
            "update {} set {}, {}, {}, {}, {} where {}",
            products,
            assignment("name", "name"),
            assignment("CategoryId", "category_id"),
            assignment("price", "price"),
            assignment("discontinued", "discontinued"),
            assignment("notes", "notes"),
            assignment("id", "id"),
        )
    );
    assert_eq!(statement.parameters.len(), 6);
    assert_eq!(statement.parameters.get("id"), Some(&Value::Int64(Some(7))));

    // Dynamic update, predicate first
    let update = DynamicUpdate::new()
        .set(Product::category_id, Product::category_id * 2)
        .set(Product::name, "renamed")
        .filter(Product::id.eq(7));
    let statement = generator
        .update_where(writer, &update)
        .expect("Could not generate the dynamic update");
    assert_eq!(
        &*statement.sql,
        format!(
            "update {} set {} = {} * {}, {} = {} where {} = {}",
            products,
            products.column("CategoryId"),
            products.column("CategoryId"),
            p("p2"),
            products.column("name"),
            p("p3"),
            products.column("id"),
            p("p1"),
        )
    );
    assert_eq!(
        statement.parameters.iter().collect::<Vec<_>>(),
        [
            ("p1", &Value::Int32(Some(7))),
            ("p2", &Value::Int32(Some(2))),
            ("p3", &Value::Varchar(Some("renamed".into()))),
        ]
    );
    let error = generator
        .update_where(writer, &DynamicUpdate::<Product>::new())
        .expect_err("Dynamic update without assignments must fail");
    assert!(error.to_string().contains("assignment"));
    let update = DynamicUpdate::new()
        .set(
            Product::category_id,
            Product::category_id - (Operand::<Product>::from(i64::MIN) - 1_i64),
        )
        .filter(Product::id.eq(7));
    let statement = generator
        .update_where(writer, &update)
        .expect("Could not generate the dynamic update");
    assert_eq!(
        &*statement.sql,
        format!(
            "update {} set {} = {} - ({} - {}) where {} = {}",
            products,
            products.column("CategoryId"),
            products.column("CategoryId"),
            p("p2"),
            p("p3"),
            products.column("id"),
            p("p1"),
        )
    );

    // Delete
    let statement = generator
        .delete(writer, &product)
        .expect("Could not generate the delete statement");
    assert_eq!(
        &*statement.sql,
        format!("delete from {} where {}", products, assignment("id", "id"))
    );
    let statement = generator
        .delete_where::<Product>(writer, Product::discontinued)
        .expect("Could not generate the delete statement");
    assert_eq!(
        &*statement.sql,
        format!(
            "delete from {} where {} = '1'",
            products,
            products.column("discontinued")
        )
    );
    let statement = generator
        .delete_all::<Product>(writer)
        .expect("Could not generate the delete statement");
    assert_eq!(&*statement.sql, format!("delete from {}", products));
}
