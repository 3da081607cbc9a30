use crate::{Category, Enrollment, Product, ProductMembers, Setting, Table};
use scribe::{QueryError, SqlGenerator, SqlWriter, Value};
use std::sync::Arc;

pub fn reads(writer: &dyn SqlWriter) {
    let generator = SqlGenerator::default();
    let products = Table::new(writer, None, "Products");
    let categories = Table::new(writer, None, "Categories");
    let enrollments = Table::new(writer, Some("school"), "enrollments");

    // Get
    let statement = generator
        .get::<Product>(writer, 42_i64)
        .expect("Could not generate the get statement");
    assert_eq!(
        &*statement.sql,
        format!(
            "select * from {} where {} = {}",
            products,
            products.column("id"),
            writer.prefix_parameter("Id")
        )
    );
    assert_eq!(statement.parameters.len(), 1);
    assert_eq!(statement.parameters.get("Id"), Some(&Value::Int64(Some(42))));
    let again = generator
        .get::<Product>(writer, 43_i64)
        .expect("Could not generate the get statement");
    assert!(Arc::ptr_eq(&statement.sql, &again.sql));
    assert_eq!(again.parameters.get("Id"), Some(&Value::Int64(Some(43))));

    // Get with composite key
    let statement = generator
        .get_by_ids::<Enrollment>(writer, [Value::from(10_i32), Value::from(20_i32)])
        .expect("Could not generate the composite get statement");
    assert_eq!(
        &*statement.sql,
        format!(
            "select * from {} where {} = {} and {} = {}",
            enrollments,
            enrollments.column("student_id"),
            writer.prefix_parameter("Id0"),
            enrollments.column("course_id"),
            writer.prefix_parameter("Id1"),
        )
    );
    assert_eq!(statement.parameters.names().collect::<Vec<_>>(), ["Id0", "Id1"]);
    let error = generator
        .get_by_ids::<Enrollment>(writer, [Value::from(10_i32)])
        .expect_err("One value for two key columns must fail");
    assert_eq!(
        error.downcast_ref::<QueryError>(),
        Some(&QueryError::CompositeKeyArgumentMismatch {
            entity: "Enrollment",
            expected: 2,
            supplied: 1,
        })
    );
    assert!(error.to_string().contains("Enrollment"));
    let error = generator
        .get::<Enrollment>(writer, 10)
        .expect_err("Single key lookup of a composite key entity must fail");
    assert!(matches!(
        error.downcast_ref::<QueryError>(),
        Some(QueryError::CompositeKeyArgumentMismatch {
            expected: 2,
            supplied: 1,
            ..
        })
    ));

    // Key resolution
    let error = generator
        .get::<Setting>(writer, "theme")
        .expect_err("Entity without key must fail");
    assert_eq!(
        error.downcast_ref::<QueryError>(),
        Some(&QueryError::KeyResolution { entity: "Setting" })
    );

    // GetAll, Project, ProjectAll
    let statement = generator
        .get_all::<Product>(writer)
        .expect("Could not generate the get all statement");
    assert_eq!(&*statement.sql, format!("select * from {}", products));
    assert!(statement.parameters.is_empty());
    let projection = format!(
        "select {}, {} from {}",
        categories.column("id"),
        categories.column("name"),
        categories
    );
    let statement = generator
        .project_all::<Category>(writer)
        .expect("Could not generate the project all statement");
    assert_eq!(&*statement.sql, projection);
    let statement = generator
        .project::<Category>(writer, 5_i64)
        .expect("Could not generate the project statement");
    assert_eq!(
        &*statement.sql,
        format!(
            "{} where {} = {}",
            projection,
            categories.column("id"),
            writer.prefix_parameter("Id")
        )
    );

    // Count and Any
    let statement = generator
        .count::<Product>(writer)
        .expect("Could not generate the count statement");
    assert_eq!(&*statement.sql, format!("select count(*) from {}", products));
    let statement = generator
        .any::<Product>(writer)
        .expect("Could not generate the any statement");
    let mut expected = format!("select 1 from {}", products);
    writer.write_limit(&mut expected, 1);
    assert_eq!(&*statement.sql, expected);
    let statement = generator
        .any_where::<Product>(writer, Product::discontinued)
        .expect("Could not generate the any statement");
    let mut expected = format!(
        "select 1 from {} where {} = '1'",
        products,
        products.column("discontinued")
    );
    writer.write_limit(&mut expected, 1);
    assert_eq!(&*statement.sql, expected);

    // Paging
    let statement = generator
        .get_paged::<Product>(writer, 3, 25)
        .expect("Could not generate the paged statement");
    let mut expected = format!("select * from {}", products);
    writer.write_paging(&mut expected, &products.column("id"), 3, 25);
    assert_eq!(&*statement.sql, expected);
    let first = generator
        .get_paged::<Product>(writer, 1, 25)
        .expect("Could not generate the paged statement");
    let zero = generator
        .get_paged::<Product>(writer, 0, 25)
        .expect("Could not generate the paged statement");
    assert_eq!(first.sql, zero.sql);
    let statement = generator
        .from::<Product>(writer)
        .filter(Product::price.ge(100))
        .order_by_descending(Product::price)
        .order_by(Product::name)
        .to_statement()
        .expect("Could not generate the ordered statement");
    assert_eq!(
        &*statement.sql,
        format!(
            "select * from {} where {} >= {} order by {} desc, {}",
            products,
            products.column("price"),
            writer.prefix_parameter("p1"),
            products.column("price"),
            products.column("name"),
        )
    );
    let statement = generator
        .from::<Product>(writer)
        .select(Product::id)
        .select(Product::name)
        .to_statement()
        .expect("Could not generate the projected statement");
    assert_eq!(
        &*statement.sql,
        format!(
            "select {}, {} from {}",
            products.column("id"),
            products.column("name"),
            products
        )
    );
}
