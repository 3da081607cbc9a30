use crate::{Category, Enrollment, Product, ProductMembers, Review, Table};
use scribe::{Entity, QueryError, SqlGenerator, SqlWriter};

pub fn joins(writer: &dyn SqlWriter) {
    let generator = SqlGenerator::default();
    let products = Table::new(writer, None, "Products");
    let categories = Table::new(writer, None, "Categories");
    let reviews = Table::new(writer, None, "Reviews");
    let includes = [Category::entity_type(), Review::entity_type()];
    let joins = format!(
        " left join {} on {} = {} left join {} on {} = {}",
        categories,
        products.column("CategoryId"),
        categories.column("id"),
        reviews,
        reviews.column("product_id"),
        products.column("id"),
    );

    let statement = generator
        .get_all_joined::<Product>(writer, &includes)
        .expect("Could not generate the joined statement");
    assert_eq!(&*statement.sql, format!("select * from {}{}", products, joins));
    assert_eq!(statement.sql.matches("left join").count(), 2);

    let statement = generator
        .get_joined::<Product>(writer, &includes, 9_i64)
        .expect("Could not generate the joined statement");
    assert_eq!(
        &*statement.sql,
        format!(
            "select * from {}{} where {} = {}",
            products,
            joins,
            products.column("id"),
            writer.prefix_parameter("Id")
        )
    );

    // Different include order is a different statement
    let statement = generator
        .get_all_joined::<Product>(writer, &[Review::entity_type(), Category::entity_type()])
        .expect("Could not generate the joined statement");
    assert!(
        statement.sql.find(&*reviews.to_string()) < statement.sql.find(&*categories.to_string())
    );

    let statement = generator
        .select_joined::<Product>(writer, &includes[..1], Product::name.ne("x"))
        .expect("Could not generate the joined statement");
    assert_eq!(
        &*statement.sql,
        format!(
            "select * from {} left join {} on {} = {} where {} <> {}",
            products,
            categories,
            products.column("CategoryId"),
            categories.column("id"),
            products.column("name"),
            writer.prefix_parameter("p1"),
        )
    );

    let error = generator
        .get_all_joined::<Category>(writer, &[Enrollment::entity_type()])
        .expect_err("Unrelated entities cannot be joined");
    assert_eq!(
        error.downcast_ref::<QueryError>(),
        Some(&QueryError::ForeignKeyResolution {
            entity: "Category",
            related: "Enrollment",
        })
    );
}
