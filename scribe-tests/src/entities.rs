use rust_decimal::Decimal;
use scribe::Entity;
use time::PrimitiveDateTime;
use uuid::Uuid;

#[derive(Entity, Debug, Clone, PartialEq)]
pub struct Product {
    #[scribe(key)]
    pub id: i64,
    pub name: String,
    #[scribe(column = "CategoryId", foreign_key = "Category")]
    pub category_id: i64,
    pub price: Decimal,
    pub discontinued: bool,
    pub notes: Option<String>,
    #[scribe(generated = "computed")]
    pub updated_at: Option<PrimitiveDateTime>,
    #[scribe(ignore)]
    pub label: String,
}

impl Product {
    pub fn sample() -> Self {
        Self {
            id: 7,
            name: "Lamp".into(),
            category_id: 3,
            price: Decimal::new(1999, 2),
            discontinued: false,
            notes: None,
            updated_at: None,
            label: "not mapped".into(),
        }
    }
}

#[derive(Entity, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Holds the reference to `Product` by naming convention only.
#[derive(Entity, Debug, Clone, PartialEq)]
pub struct Review {
    #[scribe(key)]
    pub id: Uuid,
    pub product_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Entity, Debug, Clone, PartialEq)]
#[scribe(table = "enrollments", schema = "school", key = ("student_id", "course_id"))]
pub struct Enrollment {
    #[scribe(generated = "none")]
    pub student_id: i32,
    #[scribe(generated = "none")]
    pub course_id: i32,
    pub grade: Option<Decimal>,
}

/// No member qualifies as key.
#[derive(Entity, Debug, Clone, PartialEq)]
pub struct Setting {
    pub name: String,
    pub value: String,
}
