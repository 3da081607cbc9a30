#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use scribe::{
        Entity, GenerationStrategy, GenericSqlWriter, MemberDef, QueryError, SqlGenerator, Value,
    };
    use std::borrow::Cow;
    use time::macros::date;
    use uuid::Uuid;

    #[derive(Entity, Clone)]
    #[scribe(table = "inventory_items", schema = "stock")]
    struct InventoryItem {
        #[scribe(key, column = "item_id")]
        id: Uuid,
        #[scribe(column = "label")]
        name: Cow<'static, str>,
        quantity: u32,
        price: Option<Decimal>,
        active: Option<bool>,
        #[scribe(foreign_key = "Warehouse")]
        warehouse: i64,
        #[scribe(generated = "computed")]
        total: Decimal,
        #[scribe(ignore)]
        _scratch: Vec<u8>,
        r#type: String,
    }

    #[derive(Entity, Clone)]
    struct Batch {
        id: i32,
        produced: time::Date,
    }

    #[derive(Entity, Clone)]
    #[scribe(key = ("year", "number"))]
    struct Invoice {
        number: i32,
        #[scribe(key)]
        year: i16,
        amount: f64,
    }

    fn sample() -> InventoryItem {
        InventoryItem {
            id: Uuid::nil(),
            name: "Bolt".into(),
            quantity: 12,
            price: Some(Decimal::new(25, 2)),
            active: None,
            warehouse: 4,
            total: Decimal::new(300, 2),
            _scratch: vec![1, 2, 3],
            r#type: "hardware".into(),
        }
    }

    #[test]
    fn entity_def() {
        let def = InventoryItem::entity_def();
        assert_eq!(def.name, "InventoryItem");
        assert_eq!(def.table, Some("inventory_items"));
        assert_eq!(def.schema, Some("stock"));
        assert!(def.key.is_empty());
        let names: Vec<_> = def.members.iter().map(|v| v.name).collect();
        assert_eq!(
            names,
            ["id", "name", "quantity", "price", "active", "warehouse", "total", "type"]
        );
        assert_eq!(
            def.member("id"),
            Some(&MemberDef::new("id").column("item_id").key())
        );
        assert_eq!(def.member("name").and_then(|v| v.column), Some("label"));
        assert_eq!(def.member("price"), Some(&MemberDef::new("price").nullable()));
        assert_eq!(
            def.member("active"),
            Some(&MemberDef::new("active").nullable().boolean())
        );
        assert_eq!(
            def.member("warehouse").and_then(|v| v.foreign_key),
            Some("Warehouse")
        );
        assert_eq!(
            def.member("total").and_then(|v| v.generated),
            Some(GenerationStrategy::Computed)
        );
        assert_eq!(def.member("_scratch"), None);
        assert!(std::ptr::eq(def, InventoryItem::entity_def()));

        let def = Invoice::entity_def();
        assert_eq!(def.key, ["year", "number"]);
        assert_eq!(def.table, None);
    }

    #[test]
    fn row() {
        let row = sample().row();
        assert_eq!(row.len(), 8);
        assert_eq!(row[0], ("id", Value::Uuid(Some(Uuid::nil()))));
        assert_eq!(row[1], ("name", Value::Varchar(Some("Bolt".into()))));
        assert_eq!(row[2], ("quantity", Value::UInt32(Some(12))));
        assert_eq!(row[3], ("price", Value::Decimal(Some(Decimal::new(25, 2)))));
        assert_eq!(row[4], ("active", Value::Boolean(None)));
        assert_eq!(row[7], ("type", Value::Varchar(Some("hardware".into()))));
        let batch = Batch {
            id: 1,
            produced: date!(2024 - 03 - 01),
        };
        assert_eq!(batch.row()[1], ("produced", Value::Date(Some(date!(2024 - 03 - 01)))));
    }

    #[test]
    fn members() {
        assert_eq!(InventoryItem::quantity.name(), "quantity");
        assert_eq!(InventoryItem::r#type.name(), "type");
        assert_eq!(Batch::produced.name(), "produced");
    }

    #[test]
    fn descriptor() {
        let generator = SqlGenerator::default();
        let writer = GenericSqlWriter::new();
        let entity = generator
            .describe::<InventoryItem>(&writer)
            .expect("Could not describe InventoryItem");
        assert_eq!(entity.table_identifier, "\"stock\".\"inventory_items\"");
        assert_eq!(entity.keys.len(), 1);
        assert_eq!(entity.keys[0].identifier, "\"item_id\"");
        assert_eq!(entity.keys[0].generation, GenerationStrategy::Identity);
        let writable: Vec<_> = entity.writable_columns().map(|v| v.member).collect();
        assert_eq!(
            writable,
            ["name", "quantity", "price", "active", "warehouse", "type"]
        );
        let again = generator
            .describe::<InventoryItem>(&writer)
            .expect("Could not describe InventoryItem");
        assert!(std::sync::Arc::ptr_eq(&entity, &again));

        let entity = generator
            .describe::<Batch>(&writer)
            .expect("Could not describe Batch");
        assert_eq!(entity.table_identifier, "\"Batches\"");
        assert_eq!(entity.keys[0].member, "id");
    }

    #[test]
    fn conflicting_keys() {
        let generator = SqlGenerator::default();
        let error = generator
            .describe::<Invoice>(&GenericSqlWriter::new())
            .expect_err("Flagged keys differ from the listed ones");
        assert_eq!(
            error.downcast_ref::<QueryError>(),
            Some(&QueryError::AmbiguousKeyAnnotation {
                entity: "Invoice",
                members: vec!["year"],
                listed: vec!["year", "number"],
            })
        );
    }
}
