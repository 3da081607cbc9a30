#[cfg(test)]
mod tests {
    use scribe::{
        AsValue, BinaryOpType, Entity, Expr, GenericSqlWriter, Operand, Predicate, SqlGenerator,
        UnaryOpType, Value, compile, evaluate,
    };
    use std::{borrow::Cow, rc::Rc, sync::Arc};

    #[derive(Entity, Clone)]
    struct Measure {
        id: i64,
        low: i32,
        high: i32,
        label: Option<String>,
        enabled: bool,
    }

    fn render(predicate: Predicate<Measure>) -> (String, Vec<Value>) {
        let generator = SqlGenerator::default();
        let writer = GenericSqlWriter::new();
        let entity = generator
            .describe::<Measure>(&writer)
            .expect("Could not describe Measure");
        let compiled =
            compile(&writer, &entity, predicate.expr()).expect("Could not compile the predicate");
        let values = compiled.parameters.into_iter().map(|(_, v)| v).collect();
        (compiled.sql, values)
    }

    #[test]
    fn values() {
        assert_eq!(5_u8.as_value(), Value::UInt8(Some(5)));
        assert_eq!(None::<i16>.as_value(), Value::Int16(None));
        assert_eq!(Some("x").as_value(), Value::Varchar(Some("x".into())));
        assert_eq!(Cow::Borrowed("y").as_value(), Value::Varchar(Some("y".into())));
        assert_eq!(vec![1_u8, 2].as_value(), Value::Blob(Some(vec![1, 2].into())));
        assert_eq!(Arc::new(1.5_f64).as_value(), Value::Float64(Some(1.5)));
        assert_eq!(Rc::new(true).as_value(), Value::Boolean(Some(true)));
        assert_eq!(Box::new(7_i64).as_value(), Value::Int64(Some(7)));
        assert_eq!(<Option<String>>::as_empty_value(), Value::Varchar(None));
        assert_eq!(Value::from(3_i32), Value::Int32(Some(3)));
        assert_eq!(Value::Varchar(None), Value::Varchar(None));
        assert_ne!(Value::Varchar(None), Value::Int32(None));
        assert!(Value::Int32(None).is_null());
        assert_eq!(Value::Varchar(Some("it's".into())).to_string(), "'it''s'");
        assert_eq!(Value::Null.to_string(), "NULL");
    }

    #[test]
    fn folding() {
        let unknown = Expr::constant(None::<bool>);
        let and = Expr::binary(BinaryOpType::And, Expr::constant(false), unknown.clone());
        assert_eq!(evaluate(&and), Some(Value::Boolean(Some(false))));
        let or = Expr::binary(BinaryOpType::Or, Expr::constant(true), unknown.clone());
        assert_eq!(evaluate(&or), Some(Value::Boolean(Some(true))));
        let and = Expr::binary(BinaryOpType::And, Expr::constant(true), unknown.clone());
        assert_eq!(evaluate(&and), Some(Value::Boolean(None)));
        let less = Expr::binary(BinaryOpType::Less, Expr::constant(1), Expr::constant(None::<i32>));
        assert_eq!(evaluate(&less), Some(Value::Boolean(None)));
        let negative = Expr::unary(UnaryOpType::Negative, Expr::constant(i32::MIN));
        assert_eq!(evaluate(&negative), None);
        let negative = Expr::unary(UnaryOpType::Negative, Expr::constant(4_i16));
        assert_eq!(evaluate(&negative), Some(Value::Int16(Some(-4))));
    }

    #[test]
    fn arithmetic() {
        let (sql, values) = render(Measure::high.eq(-(Measure::low + 1)));
        assert_eq!(
            sql,
            "\"Measures\".\"high\" = -(\"Measures\".\"low\" + @p1)"
        );
        assert_eq!(values, [Value::Int32(Some(1))]);
        let (sql, _) = render(Measure::high.gt(Measure::low * 2 - Measure::id % 3));
        assert_eq!(
            sql,
            "\"Measures\".\"high\" > \"Measures\".\"low\" * @p1 - \"Measures\".\"id\" % @p2"
        );
        let (sql, _) = render(Measure::high.lt(Measure::low - (Measure::id - 1)));
        assert_eq!(
            sql,
            "\"Measures\".\"high\" < \"Measures\".\"low\" - (\"Measures\".\"id\" - @p1)"
        );
        let (sql, values) = render(Measure::low.eq(Operand::<Measure>::from(10_i32) / 4));
        assert_eq!(sql, "\"Measures\".\"low\" = @p1");
        assert_eq!(values, [Value::Int32(Some(2))]);
    }

    #[test]
    fn logic() {
        let (sql, values) = render(!(Measure::enabled & Measure::label.is_null()));
        assert_eq!(
            sql,
            "not ((\"Measures\".\"enabled\" = '1') and (\"Measures\".\"label\" is null))"
        );
        assert!(values.is_empty());
        let (sql, _) = render(Measure::enabled.into());
        assert_eq!(sql, "\"Measures\".\"enabled\" = '1'");
        let (sql, values) = render(Measure::low.ne(1).or(Measure::high.ne(2)).and(true));
        assert_eq!(
            sql,
            "((\"Measures\".\"low\" <> @p1) or (\"Measures\".\"high\" <> @p2)) and (1 = 1)"
        );
        assert_eq!(values, [Value::Int32(Some(1)), Value::Int32(Some(2))]);
        let (sql, _) = render(Predicate::from(true) & false);
        assert_eq!(sql, "1 = 0");
        let (sql, values) = render(Measure::label.ne(Some("a")));
        assert_eq!(sql, "\"Measures\".\"label\" <> @p1");
        assert_eq!(values, [Value::Varchar(Some("a".into()))]);
    }

    #[test]
    fn patterns() {
        let (sql, values) = render(Measure::label.contains("50%"));
        assert_eq!(sql, "\"Measures\".\"label\" like @p1");
        assert_eq!(values, [Value::Varchar(Some("%50%%".into()))]);
        let (sql, values) = render(Measure::label.starts_with(String::from("a") + "b"));
        assert_eq!(sql, "\"Measures\".\"label\" like @p1");
        assert_eq!(values, [Value::Varchar(Some("ab%".into()))]);
    }
}
