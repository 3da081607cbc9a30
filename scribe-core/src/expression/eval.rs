use crate::{BinaryOpType, Expr, UnaryOpType, Value};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Evaluate an expression that does not reference any member.
///
/// Returns `None` when the expression references a member or when it cannot be folded (type
/// mismatch, overflow, division by zero), the caller then renders it node by node.
pub fn evaluate(expr: &Expr) -> Option<Value> {
    match expr {
        Expr::Column(..) => None,
        Expr::Constant(v) => Some(v.clone()),
        Expr::Unary(v) => {
            let arg = evaluate(&v.arg)?;
            match v.op {
                UnaryOpType::Not => match arg {
                    Value::Boolean(b) => Some(Value::Boolean(b.map(|b| !b))),
                    Value::Null => Some(Value::Boolean(None)),
                    _ => None,
                },
                UnaryOpType::Negative => negate(&arg),
            }
        }
        Expr::Binary(v) => {
            let lhs = evaluate(&v.lhs)?;
            let rhs = evaluate(&v.rhs)?;
            if v.op.is_logical() {
                logical(v.op, &lhs, &rhs)
            } else if v.op.is_comparison() {
                comparison(v.op, &lhs, &rhs)
            } else {
                arithmetic(v.op, &lhs, &rhs)
            }
        }
        Expr::Pattern(v) => {
            let target = evaluate(&v.target)?;
            let pattern = evaluate(&v.pattern)?;
            if target.is_null() || pattern.is_null() {
                return Some(Value::Boolean(None));
            }
            Some(Value::Boolean(Some(
                v.kind.matches(target.as_str()?, pattern.as_str()?),
            )))
        }
    }
}

fn as_logical(value: &Value) -> Option<Option<bool>> {
    match value {
        Value::Boolean(v) => Some(*v),
        Value::Null => Some(None),
        _ => None,
    }
}

fn logical(op: BinaryOpType, lhs: &Value, rhs: &Value) -> Option<Value> {
    let (lhs, rhs) = (as_logical(lhs)?, as_logical(rhs)?);
    let result = match op {
        BinaryOpType::And => match (lhs, rhs) {
            (Some(false), _) | (_, Some(false)) => Some(false),
            (Some(true), Some(true)) => Some(true),
            _ => None,
        },
        BinaryOpType::Or => match (lhs, rhs) {
            (Some(true), _) | (_, Some(true)) => Some(true),
            (Some(false), Some(false)) => Some(false),
            _ => None,
        },
        _ => return None,
    };
    Some(Value::Boolean(result))
}

/// Ordering between two non null values, `None` when they are not comparable.
pub fn compare(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs, rhs) {
        (Value::Boolean(Some(l)), Value::Boolean(Some(r))) => Some(l.cmp(r)),
        (Value::Varchar(Some(l)), Value::Varchar(Some(r))) => Some(l.cmp(r)),
        (Value::Blob(Some(l)), Value::Blob(Some(r))) => Some(l.cmp(r)),
        (Value::Decimal(Some(l)), Value::Decimal(Some(r))) => Some(l.cmp(r)),
        (Value::Date(Some(l)), Value::Date(Some(r))) => Some(l.cmp(r)),
        (Value::Time(Some(l)), Value::Time(Some(r))) => Some(l.cmp(r)),
        (Value::Timestamp(Some(l)), Value::Timestamp(Some(r))) => Some(l.cmp(r)),
        (Value::TimestampWithTimezone(Some(l)), Value::TimestampWithTimezone(Some(r))) => {
            Some(l.cmp(r))
        }
        (Value::Uuid(Some(l)), Value::Uuid(Some(r))) => Some(l.cmp(r)),
        _ => {
            if let (Some(l), Some(r)) = (lhs.as_i128(), rhs.as_i128()) {
                Some(l.cmp(&r))
            } else if lhs.is_numeric() && rhs.is_numeric() {
                lhs.as_f64()?.partial_cmp(&rhs.as_f64()?)
            } else {
                None
            }
        }
    }
}

fn comparison(op: BinaryOpType, lhs: &Value, rhs: &Value) -> Option<Value> {
    if lhs.is_null() || rhs.is_null() {
        // Mirrors the `is null` lowering of comparisons against null
        let both = lhs.is_null() && rhs.is_null();
        return Some(Value::Boolean(match op {
            BinaryOpType::Equal => Some(both),
            BinaryOpType::NotEqual => Some(!both),
            _ => None,
        }));
    }
    let ordering = compare(lhs, rhs)?;
    Some(Value::Boolean(Some(match op {
        BinaryOpType::Equal => ordering == Ordering::Equal,
        BinaryOpType::NotEqual => ordering != Ordering::Equal,
        BinaryOpType::Less => ordering == Ordering::Less,
        BinaryOpType::Greater => ordering == Ordering::Greater,
        BinaryOpType::LessEqual => ordering != Ordering::Greater,
        BinaryOpType::GreaterEqual => ordering != Ordering::Less,
        _ => return None,
    })))
}

fn negate(value: &Value) -> Option<Value> {
    if value.is_null() {
        return value.is_numeric().then(|| value.clone()).or(Some(Value::Null));
    }
    Some(match *value {
        Value::Int8(Some(v)) => Value::Int8(Some(v.checked_neg()?)),
        Value::Int16(Some(v)) => Value::Int16(Some(v.checked_neg()?)),
        Value::Int32(Some(v)) => Value::Int32(Some(v.checked_neg()?)),
        Value::Int64(Some(v)) => Value::Int64(Some(v.checked_neg()?)),
        Value::Int128(Some(v)) => Value::Int128(Some(v.checked_neg()?)),
        Value::Float32(Some(v)) => Value::Float32(Some(-v)),
        Value::Float64(Some(v)) => Value::Float64(Some(-v)),
        Value::Decimal(Some(v)) => Value::Decimal(Some(-v)),
        _ => return None,
    })
}

/// Integer with the same variant as `template`, `None` if it does not fit.
fn integer_like(template: &Value, v: i128) -> Option<Value> {
    Some(match template {
        Value::Int8(..) => Value::Int8(Some(v.try_into().ok()?)),
        Value::Int16(..) => Value::Int16(Some(v.try_into().ok()?)),
        Value::Int32(..) => Value::Int32(Some(v.try_into().ok()?)),
        Value::Int64(..) => Value::Int64(Some(v.try_into().ok()?)),
        Value::Int128(..) => Value::Int128(Some(v)),
        Value::UInt8(..) => Value::UInt8(Some(v.try_into().ok()?)),
        Value::UInt16(..) => Value::UInt16(Some(v.try_into().ok()?)),
        Value::UInt32(..) => Value::UInt32(Some(v.try_into().ok()?)),
        Value::UInt64(..) => Value::UInt64(Some(v.try_into().ok()?)),
        Value::UInt128(..) => Value::UInt128(Some(v.try_into().ok()?)),
        _ => match i64::try_from(v) {
            Ok(v) => Value::Int64(Some(v)),
            Err(..) => Value::Int128(Some(v)),
        },
    })
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Decimal(Some(v)) => Some(*v),
        _ => Decimal::try_from_i128_with_scale(value.as_i128()?, 0).ok(),
    }
}

fn arithmetic(op: BinaryOpType, lhs: &Value, rhs: &Value) -> Option<Value> {
    if lhs.is_null() || rhs.is_null() {
        return Some(if lhs.is_null() { lhs.clone() } else { rhs.clone() });
    }
    if let (Value::Varchar(Some(l)), Value::Varchar(Some(r))) = (lhs, rhs) {
        return (op == BinaryOpType::Addition).then(|| Value::Varchar(Some(format!("{l}{r}"))));
    }
    if !lhs.is_numeric() || !rhs.is_numeric() {
        return None;
    }
    if matches!(lhs, Value::Float32(..) | Value::Float64(..))
        || matches!(rhs, Value::Float32(..) | Value::Float64(..))
    {
        let (l, r) = (lhs.as_f64()?, rhs.as_f64()?);
        let result = match op {
            BinaryOpType::Addition => l + r,
            BinaryOpType::Subtraction => l - r,
            BinaryOpType::Multiplication => l * r,
            BinaryOpType::Division if r != 0.0 => l / r,
            BinaryOpType::Remainder if r != 0.0 => l % r,
            _ => return None,
        };
        return Some(
            if matches!((lhs, rhs), (Value::Float32(..), Value::Float32(..))) {
                Value::Float32(Some(result as _))
            } else {
                Value::Float64(Some(result))
            },
        );
    }
    if matches!(lhs, Value::Decimal(..)) || matches!(rhs, Value::Decimal(..)) {
        let (l, r) = (as_decimal(lhs)?, as_decimal(rhs)?);
        let result = match op {
            BinaryOpType::Addition => l.checked_add(r),
            BinaryOpType::Subtraction => l.checked_sub(r),
            BinaryOpType::Multiplication => l.checked_mul(r),
            BinaryOpType::Division => l.checked_div(r),
            BinaryOpType::Remainder => l.checked_rem(r),
            _ => None,
        }?;
        return Some(Value::Decimal(Some(result)));
    }
    let (l, r) = (lhs.as_i128()?, rhs.as_i128()?);
    let result = match op {
        BinaryOpType::Addition => l.checked_add(r),
        BinaryOpType::Subtraction => l.checked_sub(r),
        BinaryOpType::Multiplication => l.checked_mul(r),
        BinaryOpType::Division => l.checked_div(r),
        BinaryOpType::Remainder => l.checked_rem(r),
        _ => None,
    }?;
    if lhs.same_type(rhs) {
        integer_like(lhs, result)
    } else {
        integer_like(&Value::Null, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatternKind;

    fn int(v: i32) -> Expr {
        Expr::constant(v)
    }

    #[test]
    fn arithmetic_folding() {
        let expr = Expr::binary(
            BinaryOpType::Multiplication,
            Expr::binary(BinaryOpType::Addition, int(2), int(3)),
            int(4),
        );
        assert_eq!(evaluate(&expr), Some(Value::Int32(Some(20))));
        let mixed = Expr::binary(BinaryOpType::Addition, int(1), Expr::constant(2i64));
        assert_eq!(evaluate(&mixed), Some(Value::Int64(Some(3))));
        let float = Expr::binary(BinaryOpType::Division, int(1), Expr::constant(4.0f64));
        assert_eq!(evaluate(&float), Some(Value::Float64(Some(0.25))));
        let by_zero = Expr::binary(BinaryOpType::Division, int(1), int(0));
        assert_eq!(evaluate(&by_zero), None);
        let overflow = Expr::binary(BinaryOpType::Addition, Expr::constant(i8::MAX), Expr::constant(1i8));
        assert_eq!(evaluate(&overflow), None);
    }

    #[test]
    fn string_folding() {
        let concat = Expr::binary(BinaryOpType::Addition, Expr::constant("ab"), Expr::constant("cd"));
        assert_eq!(evaluate(&concat), Some(Value::Varchar(Some("abcd".into()))));
        let pattern = Expr::pattern(PatternKind::StartsWith, Expr::constant("abcd"), Expr::constant("ab"));
        assert_eq!(evaluate(&pattern), Some(Value::Boolean(Some(true))));
    }

    #[test]
    fn logic_folding() {
        let t = Expr::constant(true);
        let f = Expr::constant(false);
        let and = Expr::binary(BinaryOpType::And, t.clone(), f.clone());
        assert_eq!(evaluate(&and), Some(Value::Boolean(Some(false))));
        let not = Expr::unary(UnaryOpType::Not, and);
        assert_eq!(evaluate(&not), Some(Value::Boolean(Some(true))));
        let cmp = Expr::binary(BinaryOpType::LessEqual, int(3), Expr::constant(3u64));
        assert_eq!(evaluate(&cmp), Some(Value::Boolean(Some(true))));
        let null = Expr::binary(BinaryOpType::Equal, Expr::Constant(Value::Null), Expr::constant(None::<i32>));
        assert_eq!(evaluate(&null), Some(Value::Boolean(Some(true))));
    }

    #[test]
    fn members_are_not_folded() {
        let expr = Expr::binary(BinaryOpType::Addition, Expr::column("Price"), int(1));
        assert_eq!(evaluate(&expr), None);
    }
}
