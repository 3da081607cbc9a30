use rust_decimal::Decimal;
use std::fmt::{self, Display, Formatter};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Dynamically typed parameter value.
///
/// Every variant but `Null` carries an `Option`: `None` is a typed null, which keeps the column type
/// of an absent optional member.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Int128(Option<i128>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    UInt128(Option<u128>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int8(l), Self::Int8(r)) => l == r,
            (Self::Int16(l), Self::Int16(r)) => l == r,
            (Self::Int32(l), Self::Int32(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::Int128(l), Self::Int128(r)) => l == r,
            (Self::UInt8(l), Self::UInt8(r)) => l == r,
            (Self::UInt16(l), Self::UInt16(r)) => l == r,
            (Self::UInt32(l), Self::UInt32(r)) => l == r,
            (Self::UInt64(l), Self::UInt64(r)) => l == r,
            (Self::UInt128(l), Self::UInt128(r)) => l == r,
            (Self::Float32(l), Self::Float32(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Decimal(l), Self::Decimal(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Time(l), Self::Time(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (Self::TimestampWithTimezone(l), Self::TimestampWithTimezone(r)) => l == r,
            (Self::Uuid(l), Self::Uuid(r)) => l == r,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Value {
    pub fn same_type(&self, other: &Self) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }

    /// True for `Null` and for any typed null.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int8(v) => v.is_none(),
            Value::Int16(v) => v.is_none(),
            Value::Int32(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::Int128(v) => v.is_none(),
            Value::UInt8(v) => v.is_none(),
            Value::UInt16(v) => v.is_none(),
            Value::UInt32(v) => v.is_none(),
            Value::UInt64(v) => v.is_none(),
            Value::UInt128(v) => v.is_none(),
            Value::Float32(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Decimal(v) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Blob(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::TimestampWithTimezone(v) => v.is_none(),
            Value::Uuid(v) => v.is_none(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => *v,
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Varchar(Some(v)) => Some(v),
            _ => None,
        }
    }

    /// Integer payload widened to `i128`, `None` for non integers and for `u128` above `i128::MAX`.
    pub fn as_i128(&self) -> Option<i128> {
        Some(match *self {
            Value::Int8(Some(v)) => v as _,
            Value::Int16(Some(v)) => v as _,
            Value::Int32(Some(v)) => v as _,
            Value::Int64(Some(v)) => v as _,
            Value::Int128(Some(v)) => v,
            Value::UInt8(Some(v)) => v as _,
            Value::UInt16(Some(v)) => v as _,
            Value::UInt32(Some(v)) => v as _,
            Value::UInt64(Some(v)) => v as _,
            Value::UInt128(Some(v)) => i128::try_from(v).ok()?,
            _ => return None,
        })
    }

    /// Any numeric payload as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float32(Some(v)) => Some(v as _),
            Value::Float64(Some(v)) => Some(v),
            Value::Decimal(Some(v)) => v.to_string().parse().ok(),
            _ => self.as_i128().map(|v| v as _),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Int8(..)
                | Value::Int16(..)
                | Value::Int32(..)
                | Value::Int64(..)
                | Value::Int128(..)
                | Value::UInt8(..)
                | Value::UInt16(..)
                | Value::UInt32(..)
                | Value::UInt64(..)
                | Value::UInt128(..)
                | Value::Float32(..)
                | Value::Float64(..)
                | Value::Decimal(..)
        )
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("NULL");
        }
        match self {
            Value::Boolean(Some(v)) => write!(f, "{v}"),
            Value::Int8(Some(v)) => write!(f, "{v}"),
            Value::Int16(Some(v)) => write!(f, "{v}"),
            Value::Int32(Some(v)) => write!(f, "{v}"),
            Value::Int64(Some(v)) => write!(f, "{v}"),
            Value::Int128(Some(v)) => write!(f, "{v}"),
            Value::UInt8(Some(v)) => write!(f, "{v}"),
            Value::UInt16(Some(v)) => write!(f, "{v}"),
            Value::UInt32(Some(v)) => write!(f, "{v}"),
            Value::UInt64(Some(v)) => write!(f, "{v}"),
            Value::UInt128(Some(v)) => write!(f, "{v}"),
            Value::Float32(Some(v)) => write!(f, "{v}"),
            Value::Float64(Some(v)) => write!(f, "{v}"),
            Value::Decimal(Some(v)) => write!(f, "{v}"),
            Value::Varchar(Some(v)) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Blob(Some(v)) => write!(f, "<{} bytes>", v.len()),
            Value::Date(Some(v)) => write!(f, "{v}"),
            Value::Time(Some(v)) => write!(f, "{v}"),
            Value::Timestamp(Some(v)) => write!(f, "{v}"),
            Value::TimestampWithTimezone(Some(v)) => write!(f, "{v}"),
            Value::Uuid(Some(v)) => write!(f, "{v}"),
            _ => f.write_str("NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_nulls() {
        assert!(Value::Null.is_null());
        assert!(Value::Int32(None).is_null());
        assert!(!Value::Int32(Some(0)).is_null());
        assert_eq!(Value::Int32(None), Value::Int32(None));
        assert_ne!(Value::Int32(None), Value::Int64(None));
        assert_ne!(Value::Int32(Some(1)), Value::Int32(None));
    }

    #[test]
    fn widening() {
        assert_eq!(Value::UInt8(Some(7)).as_i128(), Some(7));
        assert_eq!(Value::UInt128(Some(u128::MAX)).as_i128(), None);
        assert_eq!(Value::Int16(Some(-3)).as_f64(), Some(-3.0));
        assert_eq!(Value::Varchar(Some("1".into())).as_f64(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Value::Varchar(Some("it's".into())).to_string(), "'it''s'");
        assert_eq!(Value::Boolean(None).to_string(), "NULL");
        assert_eq!(Value::Int64(Some(42)).to_string(), "42");
    }
}
