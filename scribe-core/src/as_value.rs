use crate::Value;
use rust_decimal::Decimal;
use std::{borrow::Cow, rc::Rc, sync::Arc};
use uuid::Uuid;

/// Conversion of native Rust types into the dynamically typed [`Value`] used as statement parameter.
///
/// # Examples
/// ```rust
/// use scribe_core::{AsValue, Value};
/// assert_eq!(42i32.as_value(), Value::Int32(Some(42)));
/// assert_eq!(<Option<i32>>::as_empty_value(), Value::Int32(None));
/// assert_eq!(None::<i32>.as_value(), Value::Int32(None));
/// ```
pub trait AsValue {
    /// Typed null of this type.
    fn as_empty_value() -> Value;
    /// Owned [`Value`] representation.
    fn as_value(self) -> Value;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self as _))
            }
        }
    };
}
impl_as_value!(bool, Value::Boolean);
impl_as_value!(i8, Value::Int8);
impl_as_value!(i16, Value::Int16);
impl_as_value!(i32, Value::Int32);
impl_as_value!(i64, Value::Int64);
impl_as_value!(i128, Value::Int128);
impl_as_value!(isize, Value::Int64);
impl_as_value!(u8, Value::UInt8);
impl_as_value!(u16, Value::UInt16);
impl_as_value!(u32, Value::UInt32);
impl_as_value!(u64, Value::UInt64);
impl_as_value!(u128, Value::UInt128);
impl_as_value!(usize, Value::UInt64);
impl_as_value!(f32, Value::Float32);
impl_as_value!(f64, Value::Float64);
impl_as_value!(Decimal, Value::Decimal);
impl_as_value!(String, Value::Varchar);
impl_as_value!(Box<[u8]>, Value::Blob);
impl_as_value!(time::Date, Value::Date);
impl_as_value!(time::Time, Value::Time);
impl_as_value!(time::PrimitiveDateTime, Value::Timestamp);
impl_as_value!(time::OffsetDateTime, Value::TimestampWithTimezone);
impl_as_value!(Uuid, Value::Uuid);

impl AsValue for &str {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.into()))
    }
}

impl AsValue for Cow<'_, str> {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.into_owned()))
    }
}

impl AsValue for Vec<u8> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self.into_boxed_slice()))
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
}

impl<T: AsValue> AsValue for Box<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        (*self).as_value()
    }
}

macro_rules! impl_as_value {
    ($source:ident) => {
        impl<T: AsValue + Clone> AsValue for $source<T> {
            fn as_empty_value() -> Value {
                T::as_empty_value()
            }
            fn as_value(self) -> Value {
                $source::unwrap_or_clone(self).as_value()
            }
        }
    };
}
impl_as_value!(Arc);
impl_as_value!(Rc);

impl<T: AsValue + Clone> AsValue for &T {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        self.clone().as_value()
    }
}
