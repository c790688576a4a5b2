//! Borrowed, non-allocating view of a state slot.
//!
//! Holders keep their values fully typed; [`Value`] is what the untyped
//! `(name, value)` view hands out. Producing one only borrows the slot.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Erased view of a single state value.
#[derive(Clone, Copy)]
pub enum Value<'v> {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Char(char),
    Str(&'v str),
    Display(&'v dyn fmt::Display),
    Debug(&'v dyn fmt::Debug),
}

impl Value<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::I64(v) => Some(v),
            Value::U64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("(null)"),
            Value::Bool(v) => fmt::Display::fmt(v, f),
            Value::I64(v) => fmt::Display::fmt(v, f),
            Value::U64(v) => fmt::Display::fmt(v, f),
            Value::F64(v) => fmt::Display::fmt(v, f),
            Value::Char(v) => fmt::Display::fmt(v, f),
            Value::Str(v) => f.write_str(v),
            Value::Display(v) => fmt::Display::fmt(v, f),
            Value::Debug(v) => fmt::Debug::fmt(v, f),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => fmt::Debug::fmt(v, f),
            Value::I64(v) => fmt::Debug::fmt(v, f),
            Value::U64(v) => fmt::Debug::fmt(v, f),
            Value::F64(v) => fmt::Debug::fmt(v, f),
            Value::Char(v) => fmt::Debug::fmt(v, f),
            Value::Str(v) => fmt::Debug::fmt(v, f),
            Value::Display(v) => write!(f, "Display({v})"),
            Value::Debug(v) => fmt::Debug::fmt(v, f),
        }
    }
}

/// Primitive and string views compare by content. Opaque `Display` and
/// `Debug` views never compare equal, not even to themselves.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::I64(a), Value::U64(b)) | (Value::U64(b), Value::I64(a)) => {
                i128::from(*a) == i128::from(*b)
            }
            _ => false,
        }
    }
}

impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::Char(v) => serializer.serialize_char(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Display(v) => serializer.collect_str(v),
            Value::Debug(v) => serializer.collect_str(&format_args!("{v:?}")),
        }
    }
}

// ---------------------------------------------------------------------------
// ToValue
// ---------------------------------------------------------------------------

/// Borrow a typed slot as a [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value<'_>;
}

impl ToValue for Value<'_> {
    fn to_value(&self) -> Value<'_> {
        *self
    }
}

impl ToValue for () {
    fn to_value(&self) -> Value<'_> {
        Value::Null
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

macro_rules! signed_to_value {
    ($($t:ty),+) => {
        $(impl ToValue for $t {
            fn to_value(&self) -> Value<'_> {
                Value::I64(i64::from(*self))
            }
        })+
    };
}

macro_rules! unsigned_to_value {
    ($($t:ty),+) => {
        $(impl ToValue for $t {
            fn to_value(&self) -> Value<'_> {
                Value::U64(u64::from(*self))
            }
        })+
    };
}

signed_to_value!(i8, i16, i32, i64);
unsigned_to_value!(u8, u16, u32, u64);

impl ToValue for isize {
    fn to_value(&self) -> Value<'_> {
        Value::I64(*self as i64)
    }
}

impl ToValue for usize {
    fn to_value(&self) -> Value<'_> {
        Value::U64(*self as u64)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value<'_> {
        Value::F64(f64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value<'_> {
        Value::F64(*self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Rc<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

/// Carries any `Display` type into a holder slot.
#[derive(Debug, Clone, Copy)]
pub struct DisplayValue<T>(pub T);

/// Carries any `Debug` type into a holder slot.
#[derive(Debug, Clone, Copy)]
pub struct DebugValue<T>(pub T);

pub fn display<T: fmt::Display>(value: T) -> DisplayValue<T> {
    DisplayValue(value)
}

pub fn debug<T: fmt::Debug>(value: T) -> DebugValue<T> {
    DebugValue(value)
}

impl<T: fmt::Display> ToValue for DisplayValue<T> {
    fn to_value(&self) -> Value<'_> {
        Value::Display(&self.0)
    }
}

impl<T: fmt::Debug> ToValue for DebugValue<T> {
    fn to_value(&self) -> Value<'_> {
        Value::Debug(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use super::*;

    #[test]
    fn integers_compare_across_signedness() {
        assert_eq!(4_i32.to_value(), 4_u8.to_value());
        assert_ne!((-1_i64).to_value(), u64::MAX.to_value());
        assert_eq!(u64::MAX.to_value(), u64::MAX.to_value());
    }

    #[test]
    fn option_none_is_null() {
        let missing: Option<&str> = None;
        assert!(missing.to_value().is_null());
        assert_eq!(missing.to_value().to_string(), "(null)");
        assert_eq!(Some("abc").to_value(), Value::Str("abc"));
    }

    #[test]
    fn display_wrapper_renders_through_inner_type() {
        let addr = display(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(addr.to_value().to_string(), "127.0.0.1");
        let dbg = debug(vec![1, 2]);
        assert_eq!(dbg.to_value().to_string(), "[1, 2]");
    }

    #[test]
    fn opaque_views_never_compare_equal() {
        let a = display(1);
        assert_ne!(a.to_value(), a.to_value());
    }

    #[test]
    fn serializes_to_json_scalars() {
        let json = serde_json::to_string(&[
            Value::Null,
            Value::Bool(true),
            Value::I64(-3),
            Value::Str("x"),
            display(2.5).to_value(),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,true,-3,"x","2.5"]"#);
    }
}
