//! Dynamically typed field values.
//!
//! Role-based reads and writes go through [`FieldValue`], the same way a rendering layer would
//! see them: it does not know the record type, only role ids and values.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::framework::model::ListModel;

/// A value read from, or written to, a record field.
#[derive(Clone, Default)]
pub enum FieldValue {
    /// No value: unknown role, out-of-range row, or an empty read.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// The record itself (the object role).
    Object(Rc<dyn Any>),
    /// A nested list exposed by a record field.
    Model(Rc<dyn ListModel>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&Rc<dyn ListModel>> {
        match self {
            FieldValue::Model(m) => Some(m),
            _ => None,
        }
    }

    /// Downcasts an [`Object`](FieldValue::Object) to a concrete record handle.
    pub fn object_as<T: 'static>(&self) -> Option<Rc<T>> {
        match self {
            FieldValue::Object(obj) => Rc::clone(obj).downcast::<T>().ok(),
            _ => None,
        }
    }

    /// String form used as a uid index key. Empty for values that have no key.
    pub fn to_key(&self) -> String {
        match self {
            FieldValue::Null | FieldValue::Object(_) | FieldValue::Model(_) => String::new(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Object(a), FieldValue::Object(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            }
            (FieldValue::Model(a), FieldValue::Model(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("Null"),
            FieldValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            FieldValue::Int(i) => f.debug_tuple("Int").field(i).finish(),
            FieldValue::Float(x) => f.debug_tuple("Float").field(x).finish(),
            FieldValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            FieldValue::Object(obj) => write!(f, "Object({:p})", Rc::as_ptr(obj)),
            FieldValue::Model(m) => write!(f, "Model(rows = {})", m.row_count()),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_owned())
    }
}

impl From<Rc<dyn ListModel>> for FieldValue {
    fn from(v: Rc<dyn ListModel>) -> Self {
        FieldValue::Model(v)
    }
}

/// Conversion from a [`FieldValue`] back into a concrete property type.
///
/// Used by generated setters; a value of the wrong shape yields `None` and the write is refused.
pub trait FromFieldValue: Sized {
    fn from_field_value(value: FieldValue) -> Option<Self>;
}

impl FromFieldValue for bool {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromFieldValue for i64 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        value.as_int()
    }
}

impl FromFieldValue for i32 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        value.as_int().and_then(|i| i32::try_from(i).ok())
    }
}

impl FromFieldValue for f64 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        value.as_float()
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        value.into_text()
    }
}
