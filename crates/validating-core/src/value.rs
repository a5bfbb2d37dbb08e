//! # Dynamic Value Model
//!
//! Defines [`Value`], the input type every validator inspects. The model is
//! deliberately richer than JSON: validators distinguish `undefined` from
//! `null`, reject `NaN`, tell plain data objects apart from typed instances,
//! and accept concrete date-time values.
//!
//! ## Objects and Prototypes
//!
//! An [`Object`] carries a [`Prototype`]:
//!
//! - `Plain` — an ordinary data object (constructor name `Object`).
//! - `None` — an object without a prototype (no constructor at all).
//! - `Instance` — an instance of a named [`Class`], which may extend a
//!   parent class.
//!
//! Only `Plain` and `None` objects with zero keys count as empty; a typed
//! instance is never empty.
//!
//! ## JSON
//!
//! `From<serde_json::Value>` maps JSON documents into the model: objects
//! become plain objects and numbers become `f64`.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

static UNDEFINED: Value = Value::Undefined;

/// A named class with an optional parent, used for typed object instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Class {
    name: String,
    parent: Option<Arc<Class>>,
}

impl Class {
    /// Create a root class.
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: None,
        })
    }

    /// Create a class that extends `parent`.
    pub fn extends(name: impl Into<String>, parent: &Arc<Class>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: Some(Arc::clone(parent)),
        })
    }

    /// The class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent class, if any.
    pub fn parent(&self) -> Option<&Arc<Class>> {
        self.parent.as_ref()
    }

    /// Returns true if `self` is `other` or inherits from it.
    pub fn is_a(&self, other: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == other {
                return true;
            }
            current = class.parent.as_deref();
        }
        false
    }
}

/// The prototype of an [`Object`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Prototype {
    /// An ordinary data object.
    #[default]
    Plain,
    /// No prototype and therefore no constructor.
    None,
    /// An instance of a class.
    Instance(Arc<Class>),
}

impl Prototype {
    /// The constructor name, or `None` for prototype-less objects.
    pub fn constructor_name(&self) -> Option<&str> {
        match self {
            Prototype::Plain => Some("Object"),
            Prototype::None => None,
            Prototype::Instance(class) => Some(class.name()),
        }
    }
}

/// An object: a prototype plus its own keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    prototype: Prototype,
    fields: BTreeMap<String, Value>,
}

impl Object {
    /// An empty plain object.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty object without a prototype.
    pub fn bare() -> Self {
        Self {
            prototype: Prototype::None,
            fields: BTreeMap::new(),
        }
    }

    /// An empty instance of `class`.
    pub fn instance(class: &Arc<Class>) -> Self {
        Self {
            prototype: Prototype::Instance(Arc::clone(class)),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Remove a key.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns true if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of own keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the object has no own keys.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The object's prototype.
    pub fn prototype(&self) -> &Prototype {
        &self.prototype
    }

    /// Iterate over own keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over own keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (k, v) in iter {
            object.insert(k, v);
        }
        object
    }
}

/// A dynamically typed input value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// IEEE-754 double; `NaN` and infinities are representable.
    Number(f64),
    /// Text.
    String(String),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Keyed object.
    Object(Object),
    /// A concrete UTC date-time.
    Date(DateTime<Utc>),
}

impl Value {
    /// Build an array value.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// The runtime type tag: `undefined`, `object`, `boolean`, `number` or
    /// `string`. Null, arrays, objects and dates all report `object`.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Null | Value::Array(_) | Value::Object(_) | Value::Date(_) => "object",
        }
    }

    /// Returns true for undefined, null, `""`, `[]`, and keyless objects
    /// that are plain or prototype-less.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(object) => {
                object.is_empty() && !matches!(object.prototype, Prototype::Instance(_))
            }
            Value::Bool(_) | Value::Number(_) | Value::Date(_) => false,
        }
    }

    /// Returns true for undefined and null.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Borrow as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Read as a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Read as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow as a slice of items.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow as an object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Property access: the value stored under `key`, or `Undefined` when
    /// the key is absent or `self` is not an object.
    pub fn get(&self, key: &str) -> &Value {
        self.as_object()
            .and_then(|object| object.get(key))
            .unwrap_or(&UNDEFINED)
    }

    /// The constructor name of an object-like value: `Object`/class name
    /// for objects, `Array` and `Date` for those kinds.
    pub fn constructor_name(&self) -> Option<&str> {
        match self {
            Value::Object(object) => object.prototype.constructor_name(),
            Value::Array(_) => Some("Array"),
            Value::Date(_) => Some("Date"),
            _ => None,
        }
    }

    /// Identity-style equality: no coercion between kinds and `NaN` never
    /// equals anything. Values are owned and carry no identity, so arrays
    /// and objects compare by contents.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.prototype == b.prototype
                    && a.len() == b.len()
                    && a.fields
                        .iter()
                        .zip(&b.fields)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.strict_eq(vb))
            }
            _ => false,
        }
    }

    /// Ordering between comparable values of the same kind: numbers,
    /// strings and dates. Anything else is unordered.
    pub fn loose_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else {
        write!(f, "{n}")
    }
}

/// String coercion, as used by the pattern-based validators and by
/// message templating.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => format_number(*n, f),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !item.is_nullish() {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Value::Object(_) => f.write_str("[object Object]"),
            Value::Date(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::Date(dt)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => Value::Object(
                map.iter().map(|(k, v)| (k.clone(), Value::from(v))).collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from(&json)
    }
}
