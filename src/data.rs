//! Dynamic values flowing into and out of cleaners.
//!
//! [`Data`] models untrusted input (typically parsed JSON) and the type-erased
//! form of clean output. Raw and clean values share one type because the
//! reverse direction feeds clean values back through the same cleaner tree.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

/// An insertion-ordered object, keyed by property name.
pub type Object = IndexMap<String, Data>;

/// A dynamically-typed value.
///
/// `Undefined` stands for an absent value: a missing object property or a
/// tuple position past the end of the input. It is distinct from `Null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Data {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Data>),
    Object(Object),
}

pub(crate) const UNDEFINED: &Data = &Data::Undefined;

impl Data {
    /// Converts a parsed JSON value. Numbers become `f64` and object key order is kept.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Data::Null,
            Value::Bool(b) => Data::Bool(b),
            Value::Number(n) => Data::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Data::String(s),
            Value::Array(items) => Data::Array(items.into_iter().map(Data::from_json).collect()),
            Value::Object(map) => Data::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Data::from_json(value)))
                    .collect(),
            ),
        }
    }

    /// Parses JSON text into a value.
    pub fn parse_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Value>(text).map(Data::from_json)
    }

    /// Converts this value to JSON using standard stringification rules.
    ///
    /// Undefined object members are dropped, undefined array items become
    /// `null`, non-finite numbers become `null`, and dates become ISO-8601
    /// strings. Returns `None` for a top-level `Undefined`, which has no JSON form.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cleaners::Data;
    /// use serde_json::json;
    ///
    /// let data = Data::Array(vec![Data::Number(1.0), Data::Undefined, Data::Number(f64::NAN)]);
    /// assert_eq!(data.to_json(), Some(json!([1, null, null])));
    /// assert_eq!(Data::Undefined.to_json(), None);
    /// ```
    pub fn to_json(&self) -> Option<Value> {
        let value = match self {
            Data::Undefined => return None,
            Data::Null => Value::Null,
            Data::Bool(b) => Value::Bool(*b),
            Data::Number(n) => number_to_json(*n),
            Data::String(s) => Value::String(s.clone()),
            Data::Date(date) => Value::String(format_date(date)),
            Data::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| item.to_json().unwrap_or(Value::Null))
                    .collect(),
            ),
            Data::Object(object) => {
                let mut map = Map::with_capacity(object.len());
                for (key, value) in object {
                    if let Some(json) = value.to_json() {
                        map.insert(key.clone(), json);
                    }
                }
                Value::Object(map)
            }
        };
        Some(value)
    }

    /// Serializes this value as compact JSON text, or `None` for `Undefined`.
    ///
    /// Numbers are written in their shortest form, with integer digits below
    /// `1e21` and exponent notation (`1e+21`, `1.5e-7`) outside `[1e-6, 1e21)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cleaners::Data;
    ///
    /// let data = Data::from(vec![1e16, 1e21, 1.5e-7]);
    /// assert_eq!(data.to_json_string().unwrap(), "[10000000000000000,1e+21,1.5e-7]");
    /// ```
    pub fn to_json_string(&self) -> Option<String> {
        if matches!(self, Data::Undefined) {
            return None;
        }
        let mut out = String::new();
        self.write_json(&mut out);
        Some(out)
    }

    fn write_json(&self, out: &mut String) {
        match self {
            Data::Undefined | Data::Null => out.push_str("null"),
            Data::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Data::Number(n) if n.is_finite() => out.push_str(&format_number(*n)),
            Data::Number(_) => out.push_str("null"),
            Data::String(s) => write_json_string(s, out),
            Data::Date(date) => write_json_string(&format_date(date), out),
            Data::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_json(out);
                }
                out.push(']');
            }
            Data::Object(object) => {
                out.push('{');
                let members = object.iter().filter(|(_, value)| !matches!(value, Data::Undefined));
                for (i, (key, value)) in members.enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_json_string(key, out);
                    out.push(':');
                    value.write_json(out);
                }
                out.push('}');
            }
        }
    }

    /// Returns true for `Null` and `Undefined`.
    pub fn is_missing(&self) -> bool {
        matches!(self, Data::Null | Data::Undefined)
    }

    /// Compares two values the way a literal check does.
    ///
    /// Scalars compare by value, with `NaN` unequal to itself and `0 == -0`.
    /// Dates, arrays and objects have no identity here and never match.
    pub fn strict_eq(&self, other: &Data) -> bool {
        match (self, other) {
            (Data::Undefined, Data::Undefined) | (Data::Null, Data::Null) => true,
            (Data::Bool(a), Data::Bool(b)) => a == b,
            (Data::Number(a), Data::Number(b)) => a == b,
            (Data::String(a), Data::String(b)) => a == b,
            _ => false,
        }
    }

    /// Returns a short, display-safe description of this value for messages.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cleaners::Data;
    ///
    /// assert_eq!(Data::from("Hello").show(), "\"Hello\"");
    /// assert_eq!(Data::from(-2.5).show(), "-2.5");
    /// assert_eq!(Data::Number(f64::INFINITY).show(), "Infinity");
    /// assert_eq!(Data::Array(vec![]).show(), "array");
    /// ```
    pub fn show(&self) -> String {
        match self {
            Data::Undefined => "undefined".to_string(),
            Data::Null => "null".to_string(),
            Data::Bool(b) => b.to_string(),
            Data::Number(n) => format_number(*n),
            Data::String(s) => Value::String(s.clone()).to_string(),
            Data::Array(_) => "array".to_string(),
            Data::Date(_) | Data::Object(_) => "object".to_string(),
        }
    }

    /// Returns the boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Data::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number, if this is a `Number`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Data::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Data::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the date, if this is a `Date`.
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Data::Date(date) => Some(date),
            _ => None,
        }
    }

    /// Returns the items, if this is an `Array`.
    pub fn as_array(&self) -> Option<&[Data]> {
        match self {
            Data::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the members, if this is an `Object`.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Data::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Looks up an object property, returning `Undefined` when absent.
    pub fn get(&self, key: &str) -> &Data {
        self.as_object()
            .and_then(|object| object.get(key))
            .unwrap_or(UNDEFINED)
    }
}

/// Formats a date the way the date codec encodes it: `YYYY-MM-DDTHH:MM:SS.sssZ`.
///
/// Years outside `0000..=9999` use the expanded form `±YYYYYY-MM-DDTHH:MM:SS.sssZ`.
pub(crate) fn format_date(date: &DateTime<Utc>) -> String {
    let year = date.year();
    if (0..=9999).contains(&year) {
        return date.to_rfc3339_opts(SecondsFormat::Millis, true);
    }
    let sign = if year < 0 { '-' } else { '+' };
    format!(
        "{}{:06}-{}",
        sign,
        year.unsigned_abs(),
        date.format("%m-%dT%H:%M:%S%.3fZ")
    )
}

fn write_json_string(s: &str, out: &mut String) {
    out.push_str(&Value::String(s.to_owned()).to_string());
}

fn number_to_json(n: f64) -> Value {
    if !n.is_finite() {
        return Value::Null;
    }
    if n.fract() == 0.0 {
        // Exact for every integral f64 inside each half-open range.
        if (i64::MIN as f64..i64::MAX as f64).contains(&n) {
            return Value::Number(Number::from(n as i64));
        }
        if (0.0..u64::MAX as f64).contains(&n) {
            return Value::Number(Number::from(n as u64));
        }
    }
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

/// Formats a number in its shortest round-trip form, using exponent
/// notation outside `[1e-6, 1e21)`.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    // `{:e}` omits the plus sign on positive exponents.
    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

impl From<Value> for Data {
    fn from(value: Value) -> Self {
        Data::from_json(value)
    }
}

impl From<bool> for Data {
    fn from(b: bool) -> Self {
        Data::Bool(b)
    }
}

impl From<f64> for Data {
    fn from(n: f64) -> Self {
        Data::Number(n)
    }
}

impl From<f32> for Data {
    fn from(n: f32) -> Self {
        Data::Number(f64::from(n))
    }
}

impl From<i32> for Data {
    fn from(n: i32) -> Self {
        Data::Number(f64::from(n))
    }
}

impl From<u32> for Data {
    fn from(n: u32) -> Self {
        Data::Number(f64::from(n))
    }
}

impl From<i64> for Data {
    fn from(n: i64) -> Self {
        Data::Number(n as f64)
    }
}

impl From<u64> for Data {
    fn from(n: u64) -> Self {
        Data::Number(n as f64)
    }
}

impl From<&str> for Data {
    fn from(s: &str) -> Self {
        Data::String(s.to_string())
    }
}

impl From<String> for Data {
    fn from(s: String) -> Self {
        Data::String(s)
    }
}

impl From<DateTime<Utc>> for Data {
    fn from(date: DateTime<Utc>) -> Self {
        Data::Date(date)
    }
}

impl<T: Into<Data>> From<Vec<T>> for Data {
    fn from(items: Vec<T>) -> Self {
        Data::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Data>> From<IndexMap<String, T>> for Data {
    fn from(map: IndexMap<String, T>) -> Self {
        Data::Object(
            map.into_iter()
                .map(|(key, value)| (key, value.into()))
                .collect(),
        )
    }
}

impl<T: Into<Data>> From<Option<T>> for Data {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Data::Undefined)
    }
}

macro_rules! tuple_into_data {
    ($($name:ident),+) => {
        impl<$($name: Into<Data>),+> From<($($name,)+)> for Data {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                Data::Array(vec![$($name.into()),+])
            }
        }
    };
}

tuple_into_data!(A);
tuple_into_data!(A, B);
tuple_into_data!(A, B, C);
tuple_into_data!(A, B, C, D);
tuple_into_data!(A, B, C, D, E);
tuple_into_data!(A, B, C, D, E, F);
tuple_into_data!(A, B, C, D, E, F, G);
tuple_into_data!(A, B, C, D, E, F, G, H);
