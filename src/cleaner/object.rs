//! Object cleaners.
//!
//! This module provides the two object modes: [`MapCleaner`], which applies one
//! cleaner to every property of an arbitrary-keyed object, and
//! [`ObjectCleaner`], which checks the named properties of a [`Shape`].
//! Both skip a property literally named `__proto__`.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::data::{Data, Object, UNDEFINED};
use crate::error::{CleanError, CleanResult, ErrorKind};
use crate::path::PathSegment;

use super::traits::{Cleaner, DataCleaner};

/// Property name that is never copied into a clean object.
const PROTO_KEY: &str = "__proto__";

/// An ordered mapping from property name to cleaner.
///
/// Shapes are fixed once built. Property order is declaration order, and it
/// decides both the order checks run in and the key order of the output.
///
/// # Example
///
/// ```rust
/// use cleaners::{as_optional, as_string, Shape};
///
/// let shape = Shape::new()
///     .field("here", as_string())
///     .field("maybe", as_optional(as_string()));
///
/// assert_eq!(shape.keys().collect::<Vec<_>>(), vec!["here", "maybe"]);
/// ```
#[derive(Clone, Default)]
pub struct Shape {
    fields: IndexMap<String, Arc<dyn DataCleaner>>,
}

impl Shape {
    /// Creates a shape with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property. Re-declaring a name replaces its cleaner in place.
    pub fn field<C>(mut self, name: impl Into<String>, cleaner: C) -> Self
    where
        C: Cleaner + 'static,
    {
        self.fields.insert(name.into(), Arc::new(cleaner));
        self
    }

    /// Returns the cleaner for a property.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn DataCleaner>> {
        self.fields.get(name)
    }

    /// Returns the property names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the properties in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn DataCleaner>)> {
        self.fields.iter().map(|(name, cleaner)| (name.as_str(), cleaner))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A cleaner for objects with arbitrary keys and a single value type.
///
/// Every own property of the input is cleaned in insertion order, except
/// `__proto__`, which is always dropped. Failures are located with the
/// JSON-quoted key, e.g. `["odd \"item\""]`.
///
/// # Example
///
/// ```rust
/// use cleaners::{as_map, as_number, Cleaner, Data};
///
/// let danger = Data::parse_json(r#"{"a": 1, "__proto__": 3}"#).unwrap();
/// let clean = as_map(as_number()).clean(&danger).unwrap();
///
/// assert_eq!(clean.len(), 1);
/// assert_eq!(clean["a"], 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct MapCleaner<C> {
    value: C,
    type_error_message: Option<String>,
}

impl<C: Cleaner> MapCleaner<C> {
    /// Creates a new map cleaner applying `value` to every property.
    pub fn new(value: C) -> Self {
        Self {
            value,
            type_error_message: None,
        }
    }

    /// Sets a custom message for input that is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    fn clean_entries<T>(
        &self,
        raw: &Data,
        clean_value: impl Fn(&Data) -> CleanResult<T>,
    ) -> CleanResult<IndexMap<String, T>> {
        let object = expect_object(raw, self.type_error_message.as_deref())?;
        let mut out = IndexMap::with_capacity(object.len());
        for (key, value) in object {
            if key == PROTO_KEY {
                continue;
            }
            let clean = clean_value(value).map_err(|e| e.locate(&PathSegment::key(key.as_str())))?;
            out.insert(key.clone(), clean);
        }
        Ok(out)
    }
}

impl<C: Cleaner> Cleaner for MapCleaner<C> {
    type Output = IndexMap<String, C::Output>;

    fn clean(&self, raw: &Data) -> CleanResult<Self::Output> {
        self.clean_entries(raw, |value| self.value.clean(value))
    }

    fn clean_to_data(&self, raw: &Data) -> CleanResult<Data> {
        self.clean_entries(raw, |value| self.value.clean_to_data(value))
            .map(Data::Object)
    }
}

/// A cleaner for objects with a fixed set of named properties.
///
/// The shape's properties are checked in declaration order against the
/// matching input properties, which may be absent (`Undefined`). The output
/// has exactly the shape's keys, in shape order; extra input properties are
/// dropped unless the cleaner was made with [`with_rest`](ObjectCleaner::with_rest).
/// Failures are located with `.name`.
///
/// # Example
///
/// ```rust
/// use cleaners::{as_object, as_optional, as_string, Cleaner, Data, Shape};
/// use serde_json::json;
///
/// let as_demo = as_object(
///     Shape::new()
///         .field("here", as_string())
///         .field("maybe", as_optional(as_string())),
/// );
///
/// let data = Data::from(json!({"here": "hi", "maybe": "!", "extra": false}));
/// assert_eq!(as_demo.clean(&data).unwrap().len(), 2);
/// assert_eq!(as_demo.with_rest().clean(&data).unwrap().len(), 3);
///
/// let error = as_demo.clean(&Data::from(json!({"here": "hi", "maybe": 1}))).unwrap_err();
/// assert_eq!(error.to_string(), "Expected a string, got 1 at .maybe");
/// ```
#[derive(Debug, Clone)]
pub struct ObjectCleaner {
    shape: Shape,
    keep_rest: bool,
    type_error_message: Option<String>,
}

impl ObjectCleaner {
    /// Creates a new object cleaner for the given shape.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            keep_rest: false,
            type_error_message: None,
        }
    }

    /// Returns the shape this cleaner checks.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns a variant that also copies every other input property into the output.
    ///
    /// Unknown properties are copied unmodified (except `__proto__`, which is
    /// dropped), then the shape's properties overwrite them with clean values.
    pub fn with_rest(&self) -> Self {
        Self {
            keep_rest: true,
            ..self.clone()
        }
    }

    /// Returns true if unknown properties are kept.
    pub fn keeps_rest(&self) -> bool {
        self.keep_rest
    }

    /// Sets a custom message for input that is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl Cleaner for ObjectCleaner {
    type Output = Object;

    fn clean(&self, raw: &Data) -> CleanResult<Object> {
        let object = expect_object(raw, self.type_error_message.as_deref())?;

        let mut out = Object::with_capacity(self.shape.len());
        if self.keep_rest {
            for (key, value) in object {
                if key != PROTO_KEY {
                    out.insert(key.clone(), value.clone());
                }
            }
        }

        for (name, cleaner) in self.shape.iter() {
            let value = object.get(name).unwrap_or(UNDEFINED);
            let clean = cleaner
                .clean_data(value)
                .map_err(|e| e.locate(&PathSegment::field(name)))?;
            out.insert(name.to_string(), clean);
        }
        Ok(out)
    }
}

/// Returns the properties of an object, or the object type-mismatch failure.
fn expect_object<'a>(raw: &'a Data, message: Option<&str>) -> CleanResult<&'a Object> {
    raw.as_object().ok_or_else(|| match message {
        Some(message) => CleanError::new(ErrorKind::ObjectExpected, message),
        None => CleanError::expected(ErrorKind::ObjectExpected, "an object", raw),
    })
}

/// Creates a cleaner for arbitrary-keyed objects whose values pass `value`.
pub fn as_map<C: Cleaner>(value: C) -> MapCleaner<C> {
    MapCleaner::new(value)
}

/// Creates a cleaner for objects with the properties declared in `shape`.
pub fn as_object(shape: Shape) -> ObjectCleaner {
    ObjectCleaner::new(shape)
}
