//! Traits that let filters read values out of caller types.
//!
//! [`Scalar`] is implemented by anything a scalar [`Filter`](crate::Filter)
//! can test directly. [`Record`] is implemented by anything a
//! [`RecordFilter`](crate::RecordFilter) can look fields up in.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::value::{Number, Value};

/// A value a filter can test.
///
/// Implemented for strings, booleans, every primitive number type,
/// `Option<T>` (where `None` is null), references, and `serde_json::Value`.
///
/// # Manual Implementation
///
/// ```
/// use standout_sift::{Scalar, Value};
///
/// struct Tag(String);
///
/// impl Scalar for Tag {
///     fn scalar_value(&self) -> Value<'_> {
///         Value::String(&self.0)
///     }
/// }
/// ```
pub trait Scalar {
    /// Returns a borrowed view of this value for comparison.
    fn scalar_value(&self) -> Value<'_>;
}

impl Scalar for str {
    fn scalar_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl Scalar for String {
    fn scalar_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl Scalar for bool {
    fn scalar_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

macro_rules! scalar_number {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                fn scalar_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

scalar_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: Scalar> Scalar for Option<T> {
    fn scalar_value(&self) -> Value<'_> {
        match self {
            Some(value) => value.scalar_value(),
            None => Value::Null,
        }
    }
}

impl<T: Scalar + ?Sized> Scalar for &T {
    fn scalar_value(&self) -> Value<'_> {
        (**self).scalar_value()
    }
}

impl Scalar for serde_json::Value {
    fn scalar_value(&self) -> Value<'_> {
        match self {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(Number::from(n)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(_) => Value::Composite("array"),
            serde_json::Value::Object(_) => Value::Composite("object"),
        }
    }
}

/// A key/value structure whose fields can be looked up by name.
///
/// Returning `None` means the field is absent, which is what the
/// missing-key policy of a [`Criterion`](crate::Criterion) acts on. A
/// present field holding null is `Some(Value::Null)`.
///
/// # Manual Implementation
///
/// ```
/// use standout_sift::{Number, Record, Value};
///
/// struct Person {
///     name: String,
///     age: Option<u8>,
/// }
///
/// impl Record for Person {
///     fn field(&self, name: &str) -> Option<Value<'_>> {
///         match name {
///             "name" => Some(Value::String(&self.name)),
///             "age" => self.age.map(|age| Value::Number(Number::from(age))),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value stored under `name`, or `None` if there is none.
    fn field(&self, name: &str) -> Option<Value<'_>>;
}

impl<K, V, S> Record for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: Scalar,
    S: BuildHasher,
{
    fn field(&self, name: &str) -> Option<Value<'_>> {
        self.get(name).map(Scalar::scalar_value)
    }
}

impl<K, V> Record for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: Scalar,
{
    fn field(&self, name: &str) -> Option<Value<'_>> {
        self.get(name).map(Scalar::scalar_value)
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        self.get(name).map(Scalar::scalar_value)
    }
}

/// Only JSON objects have fields; every other JSON value reports all fields
/// as absent.
impl Record for serde_json::Value {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        self.as_object().and_then(|object| object.field(name))
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        (**self).field(name)
    }
}

/// Adapts an accessor function into a [`Record`].
pub(crate) struct Accessed<'t, T, F> {
    pub(crate) item: &'t T,
    pub(crate) accessor: F,
}

impl<T, F> Record for Accessed<'_, T, F>
where
    for<'a> F: Fn(&'a T, &str) -> Option<Value<'a>>,
{
    fn field(&self, name: &str) -> Option<Value<'_>> {
        (self.accessor)(self.item, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_primitives() {
        assert_eq!("abc".scalar_value(), Value::String("abc"));
        assert_eq!(String::from("abc").scalar_value(), Value::String("abc"));
        assert_eq!(true.scalar_value(), Value::Bool(true));
        assert_eq!(12u8.scalar_value(), Value::Number(Number::U64(12)));
        assert_eq!((-3i32).scalar_value(), Value::Number(Number::I64(-3)));
        assert_eq!(None::<i32>.scalar_value(), Value::Null);
        assert_eq!(Some(1.5f64).scalar_value(), Value::Number(Number::F64(1.5)));
    }

    #[test]
    fn scalar_json() {
        assert_eq!(json!("x").scalar_value(), Value::String("x"));
        assert_eq!(json!(12).scalar_value(), Value::Number(Number::I64(12)));
        assert_eq!(json!(null).scalar_value(), Value::Null);
        assert_eq!(json!([1]).scalar_value(), Value::Composite("array"));
        assert_eq!(json!({}).scalar_value(), Value::Composite("object"));
    }

    #[test]
    fn hashmap_record() {
        let mut record: HashMap<String, String> = HashMap::new();
        record.insert("name".into(), "abcdef".into());
        assert_eq!(record.field("name"), Some(Value::String("abcdef")));
        assert_eq!(record.field("age"), None);

        let borrowed: HashMap<&str, i64> = [("age", 12)].into_iter().collect();
        assert_eq!(borrowed.field("age"), Some(Value::Number(Number::I64(12))));
    }

    #[test]
    fn btreemap_record() {
        let record: BTreeMap<String, Option<i32>> =
            [("age".to_string(), None)].into_iter().collect();
        assert_eq!(record.field("age"), Some(Value::Null));
        assert_eq!(record.field("name"), None);
    }

    #[test]
    fn json_record() {
        let record = json!({"name": "abcdef", "age": 12, "tags": ["a"]});
        assert_eq!(record.field("name"), Some(Value::String("abcdef")));
        assert_eq!(record.field("age"), Some(Value::Number(Number::I64(12))));
        assert_eq!(record.field("tags"), Some(Value::Composite("array")));
        assert_eq!(record.field("missing"), None);
        assert_eq!(json!([1, 2]).field("0"), None);
    }

    struct Item {
        id: u32,
    }

    fn item_accessor<'a>(item: &'a Item, field: &str) -> Option<Value<'a>> {
        match field {
            "id" => Some(Value::Number(Number::from(item.id))),
            _ => None,
        }
    }

    #[test]
    fn accessor_record() {
        let item = Item { id: 7 };
        let record = Accessed {
            item: &item,
            accessor: item_accessor,
        };
        assert_eq!(record.field("id"), Some(Value::Number(Number::U64(7))));
        assert_eq!(record.field("name"), None);
    }
}
