//! The parsed value model.
//!
//! A WAVE document parses into a [`Value`] tree. Records keep their fields in
//! a `Vec<(String, Value)>` so source order survives without pulling in an
//! ordered-map dependency; records printed by component exports are small, so
//! lookups are linear scans.

/// One parsed unit of WAVE text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A quoted string with the surrounding quotes removed.
    String(String),
    /// An unsigned digit run, stored as `i64`.
    Integer(i64),
    Boolean(bool),
    Record(Record),
}

impl Value {
    /// Short name of the value's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Boolean(_) => "boolean",
            Value::Record(_) => "record",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
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

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

/// An ordered set of named fields.
///
/// Field names are unique: inserting a name that is already present replaces
/// its value in place, so the field keeps the position of its first
/// occurrence and the value of its last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field. Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in record order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// `true` if `name` matches the field-name pattern `[a-z][a-z-]*`.
pub fn is_field_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(b'a'..=b'z') => bytes.all(|b| b.is_ascii_lowercase() || b == b'-'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut r = Record::new();
        r.insert("age", 3i64);
        r.insert("name", "Rex");
        assert_eq!(r.insert("age", 7i64), Some(Value::Integer(3)));
        assert_eq!(r.names().collect::<Vec<_>>(), vec!["age", "name"]);
        assert_eq!(r.get("age"), Some(&Value::Integer(7)));
    }

    #[test]
    fn field_name_pattern() {
        assert!(is_field_name("is-mammal"));
        assert!(is_field_name("a"));
        assert!(is_field_name("trailing-"));
        assert!(!is_field_name(""));
        assert!(!is_field_name("-lead"));
        assert!(!is_field_name("Name"));
        assert!(!is_field_name("snake_case"));
        assert!(!is_field_name("x1"));
    }
}
