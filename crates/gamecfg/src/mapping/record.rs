//! Dynamic records for tables without a compile-time type.

use indexmap::IndexMap;
use serde::Serialize;

use crate::coerce::Value;

/// One row of a table as an ordered `field name → value` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Set a field value, keeping the field's original position if present.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.values.insert(field.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate fields in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Records of one table in source row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordCollection {
    records: Vec<Record>,
}

impl RecordCollection {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Record at a row index.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// First record whose `field` matches `id`.
    pub fn find_by(&self, field: &str, id: &Value) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| r.get(field).is_some_and(|v| v.matches_id(id)))
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i32, name: &str) -> Record {
        let mut r = Record::new();
        r.set("id", Value::Int(id));
        r.set("name", Value::from(name));
        r
    }

    #[test]
    fn test_record_keeps_field_order() {
        let mut r = record(1, "Zombie");
        r.set("id", Value::Int(9));
        assert_eq!(r.field_names().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(r.get("id"), Some(&Value::Int(9)));
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"id":9,"name":"Zombie"}"#);
    }

    #[test]
    fn test_find_by_first_match() {
        let collection = RecordCollection::new(vec![
            record(1, "Zombie"),
            record(2, "Skeleton"),
            record(2, "Ghost"),
        ]);
        let found = collection.find_by("id", &Value::Long(2)).unwrap();
        assert_eq!(found.get("name").and_then(Value::as_str), Some("Skeleton"));
        assert!(collection.find_by("id", &Value::Int(5)).is_none());
        assert!(collection.find_by("missing", &Value::Int(1)).is_none());
    }
}
