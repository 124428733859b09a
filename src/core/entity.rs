//! Entity trait and the dynamic `Record` document

use crate::core::error::ValidationError;
use crate::core::field::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Base trait for anything a list screen can display.
///
/// An entity has a stable identifier and exposes its fields by name so
/// filters and sort comparators can read them without knowing the
/// concrete type. Implementations must return `None` for absent fields
/// rather than inventing a default.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Get the entity type name (e.g., "student", "room")
    fn entity_type(&self) -> &str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Validate the entity before it is written.
    ///
    /// Dynamic records accept anything; typed entities override this.
    fn check(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// An opaque document as exposed by the remote store.
///
/// Field order is preserved so that rendering and JSON output follow the
/// order the store produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier for this record
    pub id: Uuid,

    /// Type of the record (e.g., "student", "notice")
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Field values keyed by name
    #[serde(default)]
    pub fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record with a fresh identifier
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), entity_type)
    }

    /// Create an empty record with a known identifier
    pub fn with_id(id: Uuid, entity_type: impl Into<String>) -> Self {
        Self {
            id,
            entity_type: entity_type.into(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set or replace a field
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Look up a field, following dotted paths into nested maps
    /// (`"address.city"`).
    pub fn get(&self, path: &str) -> Option<&FieldValue> {
        if let Some(value) = self.fields.get(path) {
            return Some(value);
        }

        let mut parts = path.split('.');
        let mut current = self.fields.get(parts.next()?)?;
        for part in parts {
            current = current.as_map()?.get(part)?;
        }
        Some(current)
    }

    /// Build a record from a JSON object.
    ///
    /// An `"id"` member that parses as a UUID becomes the identifier and
    /// is not kept as a field; otherwise a fresh identifier is assigned.
    /// Non-object input yields a record with no fields.
    pub fn from_json(entity_type: impl Into<String>, value: &Value) -> Self {
        let mut fields: IndexMap<String, FieldValue> = value
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| {
                        serde_json::from_value::<FieldValue>(v.clone())
                            .ok()
                            .map(|fv| (k.clone(), fv))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let id = fields
            .get("id")
            .and_then(FieldValue::as_string)
            .and_then(|s| Uuid::parse_str(s).ok());

        if id.is_some() {
            fields.shift_remove("id");
        }

        Self {
            id: id.unwrap_or_else(Uuid::new_v4),
            entity_type: entity_type.into(),
            fields,
        }
    }

    /// Flatten to a JSON object with the identifier under `"id"`
    pub fn to_json(&self) -> Value {
        let mut obj = serde_json::Map::new();
        obj.insert("id".to_string(), Value::String(self.id.to_string()));
        for (k, v) in &self.fields {
            obj.insert(
                k.clone(),
                serde_json::to_value(v).unwrap_or(Value::Null),
            );
        }
        Value::Object(obj)
    }
}

impl Entity for Record {
    fn entity_type(&self) -> &str {
        &self.entity_type
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        self.get(field).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_and_lookup() {
        let record = Record::new("student")
            .with_field("name", "Asha")
            .with_field("year", 2_i64);

        assert_eq!(record.entity_type(), "student");
        assert_eq!(record.field_value("name"), Some(FieldValue::from("Asha")));
        assert_eq!(record.field_value("year"), Some(FieldValue::Integer(2)));
        assert_eq!(record.field_value("email"), None);
    }

    #[test]
    fn test_dotted_path_into_nested_map() {
        let record = Record::from_json(
            "student",
            &json!({"name": "Ravi", "address": {"city": "Pune", "pin": 411001}}),
        );

        assert_eq!(record.get("address.city"), Some(&FieldValue::from("Pune")));
        assert_eq!(record.get("address.pin"), Some(&FieldValue::Integer(411001)));
        assert_eq!(record.get("address.street"), None);
        assert_eq!(record.get("name.first"), None);
    }

    #[test]
    fn test_from_json_takes_id() {
        let id = Uuid::new_v4();
        let record = Record::from_json("room", &json!({"id": id.to_string(), "number": "B-12"}));

        assert_eq!(record.id(), id);
        assert!(!record.fields.contains_key("id"));
        assert_eq!(record.to_json()["id"], json!(id.to_string()));
        assert_eq!(record.to_json()["number"], json!("B-12"));
    }

    #[test]
    fn test_from_json_non_uuid_id_stays_a_field() {
        let record = Record::from_json("room", &json!({"id": "legacy-7"}));
        assert_eq!(record.get("id"), Some(&FieldValue::from("legacy-7")));
    }

    #[test]
    fn test_from_json_non_object_is_empty() {
        let record = Record::from_json("room", &json!([1, 2, 3]));
        assert!(record.fields.is_empty());
    }
}
