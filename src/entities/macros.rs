//! Macros for reducing boilerplate when defining entities
//!
//! Typed entities are plain structs with an `id: Uuid` member and
//! `validator::Validate` derived. The macro below generates the `Entity`
//! implementation plus a conversion into the dynamic [`Record`] so the same
//! value can flow through code that only knows documents.
//!
//! [`Record`]: crate::core::entity::Record

/// Implement `Entity` for a struct and expose the listed fields by name.
///
/// Every listed field must be `Clone` and convertible into `FieldValue`.
/// `None` options are reported as absent, not as null.
///
/// # Example
/// ```rust,ignore
/// #[derive(Debug, Clone, Serialize, Deserialize, Validate)]
/// pub struct Room {
///     pub id: Uuid,
///     #[validate(length(min = 1))]
///     pub number: String,
///     pub block: Option<String>,
/// }
///
/// impl_entity!(Room, "room", [number, block]);
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $entity_type:expr, [$($field:ident),* $(,)?]) => {
        impl $crate::core::entity::Entity for $type {
            fn entity_type(&self) -> &str {
                $entity_type
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                let value = match field {
                    "id" => $crate::core::field::FieldValue::from(self.id),
                    $(
                        stringify!($field) => {
                            $crate::core::field::FieldValue::from(self.$field.clone())
                        }
                    )*
                    _ => return None,
                };
                if value.is_null() { None } else { Some(value) }
            }

            fn check(&self) -> Result<(), $crate::core::error::ValidationError> {
                ::validator::Validate::validate(self).map_err(Into::into)
            }
        }

        impl From<$type> for $crate::core::entity::Record {
            fn from(entity: $type) -> Self {
                let mut record = $crate::core::entity::Record::with_id(entity.id, $entity_type);
                $(
                    let value = $crate::core::field::FieldValue::from(entity.$field.clone());
                    if !value.is_null() {
                        record.set(stringify!($field), value);
                    }
                )*
                record
            }
        }
    };
}
