//! Typed errors for the data-source boundary and the screens built on it
//!
//! The list view model itself never fails; every input is normalized. The
//! errors here come from the [`DataSource`](crate::core::service::DataSource)
//! collaborator and from screen transitions, and are meant to end up as a
//! toast, not a crash.
//!
//! # Example
//!
//! ```rust,ignore
//! match screen.confirm_delete().await {
//!     Ok(()) => {}
//!     Err(ConsoleError::NotFound { id, .. }) => {
//!         println!("{} was already removed", id);
//!     }
//!     Err(e) if e.is_retryable() => schedule_retry(),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use serde::Serialize;
use uuid::Uuid;

/// Result alias used across the crate
pub type Result<T, E = ConsoleError> = std::result::Result<T, E>;

/// The main error type
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Network or auth failure while reading from the store
    #[error("Failed to fetch {entity_type}: {message}")]
    TransientFetch {
        entity_type: String,
        message: String,
    },

    /// Duplicate key on write
    #[error("{entity_type} with {field} '{value}' already exists")]
    Conflict {
        entity_type: String,
        field: String,
        value: String,
    },

    /// Update or delete target is missing
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: Uuid },

    /// Input rejected before it reached the store
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The session's role may not perform this action
    #[error("Role '{role}' is not allowed to {action}")]
    Forbidden { action: String, role: String },

    /// A screen operation was requested from a state that does not allow it
    #[error("Cannot {action} while {state}")]
    InvalidTransition { action: String, state: String },

    /// Configuration problems
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ConsoleError {
    /// Conflict on the record identifier
    pub fn duplicate_id(entity_type: impl Into<String>, id: Uuid) -> Self {
        ConsoleError::Conflict {
            entity_type: entity_type.into(),
            field: "id".to_string(),
            value: id.to_string(),
        }
    }

    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ConsoleError::TransientFetch { .. } => "TRANSIENT_FETCH",
            ConsoleError::Conflict { .. } => "CONFLICT",
            ConsoleError::NotFound { .. } => "NOT_FOUND",
            ConsoleError::Validation(_) => "VALIDATION_ERROR",
            ConsoleError::Forbidden { .. } => "FORBIDDEN",
            ConsoleError::InvalidTransition { .. } => "INVALID_TRANSITION",
            ConsoleError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Only transient fetch failures are worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, ConsoleError::TransientFetch { .. })
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

/// Errors related to input validation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_fields(.0))]
    FieldErrors(Vec<FieldValidationError>),
}

fn join_fields(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Field names involved, sorted
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = match self {
            ValidationError::FieldError { field, .. } => vec![field.as_str()],
            ValidationError::FieldErrors(errors) => {
                errors.iter().map(|e| e.field.as_str()).collect()
            }
        };
        fields.sort_unstable();
        fields
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut collected: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        collected.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(collected)
    }
}

impl From<validator::ValidationErrors> for ConsoleError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ConsoleError::Validation(errors.into())
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// No screen configured for an entity type
    #[error("No screen configured for entity type '{entity_type}'")]
    UnknownScreen { entity_type: String },
}
