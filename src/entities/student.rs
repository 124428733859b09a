//! Student residents

use crate::core::error::ConsoleError;
use crate::impl_entity;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;
use validator::Validate;

/// A student resident as managed from the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Student {
    pub id: Uuid,

    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "invalid email"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    /// Room allocation, if any
    pub room_number: Option<String>,

    pub hostel_id: Option<Uuid>,

    pub active: bool,
}

impl_entity!(
    Student,
    "student",
    [name, email, phone, room_number, hostel_id, active]
);

impl Student {
    /// Create a validated, active student with no room allocated
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, ConsoleError> {
        let student = Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            email: email.into().trim().to_lowercase(),
            phone: None,
            room_number: None,
            hostel_id: None,
            active: true,
        };
        student.validate()?;
        Ok(student)
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Result<Self, ConsoleError> {
        self.phone = Some(phone.into());
        self.validate()?;
        Ok(self)
    }

    pub fn with_room(mut self, room_number: impl Into<String>) -> Self {
        self.room_number = Some(room_number.into());
        self
    }

    pub fn in_hostel(mut self, hostel_id: Uuid) -> Self {
        self.hostel_id = Some(hostel_id);
        self
    }
}

fn validate_phone(phone: &str) -> Result<(), validator::ValidationError> {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX.get_or_init(|| {
        // 10 digits, optional country code
        Regex::new(r"^(\+\d{1,3})?\d{10}$").expect("phone regex is valid")
    });

    if regex.is_match(phone) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("phone").with_message("invalid phone number".into()))
    }
}
