//! Rooms and their occupancy

use crate::core::error::ConsoleError;
use crate::impl_entity;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;
use validator::Validate;

/// A room in a hostel block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_occupancy", skip_on_field_errors = true))]
pub struct Room {
    pub id: Uuid,

    /// Room number such as `A-101`
    #[validate(custom(function = "validate_room_number"))]
    pub number: String,

    pub block: Option<String>,

    #[validate(range(min = 1, max = 12, message = "capacity must be between 1 and 12"))]
    pub capacity: u32,

    pub occupied: u32,

    pub hostel_id: Option<Uuid>,
}

impl_entity!(Room, "room", [number, block, capacity, occupied, hostel_id]);

impl Room {
    /// Create a validated, empty room
    pub fn new(number: impl Into<String>, capacity: u32) -> Result<Self, ConsoleError> {
        let room = Self {
            id: Uuid::new_v4(),
            number: number.into().trim().to_uppercase(),
            block: None,
            capacity,
            occupied: 0,
            hostel_id: None,
        };
        room.validate()?;
        Ok(room)
    }

    pub fn in_block(mut self, block: impl Into<String>) -> Self {
        self.block = Some(block.into());
        self
    }

    pub fn in_hostel(mut self, hostel_id: Uuid) -> Self {
        self.hostel_id = Some(hostel_id);
        self
    }

    /// Set occupancy, rejecting more occupants than beds
    pub fn with_occupied(mut self, occupied: u32) -> Result<Self, ConsoleError> {
        self.occupied = occupied;
        self.validate()?;
        Ok(self)
    }

    pub fn vacancies(&self) -> u32 {
        self.capacity.saturating_sub(self.occupied)
    }
}

fn validate_room_number(number: &str) -> Result<(), validator::ValidationError> {
    static ROOM_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = ROOM_REGEX
        .get_or_init(|| Regex::new(r"^[A-Z]-\d{1,4}$").expect("room regex is valid"));

    if regex.is_match(number) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("room_number")
            .with_message("room number must look like A-101".into()))
    }
}

fn validate_occupancy(room: &Room) -> Result<(), validator::ValidationError> {
    if room.occupied > room.capacity {
        Err(validator::ValidationError::new("occupancy")
            .with_message("occupied exceeds capacity".into()))
    } else {
        Ok(())
    }
}
