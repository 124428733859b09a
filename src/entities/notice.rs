//! Notice board entries

use crate::core::error::ConsoleError;
use crate::impl_entity;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A notice posted to residents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Notice {
    pub id: Uuid,

    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub body: String,

    /// 1 (low) to 5 (urgent)
    #[validate(range(min = 1, max = 5))]
    pub priority: u32,

    pub published: bool,

    pub posted_on: NaiveDate,

    /// `None` for notices shown in every hostel
    pub hostel_id: Option<Uuid>,
}

impl_entity!(
    Notice,
    "notice",
    [title, body, priority, published, posted_on, hostel_id]
);

impl Notice {
    /// Create an unpublished, normal-priority draft dated today
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Result<Self, ConsoleError> {
        let notice = Self {
            id: Uuid::new_v4(),
            title: title.into().trim().to_string(),
            body: body.into(),
            priority: 3,
            published: false,
            posted_on: Utc::now().date_naive(),
            hostel_id: None,
        };
        notice.validate()?;
        Ok(notice)
    }

    pub fn with_priority(mut self, priority: u32) -> Result<Self, ConsoleError> {
        self.priority = priority;
        self.validate()?;
        Ok(self)
    }

    pub fn posted_on(mut self, date: NaiveDate) -> Self {
        self.posted_on = date;
        self
    }

    pub fn publish(mut self) -> Self {
        self.published = true;
        self
    }
}
