//! # Hostel Console
//!
//! The list-screen core of a student-housing admin console.
//!
//! Every console page follows the same pattern: fetch a collection from the
//! backing store, filter it with search boxes and dropdowns, sort it by a
//! clicked column, page through it, and open modals to create, edit or delete
//! rows. This crate implements that pattern once.
//!
//! ## Features
//!
//! - **ListViewModel**: filter (AND of named predicates), stable sort and
//!   pagination that never points past the last page
//! - **DataSource**: async CRUD contract with typed errors (transient fetch,
//!   conflict, not found)
//! - **Screen**: explicit `Idle/Loading/Editing/ConfirmingDelete/Error`
//!   state machine driving the list and its modals
//! - **Session**: role and hostel scope passed in, never read from globals
//! - **Typed entities**: validated `Student`, `Room` and `Notice` records
//! - **Configuration**: per-screen page size, filter bindings and default
//!   sort from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hostel::prelude::*;
//!
//! let config = ConsoleConfig::default_config();
//! let source = InMemoryDataSource::<Student>::new("student").with_unique_field("email");
//! let mut screen = Screen::new(
//!     Session::super_admin("root"),
//!     source,
//!     config.view_model_for("student"),
//!     NotificationBus::default(),
//! );
//!
//! screen.refresh().await?;
//! screen.list_mut().set_filter("search", "asha");
//! let page = screen.visible_page();
//! println!("{} ({} rows)", page.label(), page.total_count);
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod logging;
pub mod screen;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::{Entity, Record},
        error::{ConfigError, ConsoleError, ValidationError},
        field::FieldValue,
        filter::{FilterSet, FilterSpec, MatchMode},
        notify::{Notification, NotificationBus, NotificationLevel},
        page::{ListQuery, PageState, VisiblePage},
        service::DataSource,
        session::{Role, Session},
        sort::{SortDirection, SortSpec},
        view_model::ListViewModel,
    };

    // === Macros ===
    pub use crate::impl_entity;

    // === Entities ===
    pub use crate::entities::{Notice, Room, Student};

    // === Screens ===
    pub use crate::screen::{Draft, Screen, ScreenState};

    // === Storage ===
    pub use crate::storage::InMemoryDataSource;

    // === Config ===
    pub use crate::config::{ConsoleConfig, ScreenConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use uuid::Uuid;
}
