//! Core module containing the list-screen primitives

pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod notify;
pub mod page;
pub mod service;
pub mod session;
pub mod sort;
pub mod view_model;

pub use entity::{Entity, Record};
pub use error::{ConfigError, ConsoleError, ValidationError};
pub use field::FieldValue;
pub use filter::{FilterSet, FilterSpec, MatchMode};
pub use notify::{Notification, NotificationBus, NotificationLevel};
pub use page::{ListQuery, PageState, VisiblePage};
pub use service::DataSource;
pub use session::{Role, Session};
pub use sort::{SortDirection, SortSpec};
pub use view_model::ListViewModel;
