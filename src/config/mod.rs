//! Configuration loading and management
//!
//! Screen defaults live in a YAML file:
//!
//! ```yaml
//! default_page_size: 10
//! screens:
//!   - entity: student
//!     page_size: 25
//!     search:
//!       search: [name, email]
//!     select:
//!       status: [status]
//!     default_sort:
//!       key: name
//!       direction: asc
//! ```

use crate::core::entity::Entity;
use crate::core::error::ConfigError;
use crate::core::page::DEFAULT_PAGE_SIZE;
use crate::core::sort::SortSpec;
use crate::core::view_model::ListViewModel;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Configuration for one list screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Entity type the screen lists (e.g., "student")
    pub entity: String,

    /// Rows per page; falls back to the console default
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Substring filters: filter name -> fields searched
    #[serde(default)]
    pub search: IndexMap<String, Vec<String>>,

    /// Whole-value filters: filter name -> fields compared
    #[serde(default)]
    pub select: IndexMap<String, Vec<String>>,

    /// Initial sort
    #[serde(default)]
    pub default_sort: Option<SortSpec>,
}

impl ScreenConfig {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            page_size: None,
            search: IndexMap::new(),
            select: IndexMap::new(),
            default_sort: None,
        }
    }

    /// Build a view model with this screen's bindings, sort and page size
    pub fn build_view_model<T: Entity>(&self, fallback_page_size: usize) -> ListViewModel<T> {
        let mut list = ListViewModel::new(self.page_size.unwrap_or(fallback_page_size));
        for (name, fields) in &self.search {
            list.bind_filter(name.clone(), fields.iter().cloned());
        }
        for (name, fields) in &self.select {
            list.bind_exact_filter(name.clone(), fields.iter().cloned());
        }
        list.set_sort_spec(self.default_sort.clone());
        list
    }
}

/// Complete console configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Rows per page for screens that do not set their own
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Per-screen settings
    #[serde(default)]
    pub screens: Vec<ScreenConfig>,
}

impl ConsoleConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot produce a usable screen
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_page_size".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        for screen in &self.screens {
            if screen.page_size == Some(0) {
                return Err(ConfigError::InvalidValue {
                    field: format!("screens.{}.page_size", screen.entity),
                    value: "0".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Find the configuration for an entity type
    pub fn screen(&self, entity: &str) -> Result<&ScreenConfig, ConfigError> {
        self.screens
            .iter()
            .find(|s| s.entity == entity)
            .ok_or_else(|| ConfigError::UnknownScreen {
                entity_type: entity.to_string(),
            })
    }

    /// Build the view model for an entity type, falling back to a plain
    /// one when no screen is configured
    pub fn view_model_for<T: Entity>(&self, entity: &str) -> ListViewModel<T> {
        match self.screen(entity) {
            Ok(screen) => screen.build_view_model(self.default_page_size),
            Err(_) => ListViewModel::new(self.default_page_size),
        }
    }

    /// Default configuration covering the built-in entities
    pub fn default_config() -> Self {
        let mut students = ScreenConfig::new("student");
        students
            .search
            .insert("search".to_string(), vec!["name".into(), "email".into()]);
        students
            .select
            .insert("room".to_string(), vec!["room_number".into()]);
        students.default_sort = Some(SortSpec::ascending("name"));

        let mut rooms = ScreenConfig::new("room");
        rooms
            .search
            .insert("search".to_string(), vec!["number".into(), "block".into()]);
        rooms.default_sort = Some(SortSpec::ascending("number"));

        let mut notices = ScreenConfig::new("notice");
        notices
            .search
            .insert("search".to_string(), vec!["title".into(), "body".into()]);
        notices.default_sort = Some(SortSpec::descending("posted_on"));

        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            screens: vec![students, rooms, notices],
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
