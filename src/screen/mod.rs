//! CRUD screen state machine
//!
//! A [`Screen`] ties a [`ListViewModel`] to its [`DataSource`] and drives the
//! list → modal → write → refresh cycle through explicit states:
//!
//! ```text
//!            refresh ok                 begin_create / begin_edit
//!   Loading ──────────▶ Idle ─────────────────────────────▶ Editing
//!      ▲  │              │  ▲                                 │ submit ok
//!      │  │ fetch error  │  └─────────────────────────────────┘ (refresh)
//!      │  ▼              │ request_delete
//!     Error ◀──────── ConfirmingDelete ── confirm_delete ok ──▶ Idle
//! ```
//!
//! `cancel()` returns to `Idle` from any state. Every state change happens in
//! one place, so leaving a modal always clears the modal's record.

use crate::core::entity::Entity;
use crate::core::error::{ConsoleError, Result, ValidationError};
use crate::core::field::FieldValue;
use crate::core::notify::NotificationBus;
use crate::core::page::VisiblePage;
use crate::core::service::DataSource;
use crate::core::session::Session;
use crate::core::view_model::ListViewModel;
use uuid::Uuid;

/// What an open edit modal is editing
#[derive(Debug, Clone, PartialEq)]
pub enum Draft<T> {
    /// Create form
    New,
    /// Edit form for an existing record
    Existing(T),
}

/// Screen lifecycle state
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<T> {
    Idle,
    Loading,
    Editing(Draft<T>),
    ConfirmingDelete(T),
    Error(String),
}

impl<T> ScreenState<T> {
    /// Short state name used in errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            ScreenState::Idle => "idle",
            ScreenState::Loading => "loading",
            ScreenState::Editing(_) => "editing",
            ScreenState::ConfirmingDelete(_) => "confirming delete",
            ScreenState::Error(_) => "showing an error",
        }
    }
}

/// One list screen bound to a data source
pub struct Screen<T: Entity, D: DataSource<T>> {
    session: Session,
    source: D,
    list: ListViewModel<T>,
    state: ScreenState<T>,
    notifications: NotificationBus,
}

impl<T: Entity, D: DataSource<T>> Screen<T, D> {
    /// Create a screen. Call [`Screen::refresh`] to load the first page.
    pub fn new(
        session: Session,
        source: D,
        list: ListViewModel<T>,
        notifications: NotificationBus,
    ) -> Self {
        Self {
            session,
            source,
            list,
            state: ScreenState::Idle,
            notifications,
        }
    }

    pub fn state(&self) -> &ScreenState<T> {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    pub fn list(&self) -> &ListViewModel<T> {
        &self.list
    }

    /// Mutable access for filter, sort and paging interactions
    pub fn list_mut(&mut self) -> &mut ListViewModel<T> {
        &mut self.list
    }

    pub fn visible_page(&self) -> VisiblePage<T> {
        self.list.visible_page()
    }

    // === Loading ===

    /// Fetch every record and replace the list.
    ///
    /// On failure the list keeps its previous contents, the screen moves to
    /// `Error`, and an error toast is published.
    pub async fn refresh(&mut self) -> Result<()> {
        match self.state {
            ScreenState::Idle | ScreenState::Loading | ScreenState::Error(_) => self.reload().await,
            _ => Err(self.invalid("refresh")),
        }
    }

    async fn reload(&mut self) -> Result<()> {
        self.state = ScreenState::Loading;

        match self.source.fetch_all().await {
            Ok(records) => {
                let fetched = records.len();
                let records: Vec<T> = records.into_iter().filter(|r| self.in_scope(r)).collect();
                tracing::debug!(
                    entity_type = self.source.entity_type(),
                    fetched,
                    visible = records.len(),
                    "List refreshed"
                );
                self.list.set_collection(records);
                self.state = ScreenState::Idle;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    entity_type = self.source.entity_type(),
                    error = %e,
                    "Failed to refresh list, keeping previous rows"
                );
                self.notifications.error(e.to_string());
                self.state = ScreenState::Error(e.to_string());
                Err(e)
            }
        }
    }

    // === Editing ===

    /// Open the create modal
    pub fn begin_create(&mut self) -> Result<()> {
        self.require_idle("create")?;
        self.require_write("create")?;
        self.state = ScreenState::Editing(Draft::New);
        Ok(())
    }

    /// Open the edit modal for a listed record
    pub fn begin_edit(&mut self, id: &Uuid) -> Result<()> {
        self.require_idle("edit")?;
        self.require_write("edit")?;
        let record = self.listed(id)?;
        self.state = ScreenState::Editing(Draft::Existing(record));
        Ok(())
    }

    /// Save the modal's record, then refresh.
    ///
    /// Validation and write failures keep the modal open. Once the write has
    /// succeeded a failed refresh does not undo it: the saved record is
    /// returned and the screen shows the refresh error.
    pub async fn submit(&mut self, record: T) -> Result<T> {
        let draft = match &self.state {
            ScreenState::Editing(draft) => draft.clone(),
            _ => return Err(self.invalid("submit")),
        };

        if let Err(e) = self.prepare(&draft, &record) {
            self.notifications.warning(e.to_string());
            return Err(e);
        }

        let (written, verb) = match draft {
            Draft::New => (self.source.create(record).await, "created"),
            Draft::Existing(_) => (self.source.update(record).await, "updated"),
        };

        let saved = match written {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(
                    entity_type = self.source.entity_type(),
                    error = %e,
                    "Write failed"
                );
                self.notifications.error(e.to_string());
                return Err(e);
            }
        };

        tracing::info!(
            entity_type = self.source.entity_type(),
            id = %saved.id(),
            user = %self.session.user_id,
            "Record {}",
            verb
        );
        self.notifications
            .success(format!("{} {}", capitalize(self.source.entity_type()), verb));

        if let Err(e) = self.reload().await {
            tracing::debug!(
                entity_type = self.source.entity_type(),
                id = %saved.id(),
                error = %e,
                "Record saved but list refresh failed"
            );
        }
        Ok(saved)
    }

    fn prepare(&self, draft: &Draft<T>, record: &T) -> Result<()> {
        if let Draft::Existing(original) = draft {
            if original.id() != record.id() {
                return Err(ValidationError::FieldError {
                    field: "id".to_string(),
                    message: "does not match the record being edited".to_string(),
                }
                .into());
            }
        }

        if !self.in_scope(record) {
            return Err(self.forbidden("write outside their hostel"));
        }

        record.check()?;
        Ok(())
    }

    // === Deleting ===

    /// Ask for confirmation before deleting a listed record
    pub fn request_delete(&mut self, id: &Uuid) -> Result<()> {
        self.require_idle("delete")?;
        if !self.session.can_delete() {
            return Err(self.forbidden("delete"));
        }
        let record = self.listed(id)?;
        self.state = ScreenState::ConfirmingDelete(record);
        Ok(())
    }

    /// Delete the record awaiting confirmation, then refresh
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let record = match &self.state {
            ScreenState::ConfirmingDelete(record) => record.clone(),
            _ => return Err(self.invalid("confirm delete")),
        };

        if let Err(e) = self.source.delete(&record.id()).await {
            tracing::warn!(
                entity_type = self.source.entity_type(),
                id = %record.id(),
                error = %e,
                "Delete failed"
            );
            self.notifications.error(e.to_string());
            self.state = ScreenState::Error(e.to_string());
            return Err(e);
        }

        tracing::info!(
            entity_type = self.source.entity_type(),
            id = %record.id(),
            user = %self.session.user_id,
            "Record deleted"
        );
        self.notifications
            .success(format!("{} deleted", capitalize(self.source.entity_type())));

        if let Err(e) = self.reload().await {
            tracing::debug!(
                entity_type = self.source.entity_type(),
                id = %record.id(),
                error = %e,
                "Record deleted but list refresh failed"
            );
        }
        Ok(())
    }

    /// Close any modal or error and return to `Idle`
    pub fn cancel(&mut self) {
        self.state = ScreenState::Idle;
    }

    // === Helpers ===

    /// A `hostel_id` that is present but not a valid id is only visible to
    /// unscoped sessions.
    fn in_scope(&self, record: &T) -> bool {
        match record.field_value("hostel_id") {
            None | Some(FieldValue::Null) => self.session.scope_allows(None),
            Some(value) => match value.as_string().and_then(|s| Uuid::parse_str(s).ok()) {
                Some(hostel) => self.session.scope_allows(Some(hostel)),
                None => self.session.hostel_id.is_none(),
            },
        }
    }

    fn listed(&self, id: &Uuid) -> Result<T> {
        self.list
            .find(id)
            .cloned()
            .ok_or_else(|| ConsoleError::NotFound {
                entity_type: self.source.entity_type().to_string(),
                id: *id,
            })
    }

    fn require_idle(&self, action: &str) -> Result<()> {
        match self.state {
            ScreenState::Idle => Ok(()),
            _ => Err(self.invalid(action)),
        }
    }

    fn require_write(&self, action: &str) -> Result<()> {
        if self.session.can_write() {
            Ok(())
        } else {
            Err(self.forbidden(action))
        }
    }

    fn invalid(&self, action: &str) -> ConsoleError {
        ConsoleError::InvalidTransition {
            action: action.to_string(),
            state: self.state.name().to_string(),
        }
    }

    fn forbidden(&self, action: &str) -> ConsoleError {
        ConsoleError::Forbidden {
            action: action.to_string(),
            role: self.session.role.as_str().to_string(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
