//! The portal: every piece of UI state behind a single owner.
//!
//! Each method corresponds to one user event. Cross-component effects (commit
//! then notify, close dialogs on sign-out) are applied here so that every
//! event is atomic under the caller's lock.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use crate::dialog::{AvatarTicket, Dialog, DialogState};
use crate::errors::AppError;
use crate::layout::Layout;
use crate::models::{
    check_unique_ids, FilterCriteria, FilterPatch, PortalSeed, Teacher, TeacherPatch,
    TeacherRole, TeacherStatus,
};
use crate::notify::{Notification, NotificationCenter};
use crate::search;
use crate::session::{LoginForm, PendingLogout, Session, SessionView, Theme};
use crate::store::{IdStrategy, TeacherStore};

/// Tunables injected at construction.
#[derive(Debug, Clone)]
pub struct PortalOptions {
    pub id_strategy: IdStrategy,
    pub logout_grace: Duration,
    pub notification_ttl: Duration,
    pub mobile_breakpoint: u32,
}

impl Default for PortalOptions {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::Sequential,
            logout_grace: Duration::from_millis(3000),
            notification_ttl: Duration::from_millis(3000),
            mobile_breakpoint: 768,
        }
    }
}

/// Values for the subject, status and role selectors.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub subjects: Vec<String>,
    pub statuses: Vec<TeacherStatus>,
    pub roles: Vec<TeacherRole>,
}

/// The filtered list plus the counts shown above it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherListing {
    pub teachers: Vec<Teacher>,
    pub filtered_count: usize,
    pub total_count: usize,
    pub options: FilterOptions,
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSnapshot {
    pub session: SessionView,
    pub theme: Theme,
    pub layout: Layout,
    pub dialog: Dialog,
    pub criteria: FilterCriteria,
    /// Absent while signed out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing: Option<TeacherListing>,
    pub notifications: Vec<Notification>,
    pub revision_id: u64,
}

/// A message that was "sent". Nothing is delivered.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub recipient_id: String,
    pub recipient_name: String,
    pub recipient_email: String,
    pub message: String,
}

#[derive(Debug)]
pub struct Portal {
    store: TeacherStore,
    criteria: FilterCriteria,
    session: Session,
    theme: Theme,
    dialog: DialogState,
    layout: Layout,
    notifications: NotificationCenter,
}

impl Portal {
    pub fn new(seed: PortalSeed, options: PortalOptions) -> Result<Self, AppError> {
        check_unique_ids(&seed.teachers)?;

        Ok(Self {
            store: TeacherStore::new(seed.teachers, options.id_strategy)?,
            criteria: FilterCriteria::default(),
            session: Session::new(seed.admin, options.logout_grace),
            theme: Theme::default(),
            dialog: DialogState::default(),
            layout: Layout::new(options.mobile_breakpoint),
            notifications: NotificationCenter::new(options.notification_ttl),
        })
    }

    pub fn revision_id(&self) -> u64 {
        self.store.revision_id()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn dialog(&self) -> &Dialog {
        self.dialog.current()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    // ==================== SESSION ====================

    pub fn login(&mut self, form: &LoginForm) -> Result<(), AppError> {
        self.session.login(form)?;
        self.notifications.success("Login Successful");
        Ok(())
    }

    /// Start the logout grace period. The caller completes it with
    /// [`Portal::complete_logout`] once the grace period has elapsed.
    pub fn request_logout(&mut self) -> Result<PendingLogout, AppError> {
        let pending = self.session.request_logout()?;
        self.notifications.success("Logout Successful");
        Ok(pending)
    }

    pub fn cancel_logout(&mut self) -> Result<bool, AppError> {
        self.session.require_signed_in()?;
        Ok(self.session.cancel_logout())
    }

    pub fn complete_logout(&mut self, token: u64) -> bool {
        if !self.session.complete_logout(token) {
            return false;
        }
        self.dialog.close();
        self.layout.close_profile_dropdown();
        self.layout.close_sidebar();
        true
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        tracing::debug!(theme = ?self.theme, "Theme toggled");
        self.theme
    }

    // ==================== RECORDS ====================

    /// Filtered view under the stored criteria.
    pub fn filtered_teachers(&self) -> Result<Vec<Teacher>, AppError> {
        self.teachers_matching(&self.criteria)
    }

    pub fn teachers_matching(&self, criteria: &FilterCriteria) -> Result<Vec<Teacher>, AppError> {
        self.session.require_signed_in()?;
        Ok(search::filter_teachers(self.store.list(), criteria))
    }

    pub fn teacher(&self, id: &str) -> Result<Teacher, AppError> {
        self.session.require_signed_in()?;
        self.find(id)
    }

    fn find(&self, id: &str) -> Result<Teacher, AppError> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Teacher {} not found", id)))
    }

    /// Remove a teacher. Deleting an unknown id changes nothing.
    pub fn delete_teacher(&mut self, id: &str) -> Result<Option<Teacher>, AppError> {
        self.session.require_signed_in()?;

        let removed = self.store.delete(id);
        let name = removed
            .as_ref()
            .map_or("unknown teacher", |t| t.name.as_str());
        self.notifications
            .success(format!("Deleted {} successfully", name));
        Ok(removed)
    }

    // ==================== FILTERS ====================

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn update_filters(&mut self, patch: &FilterPatch) -> Result<FilterCriteria, AppError> {
        self.session.require_signed_in()?;
        self.criteria = self.criteria.merged(patch)?;
        Ok(self.criteria.clone())
    }

    /// Reset every criterion, including the search query.
    pub fn clear_filters(&mut self) -> Result<(), AppError> {
        self.session.require_signed_in()?;
        self.criteria = FilterCriteria::default();
        Ok(())
    }

    pub fn filter_options(&self) -> Result<FilterOptions, AppError> {
        self.session.require_signed_in()?;
        Ok(self.options())
    }

    fn options(&self) -> FilterOptions {
        FilterOptions {
            subjects: search::subject_options(self.store.list()),
            statuses: search::status_options(),
            roles: search::role_options(),
        }
    }

    // ==================== DIALOGS ====================

    pub fn open_view(&mut self, id: &str) -> Result<&Dialog, AppError> {
        let teacher = self.teacher(id)?;
        self.dialog.open_view(teacher);
        Ok(self.dialog.current())
    }

    pub fn open_edit(&mut self, id: &str) -> Result<&Dialog, AppError> {
        let teacher = self.teacher(id)?;
        self.dialog.open_edit(teacher);
        Ok(self.dialog.current())
    }

    pub fn open_add(&mut self) -> Result<&Dialog, AppError> {
        self.session.require_signed_in()?;
        self.dialog.open_add();
        Ok(self.dialog.current())
    }

    pub fn open_profile(&mut self) -> Result<&Dialog, AppError> {
        self.session.require_signed_in()?;
        self.layout.close_profile_dropdown();
        self.dialog.open_profile();
        Ok(self.dialog.current())
    }

    pub fn open_send(&mut self, id: &str) -> Result<&Dialog, AppError> {
        let teacher = self.teacher(id)?;
        self.dialog.open_send(teacher);
        Ok(self.dialog.current())
    }

    pub fn close_dialog(&mut self) {
        self.dialog.close();
    }

    pub fn patch_draft(&mut self, patch: TeacherPatch) -> Result<&Dialog, AppError> {
        self.session.require_signed_in()?;
        self.dialog.patch_draft(patch)?;
        Ok(self.dialog.current())
    }

    pub fn set_message(&mut self, message: String) -> Result<&Dialog, AppError> {
        self.session.require_signed_in()?;
        self.dialog.set_message(message)?;
        Ok(self.dialog.current())
    }

    pub fn begin_avatar_read(&mut self) -> Result<AvatarTicket, AppError> {
        self.session.require_signed_in()?;
        self.dialog.begin_avatar_read()
    }

    pub fn complete_avatar_read(&mut self, ticket: AvatarTicket, data_url: String) -> bool {
        self.dialog.complete_avatar_read(ticket, data_url)
    }

    pub fn clear_avatar(&mut self) -> Result<&Dialog, AppError> {
        self.session.require_signed_in()?;
        self.dialog.clear_avatar()?;
        Ok(self.dialog.current())
    }

    /// Commit the edit dialog's working copy.
    ///
    /// If the record was deleted while the dialog was open, nothing is
    /// written and an error notification is raised instead.
    pub fn save_edit(&mut self) -> Result<Option<Teacher>, AppError> {
        self.session.require_signed_in()?;
        let draft = self.dialog.take_edit()?;

        if self.store.edit(draft.clone()) {
            self.notifications.success("Updated Changes successfully");
            Ok(Some(draft))
        } else {
            tracing::warn!(id = %draft.id, "Edited teacher no longer exists");
            self.notifications.error("Teacher no longer exists");
            Ok(None)
        }
    }

    /// Validate and commit the add dialog's draft.
    pub fn submit_new(&mut self) -> Result<Teacher, AppError> {
        self.session.require_signed_in()?;
        let draft = self.dialog.take_new()?;
        let teacher = self.store.add(draft)?;
        self.notifications.success("Created teacher successfully");
        Ok(teacher)
    }

    /// "Send" the composed message. It is only logged.
    pub fn send_message(&mut self) -> Result<SentMessage, AppError> {
        self.session.require_signed_in()?;
        let (recipient, message) = self.dialog.take_message()?;

        tracing::info!(to = %recipient.email, content = %message, "Message to teacher");
        self.notifications
            .success(format!("Message sent to {}", recipient.name));

        Ok(SentMessage {
            recipient_id: recipient.id,
            recipient_name: recipient.name,
            recipient_email: recipient.email,
            message,
        })
    }

    // ==================== NOTIFICATIONS ====================

    pub fn notifications(&mut self) -> Vec<Notification> {
        let now = Utc::now();
        self.notifications.prune(now);
        self.notifications.active(now)
    }

    pub fn dismiss_notification(&mut self, id: u64) -> bool {
        self.notifications.dismiss(id)
    }

    // ==================== SNAPSHOT ====================

    pub fn snapshot(&mut self) -> PortalSnapshot {
        let notifications = self.notifications();
        let listing = self.session.is_signed_in().then(|| {
            let teachers = search::filter_teachers(self.store.list(), &self.criteria);
            TeacherListing {
                filtered_count: teachers.len(),
                total_count: self.store.len(),
                teachers,
                options: self.options(),
            }
        });

        PortalSnapshot {
            session: self.session.view(),
            theme: self.theme,
            layout: self.layout.clone(),
            dialog: self.dialog.current().clone(),
            criteria: self.criteria.clone(),
            listing,
            notifications,
            revision_id: self.store.revision_id(),
        }
    }
}
