//! Modal dialog state machine.
//!
//! Exactly one dialog is open at a time. Opening a dialog replaces whatever
//! was open and discards its transient data.

mod avatar;

pub use avatar::*;

use serde::Serialize;

use crate::errors::AppError;
use crate::models::{NewTeacher, Teacher, TeacherPatch};

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Dialog {
    #[default]
    None,
    Viewing {
        teacher: Teacher,
    },
    /// `draft` is a working copy; the stored record is untouched until save.
    Editing {
        draft: Teacher,
    },
    Adding {
        draft: NewTeacher,
    },
    Profile,
    Sending {
        recipient: Teacher,
        message: String,
    },
}

impl Dialog {
    pub fn name(&self) -> &'static str {
        match self {
            Dialog::None => "none",
            Dialog::Viewing { .. } => "view",
            Dialog::Editing { .. } => "edit",
            Dialog::Adding { .. } => "add",
            Dialog::Profile => "profile",
            Dialog::Sending { .. } => "send",
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::None)
    }
}

/// The open dialog plus the avatar read it is waiting on, if any.
#[derive(Debug, Clone, Default)]
pub struct DialogState {
    dialog: Dialog,
    generation: u64,
    pending_read: Option<u64>,
}

impl DialogState {
    pub fn current(&self) -> &Dialog {
        &self.dialog
    }

    fn replace(&mut self, next: Dialog) -> Dialog {
        if self.dialog.is_open() || next.is_open() {
            tracing::debug!(from = self.dialog.name(), to = next.name(), "Dialog transition");
        }
        self.pending_read = None;
        std::mem::replace(&mut self.dialog, next)
    }

    pub fn open_view(&mut self, teacher: Teacher) {
        self.replace(Dialog::Viewing { teacher });
    }

    pub fn open_edit(&mut self, teacher: Teacher) {
        self.replace(Dialog::Editing { draft: teacher });
    }

    pub fn open_add(&mut self) {
        self.replace(Dialog::Adding {
            draft: NewTeacher::default(),
        });
    }

    pub fn open_profile(&mut self) {
        self.replace(Dialog::Profile);
    }

    pub fn open_send(&mut self, recipient: Teacher) {
        self.replace(Dialog::Sending {
            recipient,
            message: String::new(),
        });
    }

    /// Close whatever is open, discarding transient data.
    pub fn close(&mut self) -> Dialog {
        self.replace(Dialog::None)
    }

    /// Apply a field patch to the edit copy or the add draft.
    pub fn patch_draft(&mut self, patch: TeacherPatch) -> Result<(), AppError> {
        match &mut self.dialog {
            Dialog::Editing { draft } => patch.apply_to_teacher(draft),
            Dialog::Adding { draft } => patch.apply_to_draft(draft),
            other => return Err(not_applicable("edit fields", other)),
        }
        Ok(())
    }

    pub fn set_message(&mut self, text: String) -> Result<(), AppError> {
        match &mut self.dialog {
            Dialog::Sending { message, .. } => {
                *message = text;
                Ok(())
            }
            other => Err(not_applicable("write a message", other)),
        }
    }

    /// Register a new avatar read. Any earlier read becomes stale.
    pub fn begin_avatar_read(&mut self) -> Result<AvatarTicket, AppError> {
        match &self.dialog {
            Dialog::Editing { .. } | Dialog::Adding { .. } => {
                self.generation += 1;
                self.pending_read = Some(self.generation);
                Ok(AvatarTicket(self.generation))
            }
            other => Err(not_applicable("attach an image", other)),
        }
    }

    /// Apply a finished read if it is still the latest one requested.
    pub fn complete_avatar_read(&mut self, ticket: AvatarTicket, data_url: String) -> bool {
        if self.pending_read != Some(ticket.0) {
            tracing::debug!(generation = ticket.0, "Dropping superseded avatar read");
            return false;
        }
        self.pending_read = None;
        match &mut self.dialog {
            Dialog::Editing { draft } => draft.avatar = Some(data_url),
            Dialog::Adding { draft } => draft.avatar = Some(data_url),
            _ => return false,
        }
        true
    }

    /// Remove the avatar from the draft and drop any read in flight.
    pub fn clear_avatar(&mut self) -> Result<(), AppError> {
        match &mut self.dialog {
            Dialog::Editing { draft } => draft.avatar = None,
            Dialog::Adding { draft } => draft.avatar = None,
            other => return Err(not_applicable("clear the image", other)),
        }
        self.pending_read = None;
        Ok(())
    }

    /// Close the edit dialog, handing back its working copy.
    pub fn take_edit(&mut self) -> Result<Teacher, AppError> {
        match std::mem::take(&mut self.dialog) {
            Dialog::Editing { draft } => {
                self.pending_read = None;
                Ok(draft)
            }
            other => Err(self.restore(other, "save changes")),
        }
    }

    /// Validate and close the add dialog. On failure the draft stays open.
    pub fn take_new(&mut self) -> Result<NewTeacher, AppError> {
        match std::mem::take(&mut self.dialog) {
            Dialog::Adding { draft } => {
                if let Err(err) = draft.validate() {
                    self.dialog = Dialog::Adding { draft };
                    return Err(err);
                }
                self.pending_read = None;
                Ok(draft)
            }
            other => Err(self.restore(other, "add a teacher")),
        }
    }

    /// Close the send dialog, handing back recipient and message.
    pub fn take_message(&mut self) -> Result<(Teacher, String), AppError> {
        match std::mem::take(&mut self.dialog) {
            Dialog::Sending { recipient, message } => Ok((recipient, message)),
            other => Err(self.restore(other, "send a message")),
        }
    }

    fn restore(&mut self, dialog: Dialog, action: &str) -> AppError {
        let err = not_applicable(action, &dialog);
        self.dialog = dialog;
        err
    }
}

fn not_applicable(action: &str, dialog: &Dialog) -> AppError {
    if dialog.is_open() {
        AppError::InvalidState(format!(
            "Cannot {} while the {} dialog is open",
            action,
            dialog.name()
        ))
    } else {
        AppError::InvalidState(format!("Cannot {} with no dialog open", action))
    }
}
