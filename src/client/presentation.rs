//! Contract consumed by the reconciliation core to reflect state changes in a user interface.
//!
//! Tables, tiles, toasts and dialogs live outside this crate. An adapter only receives
//! instructions; it never feeds decisions back except through user-initiated engine calls.

use std::future::Future;

use crate::model::trust::{ListKey, TrustedEntityDto};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Which set of trust lists is currently visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Trusted,
    Untrusted,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Trusted => Self::Untrusted,
            Self::Untrusted => Self::Trusted,
        }
    }

    /// Whether a list's table belongs to this view.
    pub fn shows(self, list: ListKey) -> bool {
        match self {
            Self::Trusted => list.state.is_trusted(),
            Self::Untrusted => !list.state.is_trusted(),
        }
    }
}

pub trait PresentationAdapter {
    fn render_row(&self, list: ListKey, entity: &TrustedEntityDto);

    fn remove_row(&self, list: ListKey, primary_id: i64);

    /// Sets the display trust of a character tile.
    fn set_tile_trust(&self, character_id: i64, trusted: bool);

    fn notify(&self, level: NoticeLevel, message: &str);

    /// Asks the user to approve a destructive action.
    fn confirm(&self, prompt: &str) -> impl Future<Output = bool>;

    fn set_view_mode(&self, mode: ViewMode);

    /// Raised while any remote request is outstanding, used to disable submit affordances.
    fn set_busy(&self, busy: bool);
}
