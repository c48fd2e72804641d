/// Short-lived notification shown after every save attempt
use iced::widget::{container, text};
use iced::{Color, Element};
use std::time::Duration;

use crate::state::data::SaveOutcome;

pub const SAVE_SUCCEEDED: &str = "Image saved successfully!";
pub const SAVE_FAILED: &str = "Failed to save image";

/// How long a toast stays up unless configured otherwise
pub const DEFAULT_DURATION: Duration = Duration::from_secs(2);

/// Fixed text for a save outcome
pub fn text_for(outcome: SaveOutcome) -> &'static str {
    if outcome.succeeded {
        SAVE_SUCCEEDED
    } else {
        SAVE_FAILED
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Identifies the toast so a late timer can't close its successor
    pub id: u64,
    pub outcome: SaveOutcome,
}

impl Toast {
    pub fn text(&self) -> &'static str {
        text_for(self.outcome)
    }

    pub fn view<'a, Message: 'a>(&self) -> Element<'a, Message> {
        let color = if self.outcome.succeeded {
            Color::from_rgb(0.4, 0.85, 0.45)
        } else {
            Color::from_rgb(0.95, 0.4, 0.4)
        };

        container(text(self.text()).size(16).color(color))
            .padding(12)
            .style(container::rounded_box)
            .into()
    }
}

/// Holds at most one toast. Showing a new one replaces the old.
#[derive(Debug, Default)]
pub struct ToastSlot {
    current: Option<Toast>,
    next_id: u64,
}

impl ToastSlot {
    /// Show a toast for `outcome` and return its id for the dismiss timer
    pub fn show(&mut self, outcome: SaveOutcome) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.current = Some(Toast { id, outcome });
        id
    }

    /// Dismiss the toast if it is still the one with `id`
    pub fn expire(&mut self, id: u64) {
        if self.current.as_ref().is_some_and(|toast| toast.id == id) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_texts() {
        assert_eq!(text_for(SaveOutcome::SUCCEEDED), SAVE_SUCCEEDED);
        assert_eq!(text_for(SaveOutcome::FAILED), SAVE_FAILED);
    }

    #[test]
    fn test_expire_closes_matching_toast() {
        let mut slot = ToastSlot::default();
        let id = slot.show(SaveOutcome::SUCCEEDED);

        slot.expire(id);

        assert!(slot.current().is_none());
    }

    #[test]
    fn test_stale_timer_keeps_newer_toast() {
        let mut slot = ToastSlot::default();
        let old = slot.show(SaveOutcome::SUCCEEDED);
        let new = slot.show(SaveOutcome::FAILED);

        slot.expire(old);

        let toast = slot.current().unwrap();
        assert_eq!(toast.id, new);
        assert_eq!(toast.text(), SAVE_FAILED);
    }
}
