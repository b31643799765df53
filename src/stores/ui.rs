use chrono::Utc;

use crate::constants::MAX_NOTIFICATIONS;
use crate::models::{Notification, NotificationKind, Theme};

/// Chrome flags and notifications
#[derive(Clone, Debug, Default)]
pub struct UiStore {
    pub sidebar_open: bool,
    pub theme: Theme,
    pub notifications: Vec<Notification>,
    next_id: u64,
}

impl UiStore {
    pub fn new(theme: Theme) -> Self {
        UiStore {
            theme,
            ..Default::default()
        }
    }

    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Newest first; the oldest are dropped past the cap
    pub fn add_notification(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.notifications.insert(
            0,
            Notification {
                id,
                message: message.into(),
                kind,
                timestamp: Utc::now(),
            },
        );
        self.notifications.truncate(MAX_NOTIFICATIONS);
        id
    }

    pub fn remove_notification(&mut self, id: u64) {
        self.notifications.retain(|n| n.id != id);
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_ids_are_unique() {
        let mut ui = UiStore::default();
        let a = ui.add_notification("one", NotificationKind::Info);
        let b = ui.add_notification("two", NotificationKind::Success);
        assert_ne!(a, b);
        assert_eq!(ui.notifications[0].message, "two");

        ui.remove_notification(a);
        assert_eq!(ui.notifications.len(), 1);
        assert_eq!(ui.notifications[0].id, b);
    }

    #[test]
    fn test_notifications_are_capped() {
        let mut ui = UiStore::default();
        for i in 0..MAX_NOTIFICATIONS + 5 {
            ui.add_notification(format!("n{i}"), NotificationKind::Info);
        }
        assert_eq!(ui.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(ui.notifications[0].message, format!("n{}", MAX_NOTIFICATIONS + 4));
    }
}
