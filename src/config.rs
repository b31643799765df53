//! User settings, stored as YAML in the config directory

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BALANCE_REFRESH_SECS, DEFAULT_CONFIRMATION_DELAY_MS, DEFAULT_SIGNING_DELAY_MS,
};
use crate::models::Theme;
use crate::transaction::FlowTimings;

/// Which notification channels the user opted into
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPrefs {
    pub email: bool,
    pub push: bool,
    pub yield_alerts: bool,
    pub price_alerts: bool,
    pub marketing: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        NotificationPrefs {
            email: true,
            push: true,
            yield_alerts: true,
            price_alerts: false,
            marketing: false,
        }
    }
}

/// Selectable rows of the notification preferences
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationPref {
    Email,
    Push,
    YieldAlerts,
    PriceAlerts,
    Marketing,
}

impl NotificationPref {
    pub const ALL: [NotificationPref; 5] = [
        NotificationPref::Email,
        NotificationPref::Push,
        NotificationPref::YieldAlerts,
        NotificationPref::PriceAlerts,
        NotificationPref::Marketing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NotificationPref::Email => "Email notifications",
            NotificationPref::Push => "Push notifications",
            NotificationPref::YieldAlerts => "Yield alerts",
            NotificationPref::PriceAlerts => "Price alerts",
            NotificationPref::Marketing => "Marketing emails",
        }
    }
}

impl NotificationPrefs {
    pub fn get(&self, pref: NotificationPref) -> bool {
        match pref {
            NotificationPref::Email => self.email,
            NotificationPref::Push => self.push,
            NotificationPref::YieldAlerts => self.yield_alerts,
            NotificationPref::PriceAlerts => self.price_alerts,
            NotificationPref::Marketing => self.marketing,
        }
    }

    pub fn toggle(&mut self, pref: NotificationPref) {
        let flag = match pref {
            NotificationPref::Email => &mut self.email,
            NotificationPref::Push => &mut self.push,
            NotificationPref::YieldAlerts => &mut self.yield_alerts,
            NotificationPref::PriceAlerts => &mut self.price_alerts,
            NotificationPref::Marketing => &mut self.marketing,
        };
        *flag = !*flag;
    }
}

/// Persisted application settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub currency: String,
    pub signing_delay_ms: u64,
    pub confirmation_delay_ms: u64,
    pub balance_refresh_secs: u64,
    /// Probability that the mock ledger rejects an operation
    pub failure_rate: f64,
    pub notifications: NotificationPrefs,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            theme: Theme::Dark,
            currency: String::from("USD"),
            signing_delay_ms: DEFAULT_SIGNING_DELAY_MS,
            confirmation_delay_ms: DEFAULT_CONFIRMATION_DELAY_MS,
            balance_refresh_secs: DEFAULT_BALANCE_REFRESH_SECS,
            failure_rate: 0.0,
            notifications: NotificationPrefs::default(),
        }
    }
}

impl Settings {
    /// Clamp values that would break the simulation
    pub fn normalized(mut self) -> Self {
        if !self.failure_rate.is_finite() {
            self.failure_rate = 0.0;
        }
        self.failure_rate = self.failure_rate.clamp(0.0, 1.0);
        self.balance_refresh_secs = self.balance_refresh_secs.max(1);
        self
    }

    pub fn flow_timings(&self) -> FlowTimings {
        FlowTimings::from_millis(self.signing_delay_ms, self.confirmation_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "theme: light\nfailure_rate: 0.25\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.failure_rate, 0.25);
        assert_eq!(settings.signing_delay_ms, DEFAULT_SIGNING_DELAY_MS);
        assert_eq!(settings.notifications, NotificationPrefs::default());
    }

    #[test]
    fn test_normalized_clamps() {
        let settings = Settings {
            failure_rate: 3.0,
            balance_refresh_secs: 0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(settings.failure_rate, 1.0);
        assert_eq!(settings.balance_refresh_secs, 1);

        let settings = Settings {
            failure_rate: f64::NAN,
            ..Default::default()
        }
        .normalized();
        assert_eq!(settings.failure_rate, 0.0);
    }

    #[test]
    fn test_toggle_notification_pref() {
        let mut prefs = NotificationPrefs::default();
        assert!(!prefs.get(NotificationPref::PriceAlerts));
        prefs.toggle(NotificationPref::PriceAlerts);
        assert!(prefs.get(NotificationPref::PriceAlerts));
    }

    #[test]
    fn test_flow_timings_from_settings() {
        let settings = Settings {
            signing_delay_ms: 10,
            confirmation_delay_ms: 20,
            ..Default::default()
        };
        assert_eq!(settings.flow_timings(), FlowTimings::from_millis(10, 20));
    }
}
