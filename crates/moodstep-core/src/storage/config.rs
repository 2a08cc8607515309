//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Which weekday starts the calendar week
//! - Streak leniency while today is still open
//! - Custom per-title micro-actions for the action resolver
//!
//! Configuration is stored at `~/.config/moodstep/config.toml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::clock::WeekStart;
use crate::error::{ConfigError, Result};
use crate::resolver::{ActionPair, ActionResolver};
use crate::stats::WeeklyAggregator;
use crate::streak::{StreakCalculator, StreakConfig};

/// Calendar week configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekConfig {
    #[serde(default)]
    pub starts_on: WeekStart,
}

/// Action resolver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Exact subject title -> `{ medium, low }` actions.
    #[serde(default)]
    pub custom_actions: BTreeMap<String, ActionPair>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/moodstep/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub week: WeekConfig,
    #[serde(default)]
    pub streak: StreakConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

impl Config {
    /// Split a dot-path into segments. Custom action titles may contain
    /// dots, so under `resolver.custom_actions` only a trailing `medium` or
    /// `low` is split off the title.
    fn key_parts(key: &str) -> Vec<&str> {
        const CUSTOM_ACTIONS: &str = "resolver.custom_actions.";

        let Some(rest) = key.strip_prefix(CUSTOM_ACTIONS) else {
            return key.split('.').collect();
        };
        let mut parts = vec!["resolver", "custom_actions"];
        match rest.rsplit_once('.') {
            Some((title, tier)) if matches!(tier, "medium" | "low") => {
                parts.push(title);
                parts.push(tier);
            }
            _ => parts.push(rest),
        }
        parts
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in Self::key_parts(key) {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let parts = Self::key_parts(key);
        let Some((&leaf, parents)) = parts.split_last() else {
            return Err(unknown());
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        for &part in parents {
            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => {
                serde_json::Value::Bool(value.parse::<bool>().map_err(|e| invalid(e.to_string()))?)
            }
            serde_json::Value::Number(_) => {
                let n = value.parse::<u64>().map_err(|e| invalid(e.to_string()))?;
                serde_json::Value::Number(n.into())
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Default config path under the data directory.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default path, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// existing type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    // ── Component builders ───────────────────────────────────────────

    pub fn resolver(&self) -> ActionResolver {
        ActionResolver::with_custom_actions(self.resolver.custom_actions.clone())
    }

    pub fn streak_calculator(&self) -> StreakCalculator {
        StreakCalculator::with_config(StreakConfig {
            week_start: self.week.starts_on,
            ..self.streak.clone()
        })
    }

    pub fn weekly_aggregator(&self) -> WeeklyAggregator {
        WeeklyAggregator::new(self.week.starts_on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.week.starts_on, WeekStart::Sunday);
        assert!(parsed.streak.count_today_pending);
    }

    #[test]
    fn empty_file_parses_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn parses_custom_actions_table() {
        let parsed: Config = toml::from_str(
            r#"
            [week]
            starts_on = "monday"

            [resolver.custom_actions."Water plants"]
            medium = "Water just the kitchen plants"
            low = "Fill the watering can"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.week.starts_on, WeekStart::Monday);
        let pair = &parsed.resolver.custom_actions["Water plants"];
        assert_eq!(pair.low, "Fill the watering can");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("week.starts_on").as_deref(), Some("sunday"));
        assert_eq!(cfg.get("streak.count_today_pending").as_deref(), Some("true"));
        assert!(cfg.get("week.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("streak.count_today_pending", "false").unwrap();
        cfg.set("week.starts_on", "monday").unwrap();
        assert!(!cfg.streak.count_today_pending);
        assert_eq!(cfg.week.starts_on, WeekStart::Monday);
    }

    #[test]
    fn set_accepts_json_for_tables() {
        let mut cfg = Config::default();
        cfg.set(
            "resolver.custom_actions",
            r#"{"Stretch": {"medium": "Stretch for 2 minutes", "low": "Stand up"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.resolver.custom_actions["Stretch"].medium, "Stretch for 2 minutes");
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("week.nonexistent", "x"),
            Err(crate::error::CoreError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(cfg.set("streak.count_today_pending", "maybe").is_err());
        assert!(cfg.set("week.starts_on", "friday").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let first = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(first, Config::default());

        let mut changed = first.clone();
        changed.set("week.starts_on", "monday").unwrap();
        changed.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap().week.starts_on, WeekStart::Monday);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[week\nstarts_on = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn builders_carry_week_start_and_custom_actions() {
        use crate::mood::{EmotionalState, Level};
        use crate::subject::{SubjectKind, SubjectRef};
        use chrono::{Datelike, FixedOffset, TimeZone, Weekday};

        let mut cfg = Config::default();
        cfg.week.starts_on = WeekStart::Monday;
        cfg.resolver.custom_actions.insert(
            "Stretch".into(),
            ActionPair {
                medium: "Stretch for 2 minutes".into(),
                low: "Stand up".into(),
            },
        );

        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 12, 9, 0, 0)
            .unwrap();
        let (start, _) = cfg.weekly_aggregator().week_bounds(&now);
        assert_eq!(start.weekday(), Weekday::Mon);

        let text = cfg.resolver().resolve(
            SubjectRef::task("Stretch", SubjectKind::Generic),
            Level::Low,
            EmotionalState::Tired,
        );
        assert_eq!(text, "Stand up");
    }

    #[test]
    fn custom_action_titles_may_contain_dots() {
        let mut cfg = Config::default();
        cfg.set(
            "resolver.custom_actions",
            r#"{"Dr. Appointment": {"medium": "Call the clinic", "low": "Find the number"}}"#,
        )
        .unwrap();

        assert_eq!(
            cfg.get("resolver.custom_actions.Dr. Appointment.low").as_deref(),
            Some("Find the number")
        );

        cfg.set("resolver.custom_actions.Dr. Appointment.medium", "Book a slot")
            .unwrap();
        assert_eq!(
            cfg.resolver.custom_actions["Dr. Appointment"].medium,
            "Book a slot"
        );

        cfg.set(
            "resolver.custom_actions.Dr. Appointment",
            r#"{"medium": "Write it down", "low": "Open the calendar"}"#,
        )
        .unwrap();
        assert_eq!(
            cfg.get("resolver.custom_actions.Dr. Appointment.low").as_deref(),
            Some("Open the calendar")
        );

        assert!(cfg.get("resolver.custom_actions.Dr. Appointment.high").is_none());
        assert!(cfg.set("resolver.custom_actions.Dr.medium", "x").is_err());
    }

    #[test]
    fn weekly_streak_follows_configured_week_start() {
        use crate::subject::{Frequency, Habit};
        use chrono::{Duration, FixedOffset, TimeZone, Utc};

        // Wednesday.
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 12, 9, 0, 0)
            .unwrap();
        let mut habit = Habit::new(
            "Long walk",
            "Fitness",
            Frequency::Weekly,
            now.with_timezone(&Utc) - Duration::days(60),
        )
        .unwrap();
        // Mon 6/10, Sun 6/9, Sun 6/2.
        habit.completed_dates = [2, 3, 10]
            .iter()
            .map(|d| (now - Duration::days(*d)).with_timezone(&Utc))
            .collect();

        let mut cfg = Config::default();
        assert_eq!(cfg.streak_calculator().streak(&habit, &now).current, 2);

        cfg.set("week.starts_on", "monday").unwrap();
        assert_eq!(cfg.streak_calculator().streak(&habit, &now).current, 3);
    }
}
