use crate::config::AppConfig;

/// Describes runtime-safe changes between two configs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDiff {
    pub frequency_change: Option<u32>,
    pub duration_change: Option<u32>,
    pub non_reloadable: Vec<String>,
}

impl ConfigDiff {
    /// Compare two configs and return the diff.
    /// Reloadable: sampling frequency (including quality presets) and duration.
    /// Non-reloadable: log level, initialization policy, engine and engine settings.
    pub fn diff(old: &AppConfig, new: &AppConfig) -> Self {
        let mut result = Self::default();

        let old_freq = old.sampling.effective_frequency_hz();
        let new_freq = new.sampling.effective_frequency_hz();
        if old_freq != new_freq {
            result.frequency_change = Some(new_freq);
        }

        if old.sampling.duration_ms != new.sampling.duration_ms {
            result.duration_change = Some(new.sampling.duration_ms);
        }

        if old.general.log_level != new.general.log_level {
            result.non_reloadable.push(format!(
                "log_level changed ('{}' → '{}'), requires restart",
                old.general.log_level, new.general.log_level
            ));
        }

        if old.session.auto_initialize != new.session.auto_initialize {
            result.non_reloadable.push(format!(
                "auto_initialize changed ({} → {}), requires restart",
                old.session.auto_initialize, new.session.auto_initialize
            ));
        }

        if old.service.engine != new.service.engine {
            result.non_reloadable.push(format!(
                "engine changed ('{}' → '{}'), requires restart",
                old.service.engine, new.service.engine
            ));
        } else if old.service.simulated != new.service.simulated {
            result
                .non_reloadable
                .push("engine settings changed, requires restart".to_string());
        }

        result
    }

    pub fn is_empty(&self) -> bool {
        self.frequency_change.is_none()
            && self.duration_change.is_none()
            && self.non_reloadable.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig::from_toml_str(
            r#"
[sampling]
frequency_hz = 16000
duration_ms = 1000

[service]
engine = "simulated"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_config_diff_no_change() {
        let diff = ConfigDiff::diff(&base_config(), &base_config());
        assert!(diff.is_empty());
        assert_eq!(diff, ConfigDiff::default());
    }

    #[test]
    fn test_config_diff_frequency_change() {
        let new = AppConfig::from_toml_str(
            r#"
[sampling]
frequency_hz = 22050
duration_ms = 1000
"#,
        )
        .unwrap();
        let diff = ConfigDiff::diff(&base_config(), &new);
        assert_eq!(diff.frequency_change, Some(22050));
        assert!(diff.duration_change.is_none());
        assert!(diff.non_reloadable.is_empty());
    }

    #[test]
    fn test_config_diff_quality_preset_counts_as_frequency() {
        let new = AppConfig::from_toml_str(
            r#"
[sampling]
frequency_hz = 16000
quality = "low"
"#,
        )
        .unwrap();
        let diff = ConfigDiff::diff(&base_config(), &new);
        assert_eq!(diff.frequency_change, Some(8000));
    }

    #[test]
    fn test_config_diff_same_effective_frequency_is_not_a_change() {
        let new = AppConfig::from_toml_str(
            r#"
[sampling]
frequency_hz = 8000
quality = "high"
"#,
        )
        .unwrap();
        let diff = ConfigDiff::diff(&base_config(), &new);
        assert!(diff.frequency_change.is_none());
    }

    #[test]
    fn test_config_diff_duration_change() {
        let new = AppConfig::from_toml_str(
            r#"
[sampling]
duration_ms = 2500
"#,
        )
        .unwrap();
        let diff = ConfigDiff::diff(&base_config(), &new);
        assert_eq!(diff.duration_change, Some(2500));
    }

    #[test]
    fn test_config_diff_engine_change_not_reloadable() {
        let new = AppConfig::from_toml_str(
            r#"
[service]
engine = "null"
"#,
        )
        .unwrap();
        let diff = ConfigDiff::diff(&base_config(), &new);
        assert_eq!(diff.non_reloadable.len(), 1);
        assert!(diff.non_reloadable[0].contains("engine changed"));
    }

    #[test]
    fn test_config_diff_engine_settings_not_reloadable() {
        let new = AppConfig::from_toml_str(
            r#"
[service.simulated]
label = "noise"
"#,
        )
        .unwrap();
        let diff = ConfigDiff::diff(&base_config(), &new);
        assert_eq!(diff.non_reloadable, vec!["engine settings changed, requires restart"]);
    }

    #[test]
    fn test_config_diff_policy_and_log_level() {
        let new = AppConfig::from_toml_str(
            r#"
[general]
log_level = "debug"

[session]
auto_initialize = true
"#,
        )
        .unwrap();
        let diff = ConfigDiff::diff(&base_config(), &new);
        assert_eq!(diff.non_reloadable.len(), 2);
        assert!(diff.non_reloadable.iter().any(|w| w.contains("log_level")));
        assert!(diff.non_reloadable.iter().any(|w| w.contains("auto_initialize")));
    }
}
