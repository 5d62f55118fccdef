use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kwsbit_core::{AppConfig, ConfigDiff, ConfigError};
use kwsbit_session::Session;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// Tracks the config file on disk and the last config applied from it.
pub struct ConfigReloader {
    path: PathBuf,
    current: AppConfig,
}

impl ConfigReloader {
    pub fn new(path: PathBuf, current: AppConfig) -> Self {
        Self { path, current }
    }

    /// Re-read the file. Returns `None` when nothing changed.
    pub fn reload(&mut self) -> Result<Option<ConfigDiff>, ConfigError> {
        let new = AppConfig::load_from_file(&self.path)?;
        let diff = ConfigDiff::diff(&self.current, &new);
        self.current = new;
        Ok(if diff.is_empty() { None } else { Some(diff) })
    }
}

/// Re-apply the reloadable part of a diff; the rest is only reported.
pub fn apply_diff(session: &mut Session, diff: &ConfigDiff) {
    if let Some(hz) = diff.frequency_change {
        tracing::info!(frequency_hz = hz, "config reload: sampling frequency");
        session.set_sampling_frequency(hz);
    }
    if let Some(ms) = diff.duration_change {
        tracing::info!(duration_ms = ms, "config reload: sampling duration");
        session.set_sampling_duration_exact(ms);
    }
    for warning in &diff.non_reloadable {
        tracing::warn!("config reload: {}", warning);
    }
}

/// Watch the config file's directory and signal on every change to the file.
/// The watcher stops when the returned handle is dropped.
pub fn watch(path: &Path) -> Result<(RecommendedWatcher, mpsc::UnboundedReceiver<()>)> {
    let (tx, rx) = mpsc::unbounded_channel();
    let file_name = path.file_name().map(|n| n.to_os_string());

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("config watcher error: {}", e);
                return;
            }
        };
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return;
        }
        let touches_config = event
            .paths
            .iter()
            .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
        if touches_config {
            let _ = tx.send(());
        }
    })
    .context("failed to create config watcher")?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {:?}", dir))?;

    tracing::debug!(path = ?path, "watching config for changes");
    Ok((watcher, rx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwsbit_engine::ScriptedService;
    use kwsbit_session::{InitPolicy, NullIndicator};

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("kwsbit-{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_reloader_reports_sampling_change() {
        let path = temp_config("reload-sampling", "[sampling]\nfrequency_hz = 16000\n");
        let initial = AppConfig::load_from_file(&path).unwrap();
        let mut reloader = ConfigReloader::new(path.clone(), initial);

        assert_eq!(reloader.reload().unwrap(), None);

        std::fs::write(&path, "[sampling]\nquality = \"low\"\nduration_ms = 2000\n").unwrap();
        let diff = reloader.reload().unwrap().unwrap();
        assert_eq!(diff.frequency_change, Some(8000));
        assert_eq!(diff.duration_change, Some(2000));

        assert_eq!(reloader.reload().unwrap(), None);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_reloader_keeps_previous_config_on_parse_error() {
        let path = temp_config("reload-broken", "[sampling]\nfrequency_hz = 16000\n");
        let initial = AppConfig::load_from_file(&path).unwrap();
        let mut reloader = ConfigReloader::new(path.clone(), initial);

        std::fs::write(&path, "[sampling\n").unwrap();
        assert!(reloader.reload().is_err());

        std::fs::write(&path, "[sampling]\nfrequency_hz = 22050\n").unwrap();
        let diff = reloader.reload().unwrap().unwrap();
        assert_eq!(diff.frequency_change, Some(22050));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_apply_diff_updates_session() {
        let service = ScriptedService::new();
        let mut session = Session::new(
            Box::new(service.clone()),
            Box::new(NullIndicator),
            InitPolicy::Explicit,
        );
        let diff = ConfigDiff {
            frequency_change: Some(11000),
            duration_change: Some(2500),
            non_reloadable: vec!["engine changed".to_string()],
        };
        apply_diff(&mut session, &diff);
        assert_eq!(session.sampling_frequency(), 11000);
        assert_eq!(session.sampling_duration(), 2500);
        assert_eq!(service.frequencies(), vec![11000]);
    }
}
