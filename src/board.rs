use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use kwsbit_core::{BoardCommand, BoardDisplay, BoardState, ConfigDiff, SessionSnapshot};
use kwsbit_session::{harness, Recognition, Session};
use tokio::task::JoinHandle;

use crate::reload;

const MAX_RECENT_KEYWORDS: usize = 20;
const MAX_WARNINGS: usize = 5;

#[derive(Default)]
struct BoardExtras {
    snapshot: SessionSnapshot,
    recent_keywords: Vec<String>,
    warnings: Vec<String>,
}

/// Owns the session behind the board emulator and turns button presses into
/// session calls. Only one recognition runs at a time.
pub struct BoardHost {
    session: Mutex<Session>,
    display: Arc<Mutex<BoardDisplay>>,
    extras: Mutex<BoardExtras>,
    busy: AtomicBool,
    engine: String,
    hold: Duration,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl BoardHost {
    /// `hold` is how long a button A reaction stays up before the display is cleared.
    pub fn new(session: Session, display: Arc<Mutex<BoardDisplay>>, hold: Duration) -> Arc<Self> {
        let extras = BoardExtras {
            snapshot: session.snapshot(),
            ..Default::default()
        };
        Arc::new(Self {
            engine: session.engine_name().to_string(),
            session: Mutex::new(session),
            display,
            extras: Mutex::new(extras),
            busy: AtomicBool::new(false),
            hold,
        })
    }

    /// Current board state. While a recognition holds the session the last
    /// known snapshot is reused.
    pub fn state(&self) -> BoardState {
        let mut extras = lock(&self.extras);
        if let Ok(session) = self.session.try_lock() {
            extras.snapshot = session.snapshot();
        }
        BoardState {
            display: lock(&self.display).clone(),
            session: extras.snapshot.clone(),
            engine: self.engine.clone(),
            busy: self.busy.load(Ordering::SeqCst),
            recent_keywords: extras.recent_keywords.clone(),
            warnings: extras.warnings.clone(),
            is_running: true,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    fn push_warning(&self, message: String) {
        let mut extras = lock(&self.extras);
        extras.warnings.push(message);
        if extras.warnings.len() > MAX_WARNINGS {
            extras.warnings.remove(0);
        }
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
        self.push_warning(message.to_string());
    }

    fn record_keyword(&self, keyword: &str) {
        let mut extras = lock(&self.extras);
        extras.recent_keywords.push(keyword.to_string());
        if extras.recent_keywords.len() > MAX_RECENT_KEYWORDS {
            extras.recent_keywords.remove(0);
        }
    }

    /// Handle one button command. Button A runs on the blocking pool and the
    /// returned handle completes when the recognition is done.
    pub fn handle_command(self: &Arc<Self>, cmd: BoardCommand) -> Option<JoinHandle<()>> {
        match cmd {
            BoardCommand::ButtonA => self.press_a(),
            BoardCommand::ButtonB => {
                self.with_idle_session(|session| {
                    harness::press_button_b(session);
                });
                None
            }
            BoardCommand::ButtonAB => {
                self.with_idle_session(harness::press_button_ab);
                None
            }
            BoardCommand::SetQuality(quality) => {
                self.with_idle_session(|session| {
                    session.set_audio_quality(quality);
                    tracing::info!(quality = quality.label(), "audio quality set");
                });
                None
            }
            BoardCommand::Quit => None,
        }
    }

    fn with_idle_session(&self, f: impl FnOnce(&mut Session)) {
        match self.session.try_lock() {
            Ok(mut session) => f(&mut session),
            Err(_) => self.warn("busy, press ignored"),
        }
    }

    fn press_a(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            self.warn("busy, press ignored");
            return None;
        }

        let host = Arc::clone(self);
        Some(tokio::task::spawn_blocking(move || {
            let outcome = harness::press_button_a(&mut lock(&host.session));
            if let Recognition::Detected(result) = &outcome {
                host.record_keyword(&result.keyword);
            }
            std::thread::sleep(host.hold);
            lock(&host.session).indicator_mut().clear();
            host.busy.store(false, Ordering::SeqCst);
        }))
    }

    /// Apply a config change once the session is free.
    pub fn apply_config_diff(self: &Arc<Self>, diff: ConfigDiff) -> JoinHandle<()> {
        let host = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            reload::apply_diff(&mut lock(&host.session), &diff);
            for warning in diff.non_reloadable {
                host.push_warning(warning);
            }
        })
    }

    pub fn shutdown(&self) {
        lock(&self.session).shutdown();
    }
}
