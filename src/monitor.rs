use std::future::Future;
use std::time::Duration;

use kwsbit_session::{harness, Recognition, Session};
use tokio::sync::mpsc;

use crate::reload::{self, ConfigReloader};

/// Config file changes for the monitor loop.
pub struct Reloads {
    pub reloader: ConfigReloader,
    pub changes: mpsc::UnboundedReceiver<()>,
}

async fn next_change(reloads: &mut Option<Reloads>) -> Option<()> {
    match reloads {
        Some(reloads) => reloads.changes.recv().await,
        None => std::future::pending().await,
    }
}

/// Recognize every `interval` until `shutdown` resolves. Returns the number of
/// recognitions run.
///
/// `shutdown` is polled across the whole loop, so a stop request that arrives
/// while a recognition is blocking is picked up as soon as it returns.
pub async fn run(
    session: &mut Session,
    interval: Duration,
    mut reloads: Option<Reloads>,
    shutdown: impl Future<Output = ()>,
) -> usize {
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(interval);
    let mut recognitions = 0;

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            Some(()) = next_change(&mut reloads) => {
                if let Some(reloads) = reloads.as_mut() {
                    match reloads.reloader.reload() {
                        Ok(Some(diff)) => reload::apply_diff(session, &diff),
                        Ok(None) => {}
                        Err(e) => tracing::warn!("config reload failed: {}", e),
                    }
                }
            }
            _ = ticker.tick() => {
                let outcome = tokio::task::block_in_place(|| harness::press_button_a(session));
                recognitions += 1;
                if let Recognition::Detected(result) = outcome {
                    println!("{} ({}%)", result.keyword, result.confidence_percent());
                }
            }
        }
    }

    recognitions
}
