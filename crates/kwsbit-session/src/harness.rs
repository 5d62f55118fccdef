use crate::session::{Recognition, Session};
use kwsbit_core::Icon;
use std::time::{Duration, Instant};

pub const MICROBIT_KEYWORD: &str = "microbit";
pub const NOISE_KEYWORD: &str = "noise";

/// How long a button reaction stays on the display before it is cleared.
pub const REACTION_HOLD: Duration = Duration::from_secs(1);

/// Icon shown after a detection.
pub fn reaction_icon(keyword: &str) -> Icon {
    match keyword {
        MICROBIT_KEYWORD => Icon::Heart,
        NOISE_KEYWORD => Icon::No,
        _ => Icon::Confused,
    }
}

/// Button A: listen once, show the confidence of a detection and react on the display.
pub fn press_button_a(session: &mut Session) -> Recognition {
    let outcome = session.recognize();
    let icon = match &outcome {
        Recognition::Detected(result) => {
            session
                .indicator_mut()
                .show_number(i64::from(result.confidence_percent()));
            reaction_icon(&result.keyword)
        }
        _ => Icon::Sad,
    };
    session.indicator_mut().show_icon(icon);
    outcome
}

/// Button B: show the requested sampling configuration.
pub fn press_button_b(session: &mut Session) -> String {
    let text = format!(
        "{}Hz {}ms",
        session.sampling_frequency(),
        session.sampling_duration()
    );
    session.indicator_mut().show_string(&text);
    text
}

/// Buttons A+B: show the key help.
pub fn press_button_ab(session: &mut Session) {
    session.indicator_mut().show_string("A=LISTEN B=CONFIG");
}

/// Wall-clock timings of a series of recognitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchReport {
    pub runs: Vec<Duration>,
    pub detections: usize,
}

impl BenchReport {
    pub fn average(&self) -> Duration {
        if self.runs.is_empty() {
            return Duration::ZERO;
        }
        self.runs.iter().sum::<Duration>() / self.runs.len() as u32
    }
}

/// Run `runs` back-to-back recognitions, timing each from the caller's side.
pub fn run_benchmark(session: &mut Session, runs: usize) -> BenchReport {
    let mut report = BenchReport::default();
    for run in 1..=runs {
        let start = Instant::now();
        let outcome = session.recognize();
        let elapsed = start.elapsed();
        tracing::info!(
            run,
            elapsed_ms = elapsed.as_millis() as u64,
            detected = outcome.is_detected(),
            "benchmark run"
        );
        if outcome.is_detected() {
            report.detections += 1;
        }
        report.runs.push(elapsed);
    }
    report
}
