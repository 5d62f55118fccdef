use kwsbit_core::{BoardDisplay, Icon};
use std::sync::{Arc, Mutex};

/// User-visible feedback on the board's display (LED matrix, screen, log).
///
/// The session shows `Yes`/`No` after initialization, `"INIT"` when a
/// recognition is refused, `Ear` while listening, and the detected keyword
/// or `No` afterwards.
pub trait Indicator: Send {
    fn show_icon(&mut self, icon: Icon);
    fn show_string(&mut self, text: &str);

    fn show_number(&mut self, value: i64) {
        self.show_string(&value.to_string());
    }

    fn clear(&mut self) {}
}

/// Reports display changes through `tracing`.
#[derive(Debug, Default)]
pub struct LogIndicator;

impl Indicator for LogIndicator {
    fn show_icon(&mut self, icon: Icon) {
        tracing::info!(target: "kwsbit::display", "icon {:?}", icon);
    }

    fn show_string(&mut self, text: &str) {
        tracing::info!(target: "kwsbit::display", "text {:?}", text);
    }

    fn show_number(&mut self, value: i64) {
        tracing::info!(target: "kwsbit::display", "number {}", value);
    }
}

#[derive(Debug, Default)]
pub struct NullIndicator;

impl Indicator for NullIndicator {
    fn show_icon(&mut self, _icon: Icon) {}
    fn show_string(&mut self, _text: &str) {}
}

/// Keeps every display change. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingIndicator {
    shown: Arc<Mutex<Vec<BoardDisplay>>>,
}

impl RecordingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, display: BoardDisplay) {
        self.shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(display);
    }

    pub fn shown(&self) -> Vec<BoardDisplay> {
        self.shown.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last(&self) -> Option<BoardDisplay> {
        self.shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

impl Indicator for RecordingIndicator {
    fn show_icon(&mut self, icon: Icon) {
        self.push(BoardDisplay::Icon(icon));
    }

    fn show_string(&mut self, text: &str) {
        self.push(BoardDisplay::Text(text.to_string()));
    }

    fn show_number(&mut self, value: i64) {
        self.push(BoardDisplay::Number(value));
    }

    fn clear(&mut self) {
        self.push(BoardDisplay::Blank);
    }
}
