use std::sync::{Arc, Mutex};

use kwsbit_core::{BoardDisplay, Icon};
use kwsbit_session::Indicator;

/// Drives the emulated LED matrix. The display cell is shared with the
/// broadcaster so changes show up while a recognition is still running.
#[derive(Debug, Clone, Default)]
pub struct BoardIndicator {
    display: Arc<Mutex<BoardDisplay>>,
}

impl BoardIndicator {
    pub fn new(display: Arc<Mutex<BoardDisplay>>) -> Self {
        Self { display }
    }

    pub fn display(&self) -> BoardDisplay {
        self.display
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set(&self, shown: BoardDisplay) {
        tracing::debug!(target: "kwsbit::display", "{:?}", shown);
        *self.display.lock().unwrap_or_else(|e| e.into_inner()) = shown;
    }
}

impl Indicator for BoardIndicator {
    fn show_icon(&mut self, icon: Icon) {
        self.set(BoardDisplay::Icon(icon));
    }

    fn show_string(&mut self, text: &str) {
        self.set(BoardDisplay::Text(text.to_string()));
    }

    fn show_number(&mut self, value: i64) {
        self.set(BoardDisplay::Number(value));
    }

    fn clear(&mut self) {
        self.set(BoardDisplay::Blank);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_indicator_shares_display() {
        let cell = Arc::new(Mutex::new(BoardDisplay::Blank));
        let mut indicator = BoardIndicator::new(Arc::clone(&cell));
        indicator.show_icon(Icon::Ear);
        assert_eq!(*cell.lock().unwrap(), BoardDisplay::Icon(Icon::Ear));

        indicator.show_string("microbit");
        assert_eq!(indicator.display(), BoardDisplay::Text("microbit".into()));

        indicator.show_number(42);
        assert_eq!(indicator.display(), BoardDisplay::Number(42));

        indicator.clear();
        assert_eq!(indicator.display(), BoardDisplay::Blank);
    }
}
