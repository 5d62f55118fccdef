use crate::types::AudioQuality;

/// Icons the board can show on its 5x5 LED matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Yes,
    No,
    Ear,
    Heart,
    Confused,
    Sad,
}

impl Icon {
    /// LED rows, `#` lit and `.` dark.
    pub fn pattern(self) -> [&'static str; 5] {
        match self {
            Icon::Yes => [".....", "....#", "...#.", "#.#..", ".#..."],
            Icon::No => ["#...#", ".#.#.", "..#..", ".#.#.", "#...#"],
            Icon::Ear => [".###.", "#...#", "..#.#", "..##.", ".#..."],
            Icon::Heart => [".#.#.", "#####", "#####", ".###.", "..#.."],
            Icon::Confused => [".....", ".#.#.", ".....", ".#.#.", "#.#.#"],
            Icon::Sad => [".....", ".#.#.", ".....", ".###.", "#...#"],
        }
    }

    pub fn is_lit(self, row: usize, col: usize) -> bool {
        self.pattern()
            .get(row)
            .and_then(|r| r.as_bytes().get(col))
            .is_some_and(|b| *b == b'#')
    }
}

/// What the board display is currently showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BoardDisplay {
    #[default]
    Blank,
    Icon(Icon),
    Text(String),
    Number(i64),
}

/// Copy of the session's observable state, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub initialized: bool,
    pub sampling_frequency_hz: u32,
    pub sampling_duration_ms: u32,
    pub last_keyword: Option<String>,
    pub last_confidence: u32,
    pub last_processing_time_ms: u32,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            initialized: false,
            sampling_frequency_hz: crate::types::DEFAULT_SAMPLING_FREQUENCY_HZ,
            sampling_duration_ms: crate::types::DEFAULT_SAMPLING_DURATION_MS,
            last_keyword: None,
            last_confidence: 0,
            last_processing_time_ms: 0,
        }
    }
}

/// Aggregate board state broadcast to the TUI via watch channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub display: BoardDisplay,
    pub session: SessionSnapshot,
    pub engine: String,
    pub busy: bool,
    pub recent_keywords: Vec<String>,
    pub warnings: Vec<String>,
    pub is_running: bool,
}

/// Commands sent from TUI → main via mpsc channel.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardCommand {
    ButtonA,
    ButtonB,
    ButtonAB,
    SetQuality(AudioQuality),
    Quit,
}
