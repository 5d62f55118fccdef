use crossterm::event::{KeyCode, KeyEvent};
use kwsbit_core::{AudioQuality, BoardCommand, BoardState};

use crate::log_layer::LogBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Board,
    Logs,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    None,
    Quit,
    Command(BoardCommand),
}

pub struct App {
    pub tab: Tab,
    pub state: BoardState,
    pub should_quit: bool,
    pub logs: LogBuffer,
    pub log_scroll: usize,
    pub log_auto_scroll: bool,
}

impl App {
    pub fn new(logs: LogBuffer) -> Self {
        Self {
            tab: Tab::Board,
            state: BoardState::default(),
            should_quit: false,
            logs,
            log_scroll: 0,
            log_auto_scroll: true,
        }
    }

    pub fn update_state(&mut self, new_state: BoardState) {
        self.state = new_state;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return AppAction::Quit;
            }
            KeyCode::Char('1') => {
                self.tab = Tab::Board;
                return AppAction::None;
            }
            KeyCode::Char('2') => {
                self.tab = Tab::Logs;
                return AppAction::None;
            }
            _ => {}
        }

        // Buttons work from either tab
        if let Some(cmd) = board_command(key.code) {
            return AppAction::Command(cmd);
        }

        match self.tab {
            Tab::Logs => self.handle_logs_key(key),
            Tab::Board => AppAction::None,
        }
    }

    fn handle_logs_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Up => {
                self.log_scroll = self.log_scroll.saturating_add(1);
                self.log_auto_scroll = false;
            }
            KeyCode::Down => {
                self.log_scroll = self.log_scroll.saturating_sub(1);
            }
            KeyCode::Char('G') => {
                self.log_scroll = 0;
                self.log_auto_scroll = true;
            }
            _ => {}
        }
        AppAction::None
    }
}

fn board_command(code: KeyCode) -> Option<BoardCommand> {
    let cmd = match code {
        KeyCode::Char('a') => BoardCommand::ButtonA,
        KeyCode::Char('b') => BoardCommand::ButtonB,
        KeyCode::Char('x') => BoardCommand::ButtonAB,
        KeyCode::Char('l') => BoardCommand::SetQuality(AudioQuality::Low),
        KeyCode::Char('m') => BoardCommand::SetQuality(AudioQuality::Medium),
        KeyCode::Char('h') => BoardCommand::SetQuality(AudioQuality::High),
        KeyCode::Char('v') => BoardCommand::SetQuality(AudioQuality::VeryHigh),
        _ => return None,
    };
    Some(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn make_app() -> App {
        App::new(Arc::new(Mutex::new(VecDeque::new())))
    }

    #[test]
    fn test_app_initial_state() {
        let app = make_app();
        assert_eq!(app.tab, Tab::Board);
        assert!(!app.should_quit);
        assert_eq!(app.log_scroll, 0);
        assert!(app.log_auto_scroll);
    }

    #[test]
    fn test_app_tab_switching() {
        let mut app = make_app();
        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.tab, Tab::Logs);
        app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.tab, Tab::Board);
    }

    #[test]
    fn test_app_buttons() {
        let mut app = make_app();
        assert_eq!(
            app.handle_key(key(KeyCode::Char('a'))),
            AppAction::Command(BoardCommand::ButtonA)
        );
        assert_eq!(
            app.handle_key(key(KeyCode::Char('b'))),
            AppAction::Command(BoardCommand::ButtonB)
        );
        assert_eq!(
            app.handle_key(key(KeyCode::Char('x'))),
            AppAction::Command(BoardCommand::ButtonAB)
        );
    }

    #[test]
    fn test_app_quality_keys() {
        let mut app = make_app();
        let cases = [
            ('l', AudioQuality::Low),
            ('m', AudioQuality::Medium),
            ('h', AudioQuality::High),
            ('v', AudioQuality::VeryHigh),
        ];
        for (c, quality) in cases {
            assert_eq!(
                app.handle_key(key(KeyCode::Char(c))),
                AppAction::Command(BoardCommand::SetQuality(quality))
            );
        }
    }

    #[test]
    fn test_app_buttons_work_on_logs_tab() {
        let mut app = make_app();
        app.tab = Tab::Logs;
        assert_eq!(
            app.handle_key(key(KeyCode::Char('a'))),
            AppAction::Command(BoardCommand::ButtonA)
        );
    }

    #[test]
    fn test_app_unknown_key_is_ignored() {
        let mut app = make_app();
        assert_eq!(app.handle_key(key(KeyCode::Char('z'))), AppAction::None);
        assert_eq!(app.handle_key(key(KeyCode::Up)), AppAction::None);
        assert_eq!(app.log_scroll, 0);
    }

    #[test]
    fn test_app_quit() {
        let mut app = make_app();
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), AppAction::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_app_log_scroll() {
        let mut app = make_app();
        app.tab = Tab::Logs;

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.log_scroll, 1);
        assert!(!app.log_auto_scroll);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.log_scroll, 0);

        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Char('G')));
        assert_eq!(app.log_scroll, 0);
        assert!(app.log_auto_scroll);
    }

    #[test]
    fn test_app_state_update() {
        let mut app = make_app();
        app.update_state(BoardState {
            engine: "simulated".into(),
            busy: true,
            ..Default::default()
        });
        assert_eq!(app.state.engine, "simulated");
        assert!(app.state.busy);
    }
}
