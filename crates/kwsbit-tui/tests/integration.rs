use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kwsbit_core::{BoardCommand, BoardDisplay, BoardState, Icon};
use kwsbit_engine::{ScriptedOutcome, ScriptedService};
use kwsbit_session::{harness, InitPolicy, Session};
use kwsbit_tui::app::{App, AppAction, Tab};
use kwsbit_tui::{ui, BoardIndicator};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area();
    let mut text = String::new();
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            text.push_str(buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_full_draw_cycle() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let logs = Arc::new(Mutex::new(VecDeque::new()));
    logs.lock()
        .unwrap()
        .push_back("[INFO] kwsbit: startup".to_string());

    let mut app = App::new(Arc::clone(&logs));
    app.update_state(BoardState {
        display: BoardDisplay::Icon(Icon::Heart),
        engine: "null".into(),
        is_running: true,
        ..Default::default()
    });

    for tab in [Tab::Board, Tab::Logs] {
        app.tab = tab;
        terminal.draw(|frame| ui::draw(frame, &app)).unwrap();
    }
    let text = buffer_text(terminal.backend().buffer());
    assert!(text.contains("startup"), "expected log line:\n{}", text);
}

#[test]
fn test_button_press_reaches_rendered_matrix() {
    let service = ScriptedService::new();
    service.push_outcome(ScriptedOutcome::detected("microbit", 0.9, 30));
    let display = Arc::new(Mutex::new(BoardDisplay::Blank));
    let mut session = Session::new(
        Box::new(service),
        Box::new(BoardIndicator::new(Arc::clone(&display))),
        InitPolicy::Explicit,
    );
    session.setup();

    let mut app = App::new(Arc::new(Mutex::new(VecDeque::new())));
    let action = app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
    assert_eq!(action, AppAction::Command(BoardCommand::ButtonA));
    harness::press_button_a(&mut session);

    app.update_state(BoardState {
        display: display.lock().unwrap().clone(),
        session: session.snapshot(),
        recent_keywords: vec!["microbit".into()],
        ..Default::default()
    });
    assert_eq!(app.state.display, BoardDisplay::Icon(Icon::Heart));

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| ui::draw(frame, &app)).unwrap();
    let text = buffer_text(terminal.backend().buffer());
    assert!(text.contains("Heart"), "expected heart caption:\n{}", text);
    assert!(text.contains("microbit (90%, 30 ms)"), "expected last result:\n{}", text);
}
