pub mod app;
pub mod indicator;
pub mod log_layer;
pub mod ui;

use crossterm::event::{self, Event, KeyEventKind};
use kwsbit_core::{BoardCommand, BoardState};
use ratatui::DefaultTerminal;
use tokio::sync::{mpsc, watch};

pub use app::App;
pub use indicator::BoardIndicator;
pub use log_layer::{BoardLogLayer, LogBuffer};

/// Run the board emulator. Blocks until the user quits.
pub async fn run(
    mut state_rx: watch::Receiver<BoardState>,
    cmd_tx: mpsc::UnboundedSender<BoardCommand>,
    log_buffer: LogBuffer,
) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, &mut state_rx, &cmd_tx, log_buffer).await;
    ratatui::restore();
    result
}

async fn run_loop(
    terminal: &mut DefaultTerminal,
    state_rx: &mut watch::Receiver<BoardState>,
    cmd_tx: &mpsc::UnboundedSender<BoardCommand>,
    log_buffer: LogBuffer,
) -> std::io::Result<()> {
    let mut app = App::new(log_buffer);

    loop {
        if state_rx.has_changed().unwrap_or(false) {
            app.update_state(state_rx.borrow_and_update().clone());
        }

        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Short poll keeps redraws flowing while a recognition runs
        if event::poll(std::time::Duration::from_millis(33))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.handle_key(key) {
                        app::AppAction::Quit => {
                            let _ = cmd_tx.send(BoardCommand::Quit);
                            break;
                        }
                        app::AppAction::Command(cmd) => {
                            let _ = cmd_tx.send(cmd);
                        }
                        app::AppAction::None => {}
                    }
                }
            }
        }
    }

    Ok(())
}
