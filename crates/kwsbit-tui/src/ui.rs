use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Tabs};
use ratatui::Frame;

use kwsbit_core::{BoardDisplay, BoardState};

use crate::app::{App, Tab};

const LED_ON: &str = "██";
const LED_OFF: &str = "··";

pub fn draw(frame: &mut Frame, app: &App) {
    let [tabs_area, main_area, help_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_tabs(frame, app, tabs_area);

    match app.tab {
        Tab::Board => draw_board(frame, &app.state, main_area),
        Tab::Logs => draw_logs(frame, app, main_area),
    }

    let help = Paragraph::new("a=A  b=B  x=A+B  l/m/h/v=quality  1/2=tabs  q=quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, help_area);
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let selected = match app.tab {
        Tab::Board => 0,
        Tab::Logs => 1,
    };
    let tabs = Tabs::new(vec!["1:Board", "2:Logs"])
        .block(Block::default().borders(Borders::ALL).title("kwsbit"))
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

/// Five rows of LEDs for the current display. Text and numbers leave the matrix dark.
pub fn led_rows(display: &BoardDisplay) -> Vec<String> {
    (0..5)
        .map(|row| {
            (0..5)
                .map(|col| match display {
                    BoardDisplay::Icon(icon) if icon.is_lit(row, col) => LED_ON,
                    _ => LED_OFF,
                })
                .collect()
        })
        .collect()
}

pub fn display_caption(display: &BoardDisplay) -> String {
    match display {
        BoardDisplay::Blank => String::new(),
        BoardDisplay::Icon(icon) => format!("{:?}", icon),
        BoardDisplay::Text(text) => text.clone(),
        BoardDisplay::Number(n) => n.to_string(),
    }
}

fn draw_board(frame: &mut Frame, state: &BoardState, area: Rect) {
    let [matrix_area, side_area] =
        Layout::horizontal([Constraint::Length(16), Constraint::Fill(1)]).areas(area);

    let mut lines: Vec<Line> = led_rows(&state.display)
        .into_iter()
        .map(|row| Line::styled(row, Style::default().fg(Color::Red)))
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        display_caption(&state.display),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let matrix = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("LEDs"));
    frame.render_widget(matrix, matrix_area);

    let [status_area, keywords_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Fill(1)]).areas(side_area);
    draw_status(frame, state, status_area);

    let mut items: Vec<ListItem> = state
        .warnings
        .iter()
        .map(|w| ListItem::new(Span::styled(w.as_str(), Style::default().fg(Color::Yellow))))
        .collect();
    items.extend(
        state
            .recent_keywords
            .iter()
            .rev()
            .take(10)
            .map(|k| ListItem::new(k.as_str())),
    );
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Heard"));
    frame.render_widget(list, keywords_area);
}

fn draw_status(frame: &mut Frame, state: &BoardState, area: Rect) {
    let session = &state.session;
    let last = match &session.last_keyword {
        Some(keyword) => format!(
            "{} ({}%, {} ms)",
            keyword, session.last_confidence, session.last_processing_time_ms
        ),
        None => "-".to_string(),
    };
    let activity = if state.busy {
        Span::styled("listening...", Style::default().fg(Color::Green))
    } else {
        Span::raw("idle")
    };

    let lines = vec![
        Line::from(format!("Engine:      {}", state.engine)),
        Line::from(format!(
            "Initialized: {}",
            if session.initialized { "yes" } else { "no" }
        )),
        Line::from(format!(
            "Sampling:    {} Hz / {} ms",
            session.sampling_frequency_hz, session.sampling_duration_ms
        )),
        Line::from(format!("Last:        {}", last)),
        Line::from(vec![Span::raw("State:       "), activity]),
    ];
    let para = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Session"));
    frame.render_widget(para, area);
}

fn draw_logs(frame: &mut Frame, app: &App, area: Rect) {
    let logs = app.logs.lock().unwrap_or_else(|e| e.into_inner());
    let total = logs.len();

    let visible_height = area.height.saturating_sub(2) as usize;
    let scroll = app.log_scroll.min(total.saturating_sub(visible_height));
    let end = total.saturating_sub(scroll);
    let start = end.saturating_sub(visible_height);

    let items: Vec<ListItem> = logs
        .iter()
        .skip(start)
        .take(end - start)
        .map(|s| ListItem::new(s.as_str()))
        .collect();

    let title = if app.log_auto_scroll {
        "Logs (auto-scroll)"
    } else {
        "Logs (Up/Down=scroll, G=bottom)"
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}
