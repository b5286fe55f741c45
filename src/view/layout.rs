//! Layout rendering (top bar with panel tabs)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{ActivePanel, UiState};
use crate::scanner::SessionState;

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, scan_state: SessionState, scan_count: usize) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Panel tabs
            Constraint::Length(30), // Scanner status
        ])
        .split(area);

    let tab = |label: &'static str, panel: ActivePanel| {
        let style = if ui_state.active_panel == panel {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Span::styled(format!(" {} ", label), style)
    };

    let tabs = Paragraph::new(Line::from(vec![
        tab("📷 Scanner", ActivePanel::Scanner),
        Span::raw("│"),
        tab("🎵 Player", ActivePanel::Player),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Tab to switch "));
    frame.render_widget(tabs, chunks[0]);

    let (status_text, status_color) = match scan_state {
        SessionState::Idle => ("Camera off", Color::DarkGray),
        SessionState::Scanning => ("Scanning...", Color::Yellow),
        SessionState::Matched => ("Match found", Color::Green),
    };
    let status = Paragraph::new(format!("{} | {} scans", status_text, scan_count))
        .style(Style::default().fg(status_color))
        .block(Block::default().borders(Borders::ALL).title(" Scanner "));
    frame.render_widget(status, chunks[1]);
}
