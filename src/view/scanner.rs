//! Scanner panel: last result, manual entry and history

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::UiState;
use crate::scanner::{ScanSnapshot, SessionState, ValidationResult};
use super::utils::{render_scrollable_list, truncate_string};

pub fn render_scanner_panel(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    scan: &ScanSnapshot,
    checksum: Option<u8>,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Result
            Constraint::Length(3), // Manual input
        ])
        .split(columns[0]);

    render_result(frame, left[0], scan, checksum);
    render_manual_input(frame, left[1], ui_state);
    render_history(frame, columns[1], scan);
}

fn label_line(label: &str, value: String, value_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, value_style),
    ])
}

fn render_result(frame: &mut Frame, area: Rect, scan: &ScanSnapshot, checksum: Option<u8>) {
    let white = Style::default().fg(Color::White);

    let lines: Vec<Line> = match &scan.last_result {
        Some(ValidationResult { data, verdict: Ok(decoded) }) => {
            let mut lines = vec![
                label_line("Data", data.clone(), white.add_modifier(Modifier::BOLD)),
                label_line("Type", decoded.symbology.to_string(), white),
                label_line("Length", format!("{} chars", decoded.length), white),
                label_line("Format", decoded.format.as_str().to_string(), white),
            ];
            if let Some(checksum) = checksum {
                lines.push(label_line("Checksum", checksum.to_string(), white));
            }
            lines.push(label_line("Status", "✓ valid".to_string(), Style::default().fg(Color::Green)));
            lines
        }
        Some(ValidationResult { data, verdict: Err(error) }) => vec![
            label_line("Data", data.clone(), white),
            label_line("Error", error.to_string(), Style::default().fg(Color::Red)),
        ],
        None => {
            let hint = match scan.state {
                SessionState::Scanning => format!("Scanning... ({} frames)", scan.frames_scanned),
                _ => "Waiting for a scan. Press S to start the camera.".to_string(),
            };
            vec![Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))]
        }
    };

    let border_style = match scan.state {
        SessionState::Scanning => Style::default().fg(Color::Yellow),
        SessionState::Matched => Style::default().fg(Color::Green),
        SessionState::Idle => Style::default(),
    };

    let result = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Result ")
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );
    frame.render_widget(result, area);
}

fn render_manual_input(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let editing = ui_state.editing_manual_input;
    let text = if ui_state.manual_input.is_empty() && !editing {
        "Press M to type a barcode...".to_string()
    } else if editing {
        format!("{}▏", ui_state.manual_input)
    } else {
        ui_state.manual_input.clone()
    };

    let style = if editing {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Manual entry (Enter to validate) ")
            .padding(Padding::horizontal(1))
            .border_style(style),
    );
    frame.render_widget(input, area);
}

fn render_history(frame: &mut Frame, area: Rect, scan: &ScanSnapshot) {
    let title = format!(" History ({}) ", scan.history.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1));

    if scan.history.is_empty() {
        let empty = Paragraph::new("No scans yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let data_width = (area.width as usize).saturating_sub(4 + 9 + 10 + 2);
    let items: Vec<ListItem> = scan
        .history
        .iter()
        .map(|entry| {
            let (status, status_color) = if entry.is_valid {
                ("✓", Color::Green)
            } else {
                ("✗", Color::Red)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", status), Style::default().fg(status_color)),
                Span::styled(truncate_string(&entry.data, data_width), Style::default().fg(Color::White)),
                Span::styled(format!(" {:<9}", entry.symbology.as_str()), Style::default().fg(Color::Cyan)),
                Span::styled(format!(" {}", entry.timestamp), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    render_scrollable_list(frame, area, items, 0, block);
}
