//! Overlay rendering (notification toast, clear-history confirmation, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::{Notification, NotificationLevel};

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_notification(frame: &mut Frame, notification: &Notification) {
    let area = frame.area();

    let (color, title) = match notification.level {
        NotificationLevel::Success => (Color::Green, " ✓ "),
        NotificationLevel::Error => (Color::Red, " Error (Esc to dismiss) "),
        NotificationLevel::Info => (Color::Cyan, " i "),
    };

    // Top-right corner, under the top bar
    let popup_width = (notification.message.chars().count() as u16 + 6)
        .max(title.chars().count() as u16 + 4)
        .min(area.width.saturating_sub(2));
    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width + 1),
        y: 3u16.min(area.height.saturating_sub(3)),
        width: popup_width,
        height: 3u16.min(area.height),
    };

    // Clear the area behind the popup first
    frame.render_widget(Clear, popup_area);

    let toast = Paragraph::new(notification.message.clone())
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title)
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(toast, popup_area);
}

pub fn render_clear_history_prompt(frame: &mut Frame, entry_count: usize) {
    let popup_area = centered_popup(frame.area(), 44, 5);
    frame.render_widget(Clear, popup_area);

    let prompt = Paragraph::new(vec![
        Line::from(format!("Delete all {} history entries?", entry_count)),
        Line::from(vec![
            Span::styled("Y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" yes   "),
            Span::styled("N", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" no"),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Clear history ")
            .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(prompt, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── General ──"),
        ("Tab", "Switch scanner / player"),
        ("H / ?", "Toggle this help"),
        ("Esc", "Dismiss notification"),
        ("Q / Ctrl+C", "Quit"),
        ("", ""),
        ("", "── Scanner ──"),
        ("S", "Start camera"),
        ("X", "Stop camera"),
        ("R", "Reset result"),
        ("M / Enter", "Type a barcode"),
        ("C", "Clear history"),
        ("", ""),
        ("", "── Player ──"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Play selected track"),
        ("Space", "Play / Pause"),
        ("N", "Next track"),
        ("P", "Previous track"),
        ("← / →", "Seek 5 seconds"),
        ("0 - 9", "Seek to 0% - 90%"),
        ("L", "Like / Unlike track"),
    ];

    let popup_area = centered_popup(frame.area(), 52, keybindings.len() as u16 + 2);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    // Create help text lines
    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^46}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>14}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
