//! Player panel: the track list

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding},
    Frame,
};

use crate::model::{TrackRow, UiState};
use super::utils::{format_duration, render_scrollable_list, truncate_string};

pub fn render_track_list(frame: &mut Frame, area: Rect, ui_state: &UiState, rows: &[TrackRow], is_playing: bool) {
    // Format: " {marker} {emoji} {title}   {artist}   {liked} {duration}"
    let content_width = (area.width as usize).saturating_sub(4);
    let fixed_width = 2 + 3 + 3 + 3 + 2 + 6;
    let remaining = content_width.saturating_sub(fixed_width);
    let title_width = (remaining * 55) / 100;
    let artist_width = remaining.saturating_sub(title_width);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let marker = match (row.is_current, is_playing) {
                (true, true) => "▶",
                (true, false) => "⏸",
                _ => " ",
            };
            let liked = if row.liked { "♥" } else { " " };

            let text = format!(
                " {} {}  {}   {}   {} {:>5}",
                marker,
                row.track.emoji,
                truncate_string(row.track.title, title_width),
                truncate_string(row.track.artist, artist_width),
                liked,
                format_duration(row.track.duration()),
            );

            let style = if i == ui_state.track_selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if row.is_current {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Tracks (Enter play, L like) ")
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green));

    render_scrollable_list(frame, area, items, ui_state.track_selected, block);
}
