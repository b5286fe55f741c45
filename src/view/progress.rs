//! Progress bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::player::{PlaybackSnapshot, PlaybackStatus};
use super::utils::format_duration;

pub fn render_progress_bar(frame: &mut Frame, area: Rect, playback: &PlaybackSnapshot) {
    let status_text = match (&playback.track, playback.status) {
        (None, _) => " No tracks".to_string(),
        (Some(_), PlaybackStatus::Stopped) => " ■ Stopped".to_string(),
        (Some(track), PlaybackStatus::Playing) => {
            format!(" ▶ {} {} | {}", track.emoji, track.title, track.artist)
        }
        (Some(track), PlaybackStatus::Paused) => {
            format!("⏸  {} {} | {}", track.emoji, track.title, track.artist)
        }
    };

    let liked_text = if playback.liked { "♥ Liked" } else { "♡ Not liked" };

    let time_str = format!(
        "{} / {}",
        format_duration(playback.elapsed_seconds),
        format_duration(playback.duration_seconds)
    );

    let title = format!("{} ", status_text);
    let controls_info = format!(" {} | Space play/pause | ←/→ seek ", liked_text);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(playback.progress_ratio())
        .label(time_str);

    frame.render_widget(gauge, area);
}
