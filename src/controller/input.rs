//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActivePanel, AppModel, Intent};
use super::AppController;

const SEEK_STEP_SECONDS: f64 = 5.0;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut model = self.model.lock().await;

        // Ctrl+C / Ctrl+Q always quit, even while typing
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            model.handle(Intent::Quit);
            return Ok(());
        }

        // Handle help popup
        if model.ui_state().show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?')) {
                model.toggle_help_popup();
            }
            return Ok(());
        }

        // Handle the clear-history confirmation
        if model.ui_state().confirm_clear_history {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => model.handle(Intent::ClearHistory),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => model.cancel_clear_history(),
                _ => {}
            }
            return Ok(());
        }

        // Handle manual barcode input
        if model.ui_state().editing_manual_input {
            handle_manual_input_key(&mut model, key.code);
            return Ok(());
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.handle(Intent::Quit);
                return Ok(());
            }
            KeyCode::Tab | KeyCode::BackTab => {
                model.handle(Intent::SwitchPanel);
                return Ok(());
            }
            KeyCode::Char('h') | KeyCode::Char('?') => {
                model.toggle_help_popup();
                return Ok(());
            }
            KeyCode::Esc => {
                model.clear_notification();
                return Ok(());
            }
            _ => {}
        }

        let panel = model.ui_state().active_panel;
        match panel {
            ActivePanel::Scanner => handle_scanner_key(&mut model, key.code),
            ActivePanel::Player => handle_player_key(&mut model, key.code),
        }

        Ok(())
    }
}

fn handle_manual_input_key(model: &mut AppModel, code: KeyCode) {
    match code {
        KeyCode::Enter => {
            let text = model.manual_input().to_string();
            model.handle(Intent::ManualSubmit(text));
        }
        KeyCode::Esc => model.end_manual_input(),
        KeyCode::Backspace => model.backspace_manual_input(),
        KeyCode::Char(c) => model.append_to_manual_input(c),
        _ => {}
    }
}

fn handle_scanner_key(model: &mut AppModel, code: KeyCode) {
    let intent = match code {
        KeyCode::Char('s') | KeyCode::Char('S') => Intent::StartScan,
        KeyCode::Char('x') | KeyCode::Char('X') => Intent::StopScan,
        KeyCode::Char('r') | KeyCode::Char('R') => Intent::Reset,
        KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Enter => {
            model.begin_manual_input();
            return;
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            model.request_clear_history();
            return;
        }
        _ => return,
    };
    model.handle(intent);
}

fn handle_player_key(model: &mut AppModel, code: KeyCode) {
    let intent = match code {
        KeyCode::Up => {
            model.move_track_selection_up();
            return;
        }
        KeyCode::Down => {
            model.move_track_selection_down();
            return;
        }
        KeyCode::Enter => Intent::Play(model.ui_state().track_selected),
        KeyCode::Char(' ') => Intent::TogglePlayback,
        KeyCode::Char('n') | KeyCode::Char('N') => Intent::Next,
        KeyCode::Char('p') | KeyCode::Char('P') => Intent::Previous,
        KeyCode::Left => Intent::SeekBy(-SEEK_STEP_SECONDS),
        KeyCode::Right => Intent::SeekBy(SEEK_STEP_SECONDS),
        KeyCode::Char(c @ '0'..='9') => {
            let tenths = c.to_digit(10).unwrap_or(0);
            Intent::Seek(tenths as f64 / 10.0)
        }
        KeyCode::Char('l') | KeyCode::Char('L') => match model.selected_track_id() {
            Some(id) => Intent::ToggleLike(id),
            None => return,
        },
        _ => return,
    };
    model.handle(intent);
}
