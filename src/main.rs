mod controller;
mod error;
mod logging;
mod model;
mod player;
mod scanner;
mod storage;
mod view;

use std::io;
use std::sync::Arc;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use view::{AppView, ViewData};
use controller::AppController;
use model::AppModel;
use storage::{FileStore, KeyValueStore};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Scan Player Starting ===");

    let file_store = FileStore::default();
    tracing::debug!(dir = %file_store.dir().display(), "Using file store");
    let store: Arc<dyn KeyValueStore> = Arc::new(file_store);

    let app_model = AppModel::with_store(store);
    let model = Arc::new(Mutex::new(app_model));

    let controller = AppController::new(model.clone());
    let tickers = controller.start_tickers();

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Tickers exit on their own once quit is set; abort covers the error path
    for ticker in tickers {
        ticker.abort();
    }

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Scan Player shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> Result<()> {
    loop {
        let (data, should_quit) = {
            let mut model_guard = model.lock().await;

            // Notifications expire after a few seconds
            model_guard.auto_clear_old_notifications();

            let data = ViewData {
                ui_state: model_guard.ui_state().clone(),
                scan: model_guard.scan_snapshot(),
                checksum: model_guard.last_checksum(),
                playback: model_guard.playback_snapshot(),
                tracks: model_guard.track_rows(),
            };
            (data, model_guard.should_quit())
        };

        if should_quit {
            break;
        }

        terminal.draw(|f| {
            AppView::render(f, &data);
        })?;

        // Short poll keeps the scanner status and progress bar moving
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }
    }

    Ok(())
}
