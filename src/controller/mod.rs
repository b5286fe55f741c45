//! Controller module - input handling and periodic ticks
//!
//! - `input`: key events to intents
//! - `tickers`: background tasks driving the frame sampler and playback clock

mod input;
mod tickers;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }
}
