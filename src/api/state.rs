use std::sync::Arc;

use crate::command::Bot;

#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<Bot>,
}

impl AppState {
    pub fn new(bot: Bot) -> Self {
        Self { bot: Arc::new(bot) }
    }
}
