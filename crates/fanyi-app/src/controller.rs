use std::sync::Arc;

use fanyi_core::types::AppEvent;
use fanyi_translator::TranslationPipeline;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::display::display_loop;
use crate::events::event_loop;
use crate::io::watcher_io;
use crate::reload::watch_reload;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub input: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_display: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            input: kanal::bounded_async(64),           // clipboard and external calls
            app_to_display: kanal::bounded_async(256), // results
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(
        &self,
        pipeline: Option<Arc<TranslationPipeline>>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.input.1.clone(),
            self.channels.app_to_display.0.clone(),
            pipeline,
            self.cancel_token.child_token(),
        ));

        // Display loop
        tasks.spawn(display_loop(
            self.channels.app_to_display.1.clone(),
            self.state.config.clone(),
            self.cancel_token.child_token(),
        ));

        // Watcher IO
        tasks.spawn(watcher_io(
            self.state.clone(),
            self.cancel_token.child_token(),
            self.channels.input.0.clone(),
        ));

        // Profile reload
        tasks.spawn(watch_reload(
            self.state.clone(),
            self.cancel_token.child_token(),
            self.channels.input.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
