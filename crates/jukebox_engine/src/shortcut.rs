use std::sync::Arc;

use jukebox_core::{recognize_media_page, ServerProfile, SubmissionReceipt, SubmitError};
use jukebox_logging::{jukebox_debug, jukebox_error};

use crate::{Notification, Notifier, PageSource, ProfileStore, SessionOrchestrator};

/// Name of the global keyboard command that submits the active page.
pub const ADD_TO_JUKEBOX_COMMAND: &str = "add-to-jukebox";

const APP_TITLE: &str = "LAN Jukebox";

/// Handles the keyboard-shortcut trigger in the privileged context.
pub struct ShortcutHandler {
    pages: Arc<dyn PageSource>,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn ProfileStore>,
    orchestrator: SessionOrchestrator,
}

impl ShortcutHandler {
    pub fn new(
        pages: Arc<dyn PageSource>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn ProfileStore>,
        orchestrator: SessionOrchestrator,
    ) -> Self {
        Self {
            pages,
            notifier,
            store,
            orchestrator,
        }
    }

    /// Runs the submission for `command`; returns `None` for other commands.
    pub async fn handle_command(
        &self,
        command: &str,
    ) -> Option<Result<SubmissionReceipt, SubmitError>> {
        if command != ADD_TO_JUKEBOX_COMMAND {
            jukebox_debug!("Ignoring unknown command {command:?}");
            return None;
        }
        Some(self.add_active_page().await)
    }

    async fn add_active_page(&self) -> Result<SubmissionReceipt, SubmitError> {
        let page = self.pages.active_page().await;
        let Some(item) = page.as_ref().and_then(recognize_media_page) else {
            self.notifier
                .notify(Notification::error(APP_TITLE, "Not a YouTube video page"));
            return Err(SubmitError::UnsupportedPage);
        };

        let profile = match self.store.load().await {
            Ok(profile) => profile,
            Err(err) => {
                jukebox_error!("Failed to load server profile: {err}");
                ServerProfile::default()
            }
        };
        if !profile.is_configured() {
            self.notifier.notify(Notification::error(
                APP_TITLE,
                "Please configure the server address first",
            ));
            return Err(SubmitError::Unconfigured);
        }

        let result = self.orchestrator.submit(&item, profile).await;
        match &result {
            Ok(receipt) => self
                .notifier
                .notify(Notification::success("Added to Jukebox", receipt.title.clone())),
            Err(err) => self
                .notifier
                .notify(Notification::error("Failed to add video", err.to_string())),
        }
        result
    }
}
