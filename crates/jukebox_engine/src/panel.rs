use std::collections::VecDeque;
use std::sync::Arc;

use jukebox_core::{update, Effect, Msg, PanelState, PanelView, ServerProfile};
use jukebox_logging::jukebox_error;

use crate::{PageSource, ProfileStore, SessionOrchestrator};

/// Drives the settings panel state machine, executing its effects.
pub struct SettingsPanel {
    state: PanelState,
    store: Arc<dyn ProfileStore>,
    orchestrator: SessionOrchestrator,
}

impl SettingsPanel {
    /// Loads the stored profile and the active page, as the panel does on open.
    pub async fn open(
        store: Arc<dyn ProfileStore>,
        orchestrator: SessionOrchestrator,
        pages: &dyn PageSource,
    ) -> Self {
        let profile = match store.load().await {
            Ok(profile) => profile,
            Err(err) => {
                jukebox_error!("Failed to load server profile: {err}");
                ServerProfile::default()
            }
        };
        let page = pages.active_page().await;

        let mut panel = Self {
            state: PanelState::new(),
            store,
            orchestrator,
        };
        panel.dispatch(Msg::ProfileLoaded(profile)).await;
        panel.dispatch(Msg::PageResolved(page)).await;
        panel
    }

    pub fn view(&self) -> PanelView {
        self.state.view()
    }

    /// Applies `msg`, then runs effects and their follow-up messages until
    /// nothing is left.
    ///
    /// Returns the new view when anything visible changed, `None` otherwise.
    pub async fn dispatch(&mut self, msg: Msg) -> Option<PanelView> {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                inbox.push_back(self.run_effect(effect).await);
            }
        }
        if self.state.consume_dirty() {
            Some(self.state.view())
        } else {
            None
        }
    }

    async fn run_effect(&self, effect: Effect) -> Msg {
        match effect {
            Effect::PersistProfile(profile) => match self.store.save(&profile).await {
                Ok(()) => Msg::ProfileSaved(profile),
                Err(err) => {
                    jukebox_error!("Failed to save settings: {err}");
                    Msg::SaveFailed(format!("Failed to save settings: {err}"))
                }
            },
            Effect::Submit { item, profile } => {
                Msg::SubmissionFinished(self.orchestrator.submit(&item, profile).await)
            }
        }
    }
}
