use crate::view_model::StatusKind;
use crate::{recognize_media_page, validate_server_address, Effect, Msg, PanelState, SubmitError};

const NO_VIDEO: &str = "No video to add!";
const ADDING: &str = "Adding video...";
const SAVED: &str = "Settings saved!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    let effects = match msg {
        Msg::ProfileLoaded(profile) => {
            state.apply_profile(&profile);
            Vec::new()
        }
        Msg::PageResolved(page) => {
            let item = page.as_ref().and_then(recognize_media_page);
            state.set_page(item);
            Vec::new()
        }
        Msg::AddressEdited(text) => {
            state.set_address_input(text);
            Vec::new()
        }
        Msg::UsernameEdited(text) => {
            state.set_username_input(text);
            Vec::new()
        }
        Msg::PasswordEdited(text) => {
            state.set_password_input(text);
            Vec::new()
        }
        Msg::CredentialFieldFocused => {
            state.show_auth();
            Vec::new()
        }
        Msg::SaveClicked => {
            let mut profile = state.form_profile();
            match validate_server_address(&profile.address) {
                Ok(address) => {
                    profile.address = address;
                    profile.auth_section_visible = profile.has_any_credential();
                    vec![Effect::PersistProfile(profile)]
                }
                Err(err) => {
                    state.set_status(err.to_string(), StatusKind::Error);
                    Vec::new()
                }
            }
        }
        Msg::ProfileSaved(profile) => {
            state.set_status(SAVED, StatusKind::Success);
            state.set_address_input(profile.address.clone());
            if profile.auth_section_visible {
                state.show_auth();
            }
            Vec::new()
        }
        Msg::SaveFailed(message) => {
            state.set_status(message, StatusKind::Error);
            Vec::new()
        }
        Msg::AddClicked => {
            if state.is_submitting() {
                return (state, Vec::new());
            }
            let profile = state.form_profile();
            if !profile.is_configured() {
                state.set_status(SubmitError::Unconfigured.to_string(), StatusKind::Error);
                return (state, Vec::new());
            }
            let Some(item) = state.page().cloned() else {
                state.set_status(NO_VIDEO, StatusKind::Error);
                return (state, Vec::new());
            };
            state.begin_submission();
            state.set_status(ADDING, StatusKind::Info);
            vec![Effect::Submit { item, profile }]
        }
        Msg::SubmissionFinished(Ok(receipt)) => {
            state.end_submission(true);
            state.set_status(format!("Added: {}", receipt.title), StatusKind::Success);
            state.set_page_title(&receipt.title);
            state.adopt_address(receipt.profile.address);
            Vec::new()
        }
        Msg::SubmissionFinished(Err(err)) => {
            state.end_submission(false);
            if err == SubmitError::AuthRequired {
                state.show_auth();
            }
            state.set_status(err.to_string(), StatusKind::Error);
            Vec::new()
        }
    };

    (state, effects)
}
