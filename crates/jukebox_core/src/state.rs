use crate::view_model::{PanelView, StatusKind, StatusLine};
use crate::{normalize_server_address, ServerProfile, SubmissionItem};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelState {
    address_input: String,
    username_input: String,
    password_input: String,
    auth_visible: bool,
    page: Option<SubmissionItem>,
    page_resolved: bool,
    status: Option<StatusLine>,
    submitting: bool,
    added: bool,
    dirty: bool,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PanelView {
        PanelView {
            address: self.address_input.clone(),
            username: self.username_input.clone(),
            password: self.password_input.clone(),
            auth_visible: self.auth_visible,
            page_title: self.page.as_ref().map(|item| item.display_title.clone()),
            page_url: self.page.as_ref().map(|item| item.source_url.clone()),
            not_supported: self.page_resolved && self.page.is_none(),
            add_enabled: self.can_add(),
            status: self.status.clone(),
        }
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn can_add(&self) -> bool {
        !self.submitting
            && !self.added
            && self.page.is_some()
            && !self.address_input.trim().is_empty()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn apply_profile(&mut self, profile: &ServerProfile) {
        self.address_input = profile.address.clone();
        self.username_input = profile.username.clone().unwrap_or_default();
        self.password_input = profile.password.clone().unwrap_or_default();
        self.auth_visible = profile.auth_section_visible;
        self.mark_dirty();
    }

    pub(crate) fn set_page(&mut self, page: Option<SubmissionItem>) {
        self.page = page;
        self.page_resolved = true;
        self.mark_dirty();
    }

    pub(crate) fn page(&self) -> Option<&SubmissionItem> {
        self.page.as_ref()
    }

    pub(crate) fn set_address_input(&mut self, text: String) {
        if self.address_input != text || self.added {
            self.address_input = text;
            self.added = false;
            self.mark_dirty();
        }
    }

    /// Reflects an address upgrade without re-arming the Add button.
    pub(crate) fn adopt_address(&mut self, address: String) {
        if self.address_input != address {
            self.address_input = address;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_username_input(&mut self, text: String) {
        if self.username_input != text {
            self.username_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_password_input(&mut self, text: String) {
        if self.password_input != text {
            self.password_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn show_auth(&mut self) {
        if !self.auth_visible {
            self.auth_visible = true;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusLine::new(text, kind));
        self.mark_dirty();
    }

    pub(crate) fn begin_submission(&mut self) {
        self.submitting = true;
        self.mark_dirty();
    }

    pub(crate) fn end_submission(&mut self, added: bool) {
        self.submitting = false;
        self.added = added;
        self.mark_dirty();
    }

    pub(crate) fn set_page_title(&mut self, title: &str) {
        if let Some(item) = self.page.as_mut() {
            if !title.is_empty() && item.display_title != title {
                item.display_title = title.to_string();
                self.mark_dirty();
            }
        }
    }

    /// The profile described by the form fields as they are right now.
    pub(crate) fn form_profile(&self) -> ServerProfile {
        ServerProfile {
            address: normalize_server_address(&self.address_input),
            username: non_blank(&self.username_input),
            password: non_blank(&self.password_input),
            auth_section_visible: self.auth_visible,
        }
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
