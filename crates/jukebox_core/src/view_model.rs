#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusLine {
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelView {
    pub address: String,
    pub username: String,
    pub password: String,
    pub auth_visible: bool,
    pub page_title: Option<String>,
    pub page_url: Option<String>,
    /// The page was looked up and is not a media page.
    pub not_supported: bool,
    pub add_enabled: bool,
    pub status: Option<StatusLine>,
}
