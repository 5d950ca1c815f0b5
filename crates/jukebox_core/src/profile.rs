/// Where the queue server lives and how to log in to it.
///
/// `address` is either empty (not configured) or a normalized absolute
/// `http`/`https` URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerProfile {
    pub address: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub auth_section_visible: bool,
}

impl ServerProfile {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.address.trim().is_empty()
    }

    /// Both credentials, trimmed, if neither is blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().map(str::trim).unwrap_or("");
        let password = self.password.as_deref().map(str::trim).unwrap_or("");
        if username.is_empty() || password.is_empty() {
            None
        } else {
            Some((username, password))
        }
    }

    /// True when at least one credential field holds text.
    pub fn has_any_credential(&self) -> bool {
        [&self.username, &self.password]
            .iter()
            .any(|field| field.as_deref().is_some_and(|value| !value.trim().is_empty()))
    }
}
