use jukebox_core::PageInfo;

/// Host accessor for the page the user is looking at.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn active_page(&self) -> Option<PageInfo>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// OS-level notification sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
