use jukebox_engine::{Notification, NotificationKind, Notifier};

/// Prints notifications; errors go to stderr.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                println!("{}: {}", notification.title, notification.message)
            }
            NotificationKind::Error => {
                eprintln!("{}: {}", notification.title, notification.message)
            }
        }
    }
}
