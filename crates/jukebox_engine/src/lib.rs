//! Jukebox engine: transports, relay, orchestration and settings persistence.
mod api;
mod orchestrator;
mod panel;
mod relay;
mod resilient;
mod shortcut;
mod store;
mod surface;
mod transport;
mod types;

pub use api::{ApiCall, ApiClient, ApiReply, DirectApi, ADD_ENDPOINT, AUTH_STATUS_ENDPOINT, LOGIN_ENDPOINT};
pub use orchestrator::SessionOrchestrator;
pub use panel::SettingsPanel;
pub use relay::{RelayApi, RelayHandle, RelayRequest, RelayResponse};
pub use resilient::{ResilientTransport, TransportOutcome};
pub use shortcut::{ShortcutHandler, ADD_TO_JUKEBOX_COMMAND};
pub use store::{FileProfileStore, MemoryProfileStore, ProfileStore, StoreError};
pub use surface::{Notification, NotificationKind, Notifier, PageSource};
pub use transport::{ReqwestTransport, Transport, TransportSettings};
pub use types::{FailureKind, HttpMethod, HttpRequest, HttpResponse, TransportError};
