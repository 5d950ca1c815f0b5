//! Jukebox core: data model, address rules and the settings panel state machine.
mod address;
mod effect;
mod error;
mod media;
mod msg;
mod profile;
mod state;
mod update;
mod view_model;

pub use address::{
    encrypted_variant, endpoint_url, normalize_server_address, validate_server_address,
    AddressError,
};
pub use effect::Effect;
pub use error::SubmitError;
pub use media::{
    media_id, recognize_media_page, PageInfo, SubmissionItem, SubmissionReceipt, DEFAULT_TITLE,
};
pub use msg::Msg;
pub use profile::ServerProfile;
pub use state::PanelState;
pub use update::update;
pub use view_model::{PanelView, StatusKind, StatusLine};
