use crate::{PageInfo, ServerProfile, SubmissionReceipt, SubmitError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Stored profile was read at panel startup.
    ProfileLoaded(ServerProfile),
    /// The host looked up the active page; `None` when there is no page.
    PageResolved(Option<PageInfo>),
    /// User edited the server address field.
    AddressEdited(String),
    /// User edited the username field.
    UsernameEdited(String),
    /// User edited the password field.
    PasswordEdited(String),
    /// A credential field gained focus.
    CredentialFieldFocused,
    /// User clicked Save.
    SaveClicked,
    /// The store accepted the profile.
    ProfileSaved(ServerProfile),
    /// The store rejected the profile.
    SaveFailed(String),
    /// User clicked Add.
    AddClicked,
    /// A submission run completed.
    SubmissionFinished(Result<SubmissionReceipt, SubmitError>),
}
