use crate::{ServerProfile, SubmissionItem};

/// Side effects requested by the settings panel, executed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Overwrite the stored profile; answer with `ProfileSaved` or `SaveFailed`.
    PersistProfile(ServerProfile),
    /// Run a submission; answer with `SubmissionFinished`.
    Submit {
        item: SubmissionItem,
        profile: ServerProfile,
    },
}
