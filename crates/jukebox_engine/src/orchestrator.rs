use std::sync::Arc;

use jukebox_core::{
    validate_server_address, AddressError, ServerProfile, SubmissionItem, SubmissionReceipt,
    SubmitError,
};
use jukebox_logging::Diagnostics;
use serde_json::{json, Value};

use crate::api::{ADD_ENDPOINT, AUTH_STATUS_ENDPOINT, LOGIN_ENDPOINT};
use crate::{ApiCall, ApiClient, ApiReply, ProfileStore};

/// Login gate reported by `/api/auth-status`.
///
/// Fields are read one by one; a missing or mistyped field counts as `false`
/// without affecting the other.
#[derive(Debug, Default, PartialEq, Eq)]
struct AuthStatus {
    require_login: bool,
    authenticated: bool,
}

impl AuthStatus {
    fn from_payload(data: &Value) -> Self {
        Self {
            require_login: flag(data, "requireLogin"),
            authenticated: flag(data, "authenticated"),
        }
    }

    fn needs_login(&self) -> bool {
        self.require_login && !self.authenticated
    }
}

/// Outcome reported by `/api/add`.
#[derive(Debug, Default, PartialEq, Eq)]
struct AddResult {
    success: bool,
    title: Option<String>,
    message: Option<String>,
}

impl AddResult {
    fn from_payload(data: &Value) -> Self {
        Self {
            success: flag(data, "success"),
            title: data
                .get("video")
                .and_then(|video| text(video, "title"))
                .filter(|title| !title.trim().is_empty()),
            message: text(data, "message"),
        }
    }
}

fn flag(data: &Value, key: &str) -> bool {
    data.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn text(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Runs auth-status, optional login, then submission, strictly in order.
#[derive(Clone)]
pub struct SessionOrchestrator {
    api: Arc<dyn ApiClient>,
    store: Arc<dyn ProfileStore>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl SessionOrchestrator {
    pub fn new(
        api: Arc<dyn ApiClient>,
        store: Arc<dyn ProfileStore>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            api,
            store,
            diagnostics,
        }
    }

    /// Submits `item` to the server in `profile`.
    ///
    /// A protocol upgrade discovered on any call is adopted for the rest of
    /// the run, written to the store, and returned in the receipt.
    pub async fn submit(
        &self,
        item: &SubmissionItem,
        profile: ServerProfile,
    ) -> Result<SubmissionReceipt, SubmitError> {
        let result = self.run(item, profile).await;
        match &result {
            Ok(receipt) => self.diagnostics.info(
                "submission_added",
                format!("{} as {:?}", item.source_url, receipt.title),
            ),
            Err(err) => self
                .diagnostics
                .error("submission_failed", format!("{}: {err}", item.source_url)),
        }
        result
    }

    async fn run(
        &self,
        item: &SubmissionItem,
        mut profile: ServerProfile,
    ) -> Result<SubmissionReceipt, SubmitError> {
        profile.address = match validate_server_address(&profile.address) {
            Ok(address) => address,
            Err(AddressError::Empty) => return Err(SubmitError::Unconfigured),
            Err(AddressError::Invalid(_)) => {
                return Err(SubmitError::InvalidAddress(profile.address))
            }
        };

        let status = self
            .call(&mut profile, ApiCall::get(AUTH_STATUS_ENDPOINT))
            .await?;
        let auth = if status.ok {
            AuthStatus::from_payload(&status.data)
        } else {
            AuthStatus::default()
        };

        if auth.needs_login() {
            let (username, password) = match profile.credentials() {
                Some((username, password)) => (username.to_string(), password.to_string()),
                None => return Err(SubmitError::AuthRequired),
            };
            let body = json!({ "username": username, "password": password });
            let login = self
                .call(&mut profile, ApiCall::post(LOGIN_ENDPOINT, body))
                .await?;
            if !login.ok {
                return Err(SubmitError::LoginFailed {
                    status: login.status,
                });
            }
        }

        let body = json!({ "videoUrl": item.source_url });
        let added = self
            .call(&mut profile, ApiCall::post(ADD_ENDPOINT, body))
            .await?;
        let result = AddResult::from_payload(&added.data);
        if !(added.ok && result.success) {
            return Err(SubmitError::SubmissionRejected {
                message: result.message,
            });
        }

        let title = result
            .title
            .unwrap_or_else(|| item.display_title.clone());
        Ok(SubmissionReceipt { title, profile })
    }

    async fn call(
        &self,
        profile: &mut ServerProfile,
        call: ApiCall,
    ) -> Result<ApiReply, SubmitError> {
        let reply = self
            .api
            .call(&profile.address, &call)
            .await
            .map_err(|err| SubmitError::transport(err.message))?;
        if reply.server_address != profile.address {
            self.adopt_address(profile, reply.server_address.clone()).await;
        }
        Ok(reply)
    }

    async fn adopt_address(&self, profile: &mut ServerProfile, address: String) {
        self.diagnostics.info(
            "protocol_upgrade",
            format!("{} -> {address}", profile.address),
        );
        // A failed write keeps the upgrade for this run only.
        if let Err(err) = self.store.update_address(&address).await {
            self.diagnostics
                .error("upgrade_persist_failed", format!("{address}: {err}"));
        }
        profile.address = address;
    }
}
