use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use jukebox_core::{validate_server_address, ServerProfile};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize profile: {0}")]
    Serialize(String),
    #[error("failed to parse stored profile: {0}")]
    Parse(String),
    #[error("refusing to store invalid server address {0:?}")]
    InvalidAddress(String),
}

/// Durable home of the [`ServerProfile`].
///
/// Callers never cache a profile across runs; they load it, and write back
/// through this contract.
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load(&self) -> Result<ServerProfile, StoreError>;

    /// Overwrites every stored field.
    async fn save(&self, profile: &ServerProfile) -> Result<(), StoreError>;

    /// Changes only the address, leaving credentials untouched.
    async fn update_address(&self, address: &str) -> Result<(), StoreError>;
}

fn check_address(address: &str) -> Result<(), StoreError> {
    if address.is_empty() {
        return Ok(());
    }
    match validate_server_address(address) {
        Ok(normalized) if normalized == address => Ok(()),
        _ => Err(StoreError::InvalidAddress(address.to_string())),
    }
}

/// On-disk layout, one field per settings key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoredSettings {
    server_url: String,
    username: String,
    password: String,
    show_auth: bool,
}

impl From<&ServerProfile> for StoredSettings {
    fn from(profile: &ServerProfile) -> Self {
        Self {
            server_url: profile.address.clone(),
            username: profile.username.clone().unwrap_or_default(),
            password: profile.password.clone().unwrap_or_default(),
            show_auth: profile.auth_section_visible,
        }
    }
}

impl From<StoredSettings> for ServerProfile {
    fn from(stored: StoredSettings) -> Self {
        let non_empty = |value: String| (!value.is_empty()).then_some(value);
        Self {
            address: stored.server_url,
            username: non_empty(stored.username),
            password: non_empty(stored.password),
            auth_section_visible: stored.show_auth,
        }
    }
}

/// RON file store; writes go to a temp file that is renamed into place.
///
/// File access runs on tokio's blocking pool so a slow disk never stalls the
/// relay's single runtime thread.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    inner: Arc<SettingsFile>,
}

#[derive(Debug)]
struct SettingsFile {
    path: PathBuf,
    // Serializes read-modify-write cycles inside this process.
    lock: Mutex<()>,
}

impl FileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(SettingsFile {
                path: path.into(),
                lock: Mutex::new(()),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    async fn with_file<T, F>(&self, job: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&SettingsFile) -> Result<T, StoreError> + Send + 'static,
    {
        let file = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let _guard = file.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            job(&file)
        })
        .await
        .map_err(|err| StoreError::Io(io::Error::other(err.to_string())))?
    }
}

impl SettingsFile {
    fn read(&self) -> Result<StoredSettings, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(StoredSettings::default());
            }
            Err(err) => return Err(err.into()),
        };
        ron::from_str(&content).map_err(|err| StoreError::Parse(err.to_string()))
    }

    fn write(&self, settings: &StoredSettings) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let content = ron::ser::to_string_pretty(settings, ron::ser::PrettyConfig::new())
            .map_err(|err| StoreError::Serialize(err.to_string()))?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path).map_err(|err| StoreError::Io(err.error))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProfileStore for FileProfileStore {
    async fn load(&self) -> Result<ServerProfile, StoreError> {
        self.with_file(|file| file.read().map(ServerProfile::from)).await
    }

    async fn save(&self, profile: &ServerProfile) -> Result<(), StoreError> {
        check_address(&profile.address)?;
        let settings = StoredSettings::from(profile);
        self.with_file(move |file| file.write(&settings)).await
    }

    async fn update_address(&self, address: &str) -> Result<(), StoreError> {
        check_address(address)?;
        let address = address.to_string();
        self.with_file(move |file| {
            let mut settings = file.read()?;
            settings.server_url = address;
            file.write(&settings)
        })
        .await
    }
}

/// In-memory store that also counts writes.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    profile: ServerProfile,
    saves: usize,
    address_updates: Vec<String>,
}

impl MemoryProfileStore {
    pub fn new(profile: ServerProfile) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                profile,
                ..MemoryInner::default()
            }),
        }
    }

    pub fn snapshot(&self) -> ServerProfile {
        self.with(|inner| inner.profile.clone())
    }

    pub fn saves(&self) -> usize {
        self.with(|inner| inner.saves)
    }

    /// Every address written through `update_address`, in order.
    pub fn address_updates(&self) -> Vec<String> {
        self.with(|inner| inner.address_updates.clone())
    }

    fn with<T>(&self, f: impl FnOnce(&mut MemoryInner) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

#[async_trait::async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn load(&self) -> Result<ServerProfile, StoreError> {
        Ok(self.snapshot())
    }

    async fn save(&self, profile: &ServerProfile) -> Result<(), StoreError> {
        check_address(&profile.address)?;
        self.with(|inner| {
            inner.profile = profile.clone();
            inner.saves += 1;
        });
        Ok(())
    }

    async fn update_address(&self, address: &str) -> Result<(), StoreError> {
        check_address(address)?;
        self.with(|inner| {
            inner.profile.address = address.to_string();
            inner.address_updates.push(address.to_string());
        });
        Ok(())
    }
}
