//! Account module configuration.
//!
//! Loaded from JSON; every field is optional:
//!
//! ```json
//! {
//!   "config_root": "/home/me/.config/emu",
//!   "users": [
//!     { "id": "0x1", "username": "yuzu", "open": true },
//!     { "username": "guest" }
//!   ],
//!   "allow_user_registration": false
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::AccountError;
use crate::types::UserId;

/// Username of the user seeded when the configuration names none.
pub const DEFAULT_USERNAME: &str = "yuzu";

/// Id of the user seeded when the configuration names none.
pub const DEFAULT_USER_ID: UserId = UserId(1);

/// One user to register at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSeed {
    /// Generated when absent
    #[serde(default)]
    pub id: Option<UserId>,
    pub username: String,
    /// Mark the user open after registration
    #[serde(default)]
    pub open: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Directory holding `users/<username>.jpg`
    pub config_root: PathBuf,
    pub users: Vec<UserSeed>,
    /// Answer to `IsUserRegistrationRequestPermitted`
    pub allow_user_registration: bool,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            config_root: PathBuf::from("config"),
            users: Vec::new(),
            allow_user_registration: false,
        }
    }
}

impl AccountConfig {
    /// Configuration rooted at `config_root`, everything else default.
    pub fn with_root(config_root: impl Into<PathBuf>) -> Self {
        Self {
            config_root: config_root.into(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self, AccountError> {
        let text = fs::read_to_string(path).map_err(|source| AccountError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        info!(
            "loaded account config from {:?} ({} seeded users)",
            path,
            config.users.len()
        );
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, AccountError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Profile image location for `username`.
    pub fn image_path(&self, username: &str) -> PathBuf {
        self.image_path_from_bytes(username.as_bytes())
    }

    /// Profile image location for a raw username field, NUL already stripped.
    ///
    /// On Unix the bytes name the file as-is, so a username that is not
    /// valid UTF-8 still finds its image.
    #[cfg(unix)]
    pub fn image_path_from_bytes(&self, username: &[u8]) -> PathBuf {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let mut file_name = OsStr::from_bytes(username).to_os_string();
        file_name.push(".jpg");
        self.config_root.join("users").join(file_name)
    }

    /// Profile image location for a raw username field, NUL already stripped.
    #[cfg(not(unix))]
    pub fn image_path_from_bytes(&self, username: &[u8]) -> PathBuf {
        self.config_root
            .join("users")
            .join(format!("{}.jpg", String::from_utf8_lossy(username)))
    }
}
