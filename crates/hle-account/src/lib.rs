//! HLE Account Service
//!
//! Host implementation of the guest's `acc:*` services: user enumeration,
//! per-user profile sessions and profile pictures.
//!
//! # Objects
//!
//! ```text
//!   ServiceManager
//!     ├── acc:aa ─┐
//!     ├── acc:su ─┤  Interface (shared Module + Arc<dyn ProfileStore>)
//!     ├── acc:u0 ─┤     │ GetProfile ──────────────► IProfile (one per call)
//!     └── acc:u1 ─┘     │ GetBaasAccountManager... ─► IManagerForApplication
//! ```
//!
//! Every object lives in the caller's `SessionTable`; new objects come back
//! as moved handles on the response that created them.
//!
//! # Profile Images
//!
//! `IProfile` serves `<config_root>/users/<username>.jpg`, read from offset
//! 0 and capped at [`MAX_JPEG_IMAGE_SIZE`]. When the file is missing or
//! unreadable it serves [`DEFAULT_PROFILE_IMAGE`] instead; that is never an
//! error.
//!
//! # Example
//!
//! ```rust
//! use hle_account::{install_interfaces, AccountConfig};
//! use hle_framework::{Request, ServiceManager, SessionTable};
//! use hle_ipc::{acc, service};
//!
//! let mut service_manager = ServiceManager::new();
//! install_interfaces(&mut service_manager, AccountConfig::default()).unwrap();
//!
//! let mut sessions = SessionTable::new();
//! let handle = service_manager.connect(service::ACC_U0, &mut sessions).unwrap();
//! let response = sessions
//!     .dispatch(handle, &Request::new(acc::CMD_GET_USER_COUNT, Vec::new()))
//!     .unwrap();
//! assert_eq!(response.reader().pop_u32().unwrap(), 1);
//! ```

pub mod baas;
pub mod config;
pub mod error;
pub mod image;
pub mod interfaces;
pub mod profile;
pub mod profile_manager;
pub mod serde_helpers;
pub mod store;
pub mod test_utils;
pub mod types;

pub use baas::IManagerForApplication;
pub use config::{AccountConfig, UserSeed, DEFAULT_USERNAME, DEFAULT_USER_ID};
pub use error::{AccountError, ProfileError};
pub use image::{
    ProfileImage, DEFAULT_PROFILE_IMAGE, DEFAULT_PROFILE_IMAGE_SIZE, MAX_JPEG_IMAGE_SIZE,
};
pub use interfaces::{install_interfaces, install_interfaces_with_store, Interface, Module};
pub use profile::IProfile;
pub use profile_manager::ProfileManager;
pub use store::ProfileStore;
pub use types::{
    ProfileBase, ProfileData, UserId, MAX_DATA, MAX_USERS, PROFILE_BASE_SIZE, USERNAME_SIZE,
};
