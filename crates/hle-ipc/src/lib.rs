//! IPC Protocol Constants & Wire Format for HLE System Services
//!
//! This crate defines:
//! - **Service port names** (the names guests pass to `sm:GetService`)
//! - **Command ids** per interface object
//! - **Result codes** returned in every response
//! - **Wire format** for requests and responses (`Request`, `ResponseBuilder`)
//!
//! It is the **single source of truth** for all account protocol constants,
//! so the service implementation and its tests agree on every number.
//!
//! # Message Layout
//!
//! | Offset | Request (`SFCI`)     | Response (`SFCO`)     |
//! |--------|----------------------|-----------------------|
//! | 0x00   | magic `u32`          | magic `u32`           |
//! | 0x04   | version `u32`        | version `u32`         |
//! | 0x08   | command id `u64`     | result `u32`, padding |
//! | 0x10.. | raw argument words   | raw output words      |
//!
//! Output buffers and moved interface handles travel next to the raw data,
//! not inside it (see [`Response`]).
//!
//! # Usage
//!
//! ```rust
//! use hle_ipc::{acc, Request, ResponseBuilder, ResultCode};
//!
//! let request = Request::new(acc::CMD_GET_USER_COUNT, Vec::new());
//! let bytes = request.encode();
//! assert_eq!(Request::parse(&bytes).unwrap().command_id, acc::CMD_GET_USER_COUNT);
//!
//! let response = ResponseBuilder::success().push_u32(1).build();
//! assert_eq!(response.result, ResultCode::SUCCESS);
//! ```

pub mod error;
pub mod message;
pub mod result;

pub use error::ProtocolError;
pub use message::{
    PayloadReader, Request, Response, ResponseBuilder, PROTOCOL_VERSION, REQUEST_HEADER_SIZE,
    REQUEST_MAGIC, RESPONSE_MAGIC,
};
pub use result::{ErrorModule, ResultCode};

// =============================================================================
// Service Port Names
// =============================================================================

/// Names under which the account module is installed in the service manager.
pub mod service {
    /// Account service for applets (baas notifications)
    pub const ACC_AA: &str = "acc:aa";
    /// Account service for system titles
    pub const ACC_SU: &str = "acc:su";
    /// Account service for applications
    pub const ACC_U0: &str = "acc:u0";
    /// Account service for applets
    pub const ACC_U1: &str = "acc:u1";

    /// All account ports, in installation order.
    pub const ACCOUNT_PORTS: [&str; 4] = [ACC_AA, ACC_SU, ACC_U0, ACC_U1];
}

// =============================================================================
// Command Ids
// =============================================================================

/// Commands shared by the `acc:su`, `acc:u0` and `acc:u1` interfaces.
pub mod acc {
    /// Number of registered users
    pub const CMD_GET_USER_COUNT: u32 = 0;
    /// Whether a user id is registered
    pub const CMD_GET_USER_EXISTENCE: u32 = 1;
    /// All registered user ids (output buffer)
    pub const CMD_LIST_ALL_USERS: u32 = 2;
    /// User ids currently open (output buffer)
    pub const CMD_LIST_OPEN_USERS: u32 = 3;
    /// Most recently opened user id
    pub const CMD_GET_LAST_OPENED_USER: u32 = 4;
    /// Open an `IProfile` session for a user id
    pub const CMD_GET_PROFILE: u32 = 5;
    /// Not implemented
    pub const CMD_GET_PROFILE_DIGEST: u32 = 6;
    /// Whether the system lets applications request user registration
    pub const CMD_IS_USER_REGISTRATION_REQUEST_PERMITTED: u32 = 50;
    /// Not implemented
    pub const CMD_TRY_SELECT_USER_WITHOUT_INTERACTION: u32 = 51;
    /// `acc:u0` only: application info registration (stubbed)
    pub const CMD_INITIALIZE_APPLICATION_INFO: u32 = 100;
    /// `acc:u0` only: open an `IManagerForApplication` session
    pub const CMD_GET_BAAS_ACCOUNT_MANAGER_FOR_APPLICATION: u32 = 101;
}

/// Commands of the per-user `IProfile` interface.
pub mod profile {
    /// Base profile + extra user data (output buffer)
    pub const CMD_GET: u32 = 0;
    /// Base profile only
    pub const CMD_GET_BASE: u32 = 1;
    /// Size of the profile image in bytes
    pub const CMD_GET_IMAGE_SIZE: u32 = 10;
    /// Profile image bytes (output buffer)
    pub const CMD_LOAD_IMAGE: u32 = 11;
}

/// Commands of the `IManagerForApplication` interface.
pub mod baas {
    /// Whether the network account is available
    pub const CMD_CHECK_AVAILABILITY: u32 = 0;
    /// Network account id
    pub const CMD_GET_ACCOUNT_ID: u32 = 1;
    /// Not implemented
    pub const CMD_ENSURE_ID_TOKEN_CACHE_ASYNC: u32 = 2;
    /// Not implemented
    pub const CMD_LOAD_ID_TOKEN_CACHE: u32 = 3;
    /// Not implemented
    pub const CMD_GET_NINTENDO_ACCOUNT_USER_RESOURCE_CACHE_FOR_APPLICATION: u32 = 130;
    /// Not implemented
    pub const CMD_CREATE_AUTHORIZATION_REQUEST: u32 = 150;
    /// Not implemented
    pub const CMD_STORE_OPEN_CONTEXT: u32 = 160;
}
