//! Core types for the account service.
//!
//! # Wire Layout
//!
//! `ProfileBase` is written raw into responses (0x38 bytes):
//!
//! | Offset | Field       | Size |
//! |--------|-------------|------|
//! | 0x00   | `user_id`   | 16   |
//! | 0x10   | `timestamp` | 8    |
//! | 0x18   | `username`  | 32   |

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of user slots in a profile store.
pub const MAX_USERS: usize = 8;

/// Size of the opaque per-user data block.
pub const MAX_DATA: usize = 0x80;

/// Capacity of the username field, terminator included when shorter.
pub const USERNAME_SIZE: usize = 0x20;

/// Size of a `ProfileBase` on the wire.
pub const PROFILE_BASE_SIZE: usize = 0x38;

/// 128-bit user identifier.
///
/// The value `0` is reserved as the invalid id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(#[serde(with = "crate::serde_helpers::u128_hex_string")] pub u128);

impl UserId {
    pub const INVALID: UserId = UserId(0);

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().as_u128())
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    /// Legacy hex form used in log lines: `0x` + high word + low word.
    pub fn format(&self) -> String {
        format!("0x{:016X}{:016X}", (self.0 >> 64) as u64, self.0 as u64)
    }

    pub fn to_le_bytes(self) -> [u8; 16] {
        self.0.to_le_bytes()
    }

    pub fn from_le_bytes(bytes: [u8; 16]) -> Self {
        Self(u128::from_le_bytes(bytes))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Uuid::from_u128(self.0).hyphenated())
    }
}

impl From<u128> for UserId {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

/// Core profile record, handed out by copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfileBase {
    pub user_id: UserId,
    /// Last edit time (seconds since the Unix epoch)
    pub timestamp: u64,
    /// Zero-terminated within its capacity
    pub username: [u8; USERNAME_SIZE],
}

impl ProfileBase {
    /// Build a record, or `None` when `username` does not fit the field.
    pub fn new(user_id: UserId, username: &str, timestamp: u64) -> Option<Self> {
        let bytes = username.as_bytes();
        if bytes.len() > USERNAME_SIZE {
            return None;
        }
        let mut field = [0u8; USERNAME_SIZE];
        field[..bytes.len()].copy_from_slice(bytes);
        Some(Self {
            user_id,
            timestamp,
            username: field,
        })
    }

    /// Username bytes up to the first terminator.
    pub fn username_bytes(&self) -> &[u8] {
        let end = self
            .username
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(USERNAME_SIZE);
        &self.username[..end]
    }

    pub fn username(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.username_bytes())
    }

    pub fn to_bytes(&self) -> [u8; PROFILE_BASE_SIZE] {
        let mut bytes = [0u8; PROFILE_BASE_SIZE];
        bytes[0x00..0x10].copy_from_slice(&self.user_id.to_le_bytes());
        bytes[0x10..0x18].copy_from_slice(&self.timestamp.to_le_bytes());
        bytes[0x18..0x38].copy_from_slice(&self.username);
        bytes
    }

    pub fn from_bytes(bytes: &[u8; PROFILE_BASE_SIZE]) -> Self {
        let mut user_id = [0u8; 16];
        let mut timestamp = [0u8; 8];
        let mut username = [0u8; USERNAME_SIZE];
        user_id.copy_from_slice(&bytes[0x00..0x10]);
        timestamp.copy_from_slice(&bytes[0x10..0x18]);
        username.copy_from_slice(&bytes[0x18..0x38]);
        Self {
            user_id: UserId::from_le_bytes(user_id),
            timestamp: u64::from_le_bytes(timestamp),
            username,
        }
    }
}

/// Opaque per-user data block, always exactly `MAX_DATA` bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfileData(pub [u8; MAX_DATA]);

impl ProfileData {
    /// Zero-pad `bytes` to `MAX_DATA`; anything past the capacity is dropped.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut block = [0u8; MAX_DATA];
        let len = bytes.len().min(MAX_DATA);
        block[..len].copy_from_slice(&bytes[..len]);
        Self(block)
    }

    pub fn as_bytes(&self) -> &[u8; MAX_DATA] {
        &self.0
    }
}

impl Default for ProfileData {
    fn default() -> Self {
        Self([0u8; MAX_DATA])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_formats() {
        let id = UserId((0x0123_4567_89AB_CDEFu128 << 64) | 0x1);
        assert_eq!(id.format(), "0x0123456789ABCDEF0000000000000001");
        assert_eq!(id.to_string(), "01234567-89ab-cdef-0000-000000000001");
        assert_eq!(UserId::INVALID.to_string(), "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_generated_ids_are_valid_and_distinct() {
        let a = UserId::generate();
        let b = UserId::generate();
        assert!(a.is_valid());
        assert_ne!(a, b);
    }

    #[test]
    fn test_user_id_json_is_hex_string() {
        let json = serde_json::to_string(&UserId(1)).unwrap();
        assert_eq!(json, r#""0x00000000000000000000000000000001""#);
        assert_eq!(serde_json::from_str::<UserId>("7").unwrap(), UserId(7));
    }

    #[test]
    fn test_profile_base_layout() {
        let base = ProfileBase::new(UserId(0xAA), "bob", 0x1122).unwrap();
        let bytes = base.to_bytes();

        assert_eq!(bytes[0x00], 0xAA);
        assert_eq!(&bytes[0x10..0x12], &[0x22, 0x11]);
        assert_eq!(&bytes[0x18..0x1C], b"bob\0");
        assert_eq!(ProfileBase::from_bytes(&bytes), base);
    }

    #[test]
    fn test_username_terminator() {
        let full = "x".repeat(USERNAME_SIZE);
        let base = ProfileBase::new(UserId(1), &full, 0).unwrap();
        assert_eq!(base.username(), full);

        assert!(ProfileBase::new(UserId(1), &"x".repeat(USERNAME_SIZE + 1), 0).is_none());
    }

    #[test]
    fn test_profile_data_is_padded_and_truncated() {
        let short = ProfileData::from_slice(&[1, 2, 3]);
        assert_eq!(&short.as_bytes()[..4], &[1, 2, 3, 0]);

        let long = ProfileData::from_slice(&[9u8; MAX_DATA + 10]);
        assert_eq!(long.as_bytes().len(), MAX_DATA);
        assert!(long.as_bytes().iter().all(|&b| b == 9));
    }
}
