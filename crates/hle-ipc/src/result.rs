//! Result codes.
//!
//! A result code packs an error module (low 9 bits) and a description
//! (next 13 bits). Zero is success. The display form is the familiar
//! `2MMM-DDDD` pair.

use core::fmt;

/// Error modules used by the account service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorModule {
    Common = 0,
    Kernel = 1,
    Fs = 2,
    /// Service framework (command dispatch)
    Sf = 10,
    Hipc = 11,
    Account = 124,
}

/// Result code returned at the head of every response.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultCode(pub u32);

impl ResultCode {
    /// Success
    pub const SUCCESS: Self = Self(0);

    /// Unspecified failure.
    ///
    /// Profile lookups report every store failure with this code.
    pub const GENERIC_FAILURE: Self = Self(u32::MAX);

    /// Command id is recognized but has no handler, or is not recognized at all.
    pub const UNKNOWN_COMMAND_ID: Self = Self::new(ErrorModule::Sf, 221);

    /// Build a result code from a module and description.
    pub const fn new(module: ErrorModule, description: u32) -> Self {
        Self((module as u32) | ((description & 0x1FFF) << 9))
    }

    /// Raw 32-bit value as written on the wire.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Error module number.
    pub const fn module(self) -> u32 {
        self.0 & 0x1FF
    }

    /// Description number within the module.
    pub const fn description(self) -> u32 {
        (self.0 >> 9) & 0x1FFF
    }

    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    pub const fn is_error(self) -> bool {
        self.0 != 0
    }
}

impl Default for ResultCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:04}", 2000 + self.module(), self.description())
    }
}

impl fmt::Debug for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResultCode(0x{:08X}, {})", self.0, self)
    }
}
