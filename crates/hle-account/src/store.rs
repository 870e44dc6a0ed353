//! Read-only view of the profile store.
//!
//! Service handlers only ever read user records, so they hold the store as
//! `Arc<dyn ProfileStore>`. Implementations synchronize internally.

use crate::error::AccountError;
use crate::types::{ProfileBase, ProfileData, UserId};

pub trait ProfileStore: Send + Sync {
    /// Number of registered users.
    fn user_count(&self) -> usize;

    fn user_exists(&self, user_id: UserId) -> bool;

    /// Base profile of `user_id`.
    ///
    /// Fails with `AccountError::NotFound` when the id is not registered.
    fn profile_base(&self, user_id: UserId) -> Result<ProfileBase, AccountError>;

    /// Base profile plus the opaque data block, resolved together.
    ///
    /// Fails with `AccountError::Inconsistent` when the base resolves but
    /// the data block does not.
    fn profile_base_and_data(
        &self,
        user_id: UserId,
    ) -> Result<(ProfileBase, ProfileData), AccountError>;

    /// All registered ids, in registration order.
    fn all_users(&self) -> Vec<UserId>;

    /// Ids currently marked open, in registration order.
    fn open_users(&self) -> Vec<UserId>;

    /// Most recently opened id, or `UserId::INVALID`.
    fn last_opened_user(&self) -> UserId;

    /// Whether applications may ask the system to register a new user.
    fn can_system_register_user(&self) -> bool;
}
