//! In-memory profile store.
//!
//! Holds up to `MAX_USERS` user records. Records keep their registration
//! order; removing a user closes the gap.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};

use crate::config::{AccountConfig, DEFAULT_USERNAME, DEFAULT_USER_ID};
use crate::error::{AccountError, ProfileError};
use crate::store::ProfileStore;
use crate::types::{ProfileBase, ProfileData, UserId, MAX_USERS};

#[derive(Clone, Debug)]
struct ProfileInfo {
    base: ProfileBase,
    data: ProfileData,
    is_open: bool,
}

#[derive(Debug, Default)]
struct Inner {
    profiles: Vec<ProfileInfo>,
    last_opened_user: UserId,
    allow_user_registration: bool,
}

impl Inner {
    fn find(&self, user_id: UserId) -> Option<&ProfileInfo> {
        self.profiles.iter().find(|p| p.base.user_id == user_id)
    }

    fn find_mut(&mut self, user_id: UserId) -> Result<&mut ProfileInfo, ProfileError> {
        self.profiles
            .iter_mut()
            .find(|p| p.base.user_id == user_id)
            .ok_or(ProfileError::NotFound(user_id))
    }
}

/// Shared, internally synchronized user registry.
#[derive(Debug, Default)]
pub struct ProfileManager {
    inner: RwLock<Inner>,
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl ProfileManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store seeded from `config`.
    ///
    /// With no configured users a single open user (`DEFAULT_USER_ID`,
    /// named `DEFAULT_USERNAME`) is registered.
    pub fn from_config(config: &AccountConfig) -> Result<Self, AccountError> {
        let manager = Self::new();
        manager.write().allow_user_registration = config.allow_user_registration;

        if config.users.is_empty() {
            manager.create_new_user(DEFAULT_USER_ID, DEFAULT_USERNAME)?;
            manager.open_user(DEFAULT_USER_ID)?;
            return Ok(manager);
        }

        for seed in &config.users {
            let user_id = seed.id.unwrap_or_else(UserId::generate);
            manager.create_new_user(user_id, &seed.username)?;
            if seed.open {
                manager.open_user(user_id)?;
            }
        }
        Ok(manager)
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a prepared record.
    pub fn add_user(&self, base: ProfileBase, data: ProfileData) -> Result<(), ProfileError> {
        let user_id = base.user_id;
        if !user_id.is_valid() {
            return Err(ProfileError::InvalidUser);
        }

        let mut inner = self.write();
        if inner.find(user_id).is_some() {
            return Err(ProfileError::UserAlreadyExists(user_id));
        }
        if inner.profiles.len() >= MAX_USERS {
            return Err(ProfileError::TooManyUsers);
        }

        inner.profiles.push(ProfileInfo {
            base,
            data,
            is_open: false,
        });
        info!("registered user {} ({})", user_id, base.username());
        Ok(())
    }

    /// Register `user_id` with `username`, stamped with the current time.
    pub fn create_new_user(&self, user_id: UserId, username: &str) -> Result<(), ProfileError> {
        let base = ProfileBase::new(user_id, username, now())
            .ok_or(ProfileError::UsernameTooLong(username.len()))?;
        self.add_user(base, ProfileData::default())
    }

    pub fn remove_user(&self, user_id: UserId) -> Result<(), ProfileError> {
        let mut inner = self.write();
        let index = inner
            .profiles
            .iter()
            .position(|p| p.base.user_id == user_id)
            .ok_or(ProfileError::NotFound(user_id))?;
        inner.profiles.remove(index);
        if inner.last_opened_user == user_id {
            inner.last_opened_user = UserId::INVALID;
        }
        info!("removed user {}", user_id);
        Ok(())
    }

    /// Replace the base record; the id inside `base` must match.
    pub fn set_profile_base(&self, user_id: UserId, base: ProfileBase) -> Result<(), ProfileError> {
        if base.user_id != user_id {
            return Err(ProfileError::InvalidUser);
        }
        self.write().find_mut(user_id)?.base = base;
        Ok(())
    }

    pub fn set_profile_data(&self, user_id: UserId, data: ProfileData) -> Result<(), ProfileError> {
        self.write().find_mut(user_id)?.data = data;
        Ok(())
    }

    /// Mark `user_id` open and remember it as the last opened user.
    pub fn open_user(&self, user_id: UserId) -> Result<(), ProfileError> {
        let mut inner = self.write();
        inner.find_mut(user_id)?.is_open = true;
        inner.last_opened_user = user_id;
        debug!("opened user {}", user_id);
        Ok(())
    }

    pub fn close_user(&self, user_id: UserId) -> Result<(), ProfileError> {
        self.write().find_mut(user_id)?.is_open = false;
        debug!("closed user {}", user_id);
        Ok(())
    }

    pub fn set_user_registration_permitted(&self, permitted: bool) {
        self.write().allow_user_registration = permitted;
    }
}

impl ProfileStore for ProfileManager {
    fn user_count(&self) -> usize {
        self.read().profiles.len()
    }

    fn user_exists(&self, user_id: UserId) -> bool {
        self.read().find(user_id).is_some()
    }

    fn profile_base(&self, user_id: UserId) -> Result<ProfileBase, AccountError> {
        self.read()
            .find(user_id)
            .map(|p| p.base)
            .ok_or(AccountError::NotFound(user_id))
    }

    fn profile_base_and_data(
        &self,
        user_id: UserId,
    ) -> Result<(ProfileBase, ProfileData), AccountError> {
        self.read()
            .find(user_id)
            .map(|p| (p.base, p.data))
            .ok_or(AccountError::NotFound(user_id))
    }

    fn all_users(&self) -> Vec<UserId> {
        self.read().profiles.iter().map(|p| p.base.user_id).collect()
    }

    fn open_users(&self) -> Vec<UserId> {
        self.read()
            .profiles
            .iter()
            .filter(|p| p.is_open)
            .map(|p| p.base.user_id)
            .collect()
    }

    fn last_opened_user(&self) -> UserId {
        self.read().last_opened_user
    }

    fn can_system_register_user(&self) -> bool {
        self.read().allow_user_registration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserSeed;

    #[test]
    fn test_default_config_seeds_default_user() {
        let manager = ProfileManager::from_config(&AccountConfig::default()).unwrap();

        assert_eq!(manager.user_count(), 1);
        assert_eq!(manager.all_users(), vec![DEFAULT_USER_ID]);
        assert_eq!(manager.open_users(), vec![DEFAULT_USER_ID]);
        assert_eq!(manager.last_opened_user(), DEFAULT_USER_ID);
        assert_eq!(manager.profile_base(DEFAULT_USER_ID).unwrap().username(), "yuzu");
        assert!(!manager.can_system_register_user());
    }

    #[test]
    fn test_config_seeds() {
        let config = AccountConfig {
            users: vec![
                UserSeed {
                    id: Some(UserId(5)),
                    username: "bob".to_string(),
                    open: false,
                },
                UserSeed {
                    id: None,
                    username: "eve".to_string(),
                    open: true,
                },
            ],
            allow_user_registration: true,
            ..AccountConfig::default()
        };
        let manager = ProfileManager::from_config(&config).unwrap();

        let users = manager.all_users();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0], UserId(5));
        assert!(users[1].is_valid());
        assert_eq!(manager.open_users(), vec![users[1]]);
        assert!(manager.can_system_register_user());
    }

    #[test]
    fn test_slot_limit() {
        let manager = ProfileManager::new();
        for i in 1..=MAX_USERS as u128 {
            manager.create_new_user(UserId(i), "user").unwrap();
        }
        assert_eq!(
            manager.create_new_user(UserId(100), "extra"),
            Err(ProfileError::TooManyUsers)
        );
    }

    #[test]
    fn test_rejects_invalid_and_duplicate_ids() {
        let manager = ProfileManager::new();
        assert_eq!(
            manager.create_new_user(UserId::INVALID, "nobody"),
            Err(ProfileError::InvalidUser)
        );

        manager.create_new_user(UserId(1), "bob").unwrap();
        assert_eq!(
            manager.create_new_user(UserId(1), "bob2"),
            Err(ProfileError::UserAlreadyExists(UserId(1)))
        );
        assert_eq!(
            manager.create_new_user(UserId(2), &"x".repeat(40)),
            Err(ProfileError::UsernameTooLong(40))
        );
    }

    #[test]
    fn test_open_close_and_last_opened() {
        let manager = ProfileManager::new();
        manager.create_new_user(UserId(1), "a").unwrap();
        manager.create_new_user(UserId(2), "b").unwrap();
        assert_eq!(manager.last_opened_user(), UserId::INVALID);

        manager.open_user(UserId(1)).unwrap();
        manager.open_user(UserId(2)).unwrap();
        assert_eq!(manager.open_users(), vec![UserId(1), UserId(2)]);
        assert_eq!(manager.last_opened_user(), UserId(2));

        manager.close_user(UserId(1)).unwrap();
        assert_eq!(manager.open_users(), vec![UserId(2)]);
        assert_eq!(manager.last_opened_user(), UserId(2));

        assert_eq!(
            manager.open_user(UserId(9)),
            Err(ProfileError::NotFound(UserId(9)))
        );
    }

    #[test]
    fn test_remove_user_keeps_order() {
        let manager = ProfileManager::new();
        for i in 1..=3 {
            manager.create_new_user(UserId(i), "user").unwrap();
        }
        manager.open_user(UserId(2)).unwrap();

        manager.remove_user(UserId(2)).unwrap();
        assert_eq!(manager.all_users(), vec![UserId(1), UserId(3)]);
        assert_eq!(manager.last_opened_user(), UserId::INVALID);
        assert!(manager.open_users().is_empty());
        assert!(matches!(
            manager.profile_base(UserId(2)),
            Err(AccountError::NotFound(id)) if id == UserId(2)
        ));
    }

    #[test]
    fn test_set_profile_fields() {
        let manager = ProfileManager::new();
        manager.create_new_user(UserId(1), "old").unwrap();

        let base = ProfileBase::new(UserId(1), "new", 42).unwrap();
        manager.set_profile_base(UserId(1), base).unwrap();
        manager
            .set_profile_data(UserId(1), ProfileData::from_slice(&[7, 7]))
            .unwrap();

        let (got_base, got_data) = manager.profile_base_and_data(UserId(1)).unwrap();
        assert_eq!(got_base, base);
        assert_eq!(&got_data.as_bytes()[..3], &[7, 7, 0]);

        let foreign = ProfileBase::new(UserId(2), "x", 0).unwrap();
        assert_eq!(
            manager.set_profile_base(UserId(1), foreign),
            Err(ProfileError::InvalidUser)
        );
    }
}
