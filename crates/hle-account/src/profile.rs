//! IProfile: per-user profile session.
//!
//! One session is created per `GetProfile` call. The user's image file is
//! resolved once, at construction; if it cannot be opened (or the user has
//! no record) the session serves the default image for its whole life.

use std::sync::Arc;

use hle_framework::{
    CommandTable, FunctionInfo, HleRequestContext, ProtocolError, Response, ResponseBuilder,
    ResultCode, ServiceFramework,
};
use hle_ipc::profile;
use log::{debug, error, info, warn};

use crate::config::AccountConfig;
use crate::image::{ProfileImage, DEFAULT_PROFILE_IMAGE, DEFAULT_PROFILE_IMAGE_SIZE};
use crate::store::ProfileStore;
use crate::types::UserId;

static PROFILE_COMMANDS: CommandTable<IProfile> = CommandTable::new(&[
    FunctionInfo::bound(profile::CMD_GET, "Get", IProfile::get),
    FunctionInfo::bound(profile::CMD_GET_BASE, "GetBase", IProfile::get_base),
    FunctionInfo::bound(profile::CMD_GET_IMAGE_SIZE, "GetImageSize", IProfile::get_image_size),
    FunctionInfo::bound(profile::CMD_LOAD_IMAGE, "LoadImage", IProfile::load_image),
]);

pub struct IProfile {
    store: Arc<dyn ProfileStore>,
    user_id: UserId,
    image: Option<ProfileImage>,
}

impl IProfile {
    pub fn new(user_id: UserId, store: Arc<dyn ProfileStore>, config: &AccountConfig) -> Self {
        let image = match store.profile_base(user_id) {
            Ok(base) => {
                let path = config.image_path_from_bytes(base.username_bytes());
                match ProfileImage::open(&path) {
                    Ok(image) => Some(image),
                    Err(err) => {
                        debug!("IProfile: no image at {:?} ({}), using default", path, err);
                        None
                    }
                }
            }
            Err(_) => None,
        };

        Self {
            store,
            user_id,
            image,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Whether an on-disk image is being served.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Size the next `LoadImage` will return.
    fn image_size(&mut self) -> u32 {
        let Some(image) = &self.image else {
            return DEFAULT_PROFILE_IMAGE_SIZE;
        };
        match image.capped_size() {
            Ok(size) => size,
            Err(err) => {
                self.drop_image(err);
                DEFAULT_PROFILE_IMAGE_SIZE
            }
        }
    }

    fn image_bytes(&mut self) -> Vec<u8> {
        let Some(image) = &mut self.image else {
            return DEFAULT_PROFILE_IMAGE.to_vec();
        };
        match image.read() {
            Ok(bytes) => bytes,
            Err(err) => {
                self.drop_image(err);
                DEFAULT_PROFILE_IMAGE.to_vec()
            }
        }
    }

    /// Give up on the image file; later calls serve the default image.
    fn drop_image(&mut self, err: std::io::Error) {
        if let Some(image) = self.image.take() {
            warn!(
                "IProfile: image {:?} became unreadable ({}), using default",
                image.path(),
                err
            );
        }
    }

    fn get(&mut self, _ctx: &mut HleRequestContext<'_>) -> Result<Response, ProtocolError> {
        info!("IProfile::Get called user_id={}", self.user_id.format());

        match self.store.profile_base_and_data(self.user_id) {
            Ok((base, data)) => Ok(ResponseBuilder::success()
                .push_raw(&base.to_bytes())
                .write_buffer(data.as_bytes())
                .build()),
            Err(err) => {
                error!(
                    "Failed to get profile base and data for user={}: {}",
                    self.user_id.format(),
                    err
                );
                Ok(Response::from_result(ResultCode::GENERIC_FAILURE))
            }
        }
    }

    fn get_base(&mut self, _ctx: &mut HleRequestContext<'_>) -> Result<Response, ProtocolError> {
        info!("IProfile::GetBase called user_id={}", self.user_id.format());

        match self.store.profile_base(self.user_id) {
            Ok(base) => Ok(ResponseBuilder::success().push_raw(&base.to_bytes()).build()),
            Err(err) => {
                error!(
                    "Failed to get profile base for user={}: {}",
                    self.user_id.format(),
                    err
                );
                Ok(Response::from_result(ResultCode::GENERIC_FAILURE))
            }
        }
    }

    fn get_image_size(
        &mut self,
        _ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        debug!("IProfile::GetImageSize called");
        let size = self.image_size();
        Ok(ResponseBuilder::success().push_u32(size).build())
    }

    fn load_image(&mut self, _ctx: &mut HleRequestContext<'_>) -> Result<Response, ProtocolError> {
        debug!("IProfile::LoadImage called");
        let bytes = self.image_bytes();
        Ok(ResponseBuilder::success()
            .push_u32(bytes.len() as u32)
            .write_buffer(&bytes)
            .build())
    }
}

impl ServiceFramework for IProfile {
    fn name(&self) -> &str {
        "IProfile"
    }

    fn handle_request(
        &mut self,
        ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        PROFILE_COMMANDS.dispatch(self, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccountError;
    use crate::profile_manager::ProfileManager;
    use crate::test_utils::{call, decode_profile_base};
    use crate::types::{ProfileBase, ProfileData, MAX_DATA, USERNAME_SIZE};
    use std::fs;

    /// Resolves base profiles but never their data block.
    struct HalfStore(ProfileManager);

    impl ProfileStore for HalfStore {
        fn user_count(&self) -> usize {
            self.0.user_count()
        }
        fn user_exists(&self, user_id: UserId) -> bool {
            self.0.user_exists(user_id)
        }
        fn profile_base(&self, user_id: UserId) -> Result<ProfileBase, AccountError> {
            self.0.profile_base(user_id)
        }
        fn profile_base_and_data(
            &self,
            user_id: UserId,
        ) -> Result<(ProfileBase, ProfileData), AccountError> {
            Err(AccountError::Inconsistent(user_id))
        }
        fn all_users(&self) -> Vec<UserId> {
            self.0.all_users()
        }
        fn open_users(&self) -> Vec<UserId> {
            self.0.open_users()
        }
        fn last_opened_user(&self) -> UserId {
            self.0.last_opened_user()
        }
        fn can_system_register_user(&self) -> bool {
            false
        }
    }

    fn store_with(user_id: UserId, username: &str) -> Arc<ProfileManager> {
        let manager = ProfileManager::new();
        manager.create_new_user(user_id, username).unwrap();
        Arc::new(manager)
    }

    #[test]
    fn test_get_returns_base_and_data() {
        let store = store_with(UserId(3), "bob");
        store
            .set_profile_data(UserId(3), ProfileData::from_slice(b"extra"))
            .unwrap();
        let mut session = IProfile::new(UserId(3), store, &AccountConfig::default());

        let response = call(&mut session, profile::CMD_GET).unwrap();
        assert!(response.is_success());
        assert_eq!(decode_profile_base(&response).unwrap().user_id, UserId(3));
        assert_eq!(response.buffer.len(), MAX_DATA);
        assert_eq!(&response.buffer[..5], b"extra");
    }

    #[test]
    fn test_unknown_user_fails_without_payload() {
        let store = store_with(UserId(3), "bob");
        let mut session = IProfile::new(UserId(4), store, &AccountConfig::default());

        for command in [profile::CMD_GET, profile::CMD_GET_BASE] {
            let response = call(&mut session, command).unwrap();
            assert_eq!(response.result, ResultCode::GENERIC_FAILURE);
            assert!(response.data.is_empty());
            assert!(response.buffer.is_empty());
        }
    }

    #[test]
    fn test_inconsistent_store_fails_get_only() {
        let store = Arc::new(HalfStore(ProfileManager::new()));
        store.0.create_new_user(UserId(3), "bob").unwrap();
        let mut session = IProfile::new(UserId(3), store, &AccountConfig::default());

        let full = call(&mut session, profile::CMD_GET).unwrap();
        assert_eq!(full.result, ResultCode::GENERIC_FAILURE);
        assert!(full.buffer.is_empty());

        let base = call(&mut session, profile::CMD_GET_BASE).unwrap();
        assert!(base.is_success());
        assert_eq!(decode_profile_base(&base).unwrap().user_id, UserId(3));
    }

    #[test]
    fn test_image_resolved_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = AccountConfig::with_root(dir.path());
        fs::create_dir_all(dir.path().join("users")).unwrap();

        let store = store_with(UserId(3), "bob");
        let mut before = IProfile::new(UserId(3), store.clone(), &config);
        assert!(!before.has_image());

        fs::write(config.image_path("bob"), [0xAB; 10]).unwrap();
        let mut after = IProfile::new(UserId(3), store, &config);
        assert!(after.has_image());

        // The earlier session keeps serving the default image
        let old = call(&mut before, profile::CMD_LOAD_IMAGE).unwrap();
        assert_eq!(old.buffer, DEFAULT_PROFILE_IMAGE.to_vec());

        let new = call(&mut after, profile::CMD_LOAD_IMAGE).unwrap();
        assert_eq!(new.buffer, vec![0xAB; 10]);
        assert_eq!(new.reader().pop_u32().unwrap(), 10);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_username_finds_its_image() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let config = AccountConfig::with_root(dir.path());
        let users = dir.path().join("users");
        fs::create_dir_all(&users).unwrap();
        fs::write(users.join(OsStr::from_bytes(b"b\xFFb.jpg")), [0xCD; 10]).unwrap();

        let store = store_with(UserId(3), "bob");
        let mut base = store.profile_base(UserId(3)).unwrap();
        base.username = [0; USERNAME_SIZE];
        base.username[..3].copy_from_slice(b"b\xFFb");
        store.set_profile_base(UserId(3), base).unwrap();

        let mut session = IProfile::new(UserId(3), store, &config);
        assert!(session.has_image());

        let size = call(&mut session, profile::CMD_GET_IMAGE_SIZE).unwrap();
        assert_eq!(size.reader().pop_u32().unwrap(), 10);

        let image = call(&mut session, profile::CMD_LOAD_IMAGE).unwrap();
        assert_eq!(image.buffer, vec![0xCD; 10]);
    }

    #[test]
    fn test_unknown_user_serves_default_image() {
        let store = store_with(UserId(3), "bob");
        let mut session = IProfile::new(UserId(99), store, &AccountConfig::default());

        let size = call(&mut session, profile::CMD_GET_IMAGE_SIZE).unwrap();
        assert_eq!(size.reader().pop_u32().unwrap(), DEFAULT_PROFILE_IMAGE_SIZE);

        let image = call(&mut session, profile::CMD_LOAD_IMAGE).unwrap();
        assert!(image.is_success());
        assert_eq!(image.buffer, DEFAULT_PROFILE_IMAGE.to_vec());
    }

    #[test]
    fn test_unlisted_command_is_unimplemented() {
        let store = store_with(UserId(3), "bob");
        let mut session = IProfile::new(UserId(3), store, &AccountConfig::default());

        let response = call(&mut session, 2).unwrap();
        assert_eq!(response.result, ResultCode::UNKNOWN_COMMAND_ID);
    }
}
