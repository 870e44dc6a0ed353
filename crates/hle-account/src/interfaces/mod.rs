//! The `acc:*` service ports.
//!
//! All four ports share one [`Module`] and one profile store. They differ
//! only in their command tables: each port file declares which ids it
//! recognizes and which of the shared handlers below back them.
//!
//! | Port     | Bound commands                          |
//! |----------|-----------------------------------------|
//! | `acc:aa` | none                                    |
//! | `acc:su` | 0-5, 50                                 |
//! | `acc:u0` | 0-5, 50, 100, 101                       |
//! | `acc:u1` | 0-5, 50                                 |

mod aa;
mod su;
mod u0;
mod u1;

use std::sync::Arc;

use hle_framework::{
    CommandTable, HleRequestContext, ProtocolError, Response, ResponseBuilder, ServiceFramework,
    ServiceManager,
};
use hle_ipc::service;
use log::{debug, info, warn};

use crate::baas::IManagerForApplication;
use crate::config::AccountConfig;
use crate::error::AccountError;
use crate::profile::IProfile;
use crate::profile_manager::ProfileManager;
use crate::store::ProfileStore;
use crate::types::UserId;

/// State shared by every account port.
#[derive(Debug)]
pub struct Module {
    config: AccountConfig,
}

impl Module {
    pub fn new(config: AccountConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AccountConfig {
        &self.config
    }
}

/// One session on an `acc:*` port.
pub struct Interface {
    name: &'static str,
    module: Arc<Module>,
    profile_manager: Arc<dyn ProfileStore>,
    functions: &'static CommandTable<Interface>,
}

/// Encode user ids back to back, as written to output buffers.
fn user_id_buffer(ids: &[UserId]) -> Vec<u8> {
    ids.iter().flat_map(|id| id.to_le_bytes()).collect()
}

impl Interface {
    pub fn new(
        name: &'static str,
        module: Arc<Module>,
        profile_manager: Arc<dyn ProfileStore>,
        functions: &'static CommandTable<Interface>,
    ) -> Self {
        Self {
            name,
            module,
            profile_manager,
            functions,
        }
    }

    fn get_user_count(
        &mut self,
        _ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        info!("{}: GetUserCount called", self.name);
        let count = self.profile_manager.user_count() as u32;
        Ok(ResponseBuilder::success().push_u32(count).build())
    }

    fn get_user_existence(
        &mut self,
        ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        let user_id = UserId(ctx.reader().pop_u128()?);
        info!("{}: GetUserExistence called user_id={}", self.name, user_id.format());
        let exists = self.profile_manager.user_exists(user_id);
        Ok(ResponseBuilder::success().push_bool(exists).build())
    }

    fn list_all_users(
        &mut self,
        _ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        info!("{}: ListAllUsers called", self.name);
        let users = self.profile_manager.all_users();
        Ok(ResponseBuilder::success()
            .write_buffer(&user_id_buffer(&users))
            .build())
    }

    fn list_open_users(
        &mut self,
        _ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        info!("{}: ListOpenUsers called", self.name);
        let users = self.profile_manager.open_users();
        Ok(ResponseBuilder::success()
            .write_buffer(&user_id_buffer(&users))
            .build())
    }

    fn get_last_opened_user(
        &mut self,
        _ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        info!("{}: GetLastOpenedUser called", self.name);
        let user_id = self.profile_manager.last_opened_user();
        Ok(ResponseBuilder::success().push_u128(user_id.0).build())
    }

    fn get_profile(&mut self, ctx: &mut HleRequestContext<'_>) -> Result<Response, ProtocolError> {
        let user_id = UserId(ctx.reader().pop_u128()?);
        let profile = IProfile::new(
            user_id,
            Arc::clone(&self.profile_manager),
            self.module.config(),
        );
        ctx.push_interface(Box::new(profile));
        debug!("{}: GetProfile called user_id={}", self.name, user_id.format());
        Ok(ResponseBuilder::success().build())
    }

    fn is_user_registration_request_permitted(
        &mut self,
        _ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        warn!("{}: IsUserRegistrationRequestPermitted (STUBBED) called", self.name);
        let permitted = self.profile_manager.can_system_register_user();
        Ok(ResponseBuilder::success().push_bool(permitted).build())
    }

    fn initialize_application_info(
        &mut self,
        _ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        warn!("{}: InitializeApplicationInfo (STUBBED) called", self.name);
        Ok(ResponseBuilder::success().build())
    }

    fn get_baas_account_manager_for_application(
        &mut self,
        ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        ctx.push_interface(Box::new(IManagerForApplication::new()));
        debug!("{}: GetBaasAccountManagerForApplication called", self.name);
        Ok(ResponseBuilder::success().build())
    }
}

impl ServiceFramework for Interface {
    fn name(&self) -> &str {
        self.name
    }

    fn handle_request(
        &mut self,
        ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        let functions = self.functions;
        functions.dispatch(self, ctx)
    }
}

/// Build the shared profile store from `config` and register all account
/// ports with `service_manager`.
///
/// Returns the store so the host can keep managing users.
pub fn install_interfaces(
    service_manager: &mut ServiceManager,
    config: AccountConfig,
) -> Result<Arc<ProfileManager>, AccountError> {
    let profile_manager = Arc::new(ProfileManager::from_config(&config)?);
    install_interfaces_with_store(service_manager, config, profile_manager.clone())?;
    Ok(profile_manager)
}

/// Register all account ports backed by an existing store.
pub fn install_interfaces_with_store(
    service_manager: &mut ServiceManager,
    config: AccountConfig,
    profile_manager: Arc<dyn ProfileStore>,
) -> Result<(), AccountError> {
    let module = Arc::new(Module::new(config));
    let ports: [(&'static str, &'static CommandTable<Interface>); 4] = [
        (service::ACC_AA, &aa::ACC_AA_COMMANDS),
        (service::ACC_SU, &su::ACC_SU_COMMANDS),
        (service::ACC_U0, &u0::ACC_U0_COMMANDS),
        (service::ACC_U1, &u1::ACC_U1_COMMANDS),
    ];

    for (name, functions) in ports {
        let module = Arc::clone(&module);
        let profile_manager = Arc::clone(&profile_manager);
        service_manager.register_service(
            name,
            Box::new(move || {
                Box::new(Interface::new(
                    name,
                    Arc::clone(&module),
                    Arc::clone(&profile_manager),
                    functions,
                )) as Box<dyn ServiceFramework>
            }),
        )?;
    }

    info!("installed account services");
    Ok(())
}
