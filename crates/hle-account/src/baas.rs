//! IManagerForApplication: network account manager handed to applications.
//!
//! There is no network account behind it. The two bound commands answer
//! with fixed values; everything else is unimplemented.

use hle_framework::{
    CommandTable, FunctionInfo, HleRequestContext, ProtocolError, Response, ResponseBuilder,
    ServiceFramework,
};
use hle_ipc::baas;
use log::warn;

static MANAGER_FOR_APPLICATION_COMMANDS: CommandTable<IManagerForApplication> =
    CommandTable::new(&[
        FunctionInfo::bound(
            baas::CMD_CHECK_AVAILABILITY,
            "CheckAvailability",
            IManagerForApplication::check_availability,
        ),
        FunctionInfo::bound(
            baas::CMD_GET_ACCOUNT_ID,
            "GetAccountId",
            IManagerForApplication::get_account_id,
        ),
        FunctionInfo::unbound(baas::CMD_ENSURE_ID_TOKEN_CACHE_ASYNC, "EnsureIdTokenCacheAsync"),
        FunctionInfo::unbound(baas::CMD_LOAD_ID_TOKEN_CACHE, "LoadIdTokenCache"),
        FunctionInfo::unbound(
            baas::CMD_GET_NINTENDO_ACCOUNT_USER_RESOURCE_CACHE_FOR_APPLICATION,
            "GetNintendoAccountUserResourceCacheForApplication",
        ),
        FunctionInfo::unbound(
            baas::CMD_CREATE_AUTHORIZATION_REQUEST,
            "CreateAuthorizationRequest",
        ),
        FunctionInfo::unbound(baas::CMD_STORE_OPEN_CONTEXT, "StoreOpenContext"),
    ]);

/// Placeholder network account id.
const STUB_ACCOUNT_ID: u64 = 1;

#[derive(Debug, Default)]
pub struct IManagerForApplication;

impl IManagerForApplication {
    pub fn new() -> Self {
        Self
    }

    fn check_availability(
        &mut self,
        _ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        warn!("IManagerForApplication::CheckAvailability (STUBBED) called");
        Ok(ResponseBuilder::success().push_bool(false).build())
    }

    fn get_account_id(
        &mut self,
        _ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        warn!("IManagerForApplication::GetAccountId (STUBBED) called");
        Ok(ResponseBuilder::success().push_u64(STUB_ACCOUNT_ID).build())
    }
}

impl ServiceFramework for IManagerForApplication {
    fn name(&self) -> &str {
        "IManagerForApplication"
    }

    fn handle_request(
        &mut self,
        ctx: &mut HleRequestContext<'_>,
    ) -> Result<Response, ProtocolError> {
        MANAGER_FOR_APPLICATION_COMMANDS.dispatch(self, ctx)
    }
}
