//! `acc:u0`: account port for applications.

use hle_framework::{CommandTable, FunctionInfo};
use hle_ipc::acc;

use super::Interface;

pub(super) static ACC_U0_COMMANDS: CommandTable<Interface> = CommandTable::new(&[
    FunctionInfo::bound(acc::CMD_GET_USER_COUNT, "GetUserCount", Interface::get_user_count),
    FunctionInfo::bound(acc::CMD_GET_USER_EXISTENCE, "GetUserExistence", Interface::get_user_existence),
    FunctionInfo::bound(acc::CMD_LIST_ALL_USERS, "ListAllUsers", Interface::list_all_users),
    FunctionInfo::bound(acc::CMD_LIST_OPEN_USERS, "ListOpenUsers", Interface::list_open_users),
    FunctionInfo::bound(acc::CMD_GET_LAST_OPENED_USER, "GetLastOpenedUser", Interface::get_last_opened_user),
    FunctionInfo::bound(acc::CMD_GET_PROFILE, "GetProfile", Interface::get_profile),
    FunctionInfo::unbound(acc::CMD_GET_PROFILE_DIGEST, "GetProfileDigest"),
    FunctionInfo::bound(
        acc::CMD_IS_USER_REGISTRATION_REQUEST_PERMITTED,
        "IsUserRegistrationRequestPermitted",
        Interface::is_user_registration_request_permitted,
    ),
    FunctionInfo::unbound(acc::CMD_TRY_SELECT_USER_WITHOUT_INTERACTION, "TrySelectUserWithoutInteraction"),
    FunctionInfo::unbound(60, "ListOpenContextStoredUsers"),
    FunctionInfo::bound(
        acc::CMD_INITIALIZE_APPLICATION_INFO,
        "InitializeApplicationInfo",
        Interface::initialize_application_info,
    ),
    FunctionInfo::bound(
        acc::CMD_GET_BAAS_ACCOUNT_MANAGER_FOR_APPLICATION,
        "GetBaasAccountManagerForApplication",
        Interface::get_baas_account_manager_for_application,
    ),
    FunctionInfo::unbound(102, "AuthenticateApplicationAsync"),
    FunctionInfo::unbound(103, "CheckNetworkServiceAvailabilityAsync"),
    FunctionInfo::unbound(110, "StoreSaveDataThumbnail"),
    FunctionInfo::unbound(111, "ClearSaveDataThumbnail"),
    FunctionInfo::unbound(120, "CreateGuestLoginRequest"),
    FunctionInfo::unbound(130, "LoadOpenContext"),
    FunctionInfo::unbound(131, "ListOpenContextStoredUsers"),
    FunctionInfo::unbound(140, "InitializeApplicationInfoRestricted"),
    FunctionInfo::unbound(141, "ListQualifiedUsers"),
    FunctionInfo::unbound(150, "IsUserAccountSwitchLocked"),
]);
