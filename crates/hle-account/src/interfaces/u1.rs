//! `acc:u1`: account port for applets.

use hle_framework::{CommandTable, FunctionInfo};
use hle_ipc::acc;

use super::Interface;

pub(super) static ACC_U1_COMMANDS: CommandTable<Interface> = CommandTable::new(&[
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
    FunctionInfo::unbound(100, "GetUserRegistrationNotifier"),
    FunctionInfo::unbound(101, "GetUserStateChangeNotifier"),
    FunctionInfo::unbound(102, "GetBaasAccountManagerForSystemService"),
    FunctionInfo::unbound(103, "GetBaasUserAvailabilityChangeNotifier"),
    FunctionInfo::unbound(104, "GetProfileUpdateNotifier"),
    FunctionInfo::unbound(105, "CheckNetworkServiceAvailabilityAsync"),
    FunctionInfo::unbound(110, "StoreSaveDataThumbnail"),
    FunctionInfo::unbound(111, "ClearSaveDataThumbnail"),
    FunctionInfo::unbound(112, "LoadSaveDataThumbnail"),
    FunctionInfo::unbound(113, "GetSaveDataThumbnailExistence"),
    FunctionInfo::unbound(190, "GetUserLastOpenedApplication"),
    FunctionInfo::unbound(191, "ActivateOpenContextHolder"),
    FunctionInfo::unbound(997, "DebugInvalidateTokenCacheForUser"),
    FunctionInfo::unbound(998, "DebugSetUserStateClose"),
    FunctionInfo::unbound(999, "DebugSetUserStateOpen"),
]);
