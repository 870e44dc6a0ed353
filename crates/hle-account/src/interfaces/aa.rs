//! `acc:aa`: baas notification port. Nothing here is implemented.

use hle_framework::{CommandTable, FunctionInfo};

use super::Interface;

pub(super) static ACC_AA_COMMANDS: CommandTable<Interface> = CommandTable::new(&[
    FunctionInfo::unbound(0, "EnsureCacheAsync"),
    FunctionInfo::unbound(1, "LoadCache"),
    FunctionInfo::unbound(2, "GetDeviceAccountId"),
    FunctionInfo::unbound(50, "RegisterNotificationTokenAsync"),
    FunctionInfo::unbound(51, "UnregisterNotificationTokenAsync"),
]);
