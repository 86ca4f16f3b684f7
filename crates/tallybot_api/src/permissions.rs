//! Permission levels for command execution.

use crate::schemas::User;

/// Minimal required permission level for an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionLevel {
    /// Any registered user.
    Anyone,
    /// Any internal user, or an external user with a voucher.
    Vouched,
    /// Internal users only.
    AnyInternal,
    /// Internal users with vote permissions only.
    Trusted,
}

/// Checks that a user may perform an operation.
///
/// # Errors
///
/// Returns the user-facing refusal message when the permission level is not
/// met; callers reply with it and stop.
pub fn ensure_permissions(
    user: &User,
    level: PermissionLevel,
    operation: &str,
) -> Result<(), String> {
    match level {
        PermissionLevel::Anyone => Ok(()),
        PermissionLevel::Vouched if user.external && user.voucher_id.is_none() => Err(format!(
            "You can't perform {operation}. You are an external user without voucher. \
             For security purposes, every external user needs an internal voucher."
        )),
        PermissionLevel::AnyInternal if user.external => Err(format!(
            "You can't perform {operation}. You are an external user. To perform this \
             operation, you must be marked as an internal user."
        )),
        PermissionLevel::Trusted if !user.permission => Err(format!(
            "You can't perform {operation}. You don't have permissions to vote."
        )),
        _ => Ok(()),
    }
}
