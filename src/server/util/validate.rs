//! Input validation for account credentials and commands.

use crate::server::error::AppError;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 32;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const COMMAND_MAX_LEN: usize = 1000;

/// Usernames are 3 to 32 characters of `[A-Za-z0-9_.-]`.
pub fn validate_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(AppError::BadRequest(format!(
            "Username must be between {} and {} characters.",
            USERNAME_MIN_LEN, USERNAME_MAX_LEN
        )));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(AppError::BadRequest(
            "Username may only contain letters, digits, '_', '.' and '-'.".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters.",
            PASSWORD_MIN_LEN
        )));
    }

    Ok(())
}

/// Commands are forwarded verbatim; only emptiness and length are checked.
pub fn validate_command(command: &str) -> Result<(), AppError> {
    if command.trim().is_empty() {
        return Err(AppError::BadRequest("Command must not be empty.".to_string()));
    }

    if command.chars().count() > COMMAND_MAX_LEN {
        return Err(AppError::BadRequest(format!(
            "Command must be at most {} characters.",
            COMMAND_MAX_LEN
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_usernames() {
        for name in ["alice", "bob_1", "a.b-c", "abc", &"x".repeat(32)] {
            assert!(validate_username(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_invalid_usernames() {
        for name in ["ab", "", "has space", "emoji🙂", "semi;colon", &"x".repeat(33)] {
            assert!(
                matches!(validate_username(name), Err(AppError::BadRequest(_))),
                "{name}"
            );
        }
    }

    #[test]
    fn enforces_password_minimum() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("secret1").is_ok());
    }

    #[test]
    fn enforces_command_bounds() {
        assert!(validate_command("").is_err());
        assert!(validate_command("   ").is_err());
        assert!(validate_command(":h hello").is_ok());
        assert!(validate_command(&"x".repeat(1000)).is_ok());
        assert!(validate_command(&"x".repeat(1001)).is_err());
    }
}
