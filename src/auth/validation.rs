use crate::error::AuthError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn validate_sign_in(email: &str, password: &str) -> Result<(), AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    Ok(())
}

/// Checks a sign-up form: every field filled, matching passwords, then length.
pub fn validate_sign_up(email: &str, password: &str, confirm: &str) -> Result<(), AuthError> {
    if email.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(AuthError::MissingFields);
    }
    if password != confirm {
        return Err(AuthError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }
    Ok(())
}
