//! Authentication primitives: login credentials and signup details.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{UserValidationError, Username};

/// Minimum accepted password length for new accounts.
pub const PASSWORD_MIN: usize = 8;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when signup payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupValidationError {
    /// The username failed the [`Username`] rules.
    Username(UserValidationError),
    /// The password was shorter than [`PASSWORD_MIN`].
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

impl fmt::Display for SignupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(inner) => inner.fmt(f),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for SignupValidationError {}

impl From<UserValidationError> for SignupValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Username(value)
    }
}

impl SignupValidationError {
    /// The form field this validation failure is scoped to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Username(_) => "username",
            Self::PasswordTooShort { .. } => "password",
        }
    }
}

/// Validated signup payload for account creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    username: Username,
    password: Zeroizing<String>,
}

impl SignupDetails {
    /// Construct signup details from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, SignupValidationError> {
        let username = Username::new(username.trim())?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(SignupValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Validated username for the new account.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plaintext password to be hashed by the account service.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  admin  ", "secret")]
    #[case("alice", "correct horse battery staple")]
    fn valid_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn signup_rejects_short_passwords() {
        let err = SignupDetails::try_from_parts("reader", "short")
            .expect_err("short passwords must fail");
        assert_eq!(err, SignupValidationError::PasswordTooShort { min: PASSWORD_MIN });
        assert_eq!(err.field(), "password");
    }

    #[rstest]
    fn signup_rejects_invalid_usernames() {
        let err = SignupDetails::try_from_parts("no spaces allowed", "long enough password")
            .expect_err("invalid username must fail");
        assert_eq!(err.field(), "username");
    }

    #[rstest]
    fn signup_accepts_valid_input() {
        let details = SignupDetails::try_from_parts("  reader  ", "long enough password")
            .expect("valid signup");
        assert_eq!(details.username().as_ref(), "reader");
        assert_eq!(details.password(), "long enough password");
    }
}
