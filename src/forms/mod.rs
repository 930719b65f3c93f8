//! Input validation for the login and register forms.
//!
//! Validation is pure: a raw form either becomes a credential record the
//! controllers can submit, or a set of per-field violations rendered next to
//! each input. Nothing here touches the network, and a form with any
//! violation never reaches the identity provider.

pub mod login;
pub mod register;

pub use login::{LoginCredentials, LoginForm};
pub use register::{RegisterCredentials, RegisterForm};

use regex::Regex;
use std::{collections::BTreeMap, fmt, sync::LazyLock};

pub const PASSWORD_MIN_CHARS: usize = 6;
pub const PASSWORD_MAX_CHARS: usize = 50;
pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;

// Local part may not start with a dot and the address may not contain `..`;
// both are checked outside the pattern since `regex` has no lookahead.
static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@(?:[A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$").ok()
});

/// Form inputs that carry validation rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstname",
            Self::LastName => "lastname",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    InvalidEmail,
    TooShort { min: usize },
    TooLong { max: usize },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => f.write_str("Invalid email"),
            Self::TooShort { min } => {
                write!(f, "String must contain at least {min} character(s)")
            }
            Self::TooLong { max } => write!(f, "String must contain at most {max} character(s)"),
        }
    }
}

/// Violations keyed by field, in form order. At most one message per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.entry(field).or_insert(error);
    }

    /// Records the outcome of a single field check.
    fn check(&mut self, field: Field, result: Result<(), FieldError>) {
        if let Err(error) = result {
            self.insert(field, error);
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Normalize an email for submission.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

pub(crate) fn check_email(email: &str) -> Result<(), FieldError> {
    let valid = !email.starts_with('.')
        && !email.contains("..")
        && EMAIL_REGEX
            .as_ref()
            .is_some_and(|regex| regex.is_match(email));
    if valid {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

/// Length bounds are inclusive and counted in UTF-16 code units, the way a
/// browser reports `String.length`.
pub(crate) fn check_length(value: &str, min: usize, max: usize) -> Result<(), FieldError> {
    let chars = value.encode_utf16().count();
    if chars < min {
        Err(FieldError::TooShort { min })
    } else if chars > max {
        Err(FieldError::TooLong { max })
    } else {
        Ok(())
    }
}

pub(crate) fn check_password(password: &str) -> Result<(), FieldError> {
    check_length(password, PASSWORD_MIN_CHARS, PASSWORD_MAX_CHARS)
}

pub(crate) fn check_name(name: &str) -> Result<(), FieldError> {
    check_length(name, NAME_MIN_CHARS, NAME_MAX_CHARS)
}
