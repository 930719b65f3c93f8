use super::{Field, FieldErrors, check_email, check_password, normalize_email};
use secrecy::{ExposeSecret, SecretString};

/// Raw login input as typed by the user.
#[derive(Clone, Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl LoginForm {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Validate every field and return the accepted credentials.
    ///
    /// # Errors
    /// Returns all field violations when any rule fails.
    pub fn validate(self) -> Result<LoginCredentials, FieldErrors> {
        let email = normalize_email(&self.email);

        let mut errors = FieldErrors::new();
        errors.check(Field::Email, check_email(&email));
        errors.check(Field::Password, check_password(self.password.expose_secret()));
        errors.into_result()?;

        Ok(LoginCredentials {
            email,
            password: self.password,
        })
    }
}

/// Validated login credentials, alive only for one submit.
#[derive(Debug)]
pub struct LoginCredentials {
    email: String,
    password: SecretString,
}

impl LoginCredentials {
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldError;

    #[test]
    fn valid_login_is_accepted() {
        let credentials = LoginForm::new("user@example.com", "secret1").validate();
        assert!(credentials.is_ok());
        if let Ok(credentials) = credentials {
            assert_eq!(credentials.email(), "user@example.com");
            assert_eq!(credentials.password().expose_secret(), "secret1");
        }
    }

    #[test]
    fn email_is_trimmed() {
        let credentials = LoginForm::new("  user@example.com ", "secret1").validate();
        assert_eq!(
            credentials.map(|c| c.email().to_string()).ok(),
            Some("user@example.com".to_string())
        );
    }

    #[test]
    fn bad_email_is_reported_on_email_field() {
        let errors = LoginForm::new("bad-email", "secret1").validate().err();
        let Some(errors) = errors else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Email), Some(&FieldError::InvalidEmail));
    }

    #[test]
    fn all_violations_are_reported_together() {
        let Err(errors) = LoginForm::new("", "12345").validate() else {
            panic!("expected validation errors");
        };
        assert!(errors.contains(Field::Email));
        assert_eq!(
            errors.get(Field::Password),
            Some(&FieldError::TooShort { min: 6 })
        );
    }

    #[test]
    fn password_is_not_trimmed() {
        // five visible characters padded to six with a space still counts as six
        assert!(LoginForm::new("user@example.com", "abcde ").validate().is_ok());
    }

    #[test]
    fn debug_output_redacts_password() {
        let form = LoginForm::new("user@example.com", "secret1");
        let rendered = format!("{form:?}");
        assert!(!rendered.contains("secret1"));
    }
}
