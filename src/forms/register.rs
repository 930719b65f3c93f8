use super::{
    Field, FieldErrors, check_email, check_name, check_password, normalize_email,
};
use secrecy::{ExposeSecret, SecretString};

/// Raw sign-up input as typed by the user.
#[derive(Clone, Debug)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
}

impl RegisterForm {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Validate every field and return the accepted credentials.
    ///
    /// # Errors
    /// Returns all field violations when any rule fails.
    pub fn validate(self) -> Result<RegisterCredentials, FieldErrors> {
        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim().to_string();
        let email = normalize_email(&self.email);

        let mut errors = FieldErrors::new();
        errors.check(Field::FirstName, check_name(&first_name));
        errors.check(Field::LastName, check_name(&last_name));
        errors.check(Field::Email, check_email(&email));
        errors.check(Field::Password, check_password(self.password.expose_secret()));
        errors.into_result()?;

        Ok(RegisterCredentials {
            first_name,
            last_name,
            email,
            password: self.password,
        })
    }
}

#[derive(Debug)]
pub struct RegisterCredentials {
    first_name: String,
    last_name: String,
    email: String,
    password: SecretString,
}

impl RegisterCredentials {
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &SecretString {
        &self.password
    }

    /// Profile name stored on the new account.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
