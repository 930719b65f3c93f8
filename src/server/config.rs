use secrecy::SecretString;

pub const DEFAULT_COOKIE_NAME: &str = "AuthToken";

/// 12 days.
pub const DEFAULT_COOKIE_MAX_AGE: u64 = 12 * 60 * 60 * 24;

/// Session cookie settings.
///
/// Signing uses `current_key`; verification also accepts `previous_key` so
/// the key can be rotated without logging everyone out.
#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub name: String,
    pub current_key: SecretString,
    pub previous_key: Option<SecretString>,
    pub secure: bool,
    pub max_age: u64,
}

impl CookieConfig {
    #[must_use]
    pub fn new(current_key: SecretString) -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_string(),
            current_key,
            previous_key: None,
            secure: false,
            max_age: DEFAULT_COOKIE_MAX_AGE,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_previous_key(mut self, key: SecretString) -> Self {
        self.previous_key = Some(key);
        self
    }

    #[must_use]
    pub const fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub const fn with_max_age(mut self, max_age: u64) -> Self {
        self.max_age = max_age;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_auth_token_cookie() {
        let config = CookieConfig::new(SecretString::from("k".to_string()));
        assert_eq!(config.name, "AuthToken");
        assert_eq!(config.max_age, 1_036_800);
        assert!(!config.secure);
        assert!(config.previous_key.is_none());
    }

    #[test]
    fn debug_output_redacts_keys() {
        let config = CookieConfig::new(SecretString::from("super-secret".to_string()))
            .with_previous_key(SecretString::from("older-secret".to_string()));
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("older-secret"));
    }
}
