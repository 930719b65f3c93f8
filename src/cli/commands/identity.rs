use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

use crate::identity::{
    FirebaseConfig,
    firebase::{DEFAULT_IDENTITY_URL, DEFAULT_SECURE_TOKEN_URL},
};

pub const ARG_FIREBASE_API_KEY: &str = "firebase-api-key";
pub const ARG_FIREBASE_PROJECT_ID: &str = "firebase-project-id";
pub const ARG_IDENTITY_URL: &str = "identity-url";
pub const ARG_SECURE_TOKEN_URL: &str = "secure-token-url";

#[derive(Debug)]
pub struct Options {
    pub firebase: FirebaseConfig,
}

impl Options {
    /// Parse identity provider arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the API key is missing or blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let api_key = matches
            .get_one::<String>(ARG_FIREBASE_API_KEY)
            .cloned()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_FIREBASE_API_KEY}"))?;

        let get_or = |id: &str, default: &str| {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let mut firebase = FirebaseConfig::new(SecretString::from(api_key))
            .with_identity_url(get_or(ARG_IDENTITY_URL, DEFAULT_IDENTITY_URL))
            .with_secure_token_url(get_or(ARG_SECURE_TOKEN_URL, DEFAULT_SECURE_TOKEN_URL));

        // IdP sign-in continues on the project's hosted auth domain.
        if let Some(project) = matches
            .get_one::<String>(ARG_FIREBASE_PROJECT_ID)
            .filter(|v| !v.trim().is_empty())
        {
            firebase = firebase.with_request_uri(format!("https://{}.firebaseapp.com", project.trim()));
        }

        Ok(Self { firebase })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_FIREBASE_API_KEY)
                .long(ARG_FIREBASE_API_KEY)
                .help("Firebase web API key")
                .env("FIREGATE_FIREBASE_API_KEY")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_FIREBASE_PROJECT_ID)
                .long(ARG_FIREBASE_PROJECT_ID)
                .help("Firebase project id, used for the IdP sign-in request URI")
                .env("FIREGATE_FIREBASE_PROJECT_ID"),
        )
        .arg(
            Arg::new(ARG_IDENTITY_URL)
                .long(ARG_IDENTITY_URL)
                .help("Identity Toolkit base URL (emulator or tests)")
                .env("FIREGATE_IDENTITY_URL")
                .default_value(DEFAULT_IDENTITY_URL),
        )
        .arg(
            Arg::new(ARG_SECURE_TOKEN_URL)
                .long(ARG_SECURE_TOKEN_URL)
                .help("Secure token service base URL")
                .env("FIREGATE_SECURE_TOKEN_URL")
                .default_value(DEFAULT_SECURE_TOKEN_URL),
        )
}
