use clap::{Arg, ArgAction, ArgMatches, Command, builder::BoolishValueParser};
use secrecy::SecretString;

use crate::server::{
    CookieConfig,
    config::{DEFAULT_COOKIE_MAX_AGE, DEFAULT_COOKIE_NAME},
};

pub const ARG_COOKIE_NAME: &str = "auth-cookie-name";
pub const ARG_COOKIE_KEY_CURRENT: &str = "auth-cookie-signature-key-current";
pub const ARG_COOKIE_KEY_PREVIOUS: &str = "auth-cookie-signature-key-previous";
pub const ARG_SECURE_COOKIES: &str = "use-secure-cookies";
pub const ARG_COOKIE_MAX_AGE: &str = "auth-cookie-max-age";

#[derive(Debug)]
pub struct Options {
    pub cookie: CookieConfig,
}

impl Options {
    /// Parse session cookie arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the current signing key is missing or blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let get_non_empty = |id: &str| {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
        };

        let current = get_non_empty(ARG_COOKIE_KEY_CURRENT).ok_or_else(|| {
            anyhow::anyhow!("missing required argument: --{ARG_COOKIE_KEY_CURRENT}")
        })?;

        let mut cookie = CookieConfig::new(SecretString::from(current))
            .with_name(
                get_non_empty(ARG_COOKIE_NAME).unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string()),
            )
            .with_secure(matches.get_flag(ARG_SECURE_COOKIES))
            .with_max_age(
                matches
                    .get_one::<u64>(ARG_COOKIE_MAX_AGE)
                    .copied()
                    .unwrap_or(DEFAULT_COOKIE_MAX_AGE),
            );

        if let Some(previous) = get_non_empty(ARG_COOKIE_KEY_PREVIOUS) {
            cookie = cookie.with_previous_key(SecretString::from(previous));
        }

        Ok(Self { cookie })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_COOKIE_NAME)
                .long(ARG_COOKIE_NAME)
                .help("Session cookie name")
                .env("FIREGATE_AUTH_COOKIE_NAME")
                .default_value(DEFAULT_COOKIE_NAME),
        )
        .arg(
            Arg::new(ARG_COOKIE_KEY_CURRENT)
                .long(ARG_COOKIE_KEY_CURRENT)
                .help("Key used to sign new session cookies")
                .env("FIREGATE_AUTH_COOKIE_SIGNATURE_KEY_CURRENT")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_COOKIE_KEY_PREVIOUS)
                .long(ARG_COOKIE_KEY_PREVIOUS)
                .help("Previous signing key, still accepted when verifying")
                .env("FIREGATE_AUTH_COOKIE_SIGNATURE_KEY_PREVIOUS")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_SECURE_COOKIES)
                .long(ARG_SECURE_COOKIES)
                .help("Mark the session cookie Secure (serve over HTTPS)")
                .env("FIREGATE_USE_SECURE_COOKIES")
                .action(ArgAction::SetTrue)
                .value_parser(BoolishValueParser::new()),
        )
        .arg(
            Arg::new(ARG_COOKIE_MAX_AGE)
                .long(ARG_COOKIE_MAX_AGE)
                .help("Session cookie Max-Age in seconds")
                .env("FIREGATE_AUTH_COOKIE_MAX_AGE")
                .default_value("1036800")
                .value_parser(clap::value_parser!(u64)),
        )
}
