//! Map parsed CLI arguments to the action to run.

use crate::cli::{
    actions::{Action, login, register, server},
    commands::{
        ARG_APP_URL, ARG_EMAIL, ARG_FIRST_NAME, ARG_GOOGLE, ARG_GOOGLE_ID_TOKEN, ARG_LAST_NAME,
        ARG_PASSWORD, ARG_PORT, CMD_LOGIN, CMD_REGISTER, CMD_SERVER, DEFAULT_APP_URL, cookie,
        identity,
    },
};
use anyhow::{Result, bail};
use clap::ArgMatches;
use secrecy::SecretString;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((CMD_SERVER, sub_m)) => Ok(Action::Server(server::Args {
            port: sub_m.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080),
            app_url: get_non_empty(sub_m, ARG_APP_URL),
            cookie: cookie::Options::parse(sub_m)?.cookie,
            firebase: identity::Options::parse(sub_m)?.firebase,
        })),
        Some((CMD_LOGIN, sub_m)) => Ok(Action::Login(login::Args {
            app_url: app_url(sub_m),
            firebase: identity::Options::parse(sub_m)?.firebase,
            email: get_non_empty(sub_m, ARG_EMAIL),
            password: get_secret(sub_m, ARG_PASSWORD),
            google: sub_m.get_flag(ARG_GOOGLE),
            google_id_token: get_secret(sub_m, ARG_GOOGLE_ID_TOKEN),
        })),
        Some((CMD_REGISTER, sub_m)) => Ok(Action::Register(register::Args {
            app_url: app_url(sub_m),
            firebase: identity::Options::parse(sub_m)?.firebase,
            // Names and email are validated by the form, not here.
            first_name: sub_m.get_one::<String>(ARG_FIRST_NAME).cloned(),
            last_name: sub_m.get_one::<String>(ARG_LAST_NAME).cloned(),
            email: sub_m.get_one::<String>(ARG_EMAIL).cloned(),
            password: get_secret(sub_m, ARG_PASSWORD),
            google: sub_m.get_flag(ARG_GOOGLE),
            google_id_token: get_secret(sub_m, ARG_GOOGLE_ID_TOKEN),
        })),
        Some((name, _)) => bail!("unknown command: {name}"),
        None => bail!("missing command"),
    }
}

fn get_non_empty(matches: &ArgMatches, id: &str) -> Option<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .filter(|v| !v.trim().is_empty())
}

fn get_secret(matches: &ArgMatches, id: &str) -> Option<SecretString> {
    matches
        .get_one::<String>(id)
        .cloned()
        .map(SecretString::from)
}

fn app_url(matches: &ArgMatches) -> String {
    get_non_empty(matches, ARG_APP_URL).unwrap_or_else(|| DEFAULT_APP_URL.to_string())
}
