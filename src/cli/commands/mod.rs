pub mod cookie;
pub mod identity;
pub mod logging;

use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const CMD_SERVER: &str = "server";
pub const CMD_LOGIN: &str = "login";
pub const CMD_REGISTER: &str = "register";

pub const ARG_PORT: &str = "port";
pub const ARG_APP_URL: &str = "app-url";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_FIRST_NAME: &str = "first-name";
pub const ARG_LAST_NAME: &str = "last-name";
pub const ARG_GOOGLE: &str = "google";
pub const ARG_GOOGLE_ID_TOKEN: &str = "google-id-token";

pub const DEFAULT_APP_URL: &str = "http://localhost:8080";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("firegate")
        .about("Login and registration with cookie-backed sessions")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(server())
        .subcommand(login())
        .subcommand(register());

    logging::with_args(command)
}

fn server() -> Command {
    let command = Command::new(CMD_SERVER)
        .about("Run the cookie exchange endpoint")
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("8080")
                .env("FIREGATE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_APP_URL)
                .long(ARG_APP_URL)
                .help("Front end origin allowed to call the API with credentials")
                .env("FIREGATE_APP_URL"),
        );

    let command = cookie::with_args(command);
    identity::with_args(command)
}

fn client(name: &'static str, about: &'static str) -> Command {
    let command = Command::new(name)
        .about(about)
        .arg(
            Arg::new(ARG_APP_URL)
                .long(ARG_APP_URL)
                .help("Base URL of the running firegate server")
                .env("FIREGATE_APP_URL")
                .default_value(DEFAULT_APP_URL),
        )
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long(ARG_EMAIL)
                .help("Email address")
                .required_unless_present(ARG_GOOGLE),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Password")
                .env("FIREGATE_PASSWORD")
                .hide_env_values(true)
                .required_unless_present(ARG_GOOGLE),
        )
        .arg(
            Arg::new(ARG_GOOGLE)
                .long(ARG_GOOGLE)
                .help("Sign in with Google instead of email and password")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_GOOGLE_ID_TOKEN)
                .long(ARG_GOOGLE_ID_TOKEN)
                .help("Google ID token obtained out of band, used with --google")
                .env("FIREGATE_GOOGLE_ID_TOKEN")
                .hide_env_values(true),
        );

    identity::with_args(command)
}

fn login() -> Command {
    client(CMD_LOGIN, "Sign in and obtain a session cookie")
}

fn register() -> Command {
    client(CMD_REGISTER, "Create an account")
        .arg(
            Arg::new(ARG_FIRST_NAME)
                .long(ARG_FIRST_NAME)
                .help("First name")
                .required_unless_present(ARG_GOOGLE),
        )
        .arg(
            Arg::new(ARG_LAST_NAME)
                .long(ARG_LAST_NAME)
                .help("Last name")
                .required_unless_present(ARG_GOOGLE),
        )
}
