use anyhow::Result;
use secrecy::SecretString;

use super::{Flow, conclude};
use crate::{controller::LoginController, forms::LoginForm, identity::FirebaseConfig};

#[derive(Debug)]
pub struct Args {
    pub app_url: String,
    pub firebase: FirebaseConfig,
    pub email: Option<String>,
    pub password: Option<SecretString>,
    pub google: bool,
    pub google_id_token: Option<SecretString>,
}

/// Execute the login action.
/// # Errors
/// Returns an error if validation, sign-in, the cookie exchange or the refresh fails.
pub async fn execute(args: Args) -> Result<()> {
    let flow = Flow::new(&args.app_url, args.firebase, args.google_id_token, "/login")?;
    let controller = LoginController::new(flow.services.clone());

    let outcome = if args.google {
        controller.federated_login().await
    } else {
        controller
            .submit(LoginForm {
                email: args.email.unwrap_or_default(),
                password: args.password.unwrap_or_default(),
            })
            .await
    };

    conclude(outcome)?;
    flow.report();
    Ok(())
}
