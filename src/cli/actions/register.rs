use anyhow::Result;
use secrecy::SecretString;

use super::{Flow, conclude};
use crate::{controller::RegisterController, forms::RegisterForm, identity::FirebaseConfig};

#[derive(Debug)]
pub struct Args {
    pub app_url: String,
    pub firebase: FirebaseConfig,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
    pub google: bool,
    pub google_id_token: Option<SecretString>,
}

/// Execute the register action.
/// # Errors
/// Returns an error if validation, account creation or the profile update fails.
pub async fn execute(args: Args) -> Result<()> {
    let flow = Flow::new(&args.app_url, args.firebase, args.google_id_token, "/register")?;
    let controller = RegisterController::new(flow.services.clone());

    let outcome = if args.google {
        controller.federated_login().await
    } else {
        controller
            .submit(RegisterForm {
                first_name: args.first_name.unwrap_or_default(),
                last_name: args.last_name.unwrap_or_default(),
                email: args.email.unwrap_or_default(),
                password: args.password.unwrap_or_default(),
            })
            .await
    };

    conclude(outcome)?;
    flow.report();
    Ok(())
}
