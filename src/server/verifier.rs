use async_trait::async_trait;

use crate::identity::{AuthError, FirebaseAuth, VerifiedUser};

/// Checks an identity assertion presented to `/api/login`.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<VerifiedUser, AuthError>;
}

#[async_trait]
impl TokenVerifier for FirebaseAuth {
    async fn verify(&self, id_token: &str) -> Result<VerifiedUser, AuthError> {
        self.verify_id_token(id_token).await
    }
}
