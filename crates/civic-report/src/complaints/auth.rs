//! Authentication gate: credential extraction and verification.
//!
//! Token issuance and signature checking belong to the auth collaborator;
//! this module only extracts the credential cookie and asks a
//! [`TokenVerifier`] to resolve it. The gate runs before any other handler
//! logic and its failure short-circuits the request.

use super::domain::UserId;
use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Cookie carrying the bearer credential.
pub const AUTH_COOKIE: &str = "auth-token";

/// Verified claims yielded by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPayload {
    pub user_id: UserId,
}

/// Gate failures, split so the handlers can report the two 401 cases.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no credential presented")]
    MissingToken,
    #[error("credential failed verification")]
    InvalidToken,
}

/// Credential verification seam so the gate can be exercised with substitute
/// session backends.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Option<AuthPayload>;
}

/// Extract the bearer credential from the request's `Cookie` header.
pub fn auth_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == AUTH_COOKIE).then(|| value.to_string())
    })
}

/// Run the gate: extract the cookie, then verify it.
pub fn authenticate<V>(verifier: &V, headers: &HeaderMap) -> Result<AuthPayload, AuthError>
where
    V: TokenVerifier + ?Sized,
{
    let token = auth_token(headers).ok_or(AuthError::MissingToken)?;
    verifier.verify(&token).ok_or(AuthError::InvalidToken)
}
