//! Auth provider trait definition.

use pressroom_types::auth::AuthUser;
use pressroom_types::error::AuthError;

/// Trait for backends that resolve a bearer token to a user.
///
/// Implementations live in pressroom-infra (e.g., the Supabase client).
pub trait AuthProvider: Send + Sync {
    /// Resolve an access token to the user it belongs to.
    ///
    /// Returns `AuthError::InvalidToken` when the provider rejects the token
    /// and `AuthError::Provider` when the provider could not be reached.
    fn get_user(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<AuthUser, AuthError>> + Send;
}
