//! Auth API
//!
//! Account endpoints plus local session bookkeeping. Navigation after an
//! auth failure is the caller's responsibility; this layer only reports
//! typed outcomes.

use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};

use crate::{ClientError, ClientResult, HttpClient};

impl HttpClient {
    /// Login with email and password.
    ///
    /// On success the shared session handle is updated, so subsequent
    /// requests from any surface of this client carry the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.post("/auth/login", &request).await?;
        if response.token.is_empty() {
            return Err(ClientError::InvalidResponse(
                "missing session token".to_string(),
            ));
        }
        self.session()
            .set_login(response.token.clone(), response.user.clone());
        tracing::info!(user = %response.user.email, "signed in");
        Ok(response)
    }

    /// Register a new account.
    ///
    /// Registration does not establish a session; the user logs in
    /// afterwards.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<UserInfo> {
        self.post("/auth/register", request).await
    }

    /// Get the current user from the server.
    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.get("/auth/me").await
    }

    /// Sign out locally by clearing the session.
    ///
    /// Consumers holding a cart synchronizer should follow up with
    /// `on_session_changed` so cart state resets without a network call.
    pub fn logout(&self) {
        self.session().clear();
        tracing::info!("signed out");
    }
}
