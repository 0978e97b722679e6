//! Authentication endpoints (`/api/auth/*`).
//!
//! Login and signup are the only calls made without a bearer token; the 2FA
//! routes reuse the provisional token those calls return.

use serde::{Deserialize, Serialize};

use waveline_shared::{TwoFactorMethod, User};

use crate::client::{expect_success, ApiClient};
use crate::error::ApiError;

/// Token + identity pair returned by login, signup, and 2FA verification.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Provisioning payload from 2FA setup. `qr_code` is present for the totp
/// method; the email method only confirms that a code was sent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorSetup {
    #[serde(default)]
    pub qr_code: Option<String>,
    pub message: String,
}

#[derive(Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct TwoFactorSetupRequest {
    method: TwoFactorMethod,
}

#[derive(Serialize)]
struct TwoFactorVerifyRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<TwoFactorMethod>,
    code: &'a str,
}

impl ApiClient {
    /// `POST /api/auth/signup`
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let resp = self
            .post_anonymous("/api/auth/signup")
            .json(&SignupRequest {
                name,
                email,
                password,
            })
            .send()
            .await?;

        let resp = expect_success(resp, "Failed to sign up").await?;
        Ok(resp.json().await?)
    }

    /// `POST /api/auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let resp = self
            .post_anonymous("/api/auth/login")
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let resp = expect_success(resp, "Failed to log in").await?;
        Ok(resp.json().await?)
    }

    /// `POST /api/auth/setup-2fa`
    pub async fn setup_two_factor(
        &self,
        method: TwoFactorMethod,
    ) -> Result<TwoFactorSetup, ApiError> {
        let resp = self
            .post("/api/auth/setup-2fa")
            .json(&TwoFactorSetupRequest { method })
            .send()
            .await?;

        let resp = expect_success(resp, "Failed to set up two-factor authentication").await?;
        Ok(resp.json().await?)
    }

    /// `POST /api/auth/verify-2fa`
    pub async fn verify_two_factor(
        &self,
        code: &str,
        method: Option<TwoFactorMethod>,
    ) -> Result<AuthResponse, ApiError> {
        let resp = self
            .post("/api/auth/verify-2fa")
            .json(&TwoFactorVerifyRequest { method, code })
            .send()
            .await?;

        let resp = expect_success(resp, "Failed to verify two-factor authentication").await?;
        Ok(resp.json().await?)
    }

    /// `POST /api/auth/logout`
    pub async fn logout(&self) -> Result<(), ApiError> {
        let resp = self.post("/api/auth/logout").send().await?;
        expect_success(resp, "Failed to log out").await?;
        Ok(())
    }
}
