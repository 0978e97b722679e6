//! Session lifecycle: login, signup, two-factor verification, logout.

use std::sync::Arc;

use tracing::{info, warn};

use waveline_api::auth::TwoFactorSetup;
use waveline_api::ApiClient;
use waveline_shared::{TwoFactorMethod, User};

use crate::credentials::CredentialStore;
use crate::error::AuthError;

/// Where the session currently stands.
///
/// There are no timeout-driven transitions: expiry is enforced by the
/// backend rejecting the token on a later call, never by a client clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Anonymous,
    /// Primary credentials accepted; a second factor is still required.
    AwaitingTwoFactor,
    /// Fresh signup; two-factor must be set up and then confirmed.
    AwaitingTwoFactorSetup,
    Authenticated,
}

/// The authenticated identity plus its credential token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Owner of the [`Session`] and sole writer of the shared bearer token.
pub struct SessionStore {
    api: Arc<ApiClient>,
    credentials: CredentialStore,
    phase: SessionPhase,
    session: Option<Session>,
}

impl SessionStore {
    /// Build the store, restoring any persisted session without a network
    /// call. An unreadable credential database degrades to anonymous.
    pub fn new(api: Arc<ApiClient>, credentials: CredentialStore) -> Self {
        let mut store = Self {
            api,
            credentials,
            phase: SessionPhase::Anonymous,
            session: None,
        };

        match store.credentials.load() {
            Ok(Some(stored)) => {
                store.api.set_token(stored.token.clone());
                info!(user = %stored.user.email, "restored persisted session");
                store.session = Some(Session {
                    user: stored.user,
                    token: stored.token,
                });
                store.phase = SessionPhase::Authenticated;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "could not read persisted credentials");
            }
        }

        store
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    /// Persist and install a freshly issued token + identity.
    fn install(&mut self, token: String, user: User) -> Result<(), AuthError> {
        self.credentials.save(&token, &user)?;
        self.api.set_token(token.clone());
        self.session = Some(Session { user, token });
        Ok(())
    }

    /// `login`: on success the phase becomes [`SessionPhase::AwaitingTwoFactor`]
    /// iff the identity has two-factor enabled, else
    /// [`SessionPhase::Authenticated`]. On failure any prior session is left
    /// untouched and the backend's message is surfaced verbatim.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let resp = self.api.login(email, password).await?;

        let needs_second_factor = resp.user.two_factor_enabled;
        self.install(resp.token, resp.user)?;
        self.phase = if needs_second_factor {
            SessionPhase::AwaitingTwoFactor
        } else {
            SessionPhase::Authenticated
        };

        info!(phase = ?self.phase, "logged in");
        Ok(())
    }

    /// `signup`: two-factor setup is mandatory afterwards, so success always
    /// lands in [`SessionPhase::AwaitingTwoFactorSetup`].
    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let resp = self.api.signup(name, email, password).await?;

        self.install(resp.token, resp.user)?;
        self.phase = SessionPhase::AwaitingTwoFactorSetup;

        info!(email = %email, "signed up");
        Ok(())
    }

    /// `verify_two_factor`: success replaces token + identity and completes
    /// authentication; failure leaves the phase unchanged. No retry limit is
    /// enforced here — throttling is the backend's concern.
    pub async fn verify_two_factor(
        &mut self,
        code: &str,
        method: Option<TwoFactorMethod>,
    ) -> Result<(), AuthError> {
        let resp = self.api.verify_two_factor(code, method).await?;

        self.install(resp.token, resp.user)?;
        self.phase = SessionPhase::Authenticated;

        info!("two-factor verification complete");
        Ok(())
    }

    /// `setup_two_factor`: returns the provisioning payload (a scannable
    /// code for totp, an email confirmation otherwise). No state change:
    /// setup only takes effect once a follow-up [`Self::verify_two_factor`]
    /// succeeds.
    pub async fn setup_two_factor(
        &self,
        method: TwoFactorMethod,
    ) -> Result<TwoFactorSetup, AuthError> {
        Ok(self.api.setup_two_factor(method).await?)
    }

    /// `logout`: local state — session, shared token, persisted credentials —
    /// is cleared even when the backend call fails; the failure is still
    /// returned to the caller afterwards.
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        let result = self.api.logout().await;

        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "failed to clear persisted credentials");
        }
        self.api.clear_token();
        self.session = None;
        self.phase = SessionPhase::Anonymous;

        info!("logged out");
        result.map_err(AuthError::from)
    }
}
