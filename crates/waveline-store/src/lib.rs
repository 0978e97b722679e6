//! # waveline-store
//!
//! The two client-side stores that make up waveline's observable protocol.
//!
//! [`SessionStore`] owns the authenticated identity and the credential
//! token; [`PairingStore`] owns the WhatsApp connection flag and the
//! contact/message caches. Both are explicitly constructed around a shared
//! [`waveline_api::ApiClient`] and passed by reference to whatever front-end
//! needs them; there is no ambient global state.

pub mod credentials;
pub mod pairing;
pub mod session;

mod error;

pub use credentials::{CredentialStore, StoredSession};
pub use error::{AuthError, PairingError, StoreError};
pub use pairing::PairingStore;
pub use session::{Session, SessionPhase, SessionStore};
