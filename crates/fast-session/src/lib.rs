//! WebSocket session client for the binary-options trading service.
//!
//! A `Session` is one authenticated connection scoped to a single contract
//! negotiation (authorize → proposal → purchase). Sessions are never pooled
//! or reused across durations: every duration opens a fresh connection and
//! closes it when its negotiation ends, which keeps proposal identifiers
//! session-local and failures isolated.

pub mod error;
pub mod message;
pub mod session;

pub use error::{SessionError, SessionResult};
pub use message::{
    service_error, AuthorizeRequest, BuyRequest, ErrorBody, ProposalBody, ProposalRequest,
};
pub use session::{Session, SessionConfig, SessionId};

use std::sync::Once;

static INIT_CRYPTO: Once = Once::new();

/// Install the ring crypto provider for rustls.
///
/// Call once at startup, before the first session is opened.
pub fn init_crypto() {
    INIT_CRYPTO.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
