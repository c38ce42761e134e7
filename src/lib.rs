pub mod authenticator;
pub mod client;
pub mod codec;
pub mod error;
pub mod group;
pub mod message;
pub mod proof;
pub mod session;
pub mod state;
pub mod transport;

pub use authenticator::SessionAuthenticator;
pub use client::ProofPolicy;
pub use error::{AuthError, Result};
