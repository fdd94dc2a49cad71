//! Identity adapters.
//!
//! - **SessionIdentity** - watch-channel identity fed by the host's auth layer

mod session_identity;

pub use session_identity::SessionIdentity;
