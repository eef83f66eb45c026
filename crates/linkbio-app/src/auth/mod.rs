//! Authentication state machine
//!
//! - `state`: the observable `(session, user, loading)` shape and its reader
//! - `machine`: the single writer, driven by the auth backend
//! - `logout`: the explicit-logout flag consulted at mount

mod logout;
mod machine;
mod state;

pub use logout::LogoutFlag;
pub use machine::AuthMachine;
pub use state::{AuthHandle, AuthPhase, AuthState};
