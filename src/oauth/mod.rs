//! OAuth2 authorization-code flow for the Carbon Voice integration.
//!
//! A manually-invoked, foreground flow:
//!
//! ```text
//! AwaitingRedirect ──code──▶ ExchangingCode ──▶ Succeeded
//!        │                        │
//!        └──no code──▶ Failed ◀───┘ (transport error / bad status / no token)
//! ```
//!
//! The callback listener accepts exactly one request and stops; a failed
//! flow is terminal for the invocation and requires a fresh start.

mod flow;
mod listener;

pub use flow::{FlowError, FlowState, OauthFlow, OauthSettings, DEFAULT_SCOPE};
pub use listener::{Callback, CallbackListener};
