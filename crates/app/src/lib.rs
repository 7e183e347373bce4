//! # restswitch-app
//!
//! Application layer: the REST switch use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `HttpClient`: single-attempt `GET`/`POST` with a per-call timeout
//!   - `TemplateRenderer`: render body templates and value templates
//! - Drive the switch: setup probe, `turn_on`, `turn_off`, `toggle`,
//!   `refresh_state`, host service dispatch
//! - Provide the background poller the host uses to refresh the state
//!
//! ## Dependency rule
//! Depends on `restswitch-domain` only (plus `tokio` for the poller task).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod error;
pub mod poller;
pub mod ports;
pub mod switch;
