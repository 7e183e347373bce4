//! # restswitch-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Expose the switch snapshot as JSON (`GET /api/switch`)
//! - Map host service calls (`POST /api/switch/{service}`) onto the switch
//! - Map switch failures into HTTP responses
//!
//! ## Dependency rule
//! Depends on `restswitch-app` (for port traits and the switch) and
//! `restswitch-domain` (for the types serialised in responses). Never leaks
//! axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
