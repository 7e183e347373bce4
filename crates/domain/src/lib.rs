//! # restswitch-domain
//!
//! Pure domain model for a switch backed by a REST resource.
//!
//! ## Responsibilities
//! - Foundational types: error conventions
//! - Define the **tri-valued switch state** (`on`, `off`, `unknown`)
//! - Define the **switch configuration** and its validation rules
//! - Define the **switch entity** snapshot exposed to the host
//! - Resolve a response body (or a rendered value template) into a state
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod config;
pub mod entity;
pub mod resolve;
