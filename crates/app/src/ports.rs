//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the switch logic and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod http;
pub mod template;

pub use http::{HttpClient, HttpResponse, TransportError};
pub use template::{TemplateError, TemplateRenderer};
