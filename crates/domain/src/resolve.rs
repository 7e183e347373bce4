//! State resolution: turn an observation of the resource into a state.
//!
//! Two observation forms exist:
//! - the raw `GET` body, compared verbatim with the configured on/off bodies;
//! - the output of the value template, which must be exactly `True` or
//!   `False` to be conclusive.
//!
//! Anything else resolves to [`SwitchState::Unknown`]. Resolution never fails.

use crate::entity::SwitchState;

/// Rendered value meaning "on".
pub const RENDERED_ON: &str = "True";
/// Rendered value meaning "off".
pub const RENDERED_OFF: &str = "False";
/// Value substituted when the value template cannot be rendered.
pub const RENDER_ERROR_VALUE: &str = "None";

/// Resolve a raw response body against the configured bodies.
///
/// The on body wins when both bodies are identical.
#[must_use]
pub fn from_body(body: &str, body_on: &str, body_off: &str) -> SwitchState {
    if body == body_on {
        SwitchState::On
    } else if body == body_off {
        SwitchState::Off
    } else {
        SwitchState::Unknown
    }
}

/// Resolve the output of a rendered value template.
#[must_use]
pub fn from_rendered(rendered: &str) -> SwitchState {
    match rendered {
        RENDERED_ON => SwitchState::On,
        RENDERED_OFF => SwitchState::Off,
        _ => SwitchState::Unknown,
    }
}
