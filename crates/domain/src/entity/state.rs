//! Switch state: the last observed state of the remote resource.

use serde::{Deserialize, Serialize};

/// Tri-valued state of a REST switch.
///
/// [`Unknown`](Self::Unknown) means the last observation was inconclusive:
/// the response body matched neither the on nor the off body, or the value
/// template rendered something other than `True`/`False`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    On,
    Off,
    #[default]
    Unknown,
}

impl SwitchState {
    /// Whether the switch is on. [`Unknown`](Self::Unknown) reads as off.
    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// Whether the last observation was conclusive.
    #[must_use]
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for SwitchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_unknown() {
        assert_eq!(SwitchState::default(), SwitchState::Unknown);
    }

    #[test]
    fn should_report_on_only_for_on() {
        assert!(SwitchState::On.is_on());
        assert!(!SwitchState::Off.is_on());
        assert!(!SwitchState::Unknown.is_on());
    }

    #[test]
    fn should_report_unknown_as_not_known() {
        assert!(SwitchState::On.is_known());
        assert!(SwitchState::Off.is_known());
        assert!(!SwitchState::Unknown.is_known());
    }

    #[test]
    fn should_display_lowercase_variant_name() {
        assert_eq!(SwitchState::On.to_string(), "on");
        assert_eq!(SwitchState::Off.to_string(), "off");
        assert_eq!(SwitchState::Unknown.to_string(), "unknown");
    }

    #[test]
    fn should_serialize_lowercase() {
        let json = serde_json::to_string(&SwitchState::Unknown).unwrap();
        assert_eq!(json, "\"unknown\"");
    }
}
