//! Switch entity: the snapshot of a REST switch exposed to the host.
//!
//! The entity carries the switch identity (`switch.<slug>`), its friendly
//! name, the tri-valued state and the timestamps of the last observation
//! and of the last actual change.

mod state;

pub use state::SwitchState;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UTC timestamp used for `last_changed` and `last_updated`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Observable snapshot of a REST switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchEntity {
    /// Host-facing identifier, e.g. `switch.rest_switch`.
    pub entity_id: String,
    /// Friendly name from the configuration.
    pub name: String,
    pub state: SwitchState,
    /// When the state last took a different value.
    pub last_changed: Timestamp,
    /// When the state was last written, changed or not.
    pub last_updated: Timestamp,
}

impl SwitchEntity {
    /// Create an entity in the [`SwitchState::Unknown`] state.
    #[must_use]
    pub fn new(name: &str, ts: Timestamp) -> Self {
        Self {
            entity_id: entity_id_for(name),
            name: name.to_string(),
            state: SwitchState::Unknown,
            last_changed: ts,
            last_updated: ts,
        }
    }

    /// Record a new observation of the state.
    ///
    /// `last_changed` only moves when the state differs from the previous one.
    pub fn update_state(&mut self, state: SwitchState, ts: Timestamp) {
        if self.state != state {
            self.state = state;
            self.last_changed = ts;
        }
        self.last_updated = ts;
    }
}

/// Build the `switch.<slug>` identifier for a friendly name.
///
/// The slug is lowercase ASCII alphanumerics separated by single
/// underscores. An empty slug falls back to `switch.rest_switch`.
#[must_use]
pub fn entity_id_for(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');
    if slug.is_empty() {
        "switch.rest_switch".to_string()
    } else {
        format!("switch.{slug}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn should_start_unknown() {
        let entity = SwitchEntity::new("REST Switch", now());
        assert_eq!(entity.state, SwitchState::Unknown);
        assert_eq!(entity.last_changed, entity.last_updated);
    }

    #[test]
    fn should_slugify_name_into_entity_id() {
        assert_eq!(entity_id_for("REST Switch"), "switch.rest_switch");
        assert_eq!(
            entity_id_for("  Garden -- Pump #2 "),
            "switch.garden_pump_2"
        );
    }

    #[test]
    fn should_fall_back_when_slug_is_empty() {
        assert_eq!(entity_id_for("***"), "switch.rest_switch");
    }

    #[test]
    fn should_bump_both_timestamps_when_state_changes() {
        let start = now();
        let mut entity = SwitchEntity::new("Pump", start);
        let later = start + Duration::seconds(5);

        entity.update_state(SwitchState::On, later);

        assert_eq!(entity.state, SwitchState::On);
        assert_eq!(entity.last_changed, later);
        assert_eq!(entity.last_updated, later);
    }

    #[test]
    fn should_only_bump_last_updated_when_state_is_unchanged() {
        let start = now();
        let mut entity = SwitchEntity::new("Pump", start);
        let t1 = start + Duration::seconds(5);
        let t2 = start + Duration::seconds(10);

        entity.update_state(SwitchState::Off, t1);
        entity.update_state(SwitchState::Off, t2);

        assert_eq!(entity.last_changed, t1);
        assert_eq!(entity.last_updated, t2);
    }

    #[test]
    fn should_serialize_state_lowercase() {
        let entity = SwitchEntity::new("Pump", now());
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["state"], "unknown");
        assert_eq!(json["entity_id"], "switch.pump");
    }
}
