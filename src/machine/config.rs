//! Runtime configuration of a machine.

use serde::{Deserialize, Serialize};

/// Tunables for a machine's processing loop and observer delivery.
///
/// Missing fields take their default when deserialized, so a host can embed
/// this struct in its own configuration file.
///
/// # Example
///
/// ```rust
/// use statekeeper::MachineConfig;
///
/// let config = MachineConfig::default()
///     .with_name("door")
///     .with_intake_capacity(16);
///
/// assert_eq!(config.name.as_deref(), Some("door"));
/// assert_eq!(config.intake_capacity, 16);
/// assert_eq!(config.observer_mailbox_capacity, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Name used for thread names and log fields.
    pub name: Option<String>,

    /// Buffered triggers the intake queue holds. With 0 every `trigger`
    /// waits until the processing loop takes the request.
    pub intake_capacity: usize,

    /// Events queued per observer before new ones are dropped. `None` means
    /// unbounded.
    pub observer_mailbox_capacity: Option<usize>,
}

impl MachineConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_intake_capacity(mut self, capacity: usize) -> Self {
        self.intake_capacity = capacity;
        self
    }

    pub fn with_observer_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.observer_mailbox_capacity = Some(capacity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_rendezvous_and_unbounded() {
        let config = MachineConfig::default();

        assert_eq!(config.name, None);
        assert_eq!(config.intake_capacity, 0);
        assert_eq!(config.observer_mailbox_capacity, None);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: MachineConfig = serde_json::from_str(r#"{"name": "turnstile"}"#).unwrap();

        assert_eq!(config, MachineConfig::default().with_name("turnstile"));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = MachineConfig::default()
            .with_intake_capacity(8)
            .with_observer_mailbox_capacity(64);

        let json = serde_json::to_string(&config).unwrap();
        let back: MachineConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back, config);
    }
}
