use crate::types::{attributes::AttributeValue, network::Network, node::Node, signal::Signal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// CAN message defined in the network (DBC `BO_` line).
///
/// Owns its signals, keyed by signal name. The transmitter and the alternate
/// transmitters are weak references by node name.
#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Message {
    /// Numeric CAN ID, unique across the network.
    pub id: u64,
    /// Message name.
    pub name: String,
    /// Payload length in bytes.
    pub byte_length: u16,
    /// Primary transmitting node name. Empty if unknown.
    pub transmitter: String,
    /// Alternate transmitter node names (DBC `BO_TX_BU_` section).
    pub message_transmitters: Vec<String>,
    /// Signals composing this message, keyed by name.
    pub signals: BTreeMap<String, Signal>,
    /// Associated comment (DBC `CM_ BO_` section).
    pub comment: String,

    // --- Message Attribute Entry ---
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Message {
    /// Returns a `&Signal` given its name.
    pub fn get_signal_by_name(&self, name: &str) -> Option<&Signal> {
        self.signals.get(name)
    }

    /// Returns a `&mut Signal` given its name.
    pub fn get_signal_by_name_mut(&mut self, name: &str) -> Option<&mut Signal> {
        self.signals.get_mut(name)
    }

    /// Iterates `(name, signal)` pairs in signal-map order.
    pub fn iter_signals(&self) -> impl Iterator<Item = (&str, &Signal)> + '_ {
        self.signals.iter().map(|(name, sig)| (name.as_str(), sig))
    }

    /// Resolves the primary transmitter name against `network`.
    pub fn resolve_transmitter<'a>(&self, network: &'a Network) -> Option<&'a Node> {
        if self.transmitter.is_empty() {
            return None;
        }
        network.get_node_by_name(&self.transmitter)
    }

    /// Resets all fields to their default values.
    pub fn clear(&mut self) {
        *self = Message::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_lookup_and_iteration_order() {
        let mut msg = Message {
            id: 100,
            name: "Motor_01".to_string(),
            byte_length: 8,
            ..Default::default()
        };
        for name in ["Speed", "Failure", "Status"] {
            msg.signals.insert(
                name.to_string(),
                Signal {
                    name: name.to_string(),
                    ..Default::default()
                },
            );
        }

        assert!(msg.get_signal_by_name("Status").is_some());
        assert!(msg.get_signal_by_name("Torque").is_none());

        // BTreeMap keys come back sorted, restartable on every call.
        let names: Vec<&str> = msg.iter_signals().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Failure", "Speed", "Status"]);
        let again: Vec<&str> = msg.iter_signals().map(|(n, _)| n).collect();
        assert_eq!(names, again);
    }
}
