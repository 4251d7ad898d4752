use crate::types::attributes::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node/ECU defined in the network.
///
/// A `Node` identifies a physical or logical unit in the CAN system that can
/// transmit or receive messages. Messages and signals refer to nodes by name
/// only; nothing here owns or is owned by a message.
///
/// # Example
/// ```
/// use can_network::Node;
///
/// let node = Node {
///     name: "Motor".to_string(),
///     comment: "Controls engine-related functions".to_string(),
///     ..Default::default()
/// };
///
/// assert_eq!(node.name, "Motor");
/// assert!(node.attributes.is_empty());
/// ```
#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Node {
    /// Node/ECU name.
    pub name: String,
    /// Associated comment (DBC `CM_ BU_` section).
    pub comment: String,

    // --- Node Attribute Entry ---
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Node {
    /// Resets all fields to their default values.
    pub fn clear(&mut self) {
        *self = Node::default();
    }
}
