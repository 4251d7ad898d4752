use crate::types::{attributes::AttributeValue, network::Network, node::Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Definition of a signal within a CAN message (DBC `SG_` line).
///
/// Describes position/bit-length, endianness, sign, scaling (factor/offset),
/// valid range, unit of measure, value descriptions and receiver nodes.
/// Receivers are weak references by node name; resolve them against the
/// owning [`Network`] when the actual [`Node`] is needed.
///
/// # Example
/// ```
/// use can_network::{Endianness, Signal, Signess};
///
/// let sig = Signal {
///     name: "RPM".to_string(),
///     bit_start: 0,
///     bit_length: 16,
///     byte_order: Endianness::Motorola,
///     sign: Signess::Unsigned,
///     factor: 0.25,
///     max: 16383.75,
///     unit_of_measurement: "rpm".to_string(),
///     receiver_nodes: vec!["Gateway".to_string()],
///     ..Default::default()
/// };
///
/// assert_eq!(sig.bit_length, 16);
/// assert!(sig.value_descriptions.is_empty());
/// ```
#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Signal {
    /// Signal name, unique within its message.
    pub name: String,
    /// Bit start in the payload (bit 0 = LSB of the first byte).
    pub bit_start: u16,
    /// Bit length.
    pub bit_length: u16,
    /// Endianness.
    pub byte_order: Endianness,
    /// Sign.
    pub sign: Signess,
    /// Scaling factor.
    pub factor: f64,
    /// Scaling offset.
    pub offset: f64,
    /// Minimum physical value.
    pub min: f64,
    /// Maximum physical value.
    pub max: f64,
    /// Unit of measure.
    pub unit_of_measurement: String,
    /// Receiver node names.
    pub receiver_nodes: Vec<String>,
    /// Associated comment (DBC `CM_ SG_` section).
    pub comment: String,
    /// Value-to-text mapping (DBC `VAL_` section).
    pub value_descriptions: BTreeMap<i64, String>,
    /// Raw value interpretation (DBC `SIG_VALTYPE_` section).
    pub extended_value_type: ExtendedValueType,

    // --- Signal Attribute Entry ---
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Signal {
    /// Resolves the receiver node names against `network`, skipping names
    /// that no longer exist there.
    pub fn resolve_receiver_nodes<'a>(
        &'a self,
        network: &'a Network,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.receiver_nodes
            .iter()
            .filter_map(|name| network.get_node_by_name(name))
    }

    /// Resets all fields to their default values.
    pub fn clear(&mut self) {
        *self = Signal::default();
    }
}

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Endianness {
    #[default]
    Motorola, // 0
    Intel, // 1
}

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Signess {
    #[default]
    Unsigned, // +
    Signed, // -
}

/// Interpretation of the raw bits (DBC `SIG_VALTYPE_`).
///
/// `Integer` is the implicit default and is never written out.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ExtendedValueType {
    #[default]
    Integer,
    Float,  // SIG_VALTYPE_ = 1
    Double, // SIG_VALTYPE_ = 2
}
