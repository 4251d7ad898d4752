//! Network model: the aggregate root of a parsed DBC file.
//!
//! A [`Network`] owns every entity of the description through ordered maps
//! keyed by name (nodes, value tables, environment variables, attribute
//! definitions) or by numeric CAN ID (messages). Lookups return `Option`;
//! a missing key is a valid "not found" result, never an error.
//!
//! The model is built once by a grammar parser (or by hand through the
//! consuming constructor) and read afterwards. [`Network::merge`] is the one
//! destructive operation: it moves every entity out of a donor model into
//! the receiver, keeping the receiver's entry on key collisions.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use crate::types::{
    attributes::{AttributeDefinition, AttributeValue},
    bit_timing::BitTiming,
    env_var::EnvironmentVariable,
    message::Message,
    node::Node,
    signal::Signal,
    value_table::ValueTable,
};

/// In-memory representation of a CAN network description (DBC).
///
/// Holds the version string, the `NS_` extension tokens, the bus bit timing
/// and all entity maps. Node-name references held by messages and signals
/// (transmitters, receivers, access nodes) are weak: they are plain strings
/// resolved against `nodes` on demand and are not validated here.
#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Network {
    /// Network version string (DBC `VERSION` line).
    pub version: String,
    /// New-symbol tokens (DBC `NS_` section).
    pub new_symbols: BTreeSet<String>,
    /// Bus bit timing (DBC `BS_` line).
    pub bit_timing: BitTiming,
    /// Nodes/ECUs, keyed by name.
    pub nodes: BTreeMap<String, Node>,
    /// Value tables, keyed by name.
    pub value_tables: BTreeMap<String, ValueTable>,
    /// Messages, keyed by numeric CAN ID.
    pub messages: BTreeMap<u64, Message>,
    /// Environment variables, keyed by name.
    pub environment_variables: BTreeMap<String, EnvironmentVariable>,
    /// Attribute definitions, keyed by attribute name.
    pub attribute_definitions: BTreeMap<String, AttributeDefinition>,
    /// Attribute default values, keyed by attribute name (DBC `BA_DEF_DEF_`).
    pub attribute_defaults: BTreeMap<String, AttributeValue>,
    /// Network-level attribute values, keyed by attribute name (DBC `BA_`).
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Network comment (DBC `CM_` line).
    pub comment: String,
}

impl Network {
    /// Builds a network from fully populated containers.
    ///
    /// This is the construction contract used by the grammar parser; every
    /// container is taken by value, so the caller hands over ownership in
    /// one call. The parameter order is fixed.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        version: String,
        new_symbols: BTreeSet<String>,
        bit_timing: BitTiming,
        nodes: BTreeMap<String, Node>,
        value_tables: BTreeMap<String, ValueTable>,
        messages: BTreeMap<u64, Message>,
        environment_variables: BTreeMap<String, EnvironmentVariable>,
        attribute_definitions: BTreeMap<String, AttributeDefinition>,
        attribute_defaults: BTreeMap<String, AttributeValue>,
        attributes: BTreeMap<String, AttributeValue>,
        comment: String,
    ) -> Self {
        Network {
            version,
            new_symbols,
            bit_timing,
            nodes,
            value_tables,
            messages,
            environment_variables,
            attribute_definitions,
            attribute_defaults,
            attributes,
            comment,
        }
    }

    // ---- New symbols ----

    /// `true` if `name` was declared in the `NS_` section.
    pub fn has_new_symbol(&self, name: &str) -> bool {
        self.new_symbols.contains(name)
    }

    // ---- Lookups ----

    /// Returns a `&Node` given the name.
    pub fn get_node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Returns a `&mut Node` given the name.
    pub fn get_node_by_name_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.get_mut(name)
    }

    /// Returns a `&ValueTable` given the name.
    pub fn get_value_table_by_name(&self, name: &str) -> Option<&ValueTable> {
        self.value_tables.get(name)
    }

    /// Returns a `&mut ValueTable` given the name.
    pub fn get_value_table_by_name_mut(&mut self, name: &str) -> Option<&mut ValueTable> {
        self.value_tables.get_mut(name)
    }

    /// Returns a `&Message` given the numeric CAN ID.
    pub fn get_message_by_id(&self, id: u64) -> Option<&Message> {
        self.messages.get(&id)
    }

    /// Returns a `&mut Message` given the numeric CAN ID.
    pub fn get_message_by_id_mut(&mut self, id: u64) -> Option<&mut Message> {
        self.messages.get_mut(&id)
    }

    /// Returns a `&EnvironmentVariable` given the name.
    pub fn get_env_var_by_name(&self, name: &str) -> Option<&EnvironmentVariable> {
        self.environment_variables.get(name)
    }

    /// Returns a `&mut EnvironmentVariable` given the name.
    pub fn get_env_var_by_name_mut(&mut self, name: &str) -> Option<&mut EnvironmentVariable> {
        self.environment_variables.get_mut(name)
    }

    /// Returns a `&AttributeDefinition` given the attribute name.
    pub fn get_attribute_definition_by_name(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attribute_definitions.get(name)
    }

    /// Returns the default value of an attribute given its name.
    pub fn get_attribute_default_by_name(&self, name: &str) -> Option<&AttributeValue> {
        self.attribute_defaults.get(name)
    }

    /// Returns a network-level attribute value given its name.
    pub fn get_attribute_by_name(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    // ---- Iteration (key order, restartable) ----

    /// Iterates `(name, node)` pairs.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (&str, &Node)> + '_ {
        self.nodes.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Iterates `(name, value_table)` pairs.
    pub fn iter_value_tables(&self) -> impl Iterator<Item = (&str, &ValueTable)> + '_ {
        self.value_tables.iter().map(|(name, vt)| (name.as_str(), vt))
    }

    /// Iterates `(id, message)` pairs.
    pub fn iter_messages(&self) -> impl Iterator<Item = (u64, &Message)> + '_ {
        self.messages.iter().map(|(&id, msg)| (id, msg))
    }

    /// Iterates `(name, environment_variable)` pairs.
    pub fn iter_env_vars(&self) -> impl Iterator<Item = (&str, &EnvironmentVariable)> + '_ {
        self.environment_variables
            .iter()
            .map(|(name, ev)| (name.as_str(), ev))
    }

    /// Iterates `(name, attribute_definition)` pairs.
    pub fn iter_attribute_definitions(
        &self,
    ) -> impl Iterator<Item = (&str, &AttributeDefinition)> + '_ {
        self.attribute_definitions
            .iter()
            .map(|(name, def)| (name.as_str(), def))
    }

    // ---- Cross-references ----

    /// Finds the message owning `signal` by identity, not by name.
    ///
    /// Scans every message's signal map and compares addresses, so a clone
    /// or a detached signal with the same name yields `None`. The scan is
    /// O(messages); it is meant for diagnostics and serialization
    /// cross-referencing, not for hot paths.
    pub fn find_parent_message(&self, signal: &Signal) -> Option<&Message> {
        self.messages.values().find(|msg| {
            msg.signals
                .get(&signal.name)
                .is_some_and(|owned| std::ptr::eq(owned, signal))
        })
    }

    // ---- Merge ----

    /// Moves every entity of `other` into `self`.
    ///
    /// Map entries already present in `self` win: the donor's conflicting
    /// entries are dropped and counted in the returned [`MergeReport`].
    /// New symbols are unioned. The receiver keeps its own version, bit
    /// timing and comment. `other` is consumed and cannot be used again.
    pub fn merge(&mut self, other: Network) -> MergeReport {
        self.new_symbols.extend(other.new_symbols);
        MergeReport {
            skipped_nodes: merge_keep_existing(&mut self.nodes, other.nodes),
            skipped_value_tables: merge_keep_existing(&mut self.value_tables, other.value_tables),
            skipped_messages: merge_keep_existing(&mut self.messages, other.messages),
            skipped_environment_variables: merge_keep_existing(
                &mut self.environment_variables,
                other.environment_variables,
            ),
            skipped_attribute_definitions: merge_keep_existing(
                &mut self.attribute_definitions,
                other.attribute_definitions,
            ),
            skipped_attribute_defaults: merge_keep_existing(
                &mut self.attribute_defaults,
                other.attribute_defaults,
            ),
            skipped_attributes: merge_keep_existing(&mut self.attributes, other.attributes),
        }
    }

    /// Clears the whole network.
    pub fn clear(&mut self) {
        *self = Network::default();
    }
}

/// Inserts the donor's entries into `dst`, keeping existing entries on
/// collision. Returns the number of dropped donor entries.
fn merge_keep_existing<K: Ord, V>(dst: &mut BTreeMap<K, V>, src: BTreeMap<K, V>) -> usize {
    let mut skipped: usize = 0;
    for (key, value) in src {
        match dst.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(_) => skipped += 1,
        }
    }
    skipped
}

/// Per-kind counts of donor entries dropped by [`Network::merge`].
///
/// Receiver-wins merging silently discards overlapping entries; these
/// counters make the overlap observable to callers that care.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub struct MergeReport {
    pub skipped_nodes: usize,
    pub skipped_value_tables: usize,
    pub skipped_messages: usize,
    pub skipped_environment_variables: usize,
    pub skipped_attribute_definitions: usize,
    pub skipped_attribute_defaults: usize,
    pub skipped_attributes: usize,
}

impl MergeReport {
    /// Total number of donor entries dropped across all entity kinds.
    pub fn total_skipped(&self) -> usize {
        self.skipped_nodes
            + self.skipped_value_tables
            + self.skipped_messages
            + self.skipped_environment_variables
            + self.skipped_attribute_definitions
            + self.skipped_attribute_defaults
            + self.skipped_attributes
    }

    /// `true` when no donor entry was dropped.
    pub fn is_clean(&self) -> bool {
        self.total_skipped() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str) -> Node {
        Node {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn message(id: u64, name: &str, signal_names: &[&str]) -> Message {
        let mut msg = Message {
            id,
            name: name.to_string(),
            byte_length: 8,
            ..Default::default()
        };
        for sig_name in signal_names {
            msg.signals.insert(
                sig_name.to_string(),
                Signal {
                    name: sig_name.to_string(),
                    ..Default::default()
                },
            );
        }
        msg
    }

    fn sample_network() -> Network {
        let mut net = Network {
            version: "1.0".to_string(),
            ..Default::default()
        };
        net.new_symbols.insert("BO_TX_BU_".to_string());
        net.nodes.insert("Motor".to_string(), node("Motor"));
        net.nodes.insert("Gateway".to_string(), node("Gateway"));
        net.messages
            .insert(100, message(100, "Motor_01", &["RPM", "Status"]));
        net.messages.insert(200, message(200, "Gateway_01", &["Load"]));
        net
    }

    #[test]
    fn test_lookup_present_and_absent() {
        let net = sample_network();
        assert!(net.get_node_by_name("Motor").is_some());
        assert!(net.get_node_by_name("Unknown").is_none());
        assert_eq!(net.get_message_by_id(100).unwrap().name, "Motor_01");
        assert!(net.get_message_by_id(999).is_none());
        assert!(net.has_new_symbol("BO_TX_BU_"));
        assert!(!net.has_new_symbol("SIG_GROUP_"));
    }

    #[test]
    fn test_iteration_is_ordered_and_restartable() {
        let net = sample_network();
        let ids: Vec<u64> = net.iter_messages().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![100, 200]);
        let names: Vec<&str> = net.iter_nodes().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Gateway", "Motor"]);
        // Same sequence on a second pass.
        let again: Vec<u64> = net.iter_messages().map(|(id, _)| id).collect();
        assert_eq!(ids, again);
    }

    #[test]
    fn test_find_parent_message_by_identity() {
        let net = sample_network();
        let rpm = net
            .get_message_by_id(100)
            .unwrap()
            .get_signal_by_name("RPM")
            .unwrap();
        let parent = net.find_parent_message(rpm).unwrap();
        assert_eq!(parent.id, 100);

        // Same name, different instance: no owner.
        let detached = Signal {
            name: "RPM".to_string(),
            ..Default::default()
        };
        assert!(net.find_parent_message(&detached).is_none());

        // A clone is a different instance as well.
        let cloned = rpm.clone();
        assert!(net.find_parent_message(&cloned).is_none());
    }

    #[test]
    fn test_merge_disjoint_keys() {
        let mut a = sample_network();
        let mut b = Network::default();
        b.nodes.insert("Brake".to_string(), node("Brake"));
        b.messages.insert(300, message(300, "Brake_01", &["Pressure"]));
        b.new_symbols.insert("SIG_VALTYPE_".to_string());

        let report = a.merge(b);
        assert!(report.is_clean());
        assert_eq!(a.nodes.len(), 3);
        assert_eq!(a.messages.len(), 3);
        assert!(a.get_node_by_name("Brake").is_some());
        assert!(a.get_message_by_id(300).is_some());
        assert!(a.has_new_symbol("SIG_VALTYPE_"));
    }

    #[test]
    fn test_merge_collision_keeps_receiver() {
        let mut a = sample_network();
        let mut b = Network::default();
        b.messages
            .insert(100, message(100, "Imposter_01", &["Fake"]));
        b.nodes.insert("Motor".to_string(), {
            let mut n = node("Motor");
            n.comment = "donor copy".to_string();
            n
        });

        let report = a.merge(b);
        assert_eq!(report.skipped_messages, 1);
        assert_eq!(report.skipped_nodes, 1);
        assert_eq!(report.total_skipped(), 2);
        // Receiver is authoritative.
        assert_eq!(a.get_message_by_id(100).unwrap().name, "Motor_01");
        assert_eq!(a.get_node_by_name("Motor").unwrap().comment, "");
    }

    #[test]
    fn test_consuming_constructor() {
        let mut nodes: BTreeMap<String, Node> = BTreeMap::new();
        nodes.insert("Motor".to_string(), node("Motor"));
        let mut symbols: BTreeSet<String> = BTreeSet::new();
        symbols.insert("CM_".to_string());

        let net = Network::new(
            "2.1".to_string(),
            symbols,
            BitTiming::default(),
            nodes,
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
            "top level".to_string(),
        );
        assert_eq!(net.version, "2.1");
        assert_eq!(net.comment, "top level");
        assert!(net.has_new_symbol("CM_"));
        assert!(net.get_node_by_name("Motor").is_some());
    }

    #[test]
    fn test_serde_json_round_trip() {
        let net = sample_network();
        let json = serde_json::to_string(&net).unwrap();
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(net, back);
    }
}
