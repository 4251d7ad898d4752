use crate::types::attributes::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Environment variable defined in the network (DBC `EV_` line).
#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    /// Variable name.
    pub name: String,
    /// Value kind.
    pub var_type: EnvVarType,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Unit of measure.
    pub unit_of_measurement: String,
    /// Initial value.
    pub initial_value: f64,
    /// Numeric variable ID.
    pub ev_id: u64,
    /// Access restriction.
    pub access_type: AccessType,
    /// Node names allowed to access the variable.
    pub access_nodes: Vec<String>,
    /// Associated comment (DBC `CM_ EV_` section).
    pub comment: String,
    /// Value-to-text mapping (DBC `VAL_` section).
    pub value_descriptions: BTreeMap<i64, String>,
    /// Payload size in bytes; meaningful only when `var_type` is `Data`
    /// (DBC `ENVVAR_DATA_` line).
    pub data_size: u64,

    // --- Environment Variable Attribute Entry ---
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl EnvironmentVariable {
    /// Resets all fields to their default values.
    pub fn clear(&mut self) {
        *self = EnvironmentVariable::default();
    }
}

/// Value kind of an environment variable.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum EnvVarType {
    #[default]
    Integer, // 0
    Float,  // 1
    String, // 2
    Data,   // declared as 0 plus an ENVVAR_DATA_ line
}

/// Access restriction of an environment variable (`DUMMY_NODE_VECTOR` codes).
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum AccessType {
    #[default]
    Unrestricted, // 0
    Read,      // 1
    Write,     // 2
    ReadWrite, // 3
}
