use crate::types::signal::{Endianness, Signess};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named value table (DBC `VAL_TABLE_` section).
///
/// A table without a signal type serializes as a `VAL_TABLE_` line; one with
/// a signal type serializes as a `SGTYPE_` line instead.
#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ValueTable {
    /// Table name.
    pub name: String,
    /// Value-to-text mapping.
    pub value_descriptions: BTreeMap<i64, String>,
    /// Optional associated signal type.
    pub signal_type: Option<SignalType>,
}

impl ValueTable {
    /// Resets all fields to their default values.
    pub fn clear(&mut self) {
        *self = ValueTable::default();
    }
}

/// Signal type associated with a value table (DBC `SGTYPE_` line).
#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SignalType {
    /// Signal type name.
    pub name: String,
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
    /// Default raw value.
    pub default_value: f64,
    /// Name of the value table this type belongs to.
    pub value_table: String,
}
