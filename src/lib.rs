//! # can_network
//!
//! Rust object model and serializer for **automotive CAN** network
//! descriptions (`.dbc`).
//!
//! ## Highlights
//! - **Complete model**: [`Network`] aggregates nodes, messages, signals,
//!   value tables, environment variables and the three-level attribute
//!   system (definitions, defaults, assignments).
//! - **Deterministic serialization**: [`serialize_network`] emits the
//!   canonical DBC section order with stable, sorted iteration, so equal
//!   networks produce byte-identical text.
//! - **Merging**: [`Network::merge`] folds a donor network into a receiver
//!   with receiver-wins collision handling and a [`MergeReport`] of what
//!   was skipped.
//! - **Fast lookups**: paired accessors (`get_message_by_id/_mut`,
//!   `get_node_by_name`, ...) plus restartable ordered `iter_*()` views.
//! - **Byte-order primitives**: width-specific [`byte_order`] reversal
//!   helpers for 2..=8 byte payloads.
//!

pub mod byte_order;
pub mod save;
#[doc(hidden)]
pub mod types;

// Top-level re-exports (appear under Crate Items → Structs)
#[doc(inline)]
pub use crate::types::{
    attributes::{AttrObject, AttrValueType, AttributeDefinition, AttributeValue},
    bit_timing::BitTiming,
    env_var::{AccessType, EnvVarType, EnvironmentVariable},
    errors::DbcSaveError,
    message::Message,
    network::{MergeReport, Network},
    node::Node,
    signal::{Endianness, ExtendedValueType, Signal, Signess},
    value_table::{SignalType, ValueTable},
};

// Helper re-exports for direct use without the module path
pub use crate::byte_order::reverse_bytes;
pub use crate::save::{save_to_file, serialize_network};
