//! Entity types composing the in-memory CAN network description.

pub mod attributes;
pub mod bit_timing;
pub mod env_var;
pub mod errors;
pub mod message;
pub mod network;
pub mod node;
pub mod signal;
pub mod value_table;
