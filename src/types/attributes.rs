use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of object an attribute definition applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrObject {
    #[default]
    Network,
    Node,
    Message,
    Signal,
    EnvironmentVariable,
}

impl fmt::Display for AttrObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttrObject::Network => "Network",
            AttrObject::Node => "Node",
            AttrObject::Message => "Message",
            AttrObject::Signal => "Signal",
            AttrObject::EnvironmentVariable => "EnvironmentVariable",
        })
    }
}

/// Value type and constraints declared by a `BA_DEF_` line.
///
/// The DBC attribute grammar is a closed set, so the constraints live inside
/// the variant instead of a bag of optional fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum AttrValueType {
    Int { min: i64, max: i64 },
    Hex { min: u64, max: u64 },
    Float { min: f64, max: f64 },
    #[default]
    Str,
    Enum(Vec<String>),
}

/// Declaration of an attribute: name, target object kind and value type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Attribute name.
    pub name: String,
    /// Object kind this attribute attaches to.
    pub object_type: AttrObject,
    /// Value type with its constraints.
    pub value_type: AttrValueType,
}

/// Concrete attribute value stored on network/node/message/signal/env-var
/// entities. The owning map key carries the attribute name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Str(String),
    Int(i64),
    Hex(u64), // stored as a number, proper display later.
    Float(f64),
    Enum(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Str(s) => write!(f, "{}", s),
            AttributeValue::Int(i) => write!(f, "{}", i),
            AttributeValue::Hex(h) => write!(f, "0x{:X}", h),
            AttributeValue::Float(x) => {
                // compact print, no trailing zeros
                let mut s = format!("{}", x);
                if s.contains('.') {
                    while s.ends_with('0') {
                        s.pop();
                    }
                    if s.ends_with('.') {
                        s.pop();
                    }
                }
                write!(f, "{}", s)
            }
            AttributeValue::Enum(s) => write!(f, "{}", s),
        }
    }
}
