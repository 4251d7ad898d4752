use serde::{Deserialize, Serialize};

/// Bus bit-timing parameters (DBC `BS_` section).
///
/// An all-zero value means the section was left unset in the source file and
/// serializes back as a bare `BS_:` line.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BitTiming {
    /// Baud rate in bit/s. `0` if not specified.
    pub baudrate: u64,
    /// Bit timing register 1.
    pub btr1: u64,
    /// Bit timing register 2.
    pub btr2: u64,
}

impl BitTiming {
    /// `true` when any timing field was actually set.
    pub fn is_set(&self) -> bool {
        self.baudrate != 0 || self.btr1 != 0 || self.btr2 != 0
    }

    /// Resets all fields to their default values.
    pub fn clear(&mut self) {
        *self = BitTiming::default();
    }
}
