use crate::range::Range;
use crate::rule::{DIMENSIONS, DST_ADDR, DST_PORT, PROTO, SRC_ADDR, SRC_PORT};

/// A concrete 5-tuple packet header demonstrating a property failure.
///
/// Defined as the zero 5-tuple immediately after construction or `clear`,
/// and whenever no failing `verify` has occurred yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Witness {
    pub values: [u32; DIMENSIONS],
}

impl Witness {
    pub fn zero() -> Self {
        Self::default()
    }

    /// The canonical witness for a mismatching slice-tuple: the lower bound
    /// of each per-dimension slice.
    pub fn from_slice_tuple(slice_tuple: &[Range; DIMENSIONS]) -> Self {
        let mut values = [0u32; DIMENSIONS];
        for (d, slice) in slice_tuple.iter().enumerate() {
            values[d] = slice.lo;
        }
        Self { values }
    }

    pub fn src_addr(&self) -> u32 {
        self.values[SRC_ADDR]
    }

    pub fn src_port(&self) -> u32 {
        self.values[SRC_PORT]
    }

    pub fn dst_addr(&self) -> u32 {
        self.values[DST_ADDR]
    }

    pub fn dst_port(&self) -> u32 {
        self.values[DST_PORT]
    }

    pub fn proto(&self) -> u32 {
        self.values[PROTO]
    }
}
