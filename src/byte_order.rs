//! Byte-order reversal primitives for big-endian (Motorola) signal fields.
//!
//! A Motorola signal packed into a CAN payload spans its bytes in the
//! opposite order of the little-endian accumulator used during extraction
//! and encoding. These helpers reverse the order of the low N bytes of a
//! `u64` for N in `2..=8`. The caller guarantees that only the low N bytes
//! carry meaningful data; bytes above N are masked out.
//!
//! Applying the same reversal twice returns the original value.

/// Reverses the order of the low 2 bytes of `val`.
#[inline]
pub fn reverse_bytes_2(val: u64) -> u64 {
    ((val & 0xFF) << 8) | ((val & 0xFF00) >> 8)
}

/// Reverses the order of the low 3 bytes of `val`.
#[inline]
pub fn reverse_bytes_3(val: u64) -> u64 {
    ((val & 0xFF) << 16) | (val & 0xFF00) | ((val & 0xFF_0000) >> 16)
}

/// Reverses the order of the low 4 bytes of `val`.
#[inline]
pub fn reverse_bytes_4(val: u64) -> u64 {
    ((val & 0xFF) << 24)
        | ((val & 0xFF00) << 8)
        | ((val & 0xFF_0000) >> 8)
        | ((val & 0xFF00_0000) >> 24)
}

/// Reverses the order of the low 5 bytes of `val`.
#[inline]
pub fn reverse_bytes_5(val: u64) -> u64 {
    ((val & 0xFF) << 32)
        | ((val & 0xFF00) << 16)
        | (val & 0xFF_0000)
        | ((val & 0xFF00_0000) >> 16)
        | ((val & 0xFF_0000_0000) >> 32)
}

/// Reverses the order of the low 6 bytes of `val`.
#[inline]
pub fn reverse_bytes_6(val: u64) -> u64 {
    ((val & 0xFF) << 40)
        | ((val & 0xFF00) << 24)
        | ((val & 0xFF_0000) << 8)
        | ((val & 0xFF00_0000) >> 8)
        | ((val & 0xFF_0000_0000) >> 24)
        | ((val & 0xFF00_0000_0000) >> 40)
}

/// Reverses the order of the low 7 bytes of `val`.
#[inline]
pub fn reverse_bytes_7(val: u64) -> u64 {
    ((val & 0xFF) << 48)
        | ((val & 0xFF00) << 32)
        | ((val & 0xFF_0000) << 16)
        | (val & 0xFF00_0000)
        | ((val & 0xFF_0000_0000) >> 16)
        | ((val & 0xFF00_0000_0000) >> 32)
        | ((val & 0xFF_0000_0000_0000) >> 48)
}

/// Reverses the order of all 8 bytes of `val`.
#[inline]
pub fn reverse_bytes_8(val: u64) -> u64 {
    val.swap_bytes()
}

/// Reverses the order of the low `n_bytes` bytes of `val`.
///
/// `n_bytes` is the byte width of the signal field (`1..=8`); widths of 0 or
/// 1 have nothing to reverse and return `val` unchanged, as do widths above
/// 8.
#[inline]
pub fn reverse_bytes(val: u64, n_bytes: u8) -> u64 {
    match n_bytes {
        2 => reverse_bytes_2(val),
        3 => reverse_bytes_3(val),
        4 => reverse_bytes_4(val),
        5 => reverse_bytes_5(val),
        6 => reverse_bytes_6(val),
        7 => reverse_bytes_7(val),
        8 => reverse_bytes_8(val),
        _ => val,
    }
}
