// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Unsigned integer fields.
//!
//! Flow text writes numeric fields either in decimal (`80`) or as a `0x` prefixed hex literal
//! (`0x0800`).  Signs, embedded whitespace and empty strings are never legal.

/// Errors which may occur when parsing an unsigned integer field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseUintError {
    /// Nothing to parse
    #[error("empty numeric value")]
    Empty,
    /// Not a decimal or `0x` hex literal
    #[error("'{0}' is not an unsigned integer")]
    NotANumber(String),
    /// A well formed number which does not fit in the field
    #[error("{value} is out of range (max {max})")]
    OutOfRange {
        /// The offending literal, as written
        value: String,
        /// The largest legal value of the field
        max: u64,
    },
}

/// An unsigned integer type which may be the target of [`parse_uint`].
pub trait Uint: Copy + TryFrom<u64> {
    /// The largest value the type may hold, widened to `u64`.
    const MAX: u64;
}

macro_rules! uint_impl {
    ($($t:ty),*) => {
        $(
            impl Uint for $t {
                #[allow(clippy::cast_lossless)]
                const MAX: u64 = <$t>::MAX as u64;
            }
        )*
    };
}

uint_impl!(u8, u16, u32, u64);

/// Parse a decimal or `0x` prefixed hexadecimal literal into an unsigned integer of type `T`.
///
/// # Errors
///
/// Returns a [`ParseUintError`] if the literal is empty, is not made only of digits of its radix,
/// or does not fit in `T`.
pub fn parse_uint<T: Uint>(value: &str) -> Result<T, ParseUintError> {
    if value.is_empty() {
        return Err(ParseUintError::Empty);
    }
    let (digits, radix) = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ParseUintError::NotANumber(value.to_string()));
    }
    let out_of_range = || ParseUintError::OutOfRange {
        value: value.to_string(),
        max: T::MAX,
    };
    // only overflow can fail past the digit check
    let wide = u64::from_str_radix(digits, radix).map_err(|_| out_of_range())?;
    T::try_from(wide).map_err(|_| out_of_range())
}
