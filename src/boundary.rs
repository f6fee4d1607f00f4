//! Carry-aware arithmetic for hostmasked addresses.
//!
//! The boundary byte is the byte a hostmask starts in. Its free bits count from zero up to `0xff - mask`, so it behaves
//! like a digit with `256 - mask` values in a mixed-radix number whose higher digits are the plain bytes above it (the
//! “unmasked bytes”).

use std::convert::TryFrom;

/// The number of values the free bits of a boundary byte with this mask can hold.
fn capacity(mask: u8) -> u128 {
	256 - u128::from(mask)
}

/// Adds `count` to the free bits of a boundary byte, returning the carry into the next more significant byte and the
/// new value of this one. `None` if `value` doesn’t fit in the free bits.
pub fn increment_boundary_byte(mask: u8, value: u8, count: u128) -> Option<(u128, u8)> {
	let max = capacity(mask);
	let value = u128::from(value);

	if value >= max {
		return None;
	}

	let sum = count % max + value;
	let carry = (count / max).saturating_add(sum / max);

	Some((carry, (sum % max) as u8))
}

/// Subtracts `count` from the free bits of a boundary byte, returning the borrow from the next more significant byte
/// and the new value of this one. `None` if `value` doesn’t fit in the free bits.
pub fn decrement_boundary_byte(mask: u8, value: u8, count: u128) -> Option<(u128, u8)> {
	let max = capacity(mask);
	let value = u128::from(value);

	if value >= max {
		return None;
	}

	let borrow = count / max;
	let remainder = count % max;

	if remainder > value {
		Some((borrow + 1, (value + max - remainder) as u8))
	} else {
		Some((borrow, (value - remainder) as u8))
	}
}

/// Adds `count` to a big-endian unsigned integer, keeping its width. `None` if the sum doesn’t fit.
pub fn increment_unmasked_bytes(bytes: &[u8], count: u128) -> Option<Vec<u8>> {
	let value = from_be_bytes(bytes)?;
	to_be_bytes(value.checked_add(count)?, bytes.len())
}

/// Subtracts `count` from a big-endian unsigned integer, keeping its width. `None` on underflow.
pub fn decrement_unmasked_bytes(bytes: &[u8], count: u128) -> Option<Vec<u8>> {
	let value = from_be_bytes(bytes)?;
	to_be_bytes(value.checked_sub(count)?, bytes.len())
}

fn from_be_bytes(bytes: &[u8]) -> Option<u128> {
	if bytes.len() > 16 {
		return None;
	}

	Some(bytes.iter().fold(0, |value, &byte| value << 8 | u128::from(byte)))
}

fn to_be_bytes(value: u128, width: usize) -> Option<Vec<u8>> {
	let bits = u32::try_from(8 * width).ok()?;

	if value.checked_shr(bits).unwrap_or(0) != 0 {
		return None;
	}

	Some(value.to_be_bytes()[16 - width..].to_vec())
}
