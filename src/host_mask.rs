use super::address::{mask, Address6, V6_BITS, V6_BYTES};
use super::boundary::{decrement_boundary_byte, decrement_unmasked_bytes, increment_boundary_byte, increment_unmasked_bytes};
use super::error::{Error, Result};

/// A mask over the low-order bits of an IPv6 address, reserving them for something other than allocation (RFC 4291
/// interface identifiers, for example). Whole bytes are masked from the right, but within the boundary byte the mask
/// bits are taken from the left, so the free bits of that byte count upwards from zero:
///
/// | mask bits | boundary byte | free values |
/// |-----------|---------------|-------------|
/// | 56        | `0xff`        | 0           |
/// | 57        | `0x80`        | 0–127       |
/// | 60        | `0xf0`        | 0–15        |
/// | 63        | `0xfe`        | 0–1         |
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HostMask([u8; V6_BYTES]);

/// The byte in which a hostmask begins, and its position (0 being the most significant byte).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BoundaryByte {
	pub value: u8,
	pub index: usize,
}

impl BoundaryByte {
	/// The largest value the free bits of this byte can hold.
	pub fn max(&self) -> u8 {
		0xff - self.value
	}
}

impl HostMask {
	pub fn new(bits: u8) -> Result<Self> {
		if bits > V6_BITS {
			return Err(Error::BadMaskLength);
		}

		let mut result = [0; V6_BYTES];
		let mut remaining = bits;

		for byte in result.iter_mut().rev() {
			if remaining < 8 {
				*byte = mask(remaining);
				break;
			}

			*byte = 0xff;
			remaining -= 8;
		}

		Ok(Self(result))
	}

	pub const fn octets(&self) -> [u8; V6_BYTES] {
		self.0
	}

	/// The number of masked bits.
	pub fn size(&self) -> u8 {
		self.0.iter().map(|byte| byte.count_ones() as u8).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.0 == [0; V6_BYTES]
	}

	/// The most significant byte with any masked bits. Lengths that are a multiple of 8 give a fully masked byte (`0xff`)
	/// whose only free value is zero. `None` when nothing is masked.
	pub fn boundary_byte(&self) -> Option<BoundaryByte> {
		let bits = self.size();

		if bits == 0 {
			return None;
		}

		let index = V6_BYTES - 1 - usize::from((bits - 1) / 8);

		Some(BoundaryByte {
			value: self.0[index],
			index,
		})
	}

	/// Whether no masked bits of `address` are in use.
	pub fn permits(&self, address: &Address6) -> bool {
		match self.boundary_byte() {
			None => true,
			Some(boundary) =>
				address.0[boundary.index] <= boundary.max()
					&& address.0[boundary.index + 1..].iter().all(|&byte| byte == 0),
		}
	}

	/// Increments the free bits of `address` by one, carrying across masked bits.
	pub fn next_address(&self, address: Address6) -> Result<Address6> {
		let mut octets = address.0;

		for (byte, &mask_byte) in octets.iter_mut().zip(self.0.iter()).rev() {
			if mask_byte == 0xff {
				if *byte != 0 {
					return Err(Error::AddressOutOfRange);
				}

				continue;
			}

			if (*byte | mask_byte) == 0xff {
				*byte = 0;
				continue;
			}

			*byte += 1;
			return Ok(Address6(octets));
		}

		Err(Error::AddressOutOfRange)
	}

	/// Decrements the free bits of `address` by one, borrowing across masked bits. A byte that underflows is reset to the
	/// largest value its free bits can hold, not to `0xff`.
	pub fn previous_address(&self, address: Address6) -> Result<Address6> {
		let mut octets = address.0;

		for (byte, &mask_byte) in octets.iter_mut().zip(self.0.iter()).rev() {
			if mask_byte == 0xff {
				if *byte != 0 {
					return Err(Error::AddressOutOfRange);
				}

				continue;
			}

			if *byte == 0 {
				*byte = 0xff - mask_byte;
				continue;
			}

			*byte -= 1;
			return Ok(Address6(octets));
		}

		Err(Error::AddressOutOfRange)
	}

	/// Adds `count` to the free bits of `address`.
	pub fn increment(&self, address: Address6, count: u128) -> Result<Address6> {
		let boundary =
			match self.boundary_byte() {
				Some(boundary) => boundary,
				None => return address.checked_add(count).ok_or(Error::AddressOutOfRange),
			};

		self.check(&boundary, &address)?;

		let (carry, value) = increment_boundary_byte(boundary.value, address.0[boundary.index], count)
			.ok_or(Error::AddressOutOfRange)?;
		let unmasked = increment_unmasked_bytes(&address.0[..boundary.index], carry)
			.ok_or(Error::AddressOutOfRange)?;

		Ok(assemble(&unmasked, value))
	}

	/// Subtracts `count` from the free bits of `address`.
	pub fn decrement(&self, address: Address6, count: u128) -> Result<Address6> {
		let boundary =
			match self.boundary_byte() {
				Some(boundary) => boundary,
				None => return address.checked_sub(count).ok_or(Error::AddressOutOfRange),
			};

		self.check(&boundary, &address)?;

		let (borrow, value) = decrement_boundary_byte(boundary.value, address.0[boundary.index], count)
			.ok_or(Error::AddressOutOfRange)?;
		let unmasked = decrement_unmasked_bytes(&address.0[..boundary.index], borrow)
			.ok_or(Error::AddressOutOfRange)?;

		Ok(assemble(&unmasked, value))
	}

	fn check(&self, boundary: &BoundaryByte, address: &Address6) -> Result<()> {
		// A boundary in the first byte leaves nothing to carry into.
		if boundary.index == 0 {
			return Err(Error::BadMaskLength);
		}

		if !self.permits(address) {
			return Err(Error::AddressOutOfRange);
		}

		Ok(())
	}
}

/// Rebuilds an address from its unmasked bytes and boundary byte, leaving the fully masked bytes zero.
fn assemble(unmasked: &[u8], boundary_value: u8) -> Address6 {
	let mut octets = [0; V6_BYTES];
	octets[..unmasked.len()].copy_from_slice(unmasked);
	octets[unmasked.len()] = boundary_value;
	Address6(octets)
}
