use std::fmt;

use super::super::address::{Address4, AddressBuffer, V4_BITS, V4_BYTES};
use super::super::error::{Error, Result};
use super::{enumeration_length, Block, Reserved, Step};

/// An IPv4 block. The network and broadcast addresses aren’t usable, except in /31 (RFC 3021) and /32 blocks.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Net4 {
	/// The network address, i.e. the one ending with `32 - prefix` zero bits.
	base: Address4,
	prefix: u8,
}

impl Net4 {
	pub fn new(address: Address4, prefix: u8) -> Result<Self> {
		if prefix > V4_BITS {
			return Err(Error::BadMaskLength);
		}

		Ok(Self {
			base: address.prefix(prefix),
			prefix,
		})
	}

	pub fn netmask(&self) -> Address4 {
		Address4([0xff; V4_BYTES]).prefix(self.prefix)
	}

	/// The inverse of the netmask.
	pub fn wildcard(&self) -> Address4 {
		Address4([0; V4_BYTES]).host_bits_set(self.prefix)
	}

	fn host_bits(&self) -> u8 {
		V4_BITS - self.prefix
	}

	/// Whether the network and broadcast addresses are excluded from use.
	fn has_reserved(&self) -> bool {
		self.host_bits() > 1
	}
}

impl Block for Net4 {
	type Address = Address4;
	type Count = u32;
	type Addresses = Addresses4;

	fn containing(address: Address4, prefix: u8) -> Result<Self> {
		Self::new(address, prefix)
	}

	fn new_at(&self, address: Address4, prefix: u8) -> Result<Self> {
		Self::new(address, prefix)
	}

	fn prefix_len(&self) -> u8 {
		self.prefix
	}

	fn network_address(&self) -> Address4 {
		self.base
	}

	fn broadcast_address(&self) -> Address4 {
		self.base.host_bits_set(self.prefix)
	}

	fn first_address(&self) -> Address4 {
		if self.has_reserved() {
			self.base.checked_next().unwrap_or(self.base)
		} else {
			self.base
		}
	}

	fn last_address(&self) -> Address4 {
		let broadcast = self.broadcast_address();

		if self.has_reserved() {
			broadcast.checked_previous().unwrap_or(broadcast)
		} else {
			broadcast
		}
	}

	fn contains(&self, address: &Address4) -> bool {
		address.prefix(self.prefix) == self.base
	}

	/// The number of usable addresses: 2 for a /31 and 1 for a /32.
	fn count(&self) -> u32 {
		match self.host_bits() {
			0 => 1,
			1 => 2,
			bits => (u32::MAX >> (V4_BITS - bits)) - 1,
		}
	}

	fn enumerate(&self, offset: u32, size: u32) -> Addresses4 {
		let remaining = enumeration_length(self.count(), offset, size);

		Addresses4 {
			next: self.first_address().checked_add(offset).filter(|_| remaining > 0),
			remaining,
		}
	}

	/// The address after `address`, flagged if it’s the broadcast address.
	fn next_address(&self, address: Address4) -> Result<Step<Address4>> {
		if !self.contains(&address) {
			return Err(Error::AddressOutOfRange);
		}

		let next = address.checked_next()
			.filter(|next| self.contains(next))
			.ok_or(Error::AddressAtEndOfRange)?;

		Ok(Step {
			address: next,
			reserved: Some(Reserved::Broadcast).filter(|_| self.has_reserved() && next == self.broadcast_address()),
		})
	}

	/// The address before `address`, flagged if it’s the network address.
	fn previous_address(&self, address: Address4) -> Result<Step<Address4>> {
		if !self.contains(&address) {
			return Err(Error::AddressOutOfRange);
		}

		let previous = address.checked_previous()
			.filter(|previous| self.contains(previous))
			.ok_or(Error::AddressAtEndOfRange)?;

		Ok(Step {
			address: previous,
			reserved: Some(Reserved::Network).filter(|_| self.has_reserved() && previous == self.base),
		})
	}
}

impl fmt::Display for Net4 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}/{}", self.base, self.prefix)
	}
}

/// The usable addresses of an IPv4 block, from [`Block::enumerate`].
#[derive(Clone, Debug)]
pub struct Addresses4 {
	next: Option<Address4>,
	remaining: u32,
}

impl Iterator for Addresses4 {
	type Item = Address4;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}

		let current = self.next?;
		self.remaining -= 1;
		self.next = current.checked_next();

		Some(current)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.remaining as usize;
		(remaining, Some(remaining))
	}
}
