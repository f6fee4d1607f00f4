use std::convert::TryFrom;
use std::fmt;

use super::super::address::{Address6, AddressBuffer, V6_BITS, V6_BYTES};
use super::super::error::{Error, Result};
use super::super::host_mask::HostMask;
use super::{enumeration_length, Block, Step};

/// An IPv6 block, optionally with a hostmask reserving its low-order bits. Allocation then only walks the addresses
/// whose masked bits are zero.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Net6 {
	base: Address6,
	prefix: u8,
	hostmask: HostMask,
}

impl Net6 {
	/// Fails with [`Error::BadMaskLength`] if either mask is too long, if together they leave no free bits, or if the
	/// netmask reaches into the partially masked byte.
	pub fn new(address: Address6, prefix: u8, hostmask_bits: u8) -> Result<Self> {
		if prefix > V6_BITS {
			return Err(Error::BadMaskLength);
		}

		let hostmask = HostMask::new(hostmask_bits)?;

		if let Some(boundary) = hostmask.boundary_byte() {
			let overlapping = u16::from(prefix) + u16::from(hostmask_bits) >= u16::from(V6_BITS);
			let split = boundary.value != 0xff && usize::from(prefix) > 8 * boundary.index;

			if overlapping || split || boundary.index == 0 {
				log::debug!("rejecting /{} with a /{} hostmask", prefix, hostmask_bits);
				return Err(Error::BadMaskLength);
			}
		}

		Ok(Self {
			base: address.prefix(prefix),
			prefix,
			hostmask,
		})
	}

	pub fn hostmask(&self) -> HostMask {
		self.hostmask
	}

	pub fn netmask(&self) -> Address6 {
		Address6([0xff; V6_BYTES]).prefix(self.prefix)
	}

	/// Whether `address` is in the block and leaves the hostmasked bits clear.
	pub fn controls(&self, address: &Address6) -> bool {
		self.contains(address) && self.hostmask.permits(address)
	}

	fn free_bits(&self) -> u8 {
		V6_BITS - self.prefix - self.hostmask.size()
	}
}

impl Block for Net6 {
	type Address = Address6;
	type Count = u128;
	type Addresses = Addresses6;

	fn containing(address: Address6, prefix: u8) -> Result<Self> {
		Self::new(address, prefix, 0)
	}

	fn new_at(&self, address: Address6, prefix: u8) -> Result<Self> {
		Self::new(address, prefix, self.hostmask.size())
	}

	fn prefix_len(&self) -> u8 {
		self.prefix
	}

	fn network_address(&self) -> Address6 {
		self.base
	}

	fn broadcast_address(&self) -> Address6 {
		self.base.host_bits_set(self.prefix)
	}

	fn first_address(&self) -> Address6 {
		self.base
	}

	/// The highest address with the hostmasked bits clear.
	fn last_address(&self) -> Address6 {
		let broadcast = self.broadcast_address();

		match self.hostmask.boundary_byte() {
			None => broadcast,
			Some(boundary) => {
				let mut octets = [0; V6_BYTES];
				octets[..boundary.index].copy_from_slice(&broadcast.0[..boundary.index]);
				octets[boundary.index] = boundary.max();
				Address6(octets)
			}
		}
	}

	fn contains(&self, address: &Address6) -> bool {
		address.prefix(self.prefix) == self.base
	}

	/// The number of addresses with the hostmasked bits clear. The whole address space doesn’t fit in a `u128`, so
	/// `::/0` saturates.
	fn count(&self) -> u128 {
		match self.free_bits() {
			0 => 1,
			V6_BITS => u128::MAX,
			bits => 1 << bits,
		}
	}

	fn enumerate(&self, offset: u128, size: u128) -> Addresses6 {
		let remaining = enumeration_length(self.count(), offset, size);

		Addresses6 {
			hostmask: self.hostmask,
			next: self.hostmask.increment(self.base, offset).ok().filter(|_| remaining > 0),
			remaining,
		}
	}

	fn next_address(&self, address: Address6) -> Result<Step<Address6>> {
		if !self.controls(&address) {
			return Err(Error::AddressOutOfRange);
		}

		self.hostmask.next_address(address)
			.ok()
			.filter(|next| self.contains(next))
			.map(Step::to)
			.ok_or(Error::AddressAtEndOfRange)
	}

	fn previous_address(&self, address: Address6) -> Result<Step<Address6>> {
		if !self.controls(&address) {
			return Err(Error::AddressOutOfRange);
		}

		self.hostmask.previous_address(address)
			.ok()
			.filter(|previous| self.contains(previous))
			.map(Step::to)
			.ok_or(Error::AddressAtEndOfRange)
	}
}

impl fmt::Display for Net6 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}/{}", self.base, self.prefix)
	}
}

/// The addresses of an IPv6 block, stepping over hostmasked bits, from [`Block::enumerate`].
#[derive(Clone, Debug)]
pub struct Addresses6 {
	hostmask: HostMask,
	next: Option<Address6>,
	remaining: u128,
}

impl Iterator for Addresses6 {
	type Item = Address6;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}

		let current = self.next?;
		self.remaining -= 1;
		self.next = self.hostmask.next_address(current).ok();

		Some(current)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		if self.next.is_none() {
			return (0, Some(0));
		}

		match usize::try_from(self.remaining) {
			Ok(remaining) => (remaining, Some(remaining)),
			Err(_) => (usize::MAX, None),
		}
	}
}
