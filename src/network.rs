mod v4;
mod v6;

use std::fmt;
use std::ops::Sub;

use super::address::{Address, AddressBuffer};
use super::error::{Error, Result};

pub use self::v4::{Addresses4, Net4};
pub use self::v6::{Addresses6, Net6};

/// Which reserved address a step landed on. Only IPv4 blocks of /30 and shorter have any.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Reserved {
	Network,
	Broadcast,
}

/// The result of stepping to a neighbouring address inside a block.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[must_use]
pub struct Step<A> {
	pub address: A,
	pub reserved: Option<Reserved>,
}

impl<A> Step<A> {
	pub(crate) fn to(address: A) -> Self {
		Self {
			address,
			reserved: None,
		}
	}

	/// The address, or the matching error if it’s reserved.
	pub fn into_usable(self) -> Result<A> {
		match self.reserved {
			None => Ok(self.address),
			Some(Reserved::Network) => Err(Error::NetworkAddress),
			Some(Reserved::Broadcast) => Err(Error::BroadcastAddress),
		}
	}
}

/// The operations shared by IPv4 and IPv6 blocks.
pub trait Block: Copy + Ord + fmt::Debug + fmt::Display + Into<Net> {
	type Address: AddressBuffer;
	type Count: Copy + Ord + fmt::Debug;
	type Addresses: Iterator<Item = Self::Address>;

	/// The plain block (no hostmask) of `prefix` bits containing `address`.
	fn containing(address: Self::Address, prefix: u8) -> Result<Self>;

	/// A block of the same kind as this one, keeping anything besides the prefix (such as a hostmask), containing
	/// `address`.
	fn new_at(&self, address: Self::Address, prefix: u8) -> Result<Self>;

	fn prefix_len(&self) -> u8;

	/// The lowest address in the block.
	fn network_address(&self) -> Self::Address;

	/// The highest address under the netmask. For IPv6 there’s no broadcast as such, and this ignores any hostmask.
	fn broadcast_address(&self) -> Self::Address;

	/// The first usable address.
	fn first_address(&self) -> Self::Address;

	/// The last usable address.
	fn last_address(&self) -> Self::Address;

	fn contains(&self, address: &Self::Address) -> bool;

	fn count(&self) -> Self::Count;

	/// Lists `size` usable addresses (all that remain if `size` is zero) starting `offset` addresses into the block.
	/// An offset past the end gives an empty list.
	fn enumerate(&self, offset: Self::Count, size: Self::Count) -> Self::Addresses;

	fn next_address(&self, address: Self::Address) -> Result<Step<Self::Address>>;

	fn previous_address(&self, address: Self::Address) -> Result<Step<Self::Address>>;

	fn contains_net(&self, other: &Self) -> bool {
		self.prefix_len() <= other.prefix_len() && self.contains(&other.network_address())
	}

	/// Splits the block into consecutive blocks of `prefix` bits.
	fn subnet(&self, prefix: u8) -> Result<Subnets<Self>> {
		if prefix < self.prefix_len() {
			return Err(Error::BadMaskLength);
		}

		let first = self.new_at(self.network_address(), prefix)?;

		Ok(Subnets {
			next: Some(first),
			end: self.broadcast_address(),
		})
	}

	/// The enclosing block of `prefix` bits.
	fn supernet(&self, prefix: u8) -> Result<Self> {
		if prefix > self.prefix_len() {
			return Err(Error::BadMaskLength);
		}

		self.new_at(self.network_address(), prefix)
	}

	/// The block of `prefix` bits starting just past this one. A shorter prefix can give a block that overlaps this one.
	/// At the top of the address space this is the block containing the last address.
	fn next_net(&self, prefix: u8) -> Result<Self> {
		let broadcast = self.broadcast_address();
		self.new_at(broadcast.checked_next().unwrap_or(broadcast), prefix)
	}

	/// The block of `prefix` bits ending just before this one. A shorter prefix can give a block that overlaps this one.
	fn previous_net(&self, prefix: u8) -> Result<Self> {
		let network = self.network_address();
		self.new_at(network.checked_previous().unwrap_or(network), prefix)
	}
}

/// How many addresses [`Block::enumerate`] lists for a block of `count` addresses.
fn enumeration_length<C>(count: C, offset: C, size: C) -> C
where
	C: Copy + Default + Ord + Sub<Output = C>,
{
	if offset >= count {
		return C::default();
	}

	let available = count - offset;

	if size == C::default() || size > available {
		available
	} else {
		size
	}
}

/// Consecutive blocks of one prefix length, from [`Block::subnet`].
#[derive(Clone, Debug)]
pub struct Subnets<N: Block> {
	next: Option<N>,
	end: N::Address,
}

impl<N: Block> Iterator for Subnets<N> {
	type Item = N;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next.take()?;
		let broadcast = current.broadcast_address();

		if broadcast < self.end {
			self.next =
				broadcast.checked_next()
					.and_then(|address| current.new_at(address, current.prefix_len()).ok());
		}

		log::trace!("subnet {}", current);

		Some(current)
	}
}

/// A block of either family.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Net {
	V4(Net4),
	V6(Net6),
}

impl Net {
	pub fn version(&self) -> u8 {
		match self {
			Self::V4(_) => 4,
			Self::V6(_) => 6,
		}
	}

	pub fn prefix_len(&self) -> u8 {
		match self {
			Self::V4(net) => net.prefix_len(),
			Self::V6(net) => net.prefix_len(),
		}
	}

	pub fn network_address(&self) -> Address {
		match self {
			Self::V4(net) => net.network_address().into(),
			Self::V6(net) => net.network_address().into(),
		}
	}

	pub fn broadcast_address(&self) -> Address {
		match self {
			Self::V4(net) => net.broadcast_address().into(),
			Self::V6(net) => net.broadcast_address().into(),
		}
	}

	pub fn first_address(&self) -> Address {
		match self {
			Self::V4(net) => net.first_address().into(),
			Self::V6(net) => net.first_address().into(),
		}
	}

	pub fn last_address(&self) -> Address {
		match self {
			Self::V4(net) => net.last_address().into(),
			Self::V6(net) => net.last_address().into(),
		}
	}

	/// Whether `address` is in this block. Always false across families.
	pub fn contains(&self, address: &Address) -> bool {
		match (self, address) {
			(Self::V4(net), Address::V4(address)) => net.contains(address),
			(Self::V6(net), Address::V6(address)) => net.contains(address),
			_ => false,
		}
	}

	pub fn contains_net(&self, other: &Net) -> bool {
		match (self, other) {
			(Self::V4(net), Self::V4(other)) => net.contains_net(other),
			(Self::V6(net), Self::V6(other)) => net.contains_net(other),
			_ => false,
		}
	}
}

impl From<Net4> for Net {
	fn from(net: Net4) -> Self {
		Self::V4(net)
	}
}

impl From<Net6> for Net {
	fn from(net: Net6) -> Self {
		Self::V6(net)
	}
}

impl fmt::Display for Net {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::V4(net) => fmt::Display::fmt(net, f),
			Self::V6(net) => fmt::Display::fmt(net, f),
		}
	}
}

#[cfg(test)]
mod tests;
