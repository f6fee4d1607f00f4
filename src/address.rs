use std::fmt;
use std::net::{AddrParseError, IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use super::error::{Error, Result};

pub const V4_BYTES: usize = 4;
pub const V4_BITS: u8 = 8 * (V4_BYTES as u8);
pub const V6_BYTES: usize = 16;
pub const V6_BITS: u8 = 8 * (V6_BYTES as u8);

/// An IPv4 address as its four big-endian bytes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Address4(pub [u8; V4_BYTES]);

/// An IPv6 address as its sixteen big-endian bytes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Address6(pub [u8; V6_BYTES]);

/// An address of either family, for callers that only learn the family at run time.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Address {
	V4(Address4),
	V6(Address6),
}

/// Byte-level operations shared by both address families.
pub trait AddressBuffer: Copy + Ord + fmt::Debug + fmt::Display + Into<Address> {
	const BITS: u8;

	/// The address one higher, or `None` at the top of the address space.
	fn checked_next(self) -> Option<Self>;

	/// The address one lower, or `None` at the bottom of the address space.
	fn checked_previous(self) -> Option<Self>;

	/// Keeps the first `bits` bits and clears the rest. Lengths past `BITS` keep everything.
	fn prefix(self, bits: u8) -> Self;

	/// Keeps the first `bits` bits and sets the rest. Lengths past `BITS` keep everything.
	fn host_bits_set(self, bits: u8) -> Self;
}

macro_rules! impl_address_buffer {
	($typ:ident, $bytes:ident, $bits:ident, $repr:ty, $std:ty) => {
		impl $typ {
			pub const fn octets(&self) -> [u8; $bytes] {
				self.0
			}

			/// Returns a copy with one byte replaced, or [`Error::AddressOutOfRange`] if `index` is past the end.
			pub fn with_octet(self, index: usize, value: u8) -> Result<Self> {
				let mut octets = self.0;
				*octets.get_mut(index).ok_or(Error::AddressOutOfRange)? = value;
				Ok(Self(octets))
			}

			pub fn to_bits(self) -> $repr {
				<$repr>::from_be_bytes(self.0)
			}

			pub fn from_bits(bits: $repr) -> Self {
				Self(bits.to_be_bytes())
			}

			pub fn checked_add(self, count: $repr) -> Option<Self> {
				self.to_bits().checked_add(count).map(Self::from_bits)
			}

			pub fn checked_sub(self, count: $repr) -> Option<Self> {
				self.to_bits().checked_sub(count).map(Self::from_bits)
			}
		}

		impl AddressBuffer for $typ {
			const BITS: u8 = $bits;

			fn checked_next(self) -> Option<Self> {
				self.checked_add(1)
			}

			fn checked_previous(self) -> Option<Self> {
				self.checked_sub(1)
			}

			fn prefix(self, bits: u8) -> Self {
				let bits = bits.min($bits);
				let mut result = [0; $bytes];
				let wholes = usize::from(bits / 8);
				let remainder = bits % 8;
				result[..wholes].copy_from_slice(&self.0[..wholes]);

				if remainder != 0 {
					result[wholes] = self.0[wholes] & mask(remainder);
				}

				Self(result)
			}

			fn host_bits_set(self, bits: u8) -> Self {
				let bits = bits.min($bits);
				let mut result = self.0;
				let mut wholes = usize::from(bits / 8);
				let remainder = bits % 8;

				if remainder != 0 {
					result[wholes] |= !mask(remainder);
					wholes += 1;
				}

				for byte in &mut result[wholes..] {
					*byte = 0xff;
				}

				Self(result)
			}
		}

		impl From<$std> for $typ {
			fn from(address: $std) -> Self {
				Self(address.octets())
			}
		}

		impl From<$typ> for $std {
			fn from(address: $typ) -> Self {
				<$std>::from(address.0)
			}
		}

		impl FromStr for $typ {
			type Err = AddrParseError;

			fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
				s.parse::<$std>().map(Self::from)
			}
		}

		impl fmt::Display for $typ {
			fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
				write!(f, "{}", <$std>::from(*self))
			}
		}
	};
}

impl_address_buffer!(Address4, V4_BYTES, V4_BITS, u32, Ipv4Addr);
impl_address_buffer!(Address6, V6_BYTES, V6_BITS, u128, Ipv6Addr);

impl From<Address4> for Address {
	fn from(address: Address4) -> Self {
		Self::V4(address)
	}
}

impl From<Address6> for Address {
	fn from(address: Address6) -> Self {
		Self::V6(address)
	}
}

impl Address {
	pub fn version(&self) -> u8 {
		match self {
			Self::V4(_) => 4,
			Self::V6(_) => 6,
		}
	}

	pub fn octets(&self) -> &[u8] {
		match self {
			Self::V4(address) => &address.0,
			Self::V6(address) => &address.0,
		}
	}
}

impl From<IpAddr> for Address {
	fn from(address: IpAddr) -> Self {
		match address {
			IpAddr::V4(address) => Self::V4(address.into()),
			IpAddr::V6(address) => Self::V6(address.into()),
		}
	}
}

impl From<Address> for IpAddr {
	fn from(address: Address) -> Self {
		match address {
			Address::V4(address) => Self::V4(address.into()),
			Address::V6(address) => Self::V6(address.into()),
		}
	}
}

impl FromStr for Address {
	type Err = AddrParseError;

	/// Dotted-quad text becomes an IPv4 address and everything else IPv6, so `::ffff:a.b.c.d` stays IPv6.
	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		s.parse::<IpAddr>().map(Self::from)
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::V4(address) => fmt::Display::fmt(address, f),
			Self::V6(address) => fmt::Display::fmt(address, f),
		}
	}
}

/// A byte with the first n bits set.
pub(crate) const fn mask(n: u8) -> u8 {
	!(0xff_u8 >> n)
}
