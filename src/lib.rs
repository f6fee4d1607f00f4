//! Exact address-space arithmetic for IPv4 and IPv6.
//!
//! Blocks are described by a netmask and, for IPv6, an optional hostmask that reserves the low-order bits of every
//! address. Counting, enumeration and stepping all skip the reserved bits, so a `/56` with a `/64` hostmask behaves
//! like a pool of 256 `/64` allocations:
//!
//! ```
//! use netblock::{Block, Net6};
//!
//! let pool = Net6::new("2001:db8::".parse().unwrap(), 56, 64).unwrap();
//! assert_eq!(pool.count(), 256);
//!
//! let second = pool.enumerate(1, 1).next().unwrap();
//! assert_eq!(second.to_string(), "2001:db8:0:1::");
//! ```
//!
//! All of the arithmetic is checked. Stepping past either end of a block or the address space gives an [`Error`]
//! rather than wrapping around.

pub mod address;
pub mod boundary;
mod error;
pub mod host_mask;
pub mod network;
pub mod range;

pub use self::address::{Address, Address4, Address6, AddressBuffer};
pub use self::error::{Error, Result};
pub use self::host_mask::{BoundaryByte, HostMask};
pub use self::network::{Addresses4, Addresses6, Block, Net, Net4, Net6, Reserved, Step, Subnets};
pub use self::range::{cover_range, find_between};
