use thiserror::Error;

/// Everything that can go wrong in address and block arithmetic. All of these are expected at the edges of a block and none are fatal.
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
pub enum Error {
	/// A step would leave the block. The input was inside it; the result wouldn’t be.
	#[error("proposed operation would cause the address to exit the block")]
	AddressAtEndOfRange,

	/// The input or the result lies outside the governing block or hostmask.
	#[error("address is not a part of this block")]
	AddressOutOfRange,

	#[error("illegal mask length")]
	BadMaskLength,

	/// The address is the broadcast address of an IPv4 block, which isn’t normally usable.
	#[error("address is the broadcast address of this block")]
	BroadcastAddress,

	/// The address is the network address of an IPv4 block, which isn’t normally usable.
	#[error("address is the network address of this block")]
	NetworkAddress,

	#[error("no block can be found between the supplied addresses")]
	NoValidRange,
}

pub type Result<T> = std::result::Result<T, Error>;
