//! Fitting blocks to arbitrary address ranges.

use super::address::{Address, AddressBuffer};
use super::error::{Error, Result};
use super::network::{Block, Net, Net4, Net6};

/// Finds the largest block that starts at `first` and ends no later than `last`. Both ends are inclusive. The flag is
/// set when the block covers exactly `first..=last`.
///
/// Fails with [`Error::NoValidRange`] if the addresses are of different families or out of order.
pub fn find_between(first: Address, last: Address) -> Result<(Net, bool)> {
	match (first, last) {
		(Address::V4(first), Address::V4(last)) => fit::<Net4>(first, last).map(|(net, exact)| (net.into(), exact)),
		(Address::V6(first), Address::V6(last)) => fit::<Net6>(first, last).map(|(net, exact)| (net.into(), exact)),
		_ => Err(Error::NoValidRange),
	}
}

/// Splits `first..=last` into the shortest list of consecutive blocks that covers it exactly.
pub fn cover_range(first: Address, last: Address) -> Result<Vec<Net>> {
	let nets =
		match (first, last) {
			(Address::V4(first), Address::V4(last)) => cover::<Net4>(first, last)?.into_iter().map(Net::from).collect(),
			(Address::V6(first), Address::V6(last)) => cover::<Net6>(first, last)?.into_iter().map(Net::from).collect(),
			_ => return Err(Error::NoValidRange),
		};

	Ok(nets)
}

fn fit<N: Block>(first: N::Address, last: N::Address) -> Result<(N, bool)> {
	if first > last {
		return Err(Error::NoValidRange);
	}

	for prefix in 1..=<N::Address as AddressBuffer>::BITS {
		let candidate = N::containing(first, prefix)?;
		let network = candidate.network_address();
		let broadcast = candidate.broadcast_address();

		log::trace!("trying {} for {} to {}", candidate, first, last);

		if network >= first && broadcast <= last {
			return Ok((candidate, network == first && broadcast == last));
		}
	}

	// Only reachable if even a single address doesn’t fit, which the ordering check rules out.
	Err(Error::NoValidRange)
}

fn cover<N: Block>(first: N::Address, last: N::Address) -> Result<Vec<N>> {
	let mut nets = Vec::new();
	let mut start = first;

	loop {
		let (net, _) = fit::<N>(start, last)?;
		let broadcast = net.broadcast_address();
		nets.push(net);

		if broadcast >= last {
			break;
		}

		match broadcast.checked_next() {
			Some(next) if next > start => start = next,
			_ => break,
		}
	}

	log::debug!("{} to {} takes {} blocks", first, last, nets.len());

	Ok(nets)
}
