use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;
use rand::Rng;

use super::super::address::{Address, Address4, Address6};
use super::super::error::Error;
use super::{Block, Net, Net4, Net6, Reserved};

impl Arbitrary for Net4 {
	fn arbitrary<G: Gen>(g: &mut G) -> Self {
		Net4::new(Address4::arbitrary(g), g.gen_range(0, 33)).unwrap()
	}
}

impl Arbitrary for Net6 {
	fn arbitrary<G: Gen>(g: &mut G) -> Self {
		const HOSTMASKS: [u8; 7] = [0, 0, 8, 53, 56, 60, 64];

		let address = Address6::arbitrary(g);
		let hostmask = HOSTMASKS[g.gen_range(0, HOSTMASKS.len())];

		// Prefix zero fits every hostmask above.
		loop {
			if let Ok(net) = Net6::new(address, g.gen_range(0, 129), hostmask) {
				return net;
			}
		}
	}
}

fn v4(s: &str) -> Address4 {
	s.parse().unwrap()
}

fn v6(s: &str) -> Address6 {
	s.parse().unwrap()
}

fn net4(s: &str, prefix: u8) -> Net4 {
	Net4::new(v4(s), prefix).unwrap()
}

fn net6(s: &str, prefix: u8, hostmask: u8) -> Net6 {
	Net6::new(v6(s), prefix, hostmask).unwrap()
}

#[test]
fn net4_counts() {
	let cases = [(0, 4294967294), (8, 16777214), (23, 510), (26, 62), (30, 2), (31, 2), (32, 1)];

	for &(prefix, count) in &cases {
		assert_eq!(net4("192.168.0.0", prefix).count(), count, "/{}", prefix);
	}
}

#[test]
fn net4_masks() {
	let net = net4("192.168.37.201", 20);

	assert_eq!(net.network_address(), v4("192.168.32.0"));
	assert_eq!(net.broadcast_address(), v4("192.168.47.255"));
	assert_eq!(net.netmask(), v4("255.255.240.0"));
	assert_eq!(net.wildcard(), v4("0.0.15.255"));
	assert_eq!(net.to_string(), "192.168.32.0/20");
	assert_eq!(Net4::new(v4("192.168.0.0"), 33), Err(Error::BadMaskLength));
}

#[test]
fn net4_enumerate() {
	let net = net4("192.168.0.0", 22);

	// offset, size, length, first, last
	let cases = [
		(0, 0, 1022, "192.168.0.1", "192.168.3.254"),
		(1, 0, 1021, "192.168.0.2", "192.168.3.254"),
		(256, 0, 766, "192.168.1.1", "192.168.3.254"),
		(0, 128, 128, "192.168.0.1", "192.168.0.128"),
		(20, 128, 128, "192.168.0.21", "192.168.0.148"),
		(1000, 100, 22, "192.168.3.233", "192.168.3.254"),
	];

	for &(offset, size, length, first, last) in &cases {
		let addresses: Vec<_> = net.enumerate(offset, size).collect();

		assert_eq!(addresses.len(), length, "offset {} size {}", offset, size);
		assert_eq!(addresses.first(), Some(&v4(first)));
		assert_eq!(addresses.last(), Some(&v4(last)));
	}

	assert_eq!(net.enumerate(1022, 0).next(), None);
	assert_eq!(net.enumerate(1023, 0).next(), None);
	assert_eq!(net.enumerate(0, 10).size_hint(), (10, Some(10)));
}

#[test]
fn point_to_point_blocks_use_every_address() {
	let net = net4("10.0.0.0", 31);
	assert_eq!(net.enumerate(0, 0).collect::<Vec<_>>(), vec![v4("10.0.0.0"), v4("10.0.0.1")]);

	let net = net4("10.0.0.7", 32);
	assert_eq!(net.enumerate(0, 0).collect::<Vec<_>>(), vec![v4("10.0.0.7")]);
	assert_eq!((net.first_address(), net.last_address()), (v4("10.0.0.7"), v4("10.0.0.7")));

	let net = net6("2001:db8::", 127, 0);
	assert_eq!(net.count(), 2);
	assert_eq!(net.enumerate(0, 0).collect::<Vec<_>>(), vec![v6("2001:db8::"), v6("2001:db8::1")]);

	assert_eq!(net6("2001:db8::1", 128, 0).count(), 1);
}

#[test]
fn net4_subnets() {
	let subnets: Vec<_> = net4("192.168.0.0", 24).subnet(26).unwrap().map(|net| net.to_string()).collect();
	assert_eq!(subnets, ["192.168.0.0/26", "192.168.0.64/26", "192.168.0.128/26", "192.168.0.192/26"]);

	assert_eq!(net4("255.255.255.0", 24).subnet(32).unwrap().count(), 256);
	assert_eq!(net4("0.0.0.0", 0).subnet(1).unwrap().count(), 2);
	assert_eq!(net4("192.168.0.0", 24).subnet(24).unwrap().collect::<Vec<_>>(), vec![net4("192.168.0.0", 24)]);

	assert_eq!(net4("192.168.0.0", 24).subnet(23).err(), Some(Error::BadMaskLength));
	assert_eq!(net4("192.168.0.0", 24).subnet(33).err(), Some(Error::BadMaskLength));
}

#[test]
fn neighbouring_nets() {
	let net = net4("192.168.0.0", 24);

	assert_eq!(net.next_net(24), Ok(net4("192.168.1.0", 24)));
	assert_eq!(net.next_net(25), Ok(net4("192.168.1.0", 25)));
	assert_eq!(net.next_net(23), Ok(net4("192.168.0.0", 23)));
	assert_eq!(net4("192.168.1.0", 24).previous_net(24), Ok(net));

	assert_eq!(net4("255.255.255.0", 24).next_net(24), Ok(net4("255.255.255.0", 24)));
	assert_eq!(net4("0.0.0.0", 8).previous_net(8), Ok(net4("0.0.0.0", 8)));

	assert_eq!(net6("2001:db8::", 64, 0).next_net(64), Ok(net6("2001:db8:0:1::", 64, 0)));
}

#[test]
fn net4_steps_flag_reserved_addresses() {
	let net = net4("192.168.0.0", 24);

	let step = net.next_address(v4("192.168.0.253")).unwrap();
	assert_eq!((step.address, step.reserved), (v4("192.168.0.254"), None));

	let step = net.next_address(v4("192.168.0.254")).unwrap();
	assert_eq!((step.address, step.reserved), (v4("192.168.0.255"), Some(Reserved::Broadcast)));
	assert_eq!(step.into_usable(), Err(Error::BroadcastAddress));

	let step = net.previous_address(v4("192.168.0.1")).unwrap();
	assert_eq!((step.address, step.reserved), (v4("192.168.0.0"), Some(Reserved::Network)));
	assert_eq!(step.into_usable(), Err(Error::NetworkAddress));

	assert_eq!(net.next_address(v4("192.168.0.255")), Err(Error::AddressAtEndOfRange));
	assert_eq!(net.previous_address(v4("192.168.0.0")), Err(Error::AddressAtEndOfRange));
	assert_eq!(net.next_address(v4("10.0.0.1")), Err(Error::AddressOutOfRange));

	let step = net4("10.0.0.0", 31).next_address(v4("10.0.0.0")).unwrap();
	assert_eq!(step.into_usable(), Ok(v4("10.0.0.1")));
}

#[test]
fn net6_counts_and_last_addresses() {
	let base = "2001:db8:1234:5678:9abc:def0:1234:5678";

	// prefix, hostmask, count, last
	let cases = [
		(64, 8, 1_u128 << 56, "2001:db8:1234:5678:ffff:ffff:ffff:ff00"),
		(64, 56, 256, "2001:db8:1234:5678:ff00::"),
		(64, 60, 16, "2001:db8:1234:5678:f00::"),
		(64, 63, 2, "2001:db8:1234:5678:100::"),
		(72, 0, 1_u128 << 56, "2001:db8:1234:5678:9aff:ffff:ffff:ffff"),
		(81, 40, 128, "2001:db8:1234:5678:9abc:ff00::"),
	];

	for &(prefix, hostmask, count, last) in &cases {
		let net = net6(base, prefix, hostmask);

		assert_eq!(net.count(), count, "/{} with a /{} hostmask", prefix, hostmask);
		assert_eq!(net.last_address(), v6(last), "/{} with a /{} hostmask", prefix, hostmask);
	}

	let net = net6(base, 81, 40);
	assert_eq!(net.first_address(), v6("2001:db8:1234:5678:9abc:8000::"));
	assert_eq!(net.broadcast_address(), v6("2001:db8:1234:5678:9abc:ffff:ffff:ffff"));

	assert_eq!(net6("2001:db8::", 56, 60).count(), 4096);
	assert_eq!(net6("::", 0, 0).count(), u128::MAX);
	assert_eq!(net6("::", 0, 0).last_address(), v6("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"));
}

#[test]
fn net6_rejects_bad_masks() {
	let address = v6("2001:db8::");

	for &(prefix, hostmask) in &[(129, 0), (64, 129), (64, 64), (120, 8), (0, 121), (65, 60)] {
		assert_eq!(Net6::new(address, prefix, hostmask), Err(Error::BadMaskLength), "/{} with a /{} hostmask", prefix, hostmask);
	}

	assert!(Net6::new(address, 64, 60).is_ok());
	assert_eq!(Net6::new(address, 60, 60).map(|net| net.count()), Ok(256));
	assert!(Net6::new(address, 0, 120).is_ok());
	assert!(Net6::new(address, 128, 0).is_ok());
}

#[test]
fn net6_enumerate() {
	let net = net6("2001:db8:1000:2000:3000:4000::", 56, 56);

	// offset, size, length, first, last
	let cases = [
		(0, 0, 65536, "2001:db8:1000:2000::", "2001:db8:1000:20ff:ff00::"),
		(32768, 0, 32768, "2001:db8:1000:2080::", "2001:db8:1000:20ff:ff00::"),
		(32768, 16384, 16384, "2001:db8:1000:2080::", "2001:db8:1000:20bf:ff00::"),
		(65000, 5000, 536, "2001:db8:1000:20fd:e800::", "2001:db8:1000:20ff:ff00::"),
	];

	for &(offset, size, length, first, last) in &cases {
		let addresses: Vec<_> = net.enumerate(offset, size).collect();

		assert_eq!(addresses.len(), length, "offset {} size {}", offset, size);
		assert_eq!(addresses.first(), Some(&v6(first)));
		assert_eq!(addresses.last(), Some(&v6(last)));
		assert!(addresses.iter().all(|address| net.controls(address)));
	}

	assert_eq!(net.enumerate(65536, 0).next(), None);
	assert_eq!(net.enumerate(65537, 0).next(), None);

	let net = net6("2001:db8:1000:2000:3000:4000::", 64, 48);
	let addresses: Vec<_> = net.enumerate(0, 0).collect();
	assert_eq!(addresses.len(), 65536);
	assert_eq!(addresses.last(), Some(&v6("2001:db8:1000:2000:ffff::")));

	let addresses: Vec<_> = net6("::", 0, 0).enumerate(0, 3).collect();
	assert_eq!(addresses, vec![v6("::"), v6("::1"), v6("::2")]);
}

#[test]
fn net6_supernets() {
	assert_eq!(net6("2001:db8:1234:5678::", 64, 0).supernet(60), Ok(net6("2001:db8:1234:5670::", 60, 0)));
	assert_eq!(net6("2001:db8:1234:5671::", 64, 0).supernet(63), Ok(net6("2001:db8:1234:5670::", 63, 0)));
	assert_eq!(net6("2001:db8:1234:5671::", 64, 0).supernet(65), Err(Error::BadMaskLength));

	let supernet = net6("2001:db8:1234:5671::", 64, 56).supernet(48).unwrap();
	assert_eq!(supernet.hostmask().size(), 56);
}

#[test]
fn net6_subnets() {
	let subnets: Vec<_> = net6("2001:db8:1234:5678::", 64, 0).subnet(66).unwrap().collect();

	assert_eq!(
		subnets,
		vec![
			net6("2001:db8:1234:5678::", 66, 0),
			net6("2001:db8:1234:5678:4000::", 66, 0),
			net6("2001:db8:1234:5678:8000::", 66, 0),
			net6("2001:db8:1234:5678:c000::", 66, 0),
		]
	);

	assert_eq!(net6("2001:db8:1234:5678::", 64, 0).subnet(63).err(), Some(Error::BadMaskLength));
	assert_eq!(net6("2001:db8:1234:5678::", 64, 61).subnet(68).err(), Some(Error::BadMaskLength));

	let subnets: Vec<_> = net6("2001:db8::", 48, 64).subnet(50).unwrap().collect();
	assert_eq!(subnets.len(), 4);
	assert!(subnets.iter().all(|net| net.hostmask().size() == 64 && net.count() == 1 << 14));
}

#[test]
fn net6_controls() {
	let net = net6("2001:db8:1::", 56, 64);

	assert!(net.controls(&v6("2001:db8:1:1::")));
	assert!(!net.controls(&v6("2001:db8:2::")));
	assert!(!net.controls(&v6("2001:db8:1:ff:1::")));
	assert!(net.contains(&v6("2001:db8:1:ff:1::")));
}

#[test]
fn net6_steps_stay_inside() {
	let net = net6("2001:db8:1::", 56, 64);

	assert_eq!(net.next_address(v6("2001:db8:1:fe::")).map(|step| step.address), Ok(v6("2001:db8:1:ff::")));
	assert_eq!(net.previous_address(v6("2001:db8:1:1::")).map(|step| step.address), Ok(v6("2001:db8:1::")));
	assert_eq!(net.next_address(v6("2001:db8:1:ff::")), Err(Error::AddressAtEndOfRange));
	assert_eq!(net.previous_address(v6("2001:db8:1::")), Err(Error::AddressAtEndOfRange));
	assert_eq!(net.next_address(v6("2001:db8:2::")), Err(Error::AddressOutOfRange));
	assert_eq!(net.next_address(v6("2001:db8:1:ff:1::")), Err(Error::AddressOutOfRange));

	let step = net.next_address(v6("2001:db8:1::")).unwrap();
	assert_eq!(step.reserved, None);
}

#[test]
fn nets_of_either_family() {
	let v4_net = Net::from(net4("192.168.0.0", 24));
	let v6_net = Net::from(net6("2001:db8::", 32, 0));

	assert_eq!((v4_net.version(), v6_net.version()), (4, 6));
	assert_eq!(v4_net.to_string(), "192.168.0.0/24");
	assert_eq!(v6_net.to_string(), "2001:db8::/32");
	assert_eq!(v4_net.first_address(), Address::V4(v4("192.168.0.1")));
	assert_eq!(v6_net.last_address(), Address::V6(v6("2001:db8:ffff:ffff:ffff:ffff:ffff:ffff")));

	assert!(v4_net.contains(&Address::V4(v4("192.168.0.77"))));
	assert!(!v4_net.contains(&Address::V6(v6("2001:db8::"))));
	assert!(!v6_net.contains_net(&v4_net));
	assert!(v6_net.contains_net(&Net::from(net6("2001:db8:ff::", 48, 0))));
	assert!(!Net::from(net6("2001:db8:ff::", 48, 0)).contains_net(&v6_net));
}

#[quickcheck]
fn net4_enumeration_matches_count(net: Net4) -> TestResult {
	if net.prefix_len() < 20 {
		return TestResult::discard();
	}

	let addresses: Vec<_> = net.enumerate(0, 0).collect();

	TestResult::from_bool(
		addresses.len() as u32 == net.count()
			&& addresses.first() == Some(&net.first_address())
			&& addresses.last() == Some(&net.last_address())
			&& addresses.windows(2).all(|pair| pair[0] < pair[1])
			&& addresses.iter().all(|address| net.contains(address))
	)
}

#[quickcheck]
fn net6_enumeration_matches_count(address: Address6, hostmask: u8, free_bits: u8) -> TestResult {
	let hostmask = [0, 8, 53, 56, 60, 64][usize::from(hostmask) % 6];
	let prefix = 128 - hostmask - free_bits % 13;

	let net =
		match Net6::new(address, prefix, hostmask) {
			Ok(net) => net,
			Err(_) => return TestResult::discard(),
		};

	let addresses: Vec<_> = net.enumerate(0, 0).collect();

	TestResult::from_bool(
		addresses.len() as u128 == net.count()
			&& addresses.first() == Some(&net.first_address())
			&& addresses.last() == Some(&net.last_address())
			&& addresses.windows(2).all(|pair| pair[0] < pair[1])
			&& addresses.iter().all(|address| net.controls(address))
	)
}

#[quickcheck]
fn net4_supernet_of_subnet(net: Net4, extra: u8) -> bool {
	let prefix = net.prefix_len() + extra % (33 - net.prefix_len());

	match net.subnet(prefix).ok().and_then(|mut subnets| subnets.next()) {
		Some(first) => first.network_address() == net.network_address() && first.supernet(net.prefix_len()) == Ok(net),
		None => false,
	}
}

#[quickcheck]
fn net6_supernet_of_subnet(net: Net6, extra: u8) -> TestResult {
	let prefix = net.prefix_len().saturating_add(extra % 16);

	match net.subnet(prefix).ok().and_then(|mut subnets| subnets.next()) {
		Some(first) => TestResult::from_bool(first.supernet(net.prefix_len()) == Ok(net)),
		None => TestResult::discard(),
	}
}

#[quickcheck]
fn subnets_tile_the_block(net: Net4, extra: u8) -> TestResult {
	let prefix = net.prefix_len() + extra % 5;

	if prefix > 32 || net.prefix_len() < 16 {
		return TestResult::discard();
	}

	let subnets: Vec<_> = net.subnet(prefix).unwrap().collect();

	TestResult::from_bool(
		subnets.len() == 1 << (prefix - net.prefix_len())
			&& subnets.first().map(Net4::network_address) == Some(net.network_address())
			&& subnets.last().map(Net4::broadcast_address) == Some(net.broadcast_address())
			&& subnets.windows(2).all(|pair| pair[0].broadcast_address().to_bits() + 1 == pair[1].network_address().to_bits())
	)
}

#[quickcheck]
fn contains_net_agrees_with_contains(outer: Net4, inner: Net4) -> bool {
	outer.contains_net(&inner)
		== (outer.contains(&inner.network_address()) && outer.contains(&inner.broadcast_address()))
}
