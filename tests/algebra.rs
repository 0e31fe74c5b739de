//! End-to-end scenarios across the parsing, CIDR, set and registry layers.

use addrkit::{
    cidr_merge, iprange_to_cidrs, spanning_cidr, Eui, IpAddress, IpGlob, IpNetwork, IpRange,
    IpSet, Ipv6Dialect, Oui, ParseFlags,
};

fn networks(texts: &[&str]) -> Vec<IpNetwork> {
    texts.iter().map(|t| t.parse().unwrap()).collect()
}

fn ipset(texts: &[&str]) -> IpSet {
    networks(texts).into_iter().collect()
}

#[test]
fn ipv4_strict_vs_loose_parsing() {
    let strict = IpAddress::parse("192.168.0.1", ParseFlags::INET_PTON).unwrap();
    assert_eq!(strict.value(), 3232235521);

    let loose = IpAddress::new("0xC0.0xA8.0.1").unwrap();
    assert_eq!(loose.value(), 3232235521);
    assert_eq!(loose, strict);

    assert!(IpAddress::parse("0xC0.0xA8.0.1", ParseFlags::INET_PTON).is_err());
}

#[test]
fn ipv6_compact_formatting() {
    let ip = IpAddress::new("2001:0db8:0000:0000:0000:ff00:0042:8329").unwrap();
    assert_eq!(ip.format(Ipv6Dialect::Compact), "2001:db8::ff00:42:8329");

    assert_eq!(IpAddress::new("0:0:0:0:0:0:0:1").unwrap().to_string(), "::1");

    // Left-most longest zero run wins the collapse.
    assert_eq!(
        IpAddress::new("1:0:0:4:0:0:0:8").unwrap().to_string(),
        "1:0:0:4::8"
    );
}

#[test]
fn range_decomposes_into_minimal_cidrs() {
    let range: IpRange = "192.0.2.1-192.0.2.9".parse().unwrap();
    let cidrs: Vec<String> = range.cidrs().iter().map(|c| c.to_string()).collect();
    assert_eq!(
        cidrs,
        ["192.0.2.1/32", "192.0.2.2/31", "192.0.2.4/30", "192.0.2.8/31"]
    );
}

#[test]
fn set_difference_carves_out_block() {
    let diff = &ipset(&["10.0.0.0/8"]) - &ipset(&["10.1.0.0/16"]);
    let cidrs: Vec<String> = diff.iter_cidrs().iter().map(|c| c.to_string()).collect();
    assert_eq!(
        cidrs,
        [
            "10.0.0.0/16",
            "10.2.0.0/15",
            "10.4.0.0/14",
            "10.8.0.0/13",
            "10.16.0.0/12",
            "10.32.0.0/11",
            "10.64.0.0/10",
            "10.128.0.0/9",
        ]
    );
}

#[test]
fn glob_conversions() {
    let glob: IpGlob = "192.0.*.*".parse().unwrap();
    let cidrs: Vec<String> = glob.cidrs().iter().map(|c| c.to_string()).collect();
    assert_eq!(cidrs, ["192.0.0.0/16"]);

    let range = IpGlob::new("10.0.0.1-5").unwrap().range();
    assert_eq!(range.first().to_string(), "10.0.0.1");
    assert_eq!(range.last().to_string(), "10.0.0.5");
}

#[test]
fn eui_derives_ipv6_interface_address() {
    let mac: Eui = "00-1B-77-49-54-FD".parse().unwrap();
    let prefix: IpNetwork = "fe80::/10".parse().unwrap();
    let derived = mac.ipv6(&prefix).unwrap();
    // The universal/local bit is flipped in the seventh bit of the first
    // octet: 00 -> 02.
    assert_eq!(derived.to_string(), "fe80::21b:77ff:fe49:54fd");
}

#[test]
fn oui_lookup_returns_registered_organisation() {
    let oui = Oui::new("00-1B-77").unwrap();
    assert_eq!(oui.registration(0).unwrap().org, "Intel Corporate");
    assert_eq!(oui.reg_count(), 1);
    assert_eq!(oui.to_string(), "00-1B-77");

    // Historical duplicate registrations are all retained, in file order.
    let shared = Oui::new("08-00-30").unwrap();
    assert_eq!(shared.reg_count(), 3);
    assert_eq!(
        shared.registration(2).unwrap().org,
        "CERN"
    );

    assert!(Oui::new("FE-FF-FE").is_err());
}

#[test]
fn parse_format_round_trips() {
    for text in [
        "0.0.0.0",
        "192.0.2.1",
        "255.255.255.255",
        "::",
        "::1",
        "2001:db8::ff00:42:8329",
        "fe80::1",
    ] {
        let ip = IpAddress::new(text).unwrap();
        assert_eq!(IpAddress::new(&ip.to_string()).unwrap(), ip, "{text}");
    }

    for text in ["00-1B-77-49-54-FD", "00-1B-77-FF-FE-49-54-FD"] {
        let eui: Eui = text.parse().unwrap();
        assert_eq!(eui.to_string().parse::<Eui>().unwrap(), eui, "{text}");
    }
}

#[test]
fn packed_round_trips() {
    for text in ["192.0.2.1", "2001:db8::1"] {
        let ip = IpAddress::new(text).unwrap();
        let packed = ip.packed();
        assert_eq!(packed.len() as u32, ip.width() / 8);
        assert_eq!(IpAddress::from_packed(&packed).unwrap(), ip);
    }
}

#[test]
fn range_cidrs_cover_exactly_with_minimum_cardinality() {
    let cases = [
        ("10.0.0.0", "10.0.0.0"),
        ("10.0.0.1", "10.0.0.9"),
        ("10.0.0.0", "10.0.255.255"),
        ("192.0.2.3", "192.0.5.77"),
    ];
    for (start, end) in cases {
        let range = IpRange::new(
            IpAddress::new(start).unwrap(),
            IpAddress::new(end).unwrap(),
        )
        .unwrap();
        let cidrs = range.cidrs();

        // Exact cover, no overlap.
        let mut cursor = range.first().value();
        for cidr in &cidrs {
            assert_eq!(cidr.network().value(), cursor);
            cursor = cidr.broadcast().value() + 1;
        }
        assert_eq!(cursor, range.last().value() + 1);

        // Minimality: merging the result changes nothing.
        assert_eq!(cidr_merge(cidrs.clone()), cidrs);
    }
}

#[test]
fn sets_built_from_range_and_from_cidrs_agree() {
    let range: IpRange = "192.0.2.1-192.0.2.9".parse().unwrap();
    let from_range = IpSet::from_item(&range);
    let from_cidrs: IpSet = range.cidrs().into_iter().collect();
    assert_eq!(from_range, from_cidrs);
    assert_eq!(from_range.size(), 9);
}

#[test]
fn union_matches_pointwise_union() {
    let a = ipset(&["192.0.2.0/26", "192.0.2.128/26"]);
    let b = ipset(&["192.0.2.64/26", "192.0.2.128/25"]);
    let union = &a | &b;

    for ip in IpNetwork::new("192.0.2.0/24").unwrap().iter() {
        let expected = a.contains_addr(&ip) || b.contains_addr(&ip);
        assert_eq!(union.contains_addr(&ip), expected, "{ip}");
    }
}

#[test]
fn spanning_cidr_covers_inputs() {
    let inputs = networks(&["192.0.2.8/29", "192.0.2.240/28"]);
    let span = spanning_cidr(&inputs).unwrap();
    assert_eq!(span.to_string(), "192.0.2.0/24");
    for net in &inputs {
        assert!(span.contains(net).unwrap());
    }
}

#[test]
fn network_invariants_hold() {
    for text in ["10.0.0.1/24", "0.0.0.0/0", "2001:db8::dead:beef/64"] {
        let net: IpNetwork = text.parse().unwrap();
        assert!(net.network() <= net.ip());
        assert!(net.ip() <= net.broadcast());
    }
}

#[test]
fn iprange_to_cidrs_free_function() {
    let cidrs = iprange_to_cidrs(
        &IpAddress::new("192.0.2.1").unwrap(),
        &IpAddress::new("192.0.2.9").unwrap(),
    )
    .unwrap();
    assert_eq!(cidrs.len(), 4);
}

#[test]
fn validators_never_fail() {
    assert!(addrkit::valid::ipv4("192.0.2.1", ParseFlags::INET_PTON));
    assert!(!addrkit::valid::ipv4("not-an-ip", ParseFlags::empty()));
    assert!(addrkit::valid::ipv6("::1"));
    assert!(!addrkit::valid::ipv6("1::2::3"));
    assert!(addrkit::valid::mac("00-1B-77-49-54-FD"));
    assert!(!addrkit::valid::mac("00-1B-77-49-54"));
    assert!(addrkit::valid::glob("192.0.2.*"));
    assert!(!addrkit::valid::glob("192.*.2.1"));
}
