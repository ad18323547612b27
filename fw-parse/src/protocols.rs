//! A small bundled IANA protocol-number table.
//!
//! The original collaborator resolved names like `tcp` via
//! `socket.getprotobyname`, i.e. the host's `/etc/protocols`. That table's
//! availability and contents vary across hosts (containers in particular
//! often ship without one), so this rewrite bundles the handful of protocol
//! names that actually show up in firewall rules instead of shelling out to
//! the system name service.

/// `(name, protocol number)`, matched case-insensitively.
const PROTOCOLS: &[(&str, u8)] = &[
    ("icmp", 1),
    ("igmp", 2),
    ("ipencap", 4),
    ("tcp", 6),
    ("egp", 8),
    ("udp", 17),
    ("rdp", 27),
    ("ipv6", 41),
    ("gre", 47),
    ("esp", 50),
    ("ah", 51),
    ("icmpv6", 58),
    ("eigrp", 88),
    ("ospf", 89),
    ("pim", 103),
    ("sctp", 132),
    ("udplite", 136),
];

/// Looks up a protocol name, case-insensitively. `"all"` is handled by the
/// caller as the full `[0, 255]` range, not as a table entry.
pub fn lookup(name: &str) -> Option<u8> {
    PROTOCOLS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, code)| *code)
}
