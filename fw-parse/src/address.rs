use std::net::Ipv4Addr;

use crate::error::ParseError;

fn parse_ipv4(token: &str) -> Result<u32, ParseError> {
    token
        .parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| ParseError::InvalidAddress(token.to_string()))
}

/// Parses one of the three address spec shapes iptables accepts:
///
/// - `a.b.c.d`: a single host. `0.0.0.0` is treated as "unspecified",
///   matching the original collaborator, and resolves to the full address
///   domain rather than the single point `[0, 0]`.
/// - `a.b.c.d/len` or `a.b.c.d/m.m.m.m`: a subnet, resolving to
///   `[network_address, broadcast_address]`.
/// - `a.b.c.d-e.f.g.h`: an explicit host range.
pub fn parse_address_spec(spec: &str) -> Result<(u32, u32), ParseError> {
    if let Some((addr, mask_spec)) = spec.split_once('/') {
        let base = parse_ipv4(addr)?;
        let mask = parse_mask(mask_spec, spec)?;
        let network = base & mask;
        let broadcast = network | !mask;
        Ok((network, broadcast))
    } else if let Some((lo, hi)) = spec.split_once('-') {
        Ok((parse_ipv4(lo)?, parse_ipv4(hi)?))
    } else {
        let addr = parse_ipv4(spec)?;
        if addr == 0 {
            Ok((0, u32::MAX))
        } else {
            Ok((addr, addr))
        }
    }
}

fn parse_mask(mask_spec: &str, whole_spec: &str) -> Result<u32, ParseError> {
    if let Ok(prefix) = mask_spec.parse::<u32>() {
        if prefix > 32 {
            return Err(ParseError::InvalidAddress(whole_spec.to_string()));
        }
        return Ok(if prefix == 0 {
            0
        } else {
            u32::MAX << (32 - prefix)
        });
    }
    parse_ipv4(mask_spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_host_test() {
        assert_eq!(
            parse_address_spec("10.0.0.1").unwrap(),
            (0x0a000001, 0x0a000001)
        );
    }

    #[test]
    fn unspecified_host_means_full_domain_test() {
        assert_eq!(parse_address_spec("0.0.0.0").unwrap(), (0, u32::MAX));
    }

    #[test]
    fn cidr_subnet_test() {
        let (lo, hi) = parse_address_spec("10.1.2.0/24").unwrap();
        assert_eq!(lo, u32::from(Ipv4Addr::new(10, 1, 2, 0)));
        assert_eq!(hi, u32::from(Ipv4Addr::new(10, 1, 2, 255)));
    }

    #[test]
    fn dotted_netmask_subnet_test() {
        let (lo, hi) = parse_address_spec("192.168.0.0/255.255.255.0").unwrap();
        assert_eq!(lo, u32::from(Ipv4Addr::new(192, 168, 0, 0)));
        assert_eq!(hi, u32::from(Ipv4Addr::new(192, 168, 0, 255)));
    }

    #[test]
    fn host_range_test() {
        let (lo, hi) = parse_address_spec("1.1.1.20-1.1.1.23").unwrap();
        assert_eq!(lo, u32::from(Ipv4Addr::new(1, 1, 1, 20)));
        assert_eq!(hi, u32::from(Ipv4Addr::new(1, 1, 1, 23)));
    }

    #[test]
    fn garbage_is_rejected_test() {
        assert!(parse_address_spec("not-an-ip").is_err());
    }
}
