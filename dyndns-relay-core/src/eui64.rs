//! IPv6 address derivation from a network prefix and a hardware address.
//!
//! Routers on the LAN side often report their delegated prefix and the
//! device's MAC instead of a ready-made address. The derivation follows the
//! modified EUI-64 scheme of RFC 4291, Section 2.5.1: the prefix supplies
//! the upper 64 bits, the hardware address the lower 64, with the
//! universal/local bit of the first hardware byte flipped.

use std::net::{IpAddr, Ipv6Addr};

use crate::error::{CoreError, CoreResult};
use crate::types::UpdateRequest;

/// Longest prefix that leaves room for a 64-bit interface identifier.
const MAX_PREFIX_BITS: u8 = 64;

/// Resolve the effective IPv6 address for a request.
///
/// A caller-supplied literal address wins and bypasses derivation entirely.
/// Otherwise, if both a prefix and a hardware address were submitted, the
/// address is derived; with neither, there is no IPv6 address to stage.
pub fn resolve_ip6(req: &UpdateRequest) -> CoreResult<Option<String>> {
    if let Some(literal) = &req.ip6addr {
        return Ok(Some(literal.clone()));
    }
    match (&req.ip6lanprefix, &req.ether) {
        (Some(prefix), Some(ether)) => Ok(Some(derive(prefix, ether)?.to_string())),
        _ => Ok(None),
    }
}

/// Derive an IPv6 address from a CIDR prefix and a hardware address.
///
/// The prefix must be IPv6 with a length of at most /64; the hardware
/// address must be 6 octets (EUI-48) or 8 octets (EUI-64).
pub fn derive(prefix: &str, ether: &str) -> CoreResult<Ipv6Addr> {
    let prefix_addr = parse_prefix(prefix)?;
    let hw = parse_hardware_addr(ether)?;

    let mut ip = [0u8; 16];
    ip[..8].copy_from_slice(&prefix_addr.octets()[..8]);

    // Flip the 7th bit from the left on the first byte of the hardware
    // address, the universal/local (U/L) bit. See RFC 4291, Section 2.5.1.
    match hw.len() {
        // An EUI-64 hardware address is copied straight into the interface
        // identifier.
        8 => {
            ip[8..16].copy_from_slice(&hw);
            ip[8] ^= 0x02;
        }
        // An EUI-48 address is split into OUI and device halves with
        // 0xFF,0xFE injected between them.
        6 => {
            ip[8..11].copy_from_slice(&hw[..3]);
            ip[8] ^= 0x02;
            ip[11] = 0xff;
            ip[12] = 0xfe;
            ip[13..16].copy_from_slice(&hw[3..]);
        }
        _ => unreachable!("parse_hardware_addr only returns 6 or 8 octets"),
    }

    Ok(Ipv6Addr::from(ip))
}

fn parse_prefix(prefix: &str) -> CoreResult<Ipv6Addr> {
    let (addr_str, bits_str) = prefix
        .split_once('/')
        .ok_or_else(|| CoreError::BadRequest(format!("invalid prefix '{prefix}'")))?;

    let bits: u8 = bits_str
        .parse()
        .map_err(|_| CoreError::BadRequest(format!("invalid prefix length '{bits_str}'")))?;

    let addr: IpAddr = addr_str
        .parse()
        .map_err(|_| CoreError::BadRequest(format!("invalid prefix address '{addr_str}'")))?;

    let IpAddr::V6(addr) = addr else {
        return Err(CoreError::BadRequest(format!(
            "prefix '{prefix}' is not IPv6"
        )));
    };

    if bits > MAX_PREFIX_BITS {
        return Err(CoreError::BadRequest(format!(
            "prefix length /{bits} exceeds /{MAX_PREFIX_BITS}"
        )));
    }

    Ok(addr)
}

/// Parse a colon- or hyphen-separated hardware address into its octets.
///
/// Only EUI-48 (6 octets) and EUI-64 (8 octets) forms are accepted.
fn parse_hardware_addr(ether: &str) -> CoreResult<Vec<u8>> {
    let sep = if ether.contains(':') { ':' } else { '-' };
    let octets: Vec<u8> = ether
        .split(sep)
        .map(|part| {
            if part.len() == 2 {
                u8::from_str_radix(part, 16).ok()
            } else {
                None
            }
        })
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| CoreError::BadRequest(format!("invalid hardware address '{ether}'")))?;

    if octets.len() != 6 && octets.len() != 8 {
        return Err(CoreError::BadRequest(format!(
            "hardware address '{ether}' is not EUI-48 or EUI-64"
        )));
    }

    Ok(octets)
}
