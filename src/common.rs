//! Bit-level helpers and address conversions shared by the encoder and decoder.
//!
//! Bit sequences are represented as `bool` slices, most significant bit first.
//! Addresses travel as their raw network-order octets: 4 bytes for IPv4 and
//! 16 bytes for IPv6. Unlike IPv4-mapped storage, the octet count itself is
//! what tells the two families apart.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{IdunnoError, Result};

/// Expands every byte into 8 bits, most significant bit first.
///
/// The output always holds `8 * bytes.len()` bits.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |idx| byte & (1 << idx) != 0))
        .collect()
}

/// Packs bits into bytes, most significant bit first.
///
/// The sequence is left-padded with zero bits up to the next multiple of 8
/// before packing, so `[true]` becomes `[0x01]` and not `[0x80]`.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    let padding = (8 - bits.len() % 8) % 8;
    let aligned = std::iter::repeat(false).take(padding).chain(bits.iter().copied());

    let mut bytes = Vec::with_capacity((bits.len() + padding) / 8);
    let mut current = 0u8;
    for (idx, bit) in aligned.enumerate() {
        current = (current << 1) | u8::from(bit);
        if idx % 8 == 7 {
            bytes.push(current);
            current = 0;
        }
    }
    bytes
}

/// Expands `value` into exactly `length` bits, most significant bit first.
///
/// Bits of `value` above `length` are discarded.
pub fn int_to_bits(value: u32, length: usize) -> Vec<bool> {
    (0..length)
        .rev()
        .map(|idx| idx < 32 && value & (1 << idx) != 0)
        .collect()
}

/// Interprets a bit run as a big-endian unsigned integer.
///
/// Only the low 32 bits survive; callers never pass runs wider than a
/// code point.
pub fn bits_to_int(bits: &[bool]) -> u32 {
    bits.iter().fold(0, |acc, &bit| (acc << 1) | u32::from(bit))
}

/// Returns the raw octets of an address: 4 bytes for IPv4, 16 for IPv6.
pub fn ip_to_bytes(ip: IpAddr) -> Vec<u8> {
    match ip {
        IpAddr::V4(ipv4) => ipv4.octets().to_vec(),
        IpAddr::V6(ipv6) => ipv6.octets().to_vec(),
    }
}

/// Builds an address from its raw octets.
///
/// # Arguments
///
/// * `bytes` - Exactly 4 (IPv4) or 16 (IPv6) octets in network order
///
/// # Returns
///
/// The address, or `IdunnoError::InvalidAddress` if the octets do not form one
pub fn bytes_to_ip(bytes: &[u8]) -> Result<IpAddr> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Ok(IpAddr::V4(Ipv4Addr::from(octets)));
    }
    if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        return Ok(IpAddr::V6(Ipv6Addr::from(octets)));
    }
    Err(IdunnoError::InvalidAddress)
}
