use rand::seq::SliceRandom;
use rand::Rng;
use std::net::IpAddr;

use crate::classify::{Classifier, UnicodeTables};
use crate::common::{bits_to_bytes, bytes_to_bits, bytes_to_ip, int_to_bits, ip_to_bytes};
use crate::error::{IdunnoError, Result};
use crate::levels::LevelSet;
use crate::packer::Packer;

const IPV4_BITS: usize = 32;
const IPV6_BITS: usize = 128;

/// An I-DUNNO encoder and decoder.
///
/// Holds the element width rules, the confusion levels and the character
/// classification used to score candidates. The context is immutable; it can
/// be shared between threads when the classifier can.
#[derive(Clone, Debug)]
pub struct IDunno<C = UnicodeTables> {
    packer: Packer,
    levels: LevelSet,
    classifier: C,
}

impl Default for IDunno {
    fn default() -> Self {
        Self::new()
    }
}

impl IDunno {
    /// Creates a context with the UTF-8 length rules, the standard levels and
    /// the built-in Unicode tables.
    pub fn new() -> Self {
        Self::with_parts(Packer::default(), LevelSet::standard(), UnicodeTables)
    }
}

impl<C: Classifier> IDunno<C> {
    /// Creates a context from explicit parts.
    ///
    /// # Arguments
    ///
    /// * `packer` - Element width rules used by both directions
    /// * `levels` - Confusion levels candidates are checked against
    /// * `classifier` - Character classification queried by the constraints
    pub fn with_parts(packer: Packer, levels: LevelSet, classifier: C) -> Self {
        Self {
            packer,
            levels,
            classifier,
        }
    }

    pub fn packer(&self) -> &Packer {
        &self.packer
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Encodes an IP address at the given confusion level.
    ///
    /// Every packing of the address is a candidate; candidates are tried in
    /// a uniformly random order and the first one satisfying the level is
    /// returned, so repeated calls may return different forms.
    ///
    /// # Arguments
    ///
    /// * `ip` - The IP address to encode
    /// * `level` - Name of a registered confusion level
    ///
    /// # Returns
    ///
    /// The UTF-8 bytes of the I-DUNNO form, `UnknownLevel` if the level is
    /// not registered, or `NoEncodingAtLevel` if no candidate satisfies it
    pub fn encode_ipaddr(&self, ip: IpAddr, level: &str) -> Result<Vec<u8>> {
        self.encode_ipaddr_with_rng(ip, level, &mut rand::rng())
    }

    /// Same as [`encode_ipaddr`](Self::encode_ipaddr), drawing the candidate
    /// order from `rng`.
    pub fn encode_ipaddr_with_rng<R: Rng + ?Sized>(
        &self,
        ip: IpAddr,
        level: &str,
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        if !self.levels.contains(level) {
            return Err(IdunnoError::UnknownLevel(level.to_owned()));
        }

        let bits = bytes_to_bits(&ip_to_bytes(ip));
        let packing = self.packer.pack(&bits);
        tracing::debug!(%ip, level, candidates = packing.len(), "packed address");

        let mut ranks: Vec<u64> = (0..packing.len()).collect();
        ranks.shuffle(rng);

        for rank in ranks {
            let Some(candidate) = packing.get(rank) else {
                continue;
            };
            if self.levels.satisfies(&candidate, level, &self.classifier)? {
                tracing::debug!(%ip, level, rank, "selected candidate");
                return Ok(candidate.into_bytes());
            }
            tracing::trace!(%ip, level, rank, "candidate rejected");
        }

        Err(IdunnoError::NoEncodingAtLevel {
            address: ip,
            level: level.to_owned(),
        })
    }

    /// Checks whether an I-DUNNO form satisfies the given confusion level.
    pub fn satisfies(&self, form: &[u8], level: &str) -> Result<bool> {
        let text = std::str::from_utf8(form).map_err(|_| IdunnoError::InvalidNotation)?;
        self.levels.satisfies(text, level, &self.classifier)
    }

    /// Decodes an I-DUNNO form back into an IP address.
    ///
    /// Each code point is expanded to the width of the narrowest rule that
    /// admits it. The concatenated bits are left-padded to a byte boundary;
    /// if that does not yield 4 or 16 octets, bits past the end of an
    /// address that lie within the final element are treated as padding.
    /// That makes the decoder lenient: `b"ABCDE"` is 35 bits, and its last
    /// three bits fit inside the final 7-bit element, so it decodes to
    /// `131.10.28.72` instead of failing.
    ///
    /// # Returns
    ///
    /// The decoded address, `InvalidNotation` for anything that is not an
    /// I-DUNNO form, or `InvalidAddress` if the octets cannot form an address
    pub fn decode_ipaddr(&self, form: &[u8]) -> Result<IpAddr> {
        let text = std::str::from_utf8(form).map_err(|_| IdunnoError::InvalidNotation)?;

        let mut bits = Vec::with_capacity(IPV6_BITS);
        let mut last_width = 0;
        for ch in text.chars() {
            let value = ch as u32;
            let rule = self.packer.rule_for(value).ok_or_else(|| {
                tracing::debug!(code_point = value, "no length rule admits code point");
                IdunnoError::InvalidNotation
            })?;
            bits.extend(int_to_bits(value, rule.width));
            last_width = rule.width;
        }

        let address_bits = strip_padding(&bits, last_width).ok_or_else(|| {
            tracing::debug!(bits = bits.len(), "bit count matches no address family");
            IdunnoError::InvalidNotation
        })?;
        bytes_to_ip(&bits_to_bytes(address_bits))
    }
}

fn strip_padding(bits: &[bool], last_width: usize) -> Option<&[bool]> {
    if matches!(bits.len().div_ceil(8), 4 | 16) {
        return Some(bits);
    }
    [IPV6_BITS, IPV4_BITS]
        .into_iter()
        .find(|&width| bits.len() > width && bits.len() - width < last_width)
        .map(|width| &bits[..width])
}
