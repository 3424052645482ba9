//! Packing of bit runs into sequences of UTF-8 code points.
//!
//! A bit run is consumed left to right by elements whose widths come from a
//! table of [`LengthRule`]s. Each element's value must be a Unicode scalar
//! value with at least the rule's number of significant bits, so every value
//! has exactly one admissible width and the packing can be undone from the
//! code points alone.
//!
//! The search over all packings is memoized by bit offset: [`Packer::pack`]
//! builds, for every suffix of the run, the list of admissible first elements
//! and the number of complete packings reachable from there. The resulting
//! [`Packing`] holds the whole candidate set without materializing it.

use crate::common::bits_to_int;

/// One class of element width usable during packing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LengthRule {
    /// Number of significant bits the element's value must have. Zero admits any value.
    pub minimum: u32,
    /// Number of bits consumed by one element.
    pub width: usize,
}

impl LengthRule {
    pub const fn new(minimum: u32, width: usize) -> Self {
        Self { minimum, width }
    }

    /// Returns `true` if `value` fits in `width` bits and has at least
    /// `minimum` significant bits.
    pub fn admits(&self, value: u32) -> bool {
        let significant = u32::BITS - value.leading_zeros();
        significant as usize <= self.width && significant >= self.minimum
    }
}

/// The UTF-8 length classes: 1, 2, 3 and 4 byte sequences carry 7, 11, 16 and
/// 21 payload bits respectively, and each class starts where the previous one
/// runs out of bits.
pub const UTF8_LENGTHS: [LengthRule; 4] = [
    LengthRule::new(0, 7),
    LengthRule::new(8, 11),
    LengthRule::new(12, 16),
    LengthRule::new(17, 21),
];

/// Enumerates the ways to consume a bit run as a sequence of code points.
#[derive(Clone, Debug)]
pub struct Packer {
    rules: Vec<LengthRule>,
}

impl Default for Packer {
    fn default() -> Self {
        Self::new(UTF8_LENGTHS)
    }
}

impl Packer {
    /// Creates a packer over the given rules.
    ///
    /// Rules are kept in ascending width order. Rules of width zero or wider
    /// than 32 bits can never yield a code point and are dropped.
    pub fn new(rules: impl IntoIterator<Item = LengthRule>) -> Self {
        let mut rules: Vec<LengthRule> = rules
            .into_iter()
            .filter(|rule| rule.width > 0 && rule.width <= u32::BITS as usize)
            .collect();
        rules.sort_by_key(|rule| (rule.width, rule.minimum));
        rules.dedup();
        Self { rules }
    }

    /// The rules in the order they are tried.
    pub fn rules(&self) -> &[LengthRule] {
        &self.rules
    }

    /// Returns the narrowest rule that admits `value`, i.e. the width a
    /// decoder must expand the code point to.
    pub fn rule_for(&self, value: u32) -> Option<LengthRule> {
        self.rules.iter().copied().find(|rule| rule.admits(value))
    }

    /// Computes every packing of `bits`.
    ///
    /// An empty run has exactly one packing, the empty string. A run with no
    /// packing yields an empty [`Packing`]; that is not an error.
    pub fn pack(&self, bits: &[bool]) -> Packing {
        let end = bits.len();
        let mut steps = vec![Vec::new(); end + 1];
        let mut counts = vec![0u64; end + 1];
        counts[end] = 1;

        for start in (0..end).rev() {
            for rule in &self.rules {
                let next = start + rule.width;
                if next > end || counts[next] == 0 {
                    continue;
                }
                let value = bits_to_int(&bits[start..next]);
                if !rule.admits(value) {
                    continue;
                }
                let Some(ch) = char::from_u32(value) else {
                    continue;
                };
                steps[start].push(Step { ch, next });
                counts[start] = counts[start].saturating_add(counts[next]);
            }
        }

        Packing { steps, counts }
    }
}

#[derive(Clone, Copy, Debug)]
struct Step {
    ch: char,
    next: usize,
}

/// The complete set of packings of one bit run.
///
/// Candidates are numbered in depth-first order with rules tried in
/// ascending width order; [`Packing::get`] and [`Packing::iter`] agree on
/// that numbering. Building candidates through `String` keeps every one of
/// them valid UTF-8 as a contiguous stream.
#[derive(Clone, Debug)]
pub struct Packing {
    // steps[offset] lists the admissible elements starting at `offset` that
    // lead to at least one complete packing
    steps: Vec<Vec<Step>>,
    counts: Vec<u64>,
}

impl Packing {
    /// Number of candidates. Saturates at `u64::MAX` for runs far longer than an address.
    pub fn len(&self) -> u64 {
        self.counts[0]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the candidate numbered `rank`, or `None` if out of range.
    pub fn get(&self, rank: u64) -> Option<String> {
        if rank >= self.len() {
            return None;
        }

        let end = self.counts.len() - 1;
        let mut rank = rank;
        let mut offset = 0;
        let mut text = String::new();
        while offset < end {
            let mut chosen = None;
            for step in &self.steps[offset] {
                let reachable = self.counts[step.next];
                if rank < reachable {
                    chosen = Some(step);
                    break;
                }
                rank -= reachable;
            }
            let step = chosen?;
            text.push(step.ch);
            offset = step.next;
        }
        Some(text)
    }

    /// Iterates over all candidates.
    pub fn iter(&self) -> Candidates<'_> {
        Candidates {
            packing: self,
            stack: vec![(0, 0)],
            text: String::new(),
        }
    }
}

impl<'a> IntoIterator for &'a Packing {
    type Item = String;
    type IntoIter = Candidates<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first iterator over the candidates of a [`Packing`].
pub struct Candidates<'a> {
    packing: &'a Packing,
    // (bit offset, index of the next step to try there)
    stack: Vec<(usize, usize)>,
    text: String,
}

impl Iterator for Candidates<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let end = self.packing.counts.len() - 1;
        loop {
            let (offset, tried) = self.stack.last_mut()?;
            if *offset == end {
                let candidate = self.text.clone();
                self.stack.pop();
                self.text.pop();
                return Some(candidate);
            }
            match self.packing.steps[*offset].get(*tried) {
                Some(step) => {
                    *tried += 1;
                    self.text.push(step.ch);
                    self.stack.push((step.next, 0));
                }
                None => {
                    self.stack.pop();
                    self.text.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{bytes_to_bits, int_to_bits};

    fn unpack(packer: &Packer, candidate: &str) -> Vec<bool> {
        candidate
            .chars()
            .flat_map(|ch| {
                let rule = packer.rule_for(ch as u32).unwrap();
                int_to_bits(ch as u32, rule.width)
            })
            .collect()
    }

    #[test]
    fn test_rules_match_utf8_lengths() {
        let packer = Packer::default();
        for (ch, width) in [('\0', 7), ('A', 7), ('\u{7f}', 7), ('\u{80}', 11), ('ð', 11)] {
            assert_eq!(packer.rule_for(ch as u32).unwrap().width, width);
        }
        for (ch, width) in [('\u{7ff}', 11), ('\u{800}', 16), ('€', 16), ('\u{ffff}', 16)] {
            assert_eq!(packer.rule_for(ch as u32).unwrap().width, width);
        }
        for ch in ['\u{10000}', '😀', '\u{10ffff}'] {
            assert_eq!(packer.rule_for(ch as u32).unwrap().width, 21);
            assert_eq!(ch.len_utf8(), 4);
        }
        assert_eq!(packer.rule_for(0x20_0000), None);
    }

    #[test]
    fn test_admits_requires_significant_bits() {
        let rule = LengthRule::new(8, 11);
        assert!(!rule.admits(0x7f));
        assert!(rule.admits(0x80));
        assert!(rule.admits(0x7ff));
        assert!(!rule.admits(0x800));
        assert!(LengthRule::new(0, 7).admits(0));
    }

    #[test]
    fn test_rules_sorted_and_filtered() {
        let packer = Packer::new([
            LengthRule::new(17, 21),
            LengthRule::new(0, 0),
            LengthRule::new(0, 7),
            LengthRule::new(0, 64),
            LengthRule::new(0, 7),
        ]);
        assert_eq!(
            packer.rules(),
            &[LengthRule::new(0, 7), LengthRule::new(17, 21)]
        );
    }

    #[test]
    fn test_empty_bits_single_empty_candidate() {
        let packing = Packer::default().pack(&[]);
        assert_eq!(packing.len(), 1);
        assert_eq!(packing.get(0).as_deref(), Some(""));
        assert_eq!(packing.iter().collect::<Vec<_>>(), vec![String::new()]);
    }

    #[test]
    fn test_all_ones_ipv4() {
        let packer = Packer::default();
        let bits = bytes_to_bits(&[0xff; 4]);
        let packing = packer.pack(&bits);

        // 7+7+7+11 in four orders, and 16+16
        assert_eq!(packing.len(), 5);
        let candidates: Vec<String> = packing.iter().collect();
        assert_eq!(candidates.len(), 5);
        assert_eq!(candidates[0], "\u{7f}\u{7f}\u{7f}\u{7ff}");
        assert_eq!(candidates[4], "\u{ffff}\u{ffff}");
        for candidate in &candidates {
            assert_eq!(unpack(&packer, candidate), bits);
        }
    }

    #[test]
    fn test_all_zeros_has_no_packing() {
        // only 7-bit elements may be zero, and 32 is not a multiple of 7
        let packing = Packer::default().pack(&bytes_to_bits(&[0; 4]));
        assert!(packing.is_empty());
        assert_eq!(packing.get(0), None);
        assert_eq!(packing.iter().next(), None);
    }

    #[test]
    fn test_surrogates_rejected() {
        // a lone 16-bit element of 0xd800 is a surrogate, not a code point
        let packing = Packer::new([LengthRule::new(12, 16)]).pack(&bytes_to_bits(&[0xd8, 0x00]));
        assert!(packing.is_empty());
        let packing = Packer::new([LengthRule::new(12, 16)]).pack(&bytes_to_bits(&[0xd7, 0xff]));
        assert_eq!(packing.get(0).as_deref(), Some("\u{d7ff}"));
    }

    #[test]
    fn test_get_agrees_with_iter() {
        let packer = Packer::default();
        let bits = bytes_to_bits(&[0xff; 16]);
        let packing = packer.pack(&bits);
        assert!(!packing.is_empty());

        let mut seen = 0u64;
        for (rank, candidate) in packing.iter().enumerate() {
            assert_eq!(packing.get(rank as u64).as_ref(), Some(&candidate));
            assert_eq!(unpack(&packer, &candidate), bits);
            seen += 1;
        }
        assert_eq!(seen, packing.len());
        assert_eq!(packing.get(seen), None);
    }
}
