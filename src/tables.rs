//! Static code point tables backing [`UnicodeTables`](crate::UnicodeTables).
//!
//! Every range table is sorted by start and non-overlapping; bounds are inclusive.

/// Returns `true` if `code_point` falls inside one of the ranges of `table`.
pub(crate) fn in_ranges(table: &[(u32, u32)], code_point: u32) -> bool {
    table
        .binary_search_by(|&(start, end)| {
            if end < code_point {
                std::cmp::Ordering::Less
            } else if start > code_point {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Looks up the IDNA2008 exception status of `code_point`: `Some(true)` if
/// it is explicitly disallowed, `Some(false)` if explicitly allowed.
pub(crate) fn idna_exception(code_point: u32) -> Option<bool> {
    IDNA_EXCEPTIONS
        .binary_search_by_key(&code_point, |&(cp, _)| cp)
        .ok()
        .map(|idx| IDNA_EXCEPTIONS[idx].1)
}

// RFC 5892 section 2.6 exceptions, the LDH hyphen and the CONTEXTJ/CONTEXTO
// code points, which are never DISALLOWED.
const IDNA_EXCEPTIONS: &[(u32, bool)] = &[
    (0x002d, false),
    (0x00b7, false),
    (0x00df, false),
    (0x0375, false),
    (0x03c2, false),
    (0x05f3, false),
    (0x05f4, false),
    (0x0640, true),
    (0x06fd, false),
    (0x06fe, false),
    (0x07fa, true),
    (0x0f0b, false),
    (0x200c, false),
    (0x200d, false),
    (0x3007, false),
    (0x302e, true),
    (0x302f, true),
    (0x3031, true),
    (0x3032, true),
    (0x3033, true),
    (0x3034, true),
    (0x3035, true),
    (0x303b, true),
    (0x30fb, false),
];

/// Code points with the Default_Ignorable_Code_Point property.
pub(crate) const DEFAULT_IGNORABLE_RANGES: &[(u32, u32)] = &[
    (0x00ad, 0x00ad),
    (0x034f, 0x034f),
    (0x061c, 0x061c),
    (0x115f, 0x1160),
    (0x17b4, 0x17b5),
    (0x180b, 0x180f),
    (0x200b, 0x200f),
    (0x202a, 0x202e),
    (0x2060, 0x206f),
    (0x3164, 0x3164),
    (0xfe00, 0xfe0f),
    (0xfeff, 0xfeff),
    (0xffa0, 0xffa0),
    (0xfff0, 0xfff8),
    (0x1bca0, 0x1bca3),
    (0x1d173, 0x1d17a),
    (0xe0000, 0xe0fff),
];

// Combining Diacritical Marks for Symbols, Musical Symbols and Ancient Greek
// Musical Notation.
pub(crate) const IGNORABLE_BLOCKS: &[(u32, u32)] = &[
    (0x20d0, 0x20ff),
    (0x1d100, 0x1d1ff),
    (0x1d200, 0x1d24f),
];

/// Conjoining jamo with Hangul_Syllable_Type L, V or T.
pub(crate) const OLD_HANGUL_JAMO_RANGES: &[(u32, u32)] = &[
    (0x1100, 0x11ff),
    (0xa960, 0xa97c),
    (0xd7b0, 0xd7c6),
    (0xd7cb, 0xd7fb),
];

/// Code points with the Emoji_Presentation property.
pub(crate) const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x231a, 0x231b),
    (0x23e9, 0x23ec),
    (0x23f0, 0x23f0),
    (0x23f3, 0x23f3),
    (0x25fd, 0x25fe),
    (0x2614, 0x2615),
    (0x2648, 0x2653),
    (0x267f, 0x267f),
    (0x2693, 0x2693),
    (0x26a1, 0x26a1),
    (0x26aa, 0x26ab),
    (0x26bd, 0x26be),
    (0x26c4, 0x26c5),
    (0x26ce, 0x26ce),
    (0x26d4, 0x26d4),
    (0x26ea, 0x26ea),
    (0x26f2, 0x26f3),
    (0x26f5, 0x26f5),
    (0x26fa, 0x26fa),
    (0x26fd, 0x26fd),
    (0x2705, 0x2705),
    (0x270a, 0x270b),
    (0x2728, 0x2728),
    (0x274c, 0x274c),
    (0x274e, 0x274e),
    (0x2753, 0x2755),
    (0x2757, 0x2757),
    (0x2795, 0x2797),
    (0x27b0, 0x27b0),
    (0x27bf, 0x27bf),
    (0x2b1b, 0x2b1c),
    (0x2b50, 0x2b50),
    (0x2b55, 0x2b55),
    (0x1f004, 0x1f004),
    (0x1f0cf, 0x1f0cf),
    (0x1f18e, 0x1f18e),
    (0x1f191, 0x1f19a),
    (0x1f1e6, 0x1f1ff),
    (0x1f201, 0x1f201),
    (0x1f21a, 0x1f21a),
    (0x1f22f, 0x1f22f),
    (0x1f232, 0x1f236),
    (0x1f238, 0x1f23a),
    (0x1f250, 0x1f251),
    (0x1f300, 0x1f320),
    (0x1f32d, 0x1f335),
    (0x1f337, 0x1f37c),
    (0x1f37e, 0x1f393),
    (0x1f3a0, 0x1f3ca),
    (0x1f3cf, 0x1f3d3),
    (0x1f3e0, 0x1f3f0),
    (0x1f3f4, 0x1f3f4),
    (0x1f3f8, 0x1f43e),
    (0x1f440, 0x1f440),
    (0x1f442, 0x1f4fc),
    (0x1f4ff, 0x1f53d),
    (0x1f54b, 0x1f54e),
    (0x1f550, 0x1f567),
    (0x1f57a, 0x1f57a),
    (0x1f595, 0x1f596),
    (0x1f5a4, 0x1f5a4),
    (0x1f5fb, 0x1f64f),
    (0x1f680, 0x1f6c5),
    (0x1f6cc, 0x1f6cc),
    (0x1f6d0, 0x1f6d2),
    (0x1f6d5, 0x1f6d7),
    (0x1f6eb, 0x1f6ec),
    (0x1f6f4, 0x1f6fc),
    (0x1f7e0, 0x1f7eb),
    (0x1f90c, 0x1f93a),
    (0x1f93c, 0x1f945),
    (0x1f947, 0x1f9ff),
    (0x1fa70, 0x1faff),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted(table: &[(u32, u32)]) {
        for &(start, end) in table {
            assert!(start <= end, "{start:#x}..{end:#x}");
        }
        for pair in table.windows(2) {
            assert!(pair[0].1 < pair[1].0, "{:#x} overlaps {:#x}", pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn test_tables_sorted() {
        assert_sorted(DEFAULT_IGNORABLE_RANGES);
        assert_sorted(IGNORABLE_BLOCKS);
        assert_sorted(OLD_HANGUL_JAMO_RANGES);
        assert_sorted(EMOJI_RANGES);
        assert!(IDNA_EXCEPTIONS.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_in_ranges() {
        assert!(in_ranges(EMOJI_RANGES, 0x1f600));
        assert!(in_ranges(EMOJI_RANGES, 0x231a));
        assert!(in_ranges(EMOJI_RANGES, 0x1faff));
        assert!(!in_ranges(EMOJI_RANGES, 'a' as u32));
        assert!(!in_ranges(EMOJI_RANGES, 0x1f441));
        assert!(in_ranges(OLD_HANGUL_JAMO_RANGES, 0xd7b0));
        assert!(!in_ranges(OLD_HANGUL_JAMO_RANGES, 0xd7c8));
        assert!(!in_ranges(&[], 0));
    }

    #[test]
    fn test_idna_exception() {
        assert_eq!(idna_exception(0x00df), Some(false));
        assert_eq!(idna_exception(0x0640), Some(true));
        assert_eq!(idna_exception('a' as u32), None);
    }
}
