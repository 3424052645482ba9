//! Per-character classification queried by the confusion constraints.

use caseless::Caseless;
use unicode_bidi::BidiClass;
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;
use unicode_script::{Script, UnicodeScript};
use unicode_security::confusable_detection::skeleton;

use crate::tables;

/// Read-only character classification used to score candidates.
///
/// Implementations must be stateless from the caller's point of view; the
/// same character always classifies the same way.
pub trait Classifier {
    /// The script the character belongs to.
    fn script(&self, ch: char) -> Script;

    /// The bidirectional class of the character.
    fn bidi_class(&self, ch: char) -> BidiClass;

    /// Whether IDNA2008 disallows the character in domain labels.
    fn is_disallowed(&self, ch: char) -> bool;

    /// Whether the character is printable.
    fn is_printable(&self, ch: char) -> bool;

    /// Whether the character is in one of the symbol categories.
    fn is_symbol(&self, ch: char) -> bool;

    /// Whether the text contains a string known to be confusable with another.
    fn contains_confusable(&self, text: &str) -> bool;

    /// Whether the text contains an emoji.
    fn contains_emoji(&self, text: &str) -> bool;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn script(&self, ch: char) -> Script {
        (**self).script(ch)
    }

    fn bidi_class(&self, ch: char) -> BidiClass {
        (**self).bidi_class(ch)
    }

    fn is_disallowed(&self, ch: char) -> bool {
        (**self).is_disallowed(ch)
    }

    fn is_printable(&self, ch: char) -> bool {
        (**self).is_printable(ch)
    }

    fn is_symbol(&self, ch: char) -> bool {
        (**self).is_symbol(ch)
    }

    fn contains_confusable(&self, text: &str) -> bool {
        (**self).contains_confusable(text)
    }

    fn contains_emoji(&self, text: &str) -> bool {
        (**self).contains_emoji(text)
    }
}

/// Classification backed by the Unicode Character Database.
///
/// Script, bidirectional class and general category come from the
/// `unicode-script`, `unicode-bidi` and `unicode-general-category` crates.
/// IDNA2008 status follows the RFC 5892 derivation: exceptions, unassigned,
/// unstable under NFKC case folding, ignorable properties and blocks, old
/// Hangul jamo, then the letter and digit categories. Confusables come from
/// the UTS #39 prototype mapping in `unicode-security`. Every confusables.txt
/// source is a single code point, so substring membership reduces to a
/// per-character check, and the same holds for the emoji table.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeTables;

impl Classifier for UnicodeTables {
    fn script(&self, ch: char) -> Script {
        ch.script()
    }

    fn bidi_class(&self, ch: char) -> BidiClass {
        unicode_bidi::bidi_class(ch)
    }

    fn is_disallowed(&self, ch: char) -> bool {
        let code_point = ch as u32;
        if let Some(disallowed) = tables::idna_exception(code_point) {
            return disallowed;
        }
        let category = get_general_category(ch);
        if matches!(category, GeneralCategory::Unassigned) && !is_noncharacter(code_point) {
            return false;
        }
        if is_unstable(ch)
            || ch.is_whitespace()
            || is_noncharacter(code_point)
            || tables::in_ranges(tables::DEFAULT_IGNORABLE_RANGES, code_point)
            || tables::in_ranges(tables::IGNORABLE_BLOCKS, code_point)
            || tables::in_ranges(tables::OLD_HANGUL_JAMO_RANGES, code_point)
        {
            return true;
        }
        !matches!(
            category,
            GeneralCategory::LowercaseLetter
                | GeneralCategory::UppercaseLetter
                | GeneralCategory::OtherLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::DecimalNumber
        )
    }

    fn is_printable(&self, ch: char) -> bool {
        match get_general_category(ch) {
            GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator => false,
            GeneralCategory::SpaceSeparator => ch == ' ',
            _ => true,
        }
    }

    fn is_symbol(&self, ch: char) -> bool {
        matches!(
            get_general_category(ch),
            GeneralCategory::MathSymbol
                | GeneralCategory::CurrencySymbol
                | GeneralCategory::ModifierSymbol
                | GeneralCategory::OtherSymbol
        )
    }

    fn contains_confusable(&self, text: &str) -> bool {
        let mut buf = [0; 4];
        text.chars().any(|ch| {
            let single: &str = ch.encode_utf8(&mut buf);
            !skeleton(single).eq(single.nfd())
        })
    }

    fn contains_emoji(&self, text: &str) -> bool {
        text.chars()
            .any(|ch| tables::in_ranges(tables::EMOJI_RANGES, ch as u32))
    }
}

/// NFKC(casefold(NFKC(ch))) differs from `ch`.
fn is_unstable(ch: char) -> bool {
    !std::iter::once(ch)
        .nfkc()
        .default_case_fold()
        .nfkc()
        .eq(std::iter::once(ch))
}

fn is_noncharacter(code_point: u32) -> bool {
    (0xfdd0..=0xfdef).contains(&code_point) || code_point & 0xfffe == 0xfffe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_and_bidi() {
        let tables = UnicodeTables;
        assert_eq!(tables.script('a'), Script::Latin);
        assert_eq!(tables.script('\u{430}'), Script::Cyrillic);
        assert_eq!(tables.script('1'), Script::Common);
        assert_eq!(tables.bidi_class('a'), BidiClass::L);
        assert_eq!(tables.bidi_class('\u{5d0}'), BidiClass::R);
        assert_eq!(tables.bidi_class('\u{627}'), BidiClass::AL);
    }

    #[test]
    fn test_disallowed() {
        let tables = UnicodeTables;
        for ch in ['a', 'z', '0', '-', '\u{df}', '\u{5d0}', '\u{301}'] {
            assert!(!tables.is_disallowed(ch), "{ch:?}");
        }
        for ch in ['A', ' ', '!', '\0', '\u{7f}', '\u{640}', '\u{ff41}', '\u{2122}'] {
            assert!(tables.is_disallowed(ch), "{ch:?}");
        }
    }

    #[test]
    fn test_disallowed_unstable_under_case_folding() {
        let tables = UnicodeTables;
        // compatibility letters, case-folding changes and canonical singletons
        let unstable = [
            '\u{aa}', '\u{b5}', '\u{ba}', '\u{133}', '\u{149}', '\u{17f}', '\u{1c6}', '\u{2b0}',
            '\u{2b8}', '\u{2e0}', '\u{340}', '\u{374}', '\u{37a}', '\u{3d0}',
        ];
        for ch in unstable {
            assert!(is_unstable(ch), "U+{:04X}", ch as u32);
            assert!(tables.is_disallowed(ch), "U+{:04X}", ch as u32);
        }
        assert!(!is_unstable('\u{e9}'));
        assert!(!is_unstable('\u{3b2}'));
    }

    #[test]
    fn test_disallowed_ignorable_and_jamo() {
        let tables = UnicodeTables;
        // soft hyphen, word joiner, variation selector, noncharacters, jamo
        for ch in ['\u{ad}', '\u{2060}', '\u{fe0f}', '\u{fdd0}', '\u{fffe}', '\u{1100}', '\u{11a8}'] {
            assert!(tables.is_disallowed(ch), "U+{:04X}", ch as u32);
        }
        // combining mark for symbols
        assert!(tables.is_disallowed('\u{20dd}'));
        // precomposed Hangul syllables are PVALID
        assert!(!tables.is_disallowed('\u{ac00}'));
        // unassigned
        assert!(!tables.is_disallowed('\u{378}'));
        // joiners are CONTEXTJ
        assert!(!tables.is_disallowed('\u{200d}'));
    }

    #[test]
    fn test_printable() {
        let tables = UnicodeTables;
        for ch in ['a', ' ', '\u{20ac}', '\u{1f600}'] {
            assert!(tables.is_printable(ch), "{ch:?}");
        }
        for ch in ['\0', '\n', '\u{a0}', '\u{200b}', '\u{2028}', '\u{e000}'] {
            assert!(!tables.is_printable(ch), "{ch:?}");
        }
    }

    #[test]
    fn test_symbol() {
        let tables = UnicodeTables;
        for ch in ['+', '$', '^', '\u{a9}', '\u{1f600}'] {
            assert!(tables.is_symbol(ch), "{ch:?}");
        }
        for ch in ['a', '1', '!', ' '] {
            assert!(!tables.is_symbol(ch), "{ch:?}");
        }
    }

    #[test]
    fn test_confusables_and_emoji() {
        let tables = UnicodeTables;
        assert!(tables.contains_confusable("p\u{430}ypal"));
        assert!(tables.contains_confusable("l0l"));
        assert!(tables.contains_confusable("\u{3bf}"));
        assert!(!tables.contains_confusable("abc"));
        // decomposition alone does not make a character confusable
        assert!(!tables.contains_confusable("\u{e9}"));
        assert!(tables.contains_emoji("x\u{1f600}y"));
        assert!(!tables.contains_emoji("x\u{a9}y"));
        assert!(!tables.contains_emoji(""));
    }

    #[test]
    fn test_reference_forwards() {
        let tables = UnicodeTables;
        let by_ref: &dyn Classifier = &tables;
        assert_eq!((&by_ref).script('a'), Script::Latin);
        assert!((&by_ref).is_symbol('+'));
    }
}
