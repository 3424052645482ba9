//! The confusion constraints a candidate is scored against.

use std::fmt;
use std::str::FromStr;

use crate::classify::Classifier;

/// A named boolean predicate over a candidate's text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constraint {
    /// Some character is encoded with more than one byte.
    MultiOctet,
    /// Some character is disallowed by IDNA2008.
    Disallowed,
    /// No character is printable.
    NonPrintable,
    /// Characters come from more than one script.
    MultipleScripts,
    /// Some character is a symbol.
    CategorySymbol,
    /// Characters have more than one bidirectional class.
    MultipleDirectionalities,
    /// The text contains a confusable.
    Confusables,
    /// The text contains an emoji.
    Emoji,
}

impl Constraint {
    pub const ALL: [Constraint; 8] = [
        Constraint::MultiOctet,
        Constraint::Disallowed,
        Constraint::NonPrintable,
        Constraint::MultipleScripts,
        Constraint::CategorySymbol,
        Constraint::MultipleDirectionalities,
        Constraint::Confusables,
        Constraint::Emoji,
    ];

    /// The constraint's name as used in level definitions.
    pub fn name(self) -> &'static str {
        match self {
            Constraint::MultiOctet => "multi-octet",
            Constraint::Disallowed => "disallowed",
            Constraint::NonPrintable => "non-printable",
            Constraint::MultipleScripts => "multiple-scripts",
            Constraint::CategorySymbol => "category-symbol",
            Constraint::MultipleDirectionalities => "multiple-directionalities",
            Constraint::Confusables => "confusables",
            Constraint::Emoji => "emoji",
        }
    }

    /// Position of the constraint in [`Constraint::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Evaluates the constraint on `text`.
    pub fn holds<C: Classifier + ?Sized>(self, text: &str, classifier: &C) -> bool {
        match self {
            Constraint::MultiOctet => text.bytes().any(|byte| byte >= 0b1100_0000),
            Constraint::Disallowed => text.chars().any(|ch| classifier.is_disallowed(ch)),
            Constraint::NonPrintable => !text.chars().any(|ch| classifier.is_printable(ch)),
            Constraint::MultipleScripts => {
                let mut scripts = text.chars().map(|ch| classifier.script(ch));
                match scripts.next() {
                    Some(first) => scripts.any(|script| script != first),
                    None => false,
                }
            }
            Constraint::CategorySymbol => text.chars().any(|ch| classifier.is_symbol(ch)),
            Constraint::MultipleDirectionalities => {
                let mut classes = text.chars().map(|ch| classifier.bidi_class(ch));
                match classes.next() {
                    Some(first) => classes.any(|class| class != first),
                    None => false,
                }
            }
            Constraint::Confusables => classifier.contains_confusable(text),
            Constraint::Emoji => classifier.contains_emoji(text),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognized constraint name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown confusion constraint: {0}")]
pub struct UnknownConstraint(pub String);

impl FromStr for Constraint {
    type Err = UnknownConstraint;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Constraint::ALL
            .into_iter()
            .find(|constraint| constraint.name() == name)
            .ok_or_else(|| UnknownConstraint(name.to_owned()))
    }
}
