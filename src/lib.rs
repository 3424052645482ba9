//! Internationalized Deliberately Unreadable Network Notation (I-DUNNO, RFC 8771).
//!
//! An I-DUNNO form packs the bits of an IPv4 or IPv6 address into a sequence
//! of UTF-8 code points, chosen so that the result is as confusing as possible
//! to humans while remaining valid text that decodes back to the address.
//!
//! # Confusion levels
//!
//! - `minimum`: a multi-octet character and an IDNA2008-disallowed character
//! - `satisfactory`: `minimum`, plus two of: no printable character, more than
//!   one script, a symbol
//! - `delightful`: `satisfactory`, plus two of: more than one bidirectional
//!   class, a confusable, an emoji
//!
//! Not every address can be represented at every level; encoding then fails
//! with [`IdunnoError::NoEncodingAtLevel`].
//!
//! # Examples
//!
//! ```rust
//! use i_dunno::{decode, encode, IdunnoError};
//! use std::net::IpAddr;
//!
//! let ip: IpAddr = "198.51.100.7".parse().unwrap();
//! match encode(ip, "minimum") {
//!     Ok(form) => assert_eq!(decode(&form).unwrap(), ip),
//!     Err(IdunnoError::NoEncodingAtLevel { .. }) => {}
//!     Err(err) => panic!("{err}"),
//! }
//!
//! let form = b"g&\x10\xc3\xb0";
//! assert_eq!(decode(form).unwrap(), "206.152.128.240".parse::<IpAddr>().unwrap());
//! ```
//!
//! Custom levels and classification tables plug into [`IDunno`]:
//!
//! ```rust
//! use i_dunno::{ConfusionLevel, Constraint, IDunno, LevelSet, Packer, UnicodeTables};
//!
//! let mut levels = LevelSet::standard();
//! levels
//!     .insert(ConfusionLevel::new("emoji-only", 1, [Constraint::Emoji]).inherit("minimum"))
//!     .unwrap();
//! let i_dunno = IDunno::with_parts(Packer::default(), levels, UnicodeTables);
//! assert!(i_dunno.satisfies("\u{c9}\u{1f600}".as_bytes(), "emoji-only").unwrap());
//! ```
//!
//! The output of encoding MAY be presented to humans; decoded addresses
//! SHOULD NOT be.

pub(crate) mod classify;
pub(crate) mod codec;
pub(crate) mod common;
pub(crate) mod constraints;
pub(crate) mod error;
pub(crate) mod levels;
pub(crate) mod packer;
pub(crate) mod tables;

use std::net::IpAddr;

pub use classify::{Classifier, UnicodeTables};
pub use codec::IDunno;
pub use common::{bits_to_bytes, bits_to_int, bytes_to_bits, bytes_to_ip, int_to_bits, ip_to_bytes};
pub use constraints::{Constraint, UnknownConstraint};
pub use error::{IdunnoError, Result};
pub use levels::{ConfusionLevel, LevelSet, DELIGHTFUL, MINIMUM, SATISFACTORY};
pub use packer::{Candidates, LengthRule, Packer, Packing, UTF8_LENGTHS};

/// Confusion level used when none is specified.
pub const DEFAULT_LEVEL: &str = SATISFACTORY;

/// Encodes an IP address into a random I-DUNNO form at the given confusion level.
pub fn encode(ip: IpAddr, level: &str) -> Result<Vec<u8>> {
    IDunno::new().encode_ipaddr(ip, level)
}

/// Decodes an I-DUNNO form into an IP address.
pub fn decode(form: &[u8]) -> Result<IpAddr> {
    IDunno::new().decode_ipaddr(form)
}

pub mod reexports {
    pub use rand;
    pub use unicode_bidi;
    pub use unicode_script;
}
