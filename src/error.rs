use std::net::IpAddr;

/// Errors returned by encoding, decoding and confusion level registration.
#[derive(Debug, thiserror::Error)]
pub enum IdunnoError {
    /// The named confusion level is not registered.
    #[error("unknown confusion level: {0}")]
    UnknownLevel(String),

    /// A confusion level with this name is already registered.
    #[error("confusion level already registered: {0}")]
    DuplicateLevel(String),

    /// No packing of the address satisfies the requested confusion level.
    #[error("could not represent given address \"{address}\" as valid I-DUNNO at confusion level \"{level}\"")]
    NoEncodingAtLevel { address: IpAddr, level: String },

    /// The input is not an I-DUNNO form.
    #[error("invalid I-DUNNO notation")]
    InvalidNotation,

    /// The form decoded to octets that do not make up an IP address.
    #[error("invalid IP address")]
    InvalidAddress,
}

pub type Result<T> = std::result::Result<T, IdunnoError>;
