/// Error condition variants.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A prefix string that does not parse as a CIDR of the requested family.
    #[error("invalid {family} prefix '{text}'")]
    InvalidPrefix {
        /// Address family name the prefix was parsed against.
        family: &'static str,
        /// The offending input.
        text: String,
    },
    /// A bare address string that does not parse.
    #[error("invalid {family} address '{text}'")]
    InvalidAddress {
        /// Address family name the address was parsed against.
        family: &'static str,
        /// The offending input.
        text: String,
    },
    /// An AS_PATH containing a token outside unsigned 32-bit range.
    #[error("invalid AS_PATH '{0}'")]
    InvalidAsPath(String),
    /// A prefix and nexthop of different address families.
    #[error("prefix '{prefix}' and nexthop '{nexthop}' are different address families")]
    FamilyMismatch {
        /// The route prefix.
        prefix: String,
        /// The nexthop address.
        nexthop: String,
    },
    /// I/O errors from route sources and sinks.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Anything without a more specific variant.
    #[error("{0}")]
    General(String),
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Self::General(value.to_string())
    }
}
