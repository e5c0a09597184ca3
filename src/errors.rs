use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A package identifier string is missing a required delimiter, or one of the
    /// required fields (name, version, release, arch) ended up empty.
    #[error("malformed package identifier {identifier:?}: {reason}")]
    MalformedIdentifier {
        identifier: String,
        reason: &'static str,
    },
}

impl Error {
    pub(crate) fn malformed(identifier: impl Into<String>, reason: &'static str) -> Self {
        Error::MalformedIdentifier {
            identifier: identifier.into(),
            reason,
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
