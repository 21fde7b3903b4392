/// Boxed error returned by an [`IdentityResolver`](crate::IdentityResolver).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building a runtime spec.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no process defined")]
    NoProcess,

    /// The identity resolver failed. Display and source are the resolver's own.
    #[error(transparent)]
    Identity(BoxError),
}

impl Error {
    /// Returns the resolver error if this is an identity failure.
    pub fn identity_cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Identity(err) => Some(err.as_ref()),
            Self::NoProcess => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
