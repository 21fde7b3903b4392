//! Identity resolution for the user a job runs as.
//!
//! The spec builder never computes uids itself. It asks an [`IdentityResolver`]
//! for the fixed principal [`JOB_PRINCIPAL`] and copies the answer into the
//! process block.

use crate::error::BoxError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Principal every sandboxed job runs as.
pub const JOB_PRINCIPAL: &str = "vcap";

/// A resolved user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: u32,
    pub gid: u32,
    pub username: String,
}

impl Identity {
    pub fn new(uid: u32, gid: u32, username: impl Into<String>) -> Self {
        Self {
            uid,
            gid,
            username: username.into(),
        }
    }
}

/// Maps a principal name to a concrete identity.
pub trait IdentityResolver {
    fn resolve(&self, principal: &str) -> Result<Identity, BoxError>;
}

impl<R: IdentityResolver + ?Sized> IdentityResolver for &R {
    fn resolve(&self, principal: &str) -> Result<Identity, BoxError> {
        (**self).resolve(principal)
    }
}

impl<R: IdentityResolver + ?Sized> IdentityResolver for Box<R> {
    fn resolve(&self, principal: &str) -> Result<Identity, BoxError> {
        (**self).resolve(principal)
    }
}

/// Errors from the built-in resolvers.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("user '{0}' does not exist")]
    UnknownUser(String),

    #[cfg(unix)]
    #[error("failed to look up user '{name}': {source}")]
    Database {
        name: String,
        #[source]
        source: nix::Error,
    },
}

/// Resolves principals from a fixed table.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityResolver {
    identities: HashMap<String, Identity>,
}

impl StaticIdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an identity under its own username.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identities.insert(identity.username.clone(), identity);
        self
    }

    /// Registers `identity` as the answer for `principal`, whatever its username.
    pub fn with_principal(mut self, principal: impl Into<String>, identity: Identity) -> Self {
        self.identities.insert(principal.into(), identity);
        self
    }
}

impl IdentityResolver for StaticIdentityResolver {
    fn resolve(&self, principal: &str) -> Result<Identity, BoxError> {
        self.identities
            .get(principal)
            .cloned()
            .ok_or_else(|| LookupError::UnknownUser(principal.to_string()).into())
    }
}

/// Resolves principals from the host user database (`getpwnam_r`).
#[cfg(unix)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdentityResolver;

#[cfg(unix)]
impl IdentityResolver for SystemIdentityResolver {
    fn resolve(&self, principal: &str) -> Result<Identity, BoxError> {
        let user = nix::unistd::User::from_name(principal)
            .map_err(|source| LookupError::Database {
                name: principal.to_string(),
                source,
            })?
            .ok_or_else(|| LookupError::UnknownUser(principal.to_string()))?;

        tracing::debug!(
            "resolved user {} to uid={} gid={}",
            user.name,
            user.uid,
            user.gid
        );

        Ok(Identity {
            uid: user.uid.as_raw(),
            gid: user.gid.as_raw(),
            username: user.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod static_resolver {
        use super::*;

        #[test]
        fn resolves_registered_identity() {
            let resolver =
                StaticIdentityResolver::new().with_identity(Identity::new(2000, 3000, "vcap"));
            let identity = resolver.resolve("vcap").unwrap();
            assert_eq!(identity, Identity::new(2000, 3000, "vcap"));
        }

        #[test]
        fn with_principal_maps_to_a_different_username() {
            let resolver = StaticIdentityResolver::new()
                .with_principal("vcap", Identity::new(2000, 3000, "worker"));
            let identity = resolver.resolve("vcap").unwrap();
            assert_eq!(identity.username, "worker");
            assert!(resolver.resolve("worker").is_err());
        }

        #[test]
        fn unknown_principal_is_an_error() {
            let resolver = StaticIdentityResolver::new();
            let err = resolver.resolve("vcap").unwrap_err();
            assert_eq!(err.to_string(), "user 'vcap' does not exist");
            assert!(matches!(
                err.downcast_ref::<LookupError>(),
                Some(LookupError::UnknownUser(name)) if name == "vcap"
            ));
        }

        #[test]
        fn works_through_references_and_boxes() {
            let resolver =
                StaticIdentityResolver::new().with_identity(Identity::new(1, 2, "vcap"));
            let boxed: Box<dyn IdentityResolver> = Box::new(resolver.clone());
            assert_eq!((&resolver).resolve("vcap").unwrap().uid, 1);
            assert_eq!(boxed.resolve("vcap").unwrap().gid, 2);
        }
    }

    #[cfg(unix)]
    mod system_resolver {
        use super::*;

        #[test]
        fn resolves_root() {
            let identity = SystemIdentityResolver.resolve("root").unwrap();
            assert_eq!(identity.uid, 0);
            assert_eq!(identity.username, "root");
        }

        #[test]
        fn unknown_user_is_reported() {
            let err = SystemIdentityResolver
                .resolve("crucible-no-such-user")
                .unwrap_err();
            assert!(matches!(
                err.downcast_ref::<LookupError>(),
                Some(LookupError::UnknownUser(_))
            ));
        }
    }

    #[test]
    fn identity_serializes_field_names() {
        let json = serde_json::to_string(&Identity::new(2000, 3000, "vcap")).unwrap();
        assert_eq!(json, r#"{"uid":2000,"gid":3000,"username":"vcap"}"#);
    }
}
