//! Translates a supervised job's configuration into an OCI runtime spec.
//!
//! The crate decides how a job is isolated (mounts, namespaces, limits, user)
//! but never creates the sandbox itself. The resulting [`RuntimeSpec`]
//! serializes to the runtime's `config.json`.
//!
//! ```
//! use crucible_core::{Identity, JobConfig, ProcessConfig, StaticIdentityResolver, build};
//!
//! let resolver = StaticIdentityResolver::new().with_identity(Identity::new(2000, 3000, "vcap"));
//! let config = JobConfig::new(
//!     ProcessConfig::new("/var/vcap/packages/ambien/bin/ambien").with_args(["foo", "bar"]),
//! );
//!
//! let spec = build("ambien-job", &config, &resolver)?;
//! assert_eq!(spec.process.args, ["/var/vcap/packages/ambien/bin/ambien", "foo", "bar"]);
//! # Ok::<(), crucible_core::Error>(())
//! ```

mod builder;
pub mod config;
pub mod error;
pub mod identity;
pub mod layout;
pub mod platform;
mod policy;
pub mod spec;

pub use builder::{SpecBuilder, build};
pub use config::{JobConfig, ProcessConfig};
pub use error::{BoxError, Error, Result};
#[cfg(unix)]
pub use identity::SystemIdentityResolver;
pub use identity::{Identity, IdentityResolver, JOB_PRINCIPAL, LookupError, StaticIdentityResolver};
pub use layout::Layout;
pub use platform::{OCI_VERSION, host_platform};
pub use spec::RuntimeSpec;
