//! OCI runtime spec types.
//!
//! These mirror the subset of the OCI `config.json` layout the builder emits.
//! Field names serialize in the runtime-spec's camelCase form.

mod linux;
mod mount;
mod process;

pub use linux::{Linux, Namespace, NamespaceType, RootfsPropagation};
pub use mount::Mount;
pub use process::{ConsoleSize, Process, Rlimit, User};

use serde::{Deserialize, Serialize};

/// A complete runtime spec for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeSpec {
    #[serde(rename = "ociVersion")]
    pub version: String,
    pub platform: Platform,
    pub process: Process,
    pub root: Root,
    pub hostname: String,
    pub mounts: Vec<Mount>,
    pub linux: Linux,
}

/// Host operating system and architecture, in runtime-spec naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

/// Root filesystem of the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
    pub path: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub readonly: bool,
}

impl Root {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            readonly: false,
        }
    }
}
