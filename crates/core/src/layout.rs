//! Host directory layout the builder derives job paths from.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_BUNDLES_DIR: &str = "/var/vcap/data/crucible/bundles";
pub const DEFAULT_JOBS_DIR: &str = "/var/vcap/jobs";
pub const DEFAULT_DATA_PACKAGES_DIR: &str = "/var/vcap/data/packages";
pub const DEFAULT_PACKAGES_DIR: &str = "/var/vcap/packages";

const ROOTFS_DIR: &str = "rootfs";

/// Where bundles, jobs and packages live on the host.
///
/// The default matches a BOSH-style `/var/vcap` tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub bundles_dir: PathBuf,
    pub jobs_dir: PathBuf,
    pub data_packages_dir: PathBuf,
    pub packages_dir: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            bundles_dir: PathBuf::from(DEFAULT_BUNDLES_DIR),
            jobs_dir: PathBuf::from(DEFAULT_JOBS_DIR),
            data_packages_dir: PathBuf::from(DEFAULT_DATA_PACKAGES_DIR),
            packages_dir: PathBuf::from(DEFAULT_PACKAGES_DIR),
        }
    }
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundles_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.bundles_dir = path.into();
        self
    }

    pub fn with_jobs_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.jobs_dir = path.into();
        self
    }

    pub fn with_data_packages_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_packages_dir = path.into();
        self
    }

    pub fn with_packages_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.packages_dir = path.into();
        self
    }

    /// Bundle directory of a job; the runtime reads `config.json` from here.
    pub fn bundle_dir(&self, job_name: &str) -> PathBuf {
        join_under(&self.bundles_dir, job_name)
    }

    /// Root filesystem of a job, unique per job name.
    pub fn rootfs(&self, job_name: &str) -> PathBuf {
        self.bundle_dir(job_name).join(ROOTFS_DIR)
    }

    pub fn job_dir(&self, job_name: &str) -> PathBuf {
        join_under(&self.jobs_dir, job_name)
    }
}

/// Joins `name` below `base`, keeping only its normal components so the
/// result never leaves `base`.
fn join_under(base: &Path, name: &str) -> PathBuf {
    Path::new(name)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .fold(base.to_path_buf(), |path, part| path.join(part))
}

pub(crate) fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
