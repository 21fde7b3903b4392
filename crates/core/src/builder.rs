//! Translation of a job configuration into a runtime spec.

use crate::config::{JobConfig, ProcessConfig};
use crate::error::{Error, Result};
use crate::identity::{Identity, IdentityResolver, JOB_PRINCIPAL};
use crate::layout::{Layout, path_string};
use crate::platform::{OCI_VERSION, host_platform};
use crate::policy;
use crate::spec::{Linux, Mount, Namespace, Process, Root, RootfsPropagation, RuntimeSpec};

/// Builds runtime specs for jobs laid out according to a [`Layout`].
///
/// # Example
///
/// ```
/// use crucible_core::{Identity, JobConfig, ProcessConfig, SpecBuilder, StaticIdentityResolver};
///
/// let resolver = StaticIdentityResolver::new().with_identity(Identity::new(2000, 3000, "vcap"));
/// let config = JobConfig::new(ProcessConfig::new("/var/vcap/packages/app/bin/app"));
///
/// let spec = SpecBuilder::new().build("app-job", &config, &resolver).unwrap();
/// assert_eq!(spec.hostname, "app-job");
/// assert_eq!(spec.root.path, "/var/vcap/data/crucible/bundles/app-job/rootfs");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpecBuilder {
    layout: Layout,
}

impl SpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Builds the spec for `job_name`.
    ///
    /// Fails with [`Error::NoProcess`] before consulting the resolver if the
    /// config has no process. Otherwise resolves [`JOB_PRINCIPAL`] exactly once.
    pub fn build<R>(
        &self,
        job_name: &str,
        config: &JobConfig,
        resolver: &R,
    ) -> Result<RuntimeSpec>
    where
        R: IdentityResolver + ?Sized,
    {
        let process = config.process.as_ref().ok_or(Error::NoProcess)?;

        let identity = resolver.resolve(JOB_PRINCIPAL).map_err(|err| {
            tracing::warn!(
                "failed to resolve {} for job {}: {}",
                JOB_PRINCIPAL,
                job_name,
                err
            );
            Error::Identity(err)
        })?;

        tracing::debug!(
            "building spec for job {} as uid={} gid={}",
            job_name,
            identity.uid,
            identity.gid
        );

        Ok(RuntimeSpec {
            version: OCI_VERSION.to_string(),
            platform: host_platform(),
            process: self.process(process, identity),
            root: Root::new(path_string(&self.layout.rootfs(job_name))),
            hostname: job_name.to_string(),
            mounts: self.mounts(job_name),
            linux: linux(),
        })
    }

    fn process(&self, config: &ProcessConfig, identity: Identity) -> Process {
        let args = std::iter::once(config.executable.clone())
            .chain(config.args.iter().cloned())
            .collect();

        Process {
            terminal: false,
            console_size: None,
            user: identity.into(),
            args,
            env: config.env.clone(),
            cwd: "/".to_string(),
            rlimits: policy::rlimits(),
            no_new_privileges: true,
        }
    }

    fn mounts(&self, job_name: &str) -> Vec<Mount> {
        let system = policy::SYSTEM_MOUNTS.iter().map(|m| m.to_mount());
        let host = policy::HOST_BIND_DIRS
            .iter()
            .map(|dir| Mount::bind(*dir, policy::HOST_BIND_OPTIONS));
        let job = [
            self.layout.job_dir(job_name),
            self.layout.data_packages_dir.clone(),
            self.layout.packages_dir.clone(),
        ]
        .into_iter()
        .map(|dir| Mount::bind(path_string(&dir), policy::JOB_BIND_OPTIONS));

        system.chain(host).chain(job).collect()
    }
}

fn linux() -> Linux {
    Linux {
        namespaces: policy::NAMESPACES.iter().map(|&kind| Namespace::from(kind)).collect(),
        masked_paths: policy::to_owned_paths(policy::MASKED_PATHS),
        readonly_paths: policy::to_owned_paths(policy::READONLY_PATHS),
        rootfs_propagation: Some(RootfsPropagation::Private),
    }
}

/// Builds the spec for `job_name` using the default [`Layout`].
pub fn build<R>(job_name: &str, config: &JobConfig, resolver: &R) -> Result<RuntimeSpec>
where
    R: IdentityResolver + ?Sized,
{
    SpecBuilder::new().build(job_name, config, resolver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentityResolver;
    use crate::spec::NamespaceType;

    fn resolver() -> StaticIdentityResolver {
        StaticIdentityResolver::new().with_identity(Identity::new(2000, 3000, "vcap"))
    }

    fn config() -> JobConfig {
        JobConfig::new(
            ProcessConfig::new("/a/b")
                .with_args(["foo", "bar"])
                .with_env(["RAVE=true"]),
        )
    }

    mod process {
        use super::*;

        #[test]
        fn prepends_executable_to_args() {
            let spec = build("job", &config(), &resolver()).unwrap();
            assert_eq!(spec.process.args, vec!["/a/b", "foo", "bar"]);
        }

        #[test]
        fn empty_executable_is_passed_through() {
            let config = JobConfig::new(ProcessConfig::default());
            let spec = build("job", &config, &resolver()).unwrap();
            assert_eq!(spec.process.args, vec![""]);
        }

        #[test]
        fn duplicate_args_are_kept() {
            let config = JobConfig::new(ProcessConfig::new("/x").with_args(["a", "a"]));
            let spec = build("job", &config, &resolver()).unwrap();
            assert_eq!(spec.process.args, vec!["/x", "a", "a"]);
        }

        #[test]
        fn runs_from_root_without_new_privileges() {
            let spec = build("job", &config(), &resolver()).unwrap();
            assert_eq!(spec.process.cwd, "/");
            assert!(spec.process.no_new_privileges);
            assert!(!spec.process.terminal);
            assert!(spec.process.console_size.is_none());
        }

        #[test]
        fn user_comes_from_resolver() {
            let spec = build("job", &config(), &resolver()).unwrap();
            assert_eq!(spec.process.user.uid, 2000);
            assert_eq!(spec.process.user.gid, 3000);
            assert_eq!(spec.process.user.username, "vcap");
        }
    }

    mod layout {
        use super::*;

        #[test]
        fn custom_layout_moves_root_and_job_mount() {
            let builder = SpecBuilder::with_layout(
                Layout::new()
                    .with_bundles_dir("/srv/bundles")
                    .with_jobs_dir("/srv/jobs"),
            );
            let spec = builder.build("web", &config(), &resolver()).unwrap();
            assert_eq!(spec.root.path, "/srv/bundles/web/rootfs");
            assert!(spec.mounts.iter().any(|m| m.destination == "/srv/jobs/web"));
            assert_eq!(builder.layout().jobs_dir, std::path::PathBuf::from("/srv/jobs"));
        }
    }

    mod linux {
        use super::*;

        #[test]
        fn isolates_only_uts_and_mount() {
            let spec = build("job", &config(), &resolver()).unwrap();
            let kinds: Vec<_> = spec.linux.namespaces.iter().map(|ns| ns.kind).collect();
            assert_eq!(kinds, vec![NamespaceType::Uts, NamespaceType::Mount]);
        }

        #[test]
        fn propagation_is_private() {
            let spec = build("job", &config(), &resolver()).unwrap();
            assert_eq!(spec.linux.rootfs_propagation, Some(RootfsPropagation::Private));
        }
    }

    #[test]
    fn mutating_one_spec_does_not_affect_the_next() {
        let mut first = build("job", &config(), &resolver()).unwrap();
        first.mounts.clear();
        first.linux.masked_paths.push("/etc".to_string());
        first.linux.namespaces.clear();

        let second = build("job", &config(), &resolver()).unwrap();
        assert_eq!(second.mounts.len(), 15);
        assert_eq!(second.linux.masked_paths.len(), 6);
        assert_eq!(second.linux.namespaces.len(), 2);
    }

    #[test]
    fn version_is_oci_version() {
        let spec = build("job", &config(), &resolver()).unwrap();
        assert_eq!(spec.version, OCI_VERSION);
    }
}
