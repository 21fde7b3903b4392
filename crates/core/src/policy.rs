//! Fixed isolation policy applied to every job.
//!
//! Tables are `'static` data. Each build copies them into fresh owned values,
//! so no spec shares storage with another.

use crate::spec::{Mount, NamespaceType, Rlimit};

pub(crate) struct MountTemplate {
    destination: &'static str,
    kind: &'static str,
    source: &'static str,
    options: &'static [&'static str],
}

impl MountTemplate {
    const fn new(
        destination: &'static str,
        kind: &'static str,
        source: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            destination,
            kind,
            source,
            options,
        }
    }

    pub(crate) fn to_mount(&self) -> Mount {
        Mount::new(self.destination, self.kind, self.source, self.options)
    }
}

pub(crate) const HOST_BIND_OPTIONS: &[&str] = &["nosuid", "nodev", "rbind", "ro"];
pub(crate) const JOB_BIND_OPTIONS: &[&str] = &["rbind", "ro"];

pub(crate) const SYSTEM_MOUNTS: &[MountTemplate] = &[
    MountTemplate::new("/proc", "proc", "proc", &[]),
    MountTemplate::new(
        "/dev",
        "tmpfs",
        "tmpfs",
        &["nosuid", "noexec", "mode=755", "size=65536k"],
    ),
    MountTemplate::new(
        "/dev/pts",
        "devpts",
        "devpts",
        &[
            "nosuid",
            "noexec",
            "newinstance",
            "ptmxmode=0666",
            "mode=0620",
            "gid=5",
        ],
    ),
    MountTemplate::new(
        "/dev/shm",
        "tmpfs",
        "shm",
        &["nosuid", "noexec", "nodev", "mode=1777", "size=65536k"],
    ),
    MountTemplate::new(
        "/dev/mqueue",
        "mqueue",
        "mqueue",
        &["nosuid", "noexec", "nodev"],
    ),
    MountTemplate::new(
        "/sys",
        "sysfs",
        "sysfs",
        &["nosuid", "noexec", "nodev", "ro"],
    ),
    MountTemplate::new(
        "/sys/fs/cgroup",
        "cgroup",
        "cgroup",
        &["nosuid", "noexec", "nodev", "relatime", "ro"],
    ),
];

/// Host directories a job's executable needs, bound read-only at the same path.
pub(crate) const HOST_BIND_DIRS: &[&str] = &["/bin", "/etc", "/usr", "/lib", "/lib64"];

pub(crate) const MASKED_PATHS: &[&str] = &[
    "/proc/kcore",
    "/proc/latency_stats",
    "/proc/timer_list",
    "/proc/timer_stats",
    "/proc/sched_debug",
    "/sys/firmware",
];

pub(crate) const READONLY_PATHS: &[&str] = &[
    "/proc/asound",
    "/proc/bus",
    "/proc/fs",
    "/proc/irq",
    "/proc/sys",
    "/proc/sysrq-trigger",
];

// PID, network, IPC and user namespaces are shared with the host.
pub(crate) const NAMESPACES: &[NamespaceType] = &[NamespaceType::Uts, NamespaceType::Mount];

pub(crate) const NOFILE_LIMIT: u64 = 1024;

pub(crate) fn rlimits() -> Vec<Rlimit> {
    vec![Rlimit::new("RLIMIT_NOFILE", NOFILE_LIMIT, NOFILE_LIMIT)]
}

pub(crate) fn to_owned_paths(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}
