use serde::{Deserialize, Serialize};

/// A filesystem mounted into the container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mount {
    pub destination: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Mount {
    pub fn new(
        destination: impl Into<String>,
        kind: impl Into<String>,
        source: impl Into<String>,
        options: &[&str],
    ) -> Self {
        Self {
            destination: destination.into(),
            kind: kind.into(),
            source: source.into(),
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Bind-mounts `path` from the host at the same path in the container.
    pub fn bind(path: impl Into<String>, options: &[&str]) -> Self {
        let path = path.into();
        Self::new(path.clone(), "bind", path, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_uses_path_as_source_and_destination() {
        let mount = Mount::bind("/usr", &["rbind", "ro"]);
        assert_eq!(mount.destination, "/usr");
        assert_eq!(mount.source, "/usr");
        assert_eq!(mount.kind, "bind");
        assert_eq!(mount.options, vec!["rbind", "ro"]);
    }

    #[test]
    fn empty_options_are_omitted() {
        let json = serde_json::to_string(&Mount::new("/proc", "proc", "proc", &[])).unwrap();
        assert_eq!(
            json,
            r#"{"destination":"/proc","type":"proc","source":"proc"}"#
        );
    }

    #[test]
    fn options_keep_their_order() {
        let mount = Mount::new("/dev", "tmpfs", "tmpfs", &["nosuid", "noexec", "mode=755"]);
        assert_eq!(mount.options, vec!["nosuid", "noexec", "mode=755"]);
    }
}
