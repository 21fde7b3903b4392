//! Job configuration types.

use serde::{Deserialize, Serialize};

/// Configuration of a single supervised job.
///
/// The job name is not part of this type; callers pass it alongside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<ProcessConfig>,
}

impl JobConfig {
    pub fn new(process: ProcessConfig) -> Self {
        Self {
            process: Some(process),
        }
    }
}

/// The process a job runs.
///
/// Fields are passed through to the runtime spec without interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessConfig {
    pub executable: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Environment entries in `KEY=VALUE` form.
    #[serde(default)]
    pub env: Vec<String>,
}

impl ProcessConfig {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            ..Self::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env<I, S>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.env = env.into_iter().map(Into::into).collect();
        self
    }
}
