//! The `spec` command - builds a job's runtime spec.

use anyhow::Context;
use clap::Args;
#[cfg(unix)]
use crucible_core::SystemIdentityResolver;
use crucible_core::{
    Identity, IdentityResolver, JOB_PRINCIPAL, JobConfig, Layout, RuntimeSpec, SpecBuilder,
    StaticIdentityResolver,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct SpecArgs {
    /// Name of the job; used for the hostname, rootfs and job mount
    #[arg(long, short)]
    job: String,

    /// Path to the job configuration file (TOML, or JSON with a .json extension)
    #[arg(long, short, value_parser = parse_existing_file)]
    config: PathBuf,

    /// Write the spec here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Run as this uid instead of looking up the job user
    #[arg(long, requires = "gid")]
    uid: Option<u32>,

    /// Run as this gid instead of looking up the job user
    #[arg(long, requires = "uid")]
    gid: Option<u32>,

    /// Username reported with --uid/--gid (defaults to the job user)
    #[arg(long, requires = "uid")]
    username: Option<String>,

    /// Override the directory job bundles are created in
    #[arg(long)]
    bundles_dir: Option<PathBuf>,

    /// Override the directory job definitions live in
    #[arg(long)]
    jobs_dir: Option<PathBuf>,
}

pub fn run(args: SpecArgs) -> anyhow::Result<()> {
    let config = load_job_config(&args.config)?;

    let resolver = resolver(args.uid, args.gid, args.username.as_deref())?;

    let mut layout = Layout::default();
    if let Some(dir) = args.bundles_dir {
        layout = layout.with_bundles_dir(dir);
    }
    if let Some(dir) = args.jobs_dir {
        layout = layout.with_jobs_dir(dir);
    }

    let spec = SpecBuilder::with_layout(layout)
        .build(&args.job, &config, &resolver)
        .with_context(|| format!("failed to build spec for job '{}'", args.job))?;

    let json = render(&spec)?;
    match args.output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("wrote spec for job {} to {}", args.job, path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Uses a fixed identity when both ids are given, the host user database otherwise.
fn resolver(
    uid: Option<u32>,
    gid: Option<u32>,
    username: Option<&str>,
) -> anyhow::Result<Box<dyn IdentityResolver>> {
    if let (Some(uid), Some(gid)) = (uid, gid) {
        let identity = Identity::new(uid, gid, username.unwrap_or(JOB_PRINCIPAL));
        return Ok(Box::new(
            StaticIdentityResolver::new().with_principal(JOB_PRINCIPAL, identity),
        ));
    }

    #[cfg(unix)]
    {
        Ok(Box::new(SystemIdentityResolver))
    }
    #[cfg(not(unix))]
    {
        anyhow::bail!("--uid and --gid are required on this platform")
    }
}

/// Reads a job configuration, choosing the format from the file extension.
pub fn load_job_config(path: &Path) -> anyhow::Result<JobConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&contents)
            .with_context(|| format!("invalid JSON job config {}", path.display()))?,
        _ => toml::from_str(&contents)
            .with_context(|| format!("invalid TOML job config {}", path.display()))?,
    };

    Ok(config)
}

fn render(spec: &RuntimeSpec) -> anyhow::Result<String> {
    serde_json::to_string_pretty(spec).context("failed to serialize spec")
}

fn parse_existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if !path.exists() {
        return Err(format!("file not found: {s}"));
    }
    if !path.is_file() {
        return Err(format!("not a file: {s}"));
    }
    Ok(path)
}
