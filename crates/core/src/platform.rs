use crate::spec::Platform;

/// Runtime-spec version the emitted `config.json` conforms to.
pub const OCI_VERSION: &str = "1.0.2";

/// Host platform in runtime-spec (Go) naming.
pub fn host_platform() -> Platform {
    Platform {
        os: std::env::consts::OS.to_string(),
        arch: oci_arch(std::env::consts::ARCH, cfg!(target_endian = "little")).to_string(),
    }
}

/// Maps a Rust target architecture to its runtime-spec name.
///
/// Rust uses one name for both byte orders of `powerpc64`, `mips` and `mips64`;
/// the runtime spec suffixes the little-endian variants with `le`.
pub fn oci_arch(arch: &str, little_endian: bool) -> &str {
    match (arch, little_endian) {
        ("x86_64", _) => "amd64",
        ("x86", _) => "386",
        ("aarch64", _) => "arm64",
        ("powerpc64", true) => "ppc64le",
        ("powerpc64", false) => "ppc64",
        ("mips", true) => "mipsle",
        ("mips64", true) => "mips64le",
        ("loongarch64", _) => "loong64",
        (other, _) => other,
    }
}
