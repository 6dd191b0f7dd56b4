//! CLI definitions using clap derive API
//!
//! Arguments use the `-name:value` form (e.g. `-rid:linux-x64`, `-v:Key=1.0.0`). They are
//! rewritten to `--name=value` before clap parses them, so anything clap rejects, and any token
//! not in that form, is a usage error.

use clap::builder::styling::AnsiColor;
use clap::builder::{BoolishValueParser, Styles};
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use std::path::PathBuf;

use crate::config::{DEFAULT_PACKAGE_NAME, DEFAULT_PACKAGE_VERSION, DEFAULT_WORKLOAD_NAME};
use crate::error::{self, AcquireError};
use crate::manifest::VersionPin;

/// Tokens handed to clap unchanged
const PASSTHROUGH: [&str; 4] = ["--help", "-h", "--version", "-V"];

/// workload-acquire - install an SDK workload ahead of built-in workload acquisition
#[derive(Parser, Debug)]
#[command(
    name = "workload-acquire",
    author,
    version,
    args_override_self = true,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install a workload manifest and its packs into a .NET SDK",
    long_about = "Restores a workload manifest package into a scratch NuGet cache, pins pack \
                  versions, restores the packs the workload needs, moves everything into the \
                  SDK layout and enables the SDK's workload resolver.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  workload-acquire -rid:linux-x64 -sdkPath:/usr/share/dotnet\n   \
                  workload-acquire -packageVersion:6.0.0-preview.4.21253.7 -v:PackageVersion=6.0.0-preview.4.21253.7\n   \
                  workload-acquire -workloadId:microsoft-net-sdk-blazorwebassembly-aot -manifest:./manifest\n\n\
                  Arguments take the form -name:value."
)]
pub struct Cli {
    /// WorkloadManifest.json, or a directory holding it and/or WorkloadManifest.targets,
    /// used instead of the restored ones
    #[arg(long = "manifest", value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Workload name; the manifest installs to sdk-manifests/<version>/<name>
    #[arg(long = "workload", value_name = "NAME", default_value = DEFAULT_WORKLOAD_NAME)]
    pub workload: String,

    /// Install only the packs of this workload id (all packs when omitted)
    #[arg(long = "workloadId", value_name = "ID")]
    pub workload_id: Option<String>,

    /// NuGet package carrying the workload manifest
    #[arg(long = "packageName", value_name = "NAME", default_value = DEFAULT_PACKAGE_NAME)]
    pub package_name: String,

    /// Version (or floating range) of the manifest package
    #[arg(long = "packageVersion", value_name = "VERSION", default_value = DEFAULT_PACKAGE_VERSION)]
    pub package_version: String,

    /// Runtime identifier selecting aliased packs (defaults to the current platform)
    #[arg(long = "rid", value_name = "RID")]
    pub rid: Option<String>,

    /// SDK root to install into (defaults to the directory of the dotnet host)
    #[arg(long = "sdkPath", value_name = "DIR")]
    pub sdk_path: Option<PathBuf>,

    /// dotnet host used for restore and for the SDK version query
    #[arg(long = "dotnet", value_name = "PATH", env = "DOTNET_HOST_PATH")]
    pub dotnet: Option<PathBuf>,

    /// Version pin KEY=VALUE replacing pack versions equal to ${KEY} (repeatable)
    #[arg(long = "v", value_name = "KEY=VALUE", value_parser = VersionPin::parse)]
    pub versions: Vec<VersionPin>,

    /// Echo restore output
    #[arg(
        long = "verbose",
        value_name = "BOOL",
        env = "WORKLOAD_ACQUIRE_VERBOSE",
        action = ArgAction::Set,
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    pub verbose: bool,
}

/// Rewrite `-name:value` tokens to `--name=value`. The first token is the program name.
pub fn normalize_args<I>(args: I) -> std::result::Result<Vec<String>, AcquireError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut normalized: Vec<String> = args.next().into_iter().collect();

    for arg in args {
        if PASSTHROUGH.contains(&arg.as_str()) {
            normalized.push(arg);
            continue;
        }

        let Some(flag) = arg.strip_prefix('-') else {
            return Err(error::cli::unknown(arg));
        };

        match flag.split_once(':') {
            Some((name, value)) if !name.is_empty() => normalized.push(format!("--{name}={value}")),
            _ => return Err(error::cli::malformed(arg)),
        }
    }

    Ok(normalized)
}

/// Parse process arguments. Usage errors and help/version output come back as `clap::Error`.
pub fn parse_from<I>(args: I) -> std::result::Result<Cli, clap::Error>
where
    I: IntoIterator<Item = String>,
{
    let normalized = normalize_args(args).map_err(|e| {
        let kind = match e {
            AcquireError::UnknownArgument { .. } => ErrorKind::UnknownArgument,
            _ => ErrorKind::InvalidValue,
        };
        Cli::command().error(kind, e)
    })?;

    Cli::try_parse_from(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        std::iter::once("workload-acquire")
            .chain(tokens.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_normalize_args() {
        let normalized =
            normalize_args(args(&["-rid:linux-x64", "-v:K=1.0", "-manifest:C:\\m.json"])).unwrap();
        assert_eq!(
            normalized,
            [
                "workload-acquire",
                "--rid=linux-x64",
                "--v=K=1.0",
                "--manifest=C:\\m.json"
            ]
        );
    }

    #[test]
    fn test_normalize_rejects_bare_argument() {
        let err = normalize_args(args(&["stray"])).unwrap_err();
        assert!(matches!(err, AcquireError::UnknownArgument { ref argument } if argument == "stray"));
    }

    #[test]
    fn test_normalize_rejects_missing_colon() {
        let err = normalize_args(args(&["-rid"])).unwrap_err();
        assert!(matches!(err, AcquireError::MalformedArgument { .. }));
    }

    #[test]
    fn test_normalize_passes_help_through() {
        let normalized = normalize_args(args(&["--help"])).unwrap();
        assert_eq!(normalized, ["workload-acquire", "--help"]);
    }

    #[test]
    fn test_defaults() {
        let cli = parse_from(args(&[])).unwrap();
        assert_eq!(cli.workload, DEFAULT_WORKLOAD_NAME);
        assert_eq!(cli.package_name, DEFAULT_PACKAGE_NAME);
        assert_eq!(cli.package_version, DEFAULT_PACKAGE_VERSION);
        assert_eq!(cli.workload_id, None);
        assert_eq!(cli.rid, None);
        assert!(cli.versions.is_empty());
        assert!(cli.manifest.is_none());
    }

    #[test]
    fn test_all_flags() {
        let cli = parse_from(args(&[
            "-manifest:/src/WorkloadManifest.json",
            "-workload:My.Workload",
            "-workloadId:my-workload",
            "-packageName:My.Manifest",
            "-packageVersion:1.0.0-*",
            "-rid:osx-x64",
            "-sdkPath:/opt/dotnet",
            "-dotnet:/opt/dotnet/dotnet",
            "-v:PackageVersion=1.2.3",
            "-v:6.0.0=6.0.1",
            "-verbose:true",
        ]))
        .unwrap();

        assert_eq!(cli.manifest, Some(PathBuf::from("/src/WorkloadManifest.json")));
        assert_eq!(cli.workload, "My.Workload");
        assert_eq!(cli.workload_id.as_deref(), Some("my-workload"));
        assert_eq!(cli.package_name, "My.Manifest");
        assert_eq!(cli.package_version, "1.0.0-*");
        assert_eq!(cli.rid.as_deref(), Some("osx-x64"));
        assert_eq!(cli.sdk_path, Some(PathBuf::from("/opt/dotnet")));
        assert_eq!(cli.dotnet, Some(PathBuf::from("/opt/dotnet/dotnet")));
        assert_eq!(cli.versions.len(), 2);
        assert_eq!(cli.versions[0].key, "${PackageVersion}");
        assert_eq!(cli.versions[1].key, "6.0.0");
        assert!(cli.verbose);
    }

    #[test]
    fn test_repeated_flag_last_wins() {
        let cli = parse_from(args(&["-rid:win-x64", "-rid:linux-x64"])).unwrap();
        assert_eq!(cli.rid.as_deref(), Some("linux-x64"));
    }

    #[test]
    fn test_malformed_version_pin() {
        let err = parse_from(args(&["-v:onlykey"])).unwrap_err();
        assert!(err.use_stderr());
        assert!(err.to_string().contains("onlykey"));
    }

    #[test]
    fn test_unknown_flag() {
        let err = parse_from(args(&["-bogus:1"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_bare_argument() {
        let err = parse_from(args(&["install"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert!(err.to_string().contains("install"));
    }

    #[test]
    fn test_help_is_not_an_error_exit() {
        let err = parse_from(args(&["--help"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }
}
