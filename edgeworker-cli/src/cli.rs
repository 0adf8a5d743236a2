use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "edgeworker",
    about = "Edgeworker - live previews for edge workers",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Open a preview session without uploading a worker")]
    Session {
        #[command(flatten)]
        target: TargetArgs,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Upload a worker and print its preview token")]
    Preview {
        #[arg(help = "Entry point of the worker")]
        script: PathBuf,

        #[arg(long, env = "EDGEWORKER_NAME", help = "Worker name (defaults to the script file stem)")]
        name: Option<String>,

        #[arg(long, help = "Additional module to upload alongside the entry point")]
        module: Vec<PathBuf>,

        #[arg(long, help = "Compatibility date, e.g. 2024-09-23")]
        compatibility_date: Option<String>,

        #[arg(long = "compatibility-flag", help = "Compatibility flag (repeatable)")]
        compatibility_flags: Vec<String>,

        #[arg(long = "var", value_name = "KEY=VALUE", help = "Plain-text binding (repeatable)")]
        vars: Vec<String>,

        #[arg(long, help = "Request minimal-mode bindings")]
        minimal_mode: bool,

        #[arg(long, help = "Resolve access cookies through cloudflared for gated hosts")]
        access: bool,

        #[command(flatten)]
        target: TargetArgs,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

/// Where the preview runs.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    #[arg(long, env = "EDGEWORKER_ZONE_ID", help = "Zone id for a route-based preview")]
    pub zone: Option<String>,

    #[arg(long, requires = "zone", help = "Host to reach the zone preview through")]
    pub host: Option<String>,

    #[arg(long, short = 'e', help = "Named environment")]
    pub env: Option<String>,

    #[arg(long, help = "Treat the environment as a legacy (separate script) environment")]
    pub legacy_env: bool,

    #[arg(long, requires = "zone", help = "Route pattern (repeatable)")]
    pub route: Vec<String>,

    #[arg(long, requires = "zone", help = "Custom domain (repeatable)")]
    pub custom_domain: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preview_with_routes() {
        let cli = match Cli::try_parse_from([
            "edgeworker",
            "preview",
            "src/index.js",
            "--zone",
            "zone-1",
            "--route",
            "example.com/api/*",
            "--custom-domain",
            "shop.example.com",
            "--var",
            "GREETING=hello",
            "--minimal-mode",
        ]) {
            Ok(cli) => cli,
            Err(e) => panic!("parse failed: {}", e),
        };
        match cli.command {
            Commands::Preview { target, vars, minimal_mode, .. } => {
                assert_eq!(target.zone.as_deref(), Some("zone-1"));
                assert_eq!(target.route, vec!["example.com/api/*"]);
                assert_eq!(target.custom_domain, vec!["shop.example.com"]);
                assert_eq!(vars, vec!["GREETING=hello"]);
                assert!(minimal_mode);
            },
            Commands::Session { .. } => panic!("expected preview"),
        }
    }

    #[test]
    fn test_host_requires_zone() {
        let result = Cli::try_parse_from(["edgeworker", "session", "--host", "example.com"]);
        assert!(result.is_err());
    }
}
