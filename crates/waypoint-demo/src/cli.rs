use std::io::Write;

use clap::{Parser, Subcommand};

use crate::classify::{ClassifyArgs, run_classify};
use crate::error::Result;
use crate::logging::{self, LogFormat};
use crate::scale::{ScaleArgs, run_scale};
use crate::walkthrough::{WalkthroughArgs, run_walkthrough};

#[derive(Debug, Parser)]
#[command(
    name = "waypoint-demo",
    about = "Classify screens, compute UI scale, and walk through the in-game tutorial",
    version
)]
pub struct Cli {
    /// Write log lines to stderr as JSON. Filter with RUST_LOG.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify a viewport into a device layout.
    Classify(ClassifyArgs),

    /// Compute the UI scale factor for a viewport.
    Scale(ScaleArgs),

    /// Run the full tutorial against the headless menus.
    Walkthrough(WalkthroughArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(LogFormat::from_json_flag(cli.log_json))?;
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Classify(args) => run_classify(args, out),
        Commands::Scale(args) => run_scale(args, out),
        Commands::Walkthrough(args) => run_walkthrough(args, out),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use waypoint_core::ScreenSize;
    use waypoint_layout::{DeviceLayout, OrientationLock};

    use super::{Cli, Commands, run};

    #[test]
    fn parses_classify_flags() {
        let cli = Cli::try_parse_from([
            "waypoint-demo",
            "classify",
            "390",
            "844",
            "--whitelist",
            "tablet-landscape,DesktopPortrait",
            "--lock",
            "landscape",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Classify(args) => {
                assert_eq!(args.width, 390.0);
                assert_eq!(
                    args.whitelist,
                    vec![DeviceLayout::TabletLandscape, DeviceLayout::DesktopPortrait]
                );
                assert_eq!(args.lock, OrientationLock::Landscape);
                assert!(args.json);
            }
            other => panic!("expected classify, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_layout_names() {
        assert!(
            Cli::try_parse_from(["waypoint-demo", "classify", "1", "1", "--whitelist", "watch"])
                .is_err()
        );
    }

    #[test]
    fn parses_scale_base() {
        let cli =
            Cli::try_parse_from(["waypoint-demo", "scale", "1280", "720", "--base", "1280x720"])
                .unwrap();
        match cli.command {
            Commands::Scale(args) => assert_eq!(args.base, ScreenSize::new(1280.0, 720.0)),
            other => panic!("expected scale, got {other:?}"),
        }
    }

    #[test]
    fn global_log_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["waypoint-demo", "walkthrough", "--log-json"]).unwrap();
        assert!(cli.log_json);
        assert!(matches!(cli.command, Commands::Walkthrough(_)));
    }

    #[test]
    fn run_dispatches_to_command() {
        let cli = Cli::try_parse_from(["waypoint-demo", "classify", "2560", "1080"]).unwrap();
        let mut out = Vec::new();
        run(cli, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("DesktopLandscape"));
    }
}
