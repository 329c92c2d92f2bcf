use std::io::Write;

use clap::Args;
use serde::Serialize;
use waypoint_core::ScreenSize;
use waypoint_layout::{DeviceLayout, OrientationLock, explain, resolve};

use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct ClassifyArgs {
    /// Viewport width in pixels.
    pub width: f64,

    /// Viewport height in pixels.
    pub height: f64,

    /// Layouts the UI supports, comma separated (e.g. tablet-landscape,mobile-portrait).
    #[arg(long, value_delimiter = ',')]
    pub whitelist: Vec<DeviceLayout>,

    /// Force an orientation: any, landscape, or portrait.
    #[arg(long, default_value = "any")]
    pub lock: OrientationLock,

    /// Print a JSON object instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifyReport {
    pub size: ScreenSize,
    pub detected: DeviceLayout,
    pub rule: &'static str,
    pub aspect_ratio: f64,
    pub resolved: DeviceLayout,
}

pub fn classify_report(args: &ClassifyArgs) -> Result<ClassifyReport> {
    let size = ScreenSize::new(args.width, args.height);
    let classification = explain(size)?;
    let whitelist = (!args.whitelist.is_empty()).then_some(args.whitelist.as_slice());
    Ok(ClassifyReport {
        size,
        detected: classification.layout,
        rule: classification.rule.as_str(),
        aspect_ratio: size.aspect_ratio(),
        resolved: resolve(classification.layout, whitelist, args.lock),
    })
}

pub fn run_classify(args: ClassifyArgs, out: &mut dyn Write) -> Result<()> {
    let report = classify_report(&args)?;
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "{}: {} (rule {}, aspect {:.3})",
        report.size, report.detected, report.rule, report.aspect_ratio
    )?;
    if report.resolved != report.detected {
        writeln!(out, "resolved: {}", report.resolved)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DemoError;

    fn args(width: f64, height: f64) -> ClassifyArgs {
        ClassifyArgs {
            width,
            height,
            whitelist: Vec::new(),
            lock: OrientationLock::Any,
            json: false,
        }
    }

    #[test]
    fn phone_portrait() {
        let report = classify_report(&args(390.0, 844.0)).unwrap();
        assert_eq!(report.detected, DeviceLayout::MobilePortrait);
        assert_eq!(report.rule, "phone-portrait");
        assert_eq!(report.resolved, DeviceLayout::MobilePortrait);
    }

    #[test]
    fn whitelist_narrows() {
        let mut a = args(390.0, 844.0);
        a.whitelist = vec![DeviceLayout::TabletLandscape, DeviceLayout::DesktopPortrait];
        let report = classify_report(&a).unwrap();
        assert_eq!(report.resolved, DeviceLayout::TabletLandscape);
    }

    #[test]
    fn lock_flips_orientation() {
        let mut a = args(2560.0, 1080.0);
        a.lock = OrientationLock::Portrait;
        let report = classify_report(&a).unwrap();
        assert_eq!(report.detected, DeviceLayout::DesktopLandscape);
        assert_eq!(report.resolved, DeviceLayout::DesktopPortrait);
    }

    #[test]
    fn text_output() {
        let mut out = Vec::new();
        run_classify(args(2560.0, 1080.0), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("2560x1080: DesktopLandscape (rule width-bucket"));
        assert!(!text.contains("resolved"));
    }

    #[test]
    fn json_output() {
        let mut a = args(1024.0, 768.0);
        a.json = true;
        let mut out = Vec::new();
        run_classify(a, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["detected"], "TabletLandscape");
        assert_eq!(value["rule"], "tablet-fast-path");
        assert_eq!(value["size"]["width"], 1024.0);
    }

    #[test]
    fn degenerate_size_is_rejected() {
        let err = classify_report(&args(0.0, 100.0)).unwrap_err();
        assert!(matches!(err, DemoError::Layout(_)));
    }
}
