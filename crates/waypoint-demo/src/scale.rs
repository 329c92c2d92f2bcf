use std::io::Write;

use clap::Args;
use serde::Serialize;
use waypoint_core::ScreenSize;
use waypoint_layout::{DEFAULT_BASE_RESOLUTION, DeviceLayout, Px, classify, dominant_axis};

use crate::error::Result;

/// Design sizes printed alongside the factor.
const SAMPLE_SIZES: [f64; 3] = [16.0, 64.0, 480.0];

#[derive(Debug, Clone, Args)]
pub struct ScaleArgs {
    /// Viewport width in pixels.
    pub width: f64,

    /// Viewport height in pixels.
    pub height: f64,

    /// Design resolution as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size, default_value = "1920x1080")]
    pub base: ScreenSize,

    /// Fixed dominant axis in [0, 1]. Defaults to the detected layout's axis.
    #[arg(long)]
    pub axis: Option<f64>,

    /// Print a JSON object instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Parse `1920x1080` (also accepts `X` and `*`).
pub fn parse_size(s: &str) -> std::result::Result<ScreenSize, String> {
    let (w, h) = s
        .split_once(['x', 'X', '*'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let width: f64 = w.trim().parse().map_err(|e| format!("bad width {w:?}: {e}"))?;
    let height: f64 = h.trim().parse().map_err(|e| format!("bad height {h:?}: {e}"))?;
    ScreenSize::try_new(width, height).map_err(|e| e.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleReport {
    pub size: ScreenSize,
    pub base: ScreenSize,
    pub layout: DeviceLayout,
    pub axis: f64,
    pub scale: f64,
}

pub fn scale_report(args: &ScaleArgs) -> Result<ScaleReport> {
    let size = ScreenSize::new(args.width, args.height);
    let layout = classify(size)?;
    let axis = args.axis.unwrap_or_else(|| dominant_axis(layout));
    let px = Px::new(size, args.base, axis)?;
    Ok(ScaleReport {
        size,
        base: args.base,
        layout,
        axis,
        scale: px.scale(),
    })
}

pub fn run_scale(args: ScaleArgs, out: &mut dyn Write) -> Result<()> {
    let report = scale_report(&args)?;
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "{} on a {} base ({}, axis {:.2}): scale {:.4}",
        report.size, report.base, report.layout, report.axis, report.scale
    )?;
    let px = Px::from_scale(report.scale);
    for design in SAMPLE_SIZES {
        writeln!(out, "  {design}px -> {:.1}px", px.px(design))?;
    }
    Ok(())
}

impl Default for ScaleArgs {
    fn default() -> Self {
        Self {
            width: DEFAULT_BASE_RESOLUTION.width,
            height: DEFAULT_BASE_RESOLUTION.height,
            base: DEFAULT_BASE_RESOLUTION,
            axis: None,
            json: false,
        }
    }
}
