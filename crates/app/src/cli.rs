use std::path::PathBuf;

use clap::Parser;

/// Arrange images and videos on a canvas and play them back against one clock.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file with editor settings; flags below override its values
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Initial project duration in seconds
    #[arg(short = 'd', long = "duration", value_name = "SECS")]
    pub duration: Option<f64>,

    /// Logical canvas size
    #[arg(long = "canvas", value_name = "WxH", value_parser = parse_canvas)]
    pub canvas: Option<(f32, f32)>,

    /// Log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

pub fn parse_canvas(s: &str) -> Result<(f32, f32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {s:?}"))?;
    let w: f32 = w.trim().parse().map_err(|_| format!("bad width in {s:?}"))?;
    let h: f32 = h.trim().parse().map_err(|_| format!("bad height in {s:?}"))?;
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return Err(format!("canvas must be positive, got {s:?}"));
    }
    Ok((w, h))
}
