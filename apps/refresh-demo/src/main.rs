//! Scripts a pull-to-refresh gesture against a fake scroll surface and writes
//! every frame of the indicator as an SVG file.

mod svg;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use svg::{Spinner, SvgRenderer};
use teardrop_foundation::{PlanKind, RefreshConfig, RefreshControl};
use teardrop_graphics::{Color, EdgeInsets, Orientation, Size};
use teardrop_testing::FakeScrollSurface;
use web_time::Instant;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Axis {
    Vertical,
    Horizontal,
}

impl From<Axis> for Orientation {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Vertical => Orientation::Vertical,
            Axis::Horizontal => Orientation::Horizontal,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "refresh-demo")]
#[command(version, about = "Render a scripted pull-to-refresh gesture as SVG frames")]
struct Cli {
    /// Direction the indicator is pulled from
    #[arg(short, long, value_enum, default_value_t = Axis::Vertical)]
    axis: Axis,

    /// Directory the frames are written to
    #[arg(short, long, default_value = "frames")]
    out_dir: PathBuf,

    /// Offset change per sample while pulling
    #[arg(long, default_value_t = 4.0)]
    step: f32,

    /// How far the finger pulls before letting go
    #[arg(long, default_value_t = 120.0)]
    depth: f32,

    /// Frame interval used to advance animations
    #[arg(long, default_value_t = 16)]
    frame_millis: u64,

    /// Frames spent "refreshing" before the refresh ends
    #[arg(long, default_value_t = 30)]
    hold_frames: u32,

    /// Leading content inset of the scroll surface
    #[arg(long, default_value_t = 0.0)]
    inset: f32,

    /// Body tint as rrggbb
    #[arg(long)]
    tint: Option<String>,
}

struct FrameWriter {
    out_dir: PathBuf,
    written: usize,
}

impl FrameWriter {
    fn new(out_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("creating {}", out_dir.display()))?;
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
            written: 0,
        })
    }

    fn write(&mut self, renderer: &SvgRenderer, spinner: &Spinner) -> Result<()> {
        let path = self.out_dir.join(format!("frame_{:04}.svg", self.written));
        std::fs::write(&path, renderer.document(spinner))
            .with_context(|| format!("writing {}", path.display()))?;
        self.written += 1;
        Ok(())
    }
}

fn parse_tint(hex: &str) -> Result<Color> {
    let hex = hex.trim_start_matches('#');
    anyhow::ensure!(hex.len() == 6, "tint must be six hex digits, got {hex:?}");
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).with_context(|| format!("bad tint {hex:?}"))
    };
    Ok(Color::from_rgb_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn init_logging() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    anyhow::ensure!(cli.step > 0.0, "--step must be positive");
    let started = Instant::now();

    let orientation = Orientation::from(cli.axis);
    let mut config = RefreshConfig::default().with_orientation(orientation);
    if let Some(tint) = cli.tint.as_deref() {
        config = config.with_tint(parse_tint(tint)?);
    }

    let viewport = orientation.point(320.0, 568.0);
    let surface = FakeScrollSurface::new(Size::new(viewport.x, viewport.y))
        .with_inset(orientation.with_leading_inset(EdgeInsets::default(), cli.inset))
        .into_rc();
    let renderer = Rc::new(SvgRenderer::new());
    let spinner = Rc::new(Spinner::new());
    let control = RefreshControl::attach(
        surface.clone(),
        surface.clone(),
        renderer.clone(),
        spinner.clone(),
        config,
    )?;
    control.on_refresh(|_| log::info!("refresh requested"));

    let mut frames = FrameWriter::new(&cli.out_dir)?;
    let tick = |frames: &mut FrameWriter| -> Result<()> {
        if renderer.tick(cli.frame_millis) == Some(PlanKind::EndRefreshing) {
            control.finish_dismissal();
        }
        frames.write(&renderer, &spinner)
    };

    // Finger down, pull.
    surface.begin_drag();
    let mut offset = 0.0;
    while offset > -cli.depth {
        offset = (offset - cli.step).max(-cli.depth);
        surface.pull_to(orientation, offset);
        tick(&mut frames)?;
    }

    // Let go; the content springs back to the opened extent.
    surface.end_drag();
    let opened = -control.config().metrics.opened_extent;
    while offset < opened {
        offset = (offset + cli.step).min(opened);
        surface.pull_to(orientation, offset);
        tick(&mut frames)?;
    }

    if control.is_refreshing() {
        for _ in 0..cli.hold_frames {
            tick(&mut frames)?;
        }
        control.end_refreshing();
        while renderer.is_animating() {
            tick(&mut frames)?;
        }
    } else {
        log::warn!("pull of {} did not reach the trigger edge", cli.depth);
    }

    // Content scrolls back to rest.
    while offset < 0.0 {
        offset = (offset + cli.step).min(0.0);
        surface.pull_to(orientation, offset);
        tick(&mut frames)?;
    }

    log::info!(
        "wrote {} frames to {} in {:?}",
        frames.written,
        cli.out_dir.display(),
        started.elapsed()
    );
    Ok(())
}
