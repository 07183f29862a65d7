//! Colored `env_logger` output.
//!
//! Records logged under the `success` and `warning` targets (see [`info_success!`] and
//! friends) are tinted so they stand out from plain `info!`/`debug!` lines. `RUST_LOG`
//! overrides the default `trace` level.
use env_logger::Builder;
use env_logger::fmt::{Color, Formatter, Style};
use log::{Level, LevelFilter, Record};
use std::io::Write;
use std::path::Path;

type Rgb = (u8, u8, u8);

const SUCCESS_TINT: Rgb = (0, 255, 0);
const WARNING_TINT: Rgb = (255, 255, 0);

/// 50 / 50 blend of two RGB colors
#[inline]
fn blend((r1, g1, b1): Rgb, (r2, g2, b2): Rgb) -> Rgb {
    (
        ((r1 as u16 + r2 as u16) / 2) as u8,
        ((g1 as u16 + g2 as u16) / 2) as u8,
        ((b1 as u16 + b2 as u16) / 2) as u8,
    )
}

#[inline]
fn base_rgb(level: Level) -> Rgb {
    match level {
        Level::Error => (255, 0, 0),
        Level::Warn => (255, 255, 0),
        Level::Info => (255, 255, 255),
        Level::Debug => (200, 200, 255),
        Level::Trace => (220, 220, 220),
    }
}

fn tint(target: &str, level: Level) -> Rgb {
    match target {
        "success" => blend(base_rgb(level), SUCCESS_TINT),
        "warning" => blend(base_rgb(level), WARNING_TINT),
        _ => base_rgb(level),
    }
}

fn style_for(buf: &Formatter, record: &Record) -> Style {
    let mut style = buf.style();
    let (r, g, b) = tint(record.target(), record.level());
    style.set_color(Color::Rgb(r, g, b));
    match record.level() {
        Level::Error | Level::Warn => style.set_bold(true),
        Level::Trace => style.set_dimmed(true),
        _ => style.set_bold(false),
    };
    style
}

/// `src/foo.rs:42:1`, relative to the crate root so terminals and IDEs can follow it.
fn location(record: &Record) -> String {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let file = Path::new(record.file().unwrap_or("unknown"));
    let relative = file
        .strip_prefix(manifest_dir)
        .unwrap_or(file)
        .to_string_lossy()
        .replace('\\', "/");
    format!("{relative}:{}:1", record.line().unwrap_or(0))
}

fn format(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    let style = style_for(buf, record);
    writeln!(
        buf,
        "[{} {}] {}  {}",
        chrono::Local::now().format("%H:%M:%S"),
        style.value(record.level()),
        style.value(record.args()),
        location(record)
    )
}

/// Installs the global logger. Fails if one is already installed.
pub fn init_log() -> anyhow::Result<()> {
    Builder::new()
        .format(format)
        .filter_level(LevelFilter::Trace)
        .parse_default_env()
        .try_init()
        .map_err(Into::into)
}

#[macro_export]
macro_rules! info_success {
    ($($arg:tt)*) => {
        ::log::info!(target: "success", "[SUCCESS] {}", format!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_success {
    ($($arg:tt)*) => {
        ::log::debug!(target: "success", "[SUCCESS] {}", format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn_warning {
    ($($arg:tt)*) => {
        ::log::warn!(target: "warning", "[WARNING] {}", format!($($arg)*))
    };
}
