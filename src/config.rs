use std::path::Path;

use anyhow::{Context, Result};

use crate::graphics::bilinear::{BilinearKernel, KernelChoice};
use crate::graphics::scaling::ScalerType;
use crate::graphics::surface::PixelFormat;
use crate::logging::LogLevel;
use crate::sound::mixer::{AudioMixer, DEFAULT_CHANNELS};

/// Application options that can be set via CLI or config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    // Commandline-only options
    pub log_file: Option<String>,

    // Commandline and config file options
    pub log_level: Option<LogLevel>,
    pub scaler: Option<ScalerType>,
    pub resolution: Option<Resolution>,
    pub factor: Option<f32>,
    pub clamp_src: Option<bool>,
    pub kernel: Option<KernelChoice>,
    pub pixel_format: Option<PixelFormat>,

    // Config file only
    pub audio_rate: Option<u32>,
    pub audio_stereo: Option<bool>,
    pub audio_channels: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Scale factor used when neither a resolution nor a factor is given
pub const DEFAULT_FACTOR: f32 = 2.0;

pub const DEFAULT_AUDIO_RATE: u32 = 22050;

impl Options {
    /// Apply one `key = value` setting. Returns `false` for unknown keys.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<bool> {
        match key.to_ascii_lowercase().as_str() {
            "loglevel" => self.log_level = Some(parse_log_level(value)?),
            "logfile" => self.log_file = Some(value.to_string()),
            "scaler" => self.scaler = Some(parse_scaler_type(value)?),
            "resolution" => self.resolution = Some(parse_resolution(value)?),
            "factor" => self.factor = Some(parse_factor(value)?),
            "clamp" => self.clamp_src = Some(parse_bool(value)?),
            "kernel" => self.kernel = Some(parse_kernel(value)?),
            "format" => self.pixel_format = Some(parse_pixel_format(value)?),
            "audio.rate" => {
                let rate: u32 = value.parse().context("Invalid audio rate")?;
                if rate == 0 {
                    anyhow::bail!("Audio rate must be positive");
                }
                self.audio_rate = Some(rate);
            }
            "audio.stereo" => self.audio_stereo = Some(parse_bool(value)?),
            "audio.channels" => {
                self.audio_channels = Some(value.parse().context("Invalid audio channel count")?)
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Destination size for a `width x height` source
    pub fn output_size(&self, width: usize, height: usize) -> Result<(usize, usize)> {
        if let Some(res) = self.resolution {
            return Ok((res.width as usize, res.height as usize));
        }
        let factor = self.factor.unwrap_or(DEFAULT_FACTOR);
        let w = (width as f32 * factor).round() as usize;
        let h = (height as f32 * factor).round() as usize;
        if w == 0 || h == 0 {
            anyhow::bail!("Scale factor {} gives an empty {}x{} output", factor, w, h);
        }
        Ok((w, h))
    }

    /// Mixer for the configured output rate, layout and channel count
    pub fn audio_mixer(&self) -> AudioMixer {
        AudioMixer::new(
            self.audio_rate.unwrap_or(DEFAULT_AUDIO_RATE),
            self.audio_stereo.unwrap_or(true),
            self.audio_channels.unwrap_or(DEFAULT_CHANNELS),
        )
    }
}

/// Parse a property file string, invoking `handler` for each key-value pair.
///
/// Lines are `key = value`; `#` starts a comment anywhere on a line. Keys
/// and values are trimmed. Lines without `=` are skipped with a warning.
pub fn parse_propfile(data: &str, handler: &mut dyn FnMut(&str, &str)) {
    for (lineno, line) in data.lines().enumerate() {
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            log::warn!("Key without value on line {}", lineno + 1);
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            log::warn!("Value without key on line {}", lineno + 1);
            continue;
        }
        handler(key, value.trim());
    }
}

/// Load options from a property file. `None` yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Options> {
    let mut opts = Options::default();
    let Some(path) = path else {
        return Ok(opts);
    };

    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let mut entries = Vec::new();
    parse_propfile(&data, &mut |key, value| {
        entries.push((key.to_string(), value.to_string()))
    });

    for (key, value) in entries {
        let known = opts
            .apply(&key, &value)
            .with_context(|| format!("Invalid value for '{}' in {}", key, path.display()))?;
        if !known {
            log::warn!("Ignoring unknown config key '{}'", key);
        }
    }
    log::debug!("Loaded config from {}", path.display());
    Ok(opts)
}

/// Parse a resolution string in the format "WIDTHxHEIGHT"
pub fn parse_resolution(s: &str) -> Result<Resolution> {
    let parts: Vec<&str> = s.trim().split('x').collect();
    if parts.len() != 2 {
        anyhow::bail!("Resolution must be in WIDTHxHEIGHT format");
    }

    let width: u32 = parts[0].parse().context("Invalid width value")?;
    let height: u32 = parts[1].parse().context("Invalid height value")?;

    if width == 0 || height == 0 {
        anyhow::bail!("Resolution values must be positive");
    }
    if width as usize > crate::graphics::surface::MAX_DIMENSION
        || height as usize > crate::graphics::surface::MAX_DIMENSION
    {
        anyhow::bail!("Resolution {}x{} is too large", width, height);
    }

    Ok(Resolution { width, height })
}

/// Parse a positive scale factor
pub fn parse_factor(s: &str) -> Result<f32> {
    let factor: f32 = s.trim().parse().context("Invalid scale factor")?;
    if !factor.is_finite() || factor <= 0.0 {
        anyhow::bail!("Scale factor must be positive");
    }
    Ok(factor)
}

pub fn parse_scaler_type(s: &str) -> Result<ScalerType> {
    ScalerType::from_name(s)
        .with_context(|| format!("Invalid scaler: {}. Valid options: point, bilinear", s))
}

/// `auto` or a kernel name
pub fn parse_kernel(s: &str) -> Result<KernelChoice> {
    if s.trim().eq_ignore_ascii_case("auto") {
        return Ok(KernelChoice::Auto);
    }
    BilinearKernel::from_name(s).map(KernelChoice::Force).with_context(|| {
        format!(
            "Invalid kernel: {}. Valid options: auto, 2x, 2x2.4, 1x1.2, arbitrary",
            s
        )
    })
}

pub fn parse_pixel_format(s: &str) -> Result<PixelFormat> {
    match s.trim().to_lowercase().as_str() {
        "rgba32" => Ok(PixelFormat::RGBA32),
        "argb32" => Ok(PixelFormat::ARGB32),
        "bgra32" => Ok(PixelFormat::BGRA32),
        "rgb565" => Ok(PixelFormat::RGB565),
        "rgb555" => Ok(PixelFormat::RGB555),
        "indexed8" | "8bit" => Ok(PixelFormat::Indexed8),
        _ => anyhow::bail!(
            "Invalid pixel format: {}. Valid options: rgba32, argb32, bgra32, rgb565, rgb555, indexed8",
            s
        ),
    }
}

pub fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => anyhow::bail!("Invalid boolean: {}", s),
    }
}

/// Level name (`warning`, `debug`, ...) or its number
pub fn parse_log_level(s: &str) -> Result<LogLevel> {
    let s = s.trim();
    if let Ok(level) = s.parse::<i32>() {
        return Ok(LogLevel::from_i32(level));
    }
    LogLevel::from_name(s).with_context(|| format!("Invalid log level: {}", s))
}
