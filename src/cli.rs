use std::path::PathBuf;

use crate::config::{
    parse_factor, parse_kernel, parse_log_level, parse_pixel_format, parse_resolution,
    parse_scaler_type, Options,
};
use anyhow::{Context, Result};
use clap::Parser;

/// Exult image scaler - arbitrary ratio bilinear and point scaling
#[derive(Parser, Debug, Default)]
#[command(name = "exult-scale")]
#[command(version)]
#[command(about = "Scale an image with the Exult bilinear scaler", long_about = None)]
pub struct Cli {
    /// Image to scale
    pub input: PathBuf,

    /// Where to write the scaled image
    pub output: PathBuf,

    /// Output resolution (e.g., 640x480)
    #[arg(short, long, value_name = "WIDTHxHEIGHT", conflicts_with = "factor")]
    pub res: Option<String>,

    /// Scale factor applied to both axes (default 2)
    #[arg(short, long, value_name = "FACTOR")]
    pub factor: Option<String>,

    /// Scaler (point, bilinear)
    #[arg(short, long, value_name = "SCALER")]
    pub scaler: Option<String>,

    /// Bilinear kernel (auto, 2x, 2x2.4, 1x1.2, arbitrary)
    #[arg(short, long, value_name = "KERNEL")]
    pub kernel: Option<String>,

    /// Never read source pixels outside the scaled rectangle
    #[arg(long)]
    pub clamp: bool,

    /// Pixel format the image is converted to before scaling
    /// (rgba32, argb32, bgra32, rgb565, rgb555, indexed8)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (nothing, user, error, warning, info, debug, all)
    #[arg(long, value_name = "LEVEL")]
    pub loglevel: Option<String>,

    /// Log file path
    #[arg(short, long, value_name = "FILE")]
    pub logfile: Option<String>,
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref res) = self.res {
            opts.resolution = Some(parse_resolution(res).context("Invalid resolution format")?);
            opts.factor = None;
        }

        if let Some(ref factor) = self.factor {
            opts.factor = Some(parse_factor(factor)?);
            opts.resolution = None;
        }

        if let Some(ref scaler) = self.scaler {
            opts.scaler = Some(parse_scaler_type(scaler)?);
        }

        if let Some(ref kernel) = self.kernel {
            opts.kernel = Some(parse_kernel(kernel)?);
        }

        if self.clamp {
            opts.clamp_src = Some(true);
        }

        if let Some(ref format) = self.format {
            opts.pixel_format = Some(parse_pixel_format(format)?);
        }

        if let Some(ref level) = self.loglevel {
            opts.log_level = Some(parse_log_level(level)?);
        }

        if let Some(ref log_file) = self.logfile {
            opts.log_file = Some(log_file.clone());
        }

        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Resolution;
    use crate::graphics::bilinear::{BilinearKernel, KernelChoice};
    use crate::graphics::scaling::ScalerType;
    use crate::graphics::surface::PixelFormat;
    use crate::logging::LogLevel;

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "exult-scale",
            "in.png",
            "out.png",
            "--res",
            "640x480",
            "-s",
            "point",
            "--clamp",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("in.png"));
        assert_eq!(cli.res.as_deref(), Some("640x480"));
        assert!(cli.clamp);
    }

    #[test]
    fn test_res_conflicts_with_factor() {
        let parsed = Cli::try_parse_from(["exult-scale", "a", "b", "-r", "2x2", "-f", "2"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_merge_basic_options() {
        let cli = Cli {
            res: Some("800x600".to_string()),
            kernel: Some("2x2.4".to_string()),
            format: Some("rgb565".to_string()),
            loglevel: Some("debug".to_string()),
            clamp: true,
            ..Default::default()
        };

        let opts = cli.merge_into_options(Options::default()).unwrap();
        assert_eq!(
            opts.resolution,
            Some(Resolution {
                width: 800,
                height: 600
            })
        );
        assert_eq!(opts.kernel, Some(KernelChoice::Force(BilinearKernel::X2Y24)));
        assert_eq!(opts.pixel_format, Some(PixelFormat::RGB565));
        assert_eq!(opts.log_level, Some(LogLevel::Debug));
        assert_eq!(opts.clamp_src, Some(true));
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Options {
            scaler: Some(ScalerType::Point),
            resolution: Some(Resolution {
                width: 10,
                height: 10,
            }),
            clamp_src: Some(false),
            ..Default::default()
        };
        let cli = Cli {
            scaler: Some("bilinear".to_string()),
            factor: Some("3".to_string()),
            ..Default::default()
        };
        let opts = cli.merge_into_options(config).unwrap();
        assert_eq!(opts.scaler, Some(ScalerType::Bilinear));
        assert_eq!(opts.resolution, None);
        assert_eq!(opts.factor, Some(3.0));
        assert_eq!(opts.clamp_src, Some(false));
    }

    #[test]
    fn test_invalid_values() {
        for cli in [
            Cli {
                res: Some("invalid".to_string()),
                ..Default::default()
            },
            Cli {
                scaler: Some("hq".to_string()),
                ..Default::default()
            },
            Cli {
                format: Some("yuv".to_string()),
                ..Default::default()
            },
        ] {
            assert!(cli.merge_into_options(Options::default()).is_err());
        }
    }
}
