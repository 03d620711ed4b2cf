//! Settings of a background subtraction session.
//!
//! A session reads its settings from an optional JSON file, then applies
//! command line overrides on top.
//!
//! ```json
//! {
//!   "input": "frames",
//!   "output": "masks",
//!   "threshold": 2.0,
//!   "display": true,
//!   "scale_width": 512
//! }
//! ```

use crate::source::DEFAULT_SCALE_WIDTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Threshold used when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 2.0;

/// Command line help.
pub const USAGE: &str = "\
Usage: static_frame [OPTIONS]

Marks the pixels of each frame that differ from the first frame.

Options:
  -i, --input <DIR>        directory of frames, read in file name order [default: frames]
  -t, --threshold <VALUE>  differences above this value are foreground [default: 2]
  -d, --display            write every mask to the output directory
  -o, --output <DIR>       directory masks are written to [default: masks]
  -w, --width <PIXELS>     width frames are scaled to [default: 512]
  -c, --config <FILE>      JSON file with default settings
  -h, --help               print this help
  -v, --version            print the version";

/// Settings of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory of input frames.
    pub input: PathBuf,
    /// Directory masks are written to when `display` is set.
    pub output: PathBuf,
    /// Differences strictly above this value are foreground.
    pub threshold: f64,
    /// Write every mask as a PNG file.
    pub display: bool,
    /// Width frames are scaled to before subtraction.
    pub scale_width: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("frames"),
            output: PathBuf::from("masks"),
            threshold: DEFAULT_THRESHOLD,
            display: false,
            scale_width: DEFAULT_SCALE_WIDTH,
        }
    }
}

impl SessionConfig {
    /// Checks the values a session cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(format!(
                "threshold must be a finite non-negative number, got {}",
                self.threshold
            ));
        }
        if self.scale_width == 0 {
            return Err("scale_width must be positive".to_owned());
        }
        Ok(())
    }
}

/// Reads settings from a JSON file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<SessionConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Run a session with these settings.
    Run(SessionConfig),
    /// Print [`USAGE`].
    Help,
    /// Print the version.
    Version,
}

#[derive(Default)]
struct Overrides {
    config: Option<PathBuf>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    threshold: Option<f64>,
    scale_width: Option<u32>,
    display: bool,
}

/// Parses command line arguments, excluding the program name.
///
/// Settings from `-c/--config` are loaded first and the remaining flags
/// override them, whatever their order on the command line.
pub fn parse_args<I, S>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut overrides = Overrides::default();
    let mut args = args.into_iter().map(Into::into);

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("{arg} expects a {name}\n\n{USAGE}"))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-v" | "--version" => return Ok(Command::Version),
            "-d" | "--display" => overrides.display = true,
            "-i" | "--input" => overrides.input = Some(value("directory")?.into()),
            "-o" | "--output" => overrides.output = Some(value("directory")?.into()),
            "-c" | "--config" => overrides.config = Some(value("file")?.into()),
            "-t" | "--threshold" => {
                let raw = value("number")?;
                let threshold = raw
                    .parse::<f64>()
                    .map_err(|e| format!("invalid threshold {raw:?}: {e}"))?;
                overrides.threshold = Some(threshold);
            }
            "-w" | "--width" => {
                let raw = value("width")?;
                let width = raw
                    .parse::<u32>()
                    .map_err(|e| format!("invalid width {raw:?}: {e}"))?;
                overrides.scale_width = Some(width);
            }
            other => return Err(format!("unexpected argument {other:?}\n\n{USAGE}")),
        }
    }

    let mut config = match &overrides.config {
        Some(path) => load_config(path)?,
        None => SessionConfig::default(),
    };
    if let Some(input) = overrides.input {
        config.input = input;
    }
    if let Some(output) = overrides.output {
        config.output = output;
    }
    if let Some(threshold) = overrides.threshold {
        config.threshold = threshold;
    }
    if let Some(scale_width) = overrides.scale_width {
        config.scale_width = scale_width;
    }
    config.display |= overrides.display;
    config.validate()?;
    Ok(Command::Run(config))
}
