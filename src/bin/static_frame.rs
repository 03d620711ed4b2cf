//! Static frame difference: the first frame becomes the background and every
//! following frame is reduced to a foreground mask.
//!
//! Run with `RUST_LOG=info` to see per-frame foreground counts.

use bgsub::background_subtraction::StaticBackgroundSubtractor;
use bgsub::config::{parse_args, Command, SessionConfig, USAGE};
use bgsub::definitions::PixelGrid;
use bgsub::source::{scale_frame, FrameSource, ImageSequence};
use log::info;
use std::env;
use std::fs;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config = match parse_args(env::args().skip(1))? {
        Command::Run(config) => config,
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::Version => {
            println!("static_frame {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };
    subtract_sequence(&config)
}

fn subtract_sequence(config: &SessionConfig) -> Result<(), String> {
    let mut source = ImageSequence::open(&config.input)
        .map_err(|e| format!("Failed to list frames in {}: {e}", config.input.display()))?;

    let first = source
        .next_frame()
        .ok_or_else(|| format!("No frames in {}", config.input.display()))?
        .map_err(|e| format!("Failed to read background frame: {e}"))?;
    let background = PixelGrid::from(scale_frame(&first, config.scale_width));
    let mut subtractor =
        StaticBackgroundSubtractor::new(background, config.threshold).map_err(|e| e.to_string())?;

    if config.display {
        fs::create_dir_all(&config.output)
            .map_err(|e| format!("Failed to create {}: {e}", config.output.display()))?;
    }

    let mut count = 0usize;
    for (index, frame) in source.frames().enumerate() {
        let frame = frame.map_err(|e| format!("Failed to read frame {index}: {e}"))?;
        let grid = PixelGrid::from(scale_frame(&frame, config.scale_width));
        let mask = subtractor.apply(&grid).map_err(|e| e.to_string())?;
        info!("frame {index}: {} foreground pixels", mask.count_non_zero());

        if config.display {
            let path = config.output.join(format!("mask_{index:05}.png"));
            mask.as_gray8()
                .ok_or("Mask is not an 8-bit image")?
                .save(&path)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        }
        count += 1;
    }

    println!("Processed {count} frame(s) against {}", config.input.display());
    Ok(())
}
