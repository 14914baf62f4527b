mod gpl;

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use dc6::{Dc6, DecodeOptions};
use eyre::Context;

#[derive(Debug, Parser)]
#[command(version, about = "Converts DC6 sprite frames into PNG images", long_about = None)]
struct Dc6ConvertCli {
    /// Path to .dc6
    #[arg(long)]
    dc6: PathBuf,
    /// Path to GIMP palette (.gpl). Frames are grayscale without one
    #[arg(long)]
    pal: Option<PathBuf>,
    /// Path to output .png
    ///
    /// Sprites with more than one frame get `_d<direction>_f<frame>` appended to the file name
    #[arg(long)]
    png: Option<PathBuf>,
    /// Decodes frames one after another instead of in parallel
    #[arg(long)]
    sequential: bool,
}

fn frame_path(png: &Path, direction: usize, frame: usize) -> PathBuf {
    let stem = png
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    png.with_file_name(format!("{stem}_d{direction}_f{frame}.png"))
}

fn convert(cli: &Dc6ConvertCli) -> eyre::Result<usize> {
    let bytes = std::fs::read(&cli.dc6)
        .wrap_err_with(|| format!("cannot read {}", cli.dc6.display()))?;

    let options = if cli.sequential {
        DecodeOptions::sequential()
    } else {
        DecodeOptions::default()
    };

    let dc6 = Dc6::open_from_bytes_with(&bytes, &options)
        .wrap_err_with(|| format!("cannot decode {}", cli.dc6.display()))?;

    if let Some(pal) = &cli.pal {
        dc6.set_palette(Some(gpl::open_gpl(pal)?));
    }

    let png = cli
        .png
        .clone()
        .unwrap_or_else(|| cli.dc6.with_extension("png"));

    let single_frame = dc6.direction_count() <= 1 && dc6.frames_per_direction() <= 1;
    let mut written = 0;

    for (direction_index, direction) in dc6.directions.iter().enumerate() {
        for frame_index in 0..direction.frames.len() {
            let out_path = if single_frame {
                png.clone()
            } else {
                frame_path(&png, direction_index, frame_index)
            };

            let image = dc6.to_rgba8(direction_index, frame_index)?;

            image
                .save(&out_path)
                .wrap_err_with(|| format!("cannot write {}", out_path.display()))?;

            log::debug!("wrote {}", out_path.display());
            written += 1;
        }
    }

    Ok(written)
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Dc6ConvertCli::parse();

    match convert(&cli) {
        Ok(written) => {
            println!("Wrote {written} frame(s)");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{err:?}");
            ExitCode::FAILURE
        }
    }
}
