use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;

use sdf_mono_atlas::{build_atlas, Bitmap, Params};

/// Simple utility for generating a monospaced SDF ASCII atlas.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the TrueType font to render
    ttf_file: PathBuf,

    /// Pixel height of the font, does not include padding
    #[arg(short = 's', long = "font-size", default_value_t = 22.0)]
    font_size: f32,

    /// Padding pixels for SDF
    #[arg(short, long, default_value_t = 5.0)]
    padding: f32,

    /// Value 0-255 to use as a threshold for determining the glyph outline
    #[arg(short = 'e', long = "on-edge", default_value_t = 180.0)]
    on_edge: f32,

    /// Output location of the generated atlas
    #[arg(short, long, default_value = "sdf_atlas.png")]
    output: PathBuf,

    /// Output raw measurements, without descriptions. Useful for scripts
    #[arg(short, long, visible_alias = "silent")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let params = Params::new(cli.font_size, cli.padding, cli.on_edge)?;

    let font_data = fs::read(&cli.ttf_file)
        .with_context(|| format!("failed to load font file '{}'", cli.ttf_file.display()))?;
    let face = ttf_parser::Face::parse(&font_data, 0).context("failed to parse font file")?;

    let atlas = build_atlas(&face, &params)?;

    let cells = &atlas.cells;
    if cli.quiet {
        println!("{}", cells.cell_width);
        println!("{}", cells.cell_height);
        println!("{}", cells.glyph_count);
        println!("{}", cells.baseline);
    } else {
        println!("cell width = {}px", cells.cell_width);
        println!("cell height = {}px", cells.cell_height);
        println!("num cells = {}", cells.glyph_count);
        println!("baseline = {}px", cells.baseline);
    }

    write_png(&cli.output, &atlas.image)
        .with_context(|| format!("failed to write output file '{}'", cli.output.display()))?;
    Ok(())
}

fn write_png(path: &Path, image: &Bitmap) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(file, image.width(), image.height());
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.write_header()?.write_image_data(image.data())?;
    Ok(())
}
