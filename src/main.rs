//! Perun CLI - Command-line tool for DDS texture inspection and conversion.
//!
//! This is the main entry point for the Perun command-line application.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use perun::prelude::*;

/// Perun - DDS texture inspection and conversion tool
#[derive(Parser)]
#[command(name = "perun")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print information about a DDS file
    Info {
        /// Input DDS file
        #[arg(short, long, env = "INPUT_DDS")]
        input: PathBuf,

        /// Show per-mipmap level sizes
        #[arg(short, long)]
        detailed: bool,
    },

    /// Vertically flip a DDS file
    Flip {
        /// Input DDS file
        #[arg(short, long)]
        input: PathBuf,

        /// Output DDS file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Extract one cubemap face into a flat DDS file
    ExtractFace {
        /// Input DDS cubemap file
        #[arg(short, long)]
        input: PathBuf,

        /// Face to extract (+x, -x, +y, -y, +z, -z)
        #[arg(short, long)]
        face: String,

        /// Output DDS file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Extract one mipmap level into a single-level DDS file
    ExtractMip {
        /// Input DDS file
        #[arg(short, long)]
        input: PathBuf,

        /// Mipmap level to extract (0 = base)
        #[arg(short, long)]
        level: u32,

        /// Output DDS file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input, detailed } => {
            cmd_info(&input, detailed)?;
        }
        Commands::Flip { input, output } => {
            cmd_flip(&input, &output)?;
        }
        Commands::ExtractFace { input, face, output } => {
            cmd_extract_face(&input, &face, &output)?;
        }
        Commands::ExtractMip { input, level, output } => {
            cmd_extract_mip(&input, level, &output)?;
        }
    }

    Ok(())
}

fn cmd_info(input: &PathBuf, detailed: bool) -> Result<()> {
    let image = DdsImage::from_file(input, false).context("Failed to load DDS file")?;

    let kind = match image.kind() {
        TextureKind::Flat => "flat",
        TextureKind::Volume => "volume",
        TextureKind::Cubemap => "cubemap",
        TextureKind::None => "none",
    };
    let format = match image.format() {
        PixelFormat::Dxt1 => "DXT1".to_string(),
        PixelFormat::Dxt3 => "DXT3".to_string(),
        PixelFormat::Dxt5 => "DXT5".to_string(),
        PixelFormat::Uncompressed { components } => format!("raw ({} channels)", components),
    };

    println!("File:       {}", input.display());
    println!("Type:       {}", kind);
    println!("Format:     {}", format);
    println!(
        "Dimensions: {}x{}x{}",
        image.width(),
        image.height(),
        image.depth()
    );
    println!("Base size:  {} bytes", image.size());
    println!("Mipmaps:    {} (+ base)", image.num_mipmaps());
    if !image.is_compressed() {
        println!("Aligned:    {}", image.is_dword_aligned());
    }

    if detailed {
        for index in 0..image.num_mipmaps() {
            let mip = image.mipmap(index);
            println!(
                "  level {:>2}: {:>5}x{:<5} {:>10} bytes",
                index + 1,
                mip.width(),
                mip.height(),
                mip.size()
            );
        }
    }

    Ok(())
}

fn cmd_flip(input: &PathBuf, output: &PathBuf) -> Result<()> {
    let start = Instant::now();

    let mut image = DdsImage::from_file(input, false).context("Failed to load DDS file")?;
    image.flip();
    image
        .write_to_file(output, false)
        .context("Failed to write DDS file")?;

    println!("Flipped {} in {:?}", input.display(), start.elapsed());
    Ok(())
}

fn cmd_extract_face(input: &PathBuf, face: &str, output: &PathBuf) -> Result<()> {
    let image = DdsImage::from_file(input, false).context("Failed to load DDS file")?;

    if !image.is_cubemap() {
        bail!("{} is not a cubemap", input.display());
    }

    let face = parse_face(face)?;
    let texture = image.face(face).clone();
    let flat = DdsImage::create_flat(image.format(), texture)?;
    flat.write_to_file(output, false)
        .context("Failed to write DDS file")?;

    println!("Extracted face to {}", output.display());
    Ok(())
}

fn cmd_extract_mip(input: &PathBuf, level: u32, output: &PathBuf) -> Result<()> {
    let image = DdsImage::from_file(input, false).context("Failed to load DDS file")?;

    if image.is_cubemap() {
        bail!("cubemap input; extract a face first");
    }
    if level > image.num_mipmaps() {
        bail!(
            "level {} out of range ({} levels including base)",
            level,
            image.num_mipmaps() + 1
        );
    }

    let surface = if level == 0 {
        image.textures()[0].surface().clone()
    } else {
        image.mipmap(level - 1).clone()
    };

    let texture = Texture::new(surface);
    let extracted = if texture.surface().depth() > 1 {
        DdsImage::create_volume(image.format(), texture)?
    } else {
        DdsImage::create_flat(image.format(), texture)?
    };
    extracted
        .write_to_file(output, false)
        .context("Failed to write DDS file")?;

    println!("Extracted level {} to {}", level, output.display());
    Ok(())
}

fn parse_face(name: &str) -> Result<CubemapFace> {
    let face = match name.to_ascii_lowercase().as_str() {
        "+x" | "px" | "posx" => CubemapFace::PositiveX,
        "-x" | "nx" | "negx" => CubemapFace::NegativeX,
        "+y" | "py" | "posy" => CubemapFace::PositiveY,
        "-y" | "ny" | "negy" => CubemapFace::NegativeY,
        "+z" | "pz" | "posz" => CubemapFace::PositiveZ,
        "-z" | "nz" | "negz" => CubemapFace::NegativeZ,
        other => bail!("unknown cubemap face '{}'", other),
    };
    Ok(face)
}
