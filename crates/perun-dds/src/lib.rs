//! DDS (DirectDraw Surface) texture container handling.
//!
//! This crate decodes DDS files into an in-memory representation ready for
//! a GPU rendering pipeline and re-encodes that representation back to DDS.
//! It understands the four texture topologies (flat 2D, 1D degenerate,
//! volume, cubemap) with their mipmap chains, uncompressed RGB(A) pixels and
//! the DXT1/DXT3/DXT5 block-compressed formats.
//!
//! DDS stores image rows top to bottom while OpenGL samples bottom to top,
//! so loading and saving can vertically flip every surface. Flipping raw
//! pixels is a scanline swap; flipping compressed data reorders whole 4x4
//! block rows and rewrites the row indices inside each block, including a
//! bit-level repack of the DXT5 3-bit alpha indices.
//!
//! # Example
//!
//! ```no_run
//! use perun_dds::DdsImage;
//!
//! // Load a texture, reoriented for OpenGL
//! let image = DdsImage::from_file("albedo.dds", true)?;
//! println!(
//!     "{}x{}, {} extra mip levels, compressed: {}",
//!     image.width(),
//!     image.height(),
//!     image.num_mipmaps(),
//!     image.is_compressed()
//! );
//! # Ok::<(), perun_dds::Error>(())
//! ```

mod error;
mod flip;
mod format;
mod header;
mod image;
mod surface;
mod texture;
mod upload;

pub use error::{Error, Result};
pub use format::{
    clamp_size, dword_aligned_linesize, size_dxtc, size_rgb, CubemapFace, PixelFormat, TextureKind,
};
pub use header::{DdsHeader, DdsPixelFormat, FourCC};
pub use image::DdsImage;
pub use surface::Surface;
pub use texture::Texture;
pub use upload::{SurfaceDesc, TextureSink};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";
