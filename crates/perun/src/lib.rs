//! Perun - DDS texture container library.
//!
//! This crate provides a unified interface to the Perun library ecosystem
//! for loading, flipping and saving DDS textures.
//!
//! # Crates
//!
//! - [`perun_common`] - Common utilities (binary reading, shared errors)
//! - [`perun_dds`] - DDS container parsing, serialization, vertical flips
//!   and the GPU upload interface
//!
//! # Example
//!
//! ```no_run
//! use perun::prelude::*;
//!
//! // Load a texture, reoriented for OpenGL
//! let image = DdsImage::from_file("skybox.dds", true)?;
//!
//! if image.is_cubemap() {
//!     let face = image.face(CubemapFace::PositiveX);
//!     println!("+X face: {} mip levels", face.num_mipmaps() + 1);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use perun_common as common;
pub use perun_dds as dds;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use perun_common::BinaryReader;
    pub use perun_dds::{
        CubemapFace, DdsImage, PixelFormat, Surface, SurfaceDesc, Texture, TextureKind,
        TextureSink,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
