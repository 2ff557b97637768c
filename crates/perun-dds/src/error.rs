//! Error types for DDS handling.

use thiserror::Error;

/// Errors that can occur when working with DDS files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] perun_common::Error),

    /// Invalid DDS magic.
    #[error("invalid DDS magic: expected 'DDS ', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Invalid DDS header.
    #[error("invalid DDS header: {0}")]
    InvalidHeader(String),

    /// Pixel format not handled by this crate.
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    /// Cubemap faces must share base dimensions and mipmap depth.
    #[error("cubemap face {face} does not match face 0: {reason}")]
    CubemapFaceMismatch { face: usize, reason: String },

    /// A texture handed to an image constructor carried no pixel data.
    #[error("texture has no pixel data")]
    EmptyTexture,

    /// Volume textures need more than one depth slice.
    #[error("volume texture requires depth > 1, got {0}")]
    InvalidDepth(u32),
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
