//! DDS header wire structures.
//!
//! The header is a fixed 124-byte record following the 4-byte magic. All
//! multi-byte fields are little-endian on disk; the explicit [`U32`] field
//! type normalizes them on any host.

use std::fmt;

use zerocopy::byteorder::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// dwFlags bits.
pub const DDSF_CAPS: u32 = 0x0000_0001;
pub const DDSF_HEIGHT: u32 = 0x0000_0002;
pub const DDSF_WIDTH: u32 = 0x0000_0004;
pub const DDSF_PITCH: u32 = 0x0000_0008;
pub const DDSF_PIXELFORMAT: u32 = 0x0000_1000;
pub const DDSF_MIPMAPCOUNT: u32 = 0x0002_0000;
pub const DDSF_LINEARSIZE: u32 = 0x0008_0000;
pub const DDSF_DEPTH: u32 = 0x0080_0000;

/// Pixel format flags.
pub const DDSF_ALPHAPIXELS: u32 = 0x0000_0001;
pub const DDSF_FOURCC: u32 = 0x0000_0004;
pub const DDSF_RGB: u32 = 0x0000_0040;
pub const DDSF_RGBA: u32 = 0x0000_0041;
pub const DDSF_LUMINANCE: u32 = 0x0002_0000;

/// dwCaps bits.
pub const DDSF_COMPLEX: u32 = 0x0000_0008;
pub const DDSF_TEXTURE: u32 = 0x0000_1000;
pub const DDSF_MIPMAP: u32 = 0x0040_0000;

/// dwCaps2 bits.
pub const DDSF_CUBEMAP: u32 = 0x0000_0200;
pub const DDSF_CUBEMAP_POSITIVEX: u32 = 0x0000_0400;
pub const DDSF_CUBEMAP_NEGATIVEX: u32 = 0x0000_0800;
pub const DDSF_CUBEMAP_POSITIVEY: u32 = 0x0000_1000;
pub const DDSF_CUBEMAP_NEGATIVEY: u32 = 0x0000_2000;
pub const DDSF_CUBEMAP_POSITIVEZ: u32 = 0x0000_4000;
pub const DDSF_CUBEMAP_NEGATIVEZ: u32 = 0x0000_8000;
pub const DDSF_CUBEMAP_ALL_FACES: u32 = 0x0000_FC00;
pub const DDSF_VOLUME: u32 = 0x0020_0000;

/// DDS file header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct DdsHeader {
    /// Header size (must be 124).
    pub size: U32,
    /// Header flags.
    pub flags: U32,
    /// Image height.
    pub height: U32,
    /// Image width.
    pub width: U32,
    /// Pitch of one scanline, or linear size of the base level.
    pub pitch_or_linear_size: U32,
    /// Depth (for volume textures).
    pub depth: U32,
    /// Number of mipmap levels, counting the base level.
    pub mipmap_count: U32,
    /// Reserved.
    pub reserved1: [U32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: U32,
    /// Surface capabilities 2 (cubemap faces, volume).
    pub caps2: U32,
    /// Surface capabilities 3.
    pub caps3: U32,
    /// Surface capabilities 4.
    pub caps4: U32,
    /// Reserved.
    pub reserved2: U32,
}

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// Check whether the cubemap bit is set in caps2.
    pub fn is_cubemap(&self) -> bool {
        self.caps2.get() & DDSF_CUBEMAP != 0
    }

    /// Check whether all six cubemap face bits are present.
    pub fn has_all_cubemap_faces(&self) -> bool {
        self.caps2.get() & DDSF_CUBEMAP_ALL_FACES == DDSF_CUBEMAP_ALL_FACES
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct DdsPixelFormat {
    /// Structure size (must be 32).
    pub size: U32,
    /// Pixel format flags.
    pub flags: U32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: U32,
    /// Red bit mask.
    pub r_bit_mask: U32,
    /// Green bit mask.
    pub g_bit_mask: U32,
    /// Blue bit mask.
    pub b_bit_mask: U32,
    /// Alpha bit mask.
    pub a_bit_mask: U32,
}

impl DdsPixelFormat {
    /// Expected structure size.
    pub const SIZE: u32 = 32;
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// No compression.
    pub const NONE: Self = Self([0; 4]);
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

const _: () = assert!(std::mem::size_of::<DdsHeader>() == DdsHeader::SIZE as usize);
const _: () = assert!(std::mem::size_of::<DdsPixelFormat>() == DdsPixelFormat::SIZE as usize);
