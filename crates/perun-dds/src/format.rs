//! Pixel-format model and surface size arithmetic.

use crate::header::{
    DdsPixelFormat, FourCC, DDSF_ALPHAPIXELS, DDSF_FOURCC, DDSF_LUMINANCE, DDSF_RGB, DDSF_RGBA,
};
use crate::{Error, Result};

use zerocopy::byteorder::little_endian::U32;

/// Pixel format of a DDS image.
///
/// DDS stores either raw pixels described by bit masks or S3TC-compressed
/// 4x4 blocks identified by a FourCC code. This closed set replaces the
/// scattered format-code comparisons of typical DDS loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Uncompressed pixels, `components` bytes per pixel (1-4).
    Uncompressed { components: u32 },
    /// 4x4 blocks of 8 bytes, opaque or 1-bit alpha.
    Dxt1,
    /// 4x4 blocks of 16 bytes, explicit 4-bit alpha.
    Dxt3,
    /// 4x4 blocks of 16 bytes, interpolated alpha.
    Dxt5,
}

impl PixelFormat {
    /// Whether the format stores DXT blocks rather than raw pixels.
    pub fn is_compressed(&self) -> bool {
        matches!(self, PixelFormat::Dxt1 | PixelFormat::Dxt3 | PixelFormat::Dxt5)
    }

    /// Bytes per 4x4 block, for compressed formats.
    pub fn block_bytes(&self) -> Option<usize> {
        match self {
            PixelFormat::Uncompressed { .. } => None,
            PixelFormat::Dxt1 => Some(8),
            PixelFormat::Dxt3 | PixelFormat::Dxt5 => Some(16),
        }
    }

    /// Channel count of the decoded texture (DXT blocks decode to RGBA).
    pub fn components(&self) -> u32 {
        match self {
            PixelFormat::Uncompressed { components } => *components,
            _ => 4,
        }
    }

    /// Byte size of one `width` x `height` surface slice in this format.
    pub fn surface_size(&self, width: u32, height: u32) -> usize {
        match self {
            PixelFormat::Uncompressed { components } => size_rgb(width, height, *components),
            PixelFormat::Dxt1 => size_dxtc(width, height, 8),
            PixelFormat::Dxt3 | PixelFormat::Dxt5 => size_dxtc(width, height, 16),
        }
    }

    /// Resolve the pixel format declared by a DDS header.
    pub fn from_pixel_format(pf: &DdsPixelFormat) -> Result<Self> {
        if pf.flags.get() & DDSF_FOURCC != 0 {
            return match pf.four_cc {
                FourCC::DXT1 => Ok(PixelFormat::Dxt1),
                FourCC::DXT3 => Ok(PixelFormat::Dxt3),
                FourCC::DXT5 => Ok(PixelFormat::Dxt5),
                other => Err(Error::UnsupportedFormat(format!("four-cc '{}'", other))),
            };
        }
        match pf.rgb_bit_count.get() {
            32 => Ok(PixelFormat::Uncompressed { components: 4 }),
            24 => Ok(PixelFormat::Uncompressed { components: 3 }),
            // luminance-alpha is the only 16-bit layout with byte-sized channels
            16 if pf.r_bit_mask.get() == 0x00FF && pf.a_bit_mask.get() == 0xFF00 => {
                Ok(PixelFormat::Uncompressed { components: 2 })
            }
            8 => Ok(PixelFormat::Uncompressed { components: 1 }),
            other => Err(Error::UnsupportedFormat(format!(
                "{} bits per pixel",
                other
            ))),
        }
    }

    /// Build the header pixel format block for saving.
    ///
    /// Uncompressed formats are written with canonical ARGB byte masks.
    pub fn to_pixel_format(&self) -> DdsPixelFormat {
        let mut pf = DdsPixelFormat {
            size: U32::new(DdsPixelFormat::SIZE),
            flags: U32::new(0),
            four_cc: FourCC::NONE,
            rgb_bit_count: U32::new(0),
            r_bit_mask: U32::new(0),
            g_bit_mask: U32::new(0),
            b_bit_mask: U32::new(0),
            a_bit_mask: U32::new(0),
        };
        match self {
            PixelFormat::Dxt1 => {
                pf.flags = U32::new(DDSF_FOURCC);
                pf.four_cc = FourCC::DXT1;
            }
            PixelFormat::Dxt3 => {
                pf.flags = U32::new(DDSF_FOURCC);
                pf.four_cc = FourCC::DXT3;
            }
            PixelFormat::Dxt5 => {
                pf.flags = U32::new(DDSF_FOURCC);
                pf.four_cc = FourCC::DXT5;
            }
            PixelFormat::Uncompressed { components } => match components {
                1 => {
                    pf.flags = U32::new(DDSF_LUMINANCE);
                    pf.rgb_bit_count = U32::new(8);
                    pf.r_bit_mask = U32::new(0x0000_00FF);
                }
                2 => {
                    pf.flags = U32::new(DDSF_LUMINANCE | DDSF_ALPHAPIXELS);
                    pf.rgb_bit_count = U32::new(16);
                    pf.r_bit_mask = U32::new(0x0000_00FF);
                    pf.a_bit_mask = U32::new(0x0000_FF00);
                }
                3 => {
                    pf.flags = U32::new(DDSF_RGB);
                    pf.rgb_bit_count = U32::new(24);
                    pf.r_bit_mask = U32::new(0x00FF_0000);
                    pf.g_bit_mask = U32::new(0x0000_FF00);
                    pf.b_bit_mask = U32::new(0x0000_00FF);
                }
                _ => {
                    pf.flags = U32::new(DDSF_RGBA);
                    pf.rgb_bit_count = U32::new(32);
                    pf.r_bit_mask = U32::new(0x00FF_0000);
                    pf.g_bit_mask = U32::new(0x0000_FF00);
                    pf.b_bit_mask = U32::new(0x0000_00FF);
                    pf.a_bit_mask = U32::new(0xFF00_0000);
                }
            },
        }
        pf
    }
}

/// Topology of a DDS image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureKind {
    /// Cleared image with no contents.
    #[default]
    None,
    /// 1D or 2D texture.
    Flat,
    /// Volume texture with depth slices.
    Volume,
    /// Six-faced cubemap.
    Cubemap,
}

/// Cubemap face, in DDS storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubemapFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubemapFace {
    /// All faces, in storage order.
    pub const ALL: [CubemapFace; 6] = [
        CubemapFace::PositiveX,
        CubemapFace::NegativeX,
        CubemapFace::PositiveY,
        CubemapFace::NegativeY,
        CubemapFace::PositiveZ,
        CubemapFace::NegativeZ,
    ];

    /// Index of this face within the image's texture list.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Mipmap dimensions never drop below one texel.
pub fn clamp_size(size: u32) -> u32 {
    size.max(1)
}

/// Byte size of an uncompressed `width` x `height` surface.
pub fn size_rgb(width: u32, height: u32, components: u32) -> usize {
    clamp_size(width) as usize * clamp_size(height) as usize * components as usize
}

/// Byte size of a DXT-compressed `width` x `height` surface.
///
/// Compressed surfaces store whole 4x4 blocks even when an edge tile
/// covers fewer than 4 pixels.
pub fn size_dxtc(width: u32, height: u32, block_bytes: usize) -> usize {
    let blocks_x = ((clamp_size(width) as usize + 3) / 4).max(1);
    let blocks_y = ((clamp_size(height) as usize + 3) / 4).max(1);
    blocks_x * blocks_y * block_bytes
}

/// Byte width of one scanline rounded up to a 4-byte boundary
/// (legacy DIB-style row padding used by some uncompressed DDS writers).
pub fn dword_aligned_linesize(width: u32, bits_per_pixel: u32) -> u32 {
    (width * bits_per_pixel + 31) / 32 * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_dxtc_single_block() {
        // any dimension from 1 to 4 still occupies one whole block
        for n in 1..=4 {
            assert_eq!(size_dxtc(n, n, 8), 8);
            assert_eq!(size_dxtc(n, n, 16), 16);
        }
    }

    #[test]
    fn test_size_dxtc_block_grid() {
        // 5x5 spans a 2x2 block grid
        assert_eq!(size_dxtc(5, 5, 8), 4 * 8);
        assert_eq!(size_dxtc(5, 5, 16), 4 * 16);
        assert_eq!(size_dxtc(1024, 1024, 16), 1024 * 1024);
    }

    #[test]
    fn test_size_rgb() {
        assert_eq!(size_rgb(16, 16, 4), 1024);
        assert_eq!(size_rgb(3, 2, 3), 18);
        // clamped: a degenerate dimension still covers one texel
        assert_eq!(size_rgb(0, 4, 1), 4);
    }

    #[test]
    fn test_mipmap_clamping() {
        // a 6x6 chain floors and clamps, never reaching zero
        let mut w = 6u32;
        let mut h = 6u32;
        let mut levels = vec![(w, h)];
        while w > 1 || h > 1 {
            w = clamp_size(w / 2);
            h = clamp_size(h / 2);
            levels.push((w, h));
        }
        assert_eq!(levels, vec![(6, 6), (3, 3), (1, 1)]);
    }

    #[test]
    fn test_dword_aligned_linesize() {
        assert_eq!(dword_aligned_linesize(4, 32), 16);
        assert_eq!(dword_aligned_linesize(3, 24), 12);
        assert_eq!(dword_aligned_linesize(5, 8), 8);
        assert_eq!(dword_aligned_linesize(1, 8), 4);
    }

    #[test]
    fn test_format_properties() {
        assert!(PixelFormat::Dxt1.is_compressed());
        assert_eq!(PixelFormat::Dxt1.block_bytes(), Some(8));
        assert_eq!(PixelFormat::Dxt5.block_bytes(), Some(16));
        assert_eq!(PixelFormat::Dxt3.components(), 4);

        let rgb = PixelFormat::Uncompressed { components: 3 };
        assert!(!rgb.is_compressed());
        assert_eq!(rgb.block_bytes(), None);
        assert_eq!(rgb.components(), 3);
    }

    #[test]
    fn test_pixel_format_round_trip() {
        let formats = [
            PixelFormat::Dxt1,
            PixelFormat::Dxt3,
            PixelFormat::Dxt5,
            PixelFormat::Uncompressed { components: 1 },
            PixelFormat::Uncompressed { components: 2 },
            PixelFormat::Uncompressed { components: 3 },
            PixelFormat::Uncompressed { components: 4 },
        ];
        for format in formats {
            let pf = format.to_pixel_format();
            assert_eq!(PixelFormat::from_pixel_format(&pf).unwrap(), format);
        }
    }

    #[test]
    fn test_unknown_four_cc_rejected() {
        let mut pf = PixelFormat::Dxt5.to_pixel_format();
        pf.four_cc = FourCC(*b"DX10");
        assert!(matches!(
            PixelFormat::from_pixel_format(&pf),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
