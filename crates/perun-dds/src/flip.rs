//! Vertical image flips.
//!
//! DDS stores rows top to bottom while OpenGL samples bottom to top.
//! Uncompressed surfaces flip by swapping scanlines. Compressed surfaces
//! flip at 4x4-block granularity: whole block rows trade places, and every
//! block that moved has the pixel rows it encodes reversed in place. For
//! DXT5 alpha that last step is a bit-level repack of sixteen packed 3-bit
//! indices.

use crate::format::{clamp_size, PixelFormat};
use crate::surface::Surface;
use crate::texture::Texture;

/// Flip the base surface and every mipmap of a texture.
pub(crate) fn flip_texture(texture: &mut Texture, format: PixelFormat) {
    flip_surface(texture.surface_mut(), format);
    for mipmap in texture.mipmaps_mut() {
        flip_surface(mipmap, format);
    }
}

/// Flip one surface, treating each depth slice independently.
pub(crate) fn flip_surface(surface: &mut Surface, format: PixelFormat) {
    if surface.is_empty() {
        return;
    }
    let width = surface.width();
    let height = surface.height();
    let slices = clamp_size(surface.depth()) as usize;
    let slice_size = surface.size() / slices;

    for slice in surface.data_mut().chunks_exact_mut(slice_size) {
        match format {
            PixelFormat::Uncompressed { components } => {
                flip_scanlines(slice, width, components)
            }
            PixelFormat::Dxt1 => flip_blocks(slice, width, height, 8, flip_dxt1_block),
            PixelFormat::Dxt3 => flip_blocks(slice, width, height, 16, flip_dxt3_block),
            PixelFormat::Dxt5 => flip_blocks(slice, width, height, 16, flip_dxt5_block),
        }
    }
}

/// Reverse scanline order: swap rows symmetrically from the ends inward.
fn flip_scanlines(data: &mut [u8], width: u32, components: u32) {
    let line = (clamp_size(width) * components) as usize;
    if line == 0 {
        return;
    }
    let rows = data.len() / line;

    let mut top = 0;
    let mut bottom = rows.saturating_sub(1);
    while top < bottom {
        let (upper, lower) = data.split_at_mut(bottom * line);
        upper[top * line..(top + 1) * line].swap_with_slice(&mut lower[..line]);
        top += 1;
        bottom -= 1;
    }
}

/// Reverse block-row order over the ceil(w/4) x ceil(h/4) grid, reversing
/// the internal pixel rows of every block that moves.
///
/// A partial final block row was stored as a whole row and flips as one;
/// an odd middle block row does not move and is left as is.
fn flip_blocks(
    data: &mut [u8],
    width: u32,
    height: u32,
    block_bytes: usize,
    flip_block: fn(&mut [u8]),
) {
    let xblocks = ((clamp_size(width) as usize + 3) / 4).max(1);
    let yblocks = ((clamp_size(height) as usize + 3) / 4).max(1);
    let line = xblocks * block_bytes;

    for row in 0..yblocks / 2 {
        let opposite = yblocks - 1 - row;
        let (upper, lower) = data.split_at_mut(opposite * line);
        let top = &mut upper[row * line..(row + 1) * line];
        let bottom = &mut lower[..line];

        for block in top.chunks_exact_mut(block_bytes) {
            flip_block(block);
        }
        for block in bottom.chunks_exact_mut(block_bytes) {
            flip_block(block);
        }
        top.swap_with_slice(bottom);
    }
}

/// Reverse the four 2-bit color index rows of a DXT color block.
///
/// Layout: two 16-bit palette endpoints, then one index byte per pixel row.
/// The endpoints are untouched.
fn flip_color_rows(block: &mut [u8]) {
    block.swap(4, 7);
    block.swap(5, 6);
}

fn flip_dxt1_block(block: &mut [u8]) {
    flip_color_rows(block);
}

/// DXT3: four 16-bit rows of 4-bit alpha, then a color block.
fn flip_dxt3_block(block: &mut [u8]) {
    block.swap(0, 6);
    block.swap(1, 7);
    block.swap(2, 4);
    block.swap(3, 5);
    flip_color_rows(&mut block[8..]);
}

/// DXT5: two reference alphas, six bytes of packed 3-bit indices, then a
/// color block.
fn flip_dxt5_block(block: &mut [u8]) {
    flip_dxt5_alpha(&mut block[2..8]);
    flip_color_rows(&mut block[8..]);
}

/// Reverse the row order of the sixteen 3-bit alpha indices packed
/// little-endian into six bytes. One pixel row is four indices, 12 bits,
/// so the repack swaps 12-bit groups.
fn flip_dxt5_alpha(rows: &mut [u8]) {
    debug_assert_eq!(rows.len(), 6);

    let mut bits = 0u64;
    for (i, &byte) in rows.iter().enumerate() {
        bits |= u64::from(byte) << (8 * i);
    }

    let mut flipped = 0u64;
    for row in 0..4 {
        let indices = (bits >> (12 * row)) & 0x0FFF;
        flipped |= indices << (12 * (3 - row));
    }

    for (i, byte) in rows.iter_mut().enumerate() {
        *byte = (flipped >> (8 * i)) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack_alpha_indices(indices: [u8; 16]) -> [u8; 6] {
        let mut bits = 0u64;
        for (i, &index) in indices.iter().enumerate() {
            bits |= u64::from(index & 7) << (3 * i);
        }
        let mut packed = [0u8; 6];
        for (i, byte) in packed.iter_mut().enumerate() {
            *byte = (bits >> (8 * i)) as u8;
        }
        packed
    }

    fn unpack_alpha_indices(packed: &[u8]) -> [u8; 16] {
        let mut bits = 0u64;
        for (i, &byte) in packed.iter().enumerate() {
            bits |= u64::from(byte) << (8 * i);
        }
        let mut indices = [0u8; 16];
        for (i, index) in indices.iter_mut().enumerate() {
            *index = ((bits >> (3 * i)) & 7) as u8;
        }
        indices
    }

    fn filled(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 + 7) as u8).collect()
    }

    #[test]
    fn test_dxt5_alpha_repack_reverses_rows() {
        let indices = [
            0, 1, 2, 3, // row 0
            4, 5, 6, 7, // row 1
            7, 6, 5, 4, // row 2
            3, 2, 1, 0, // row 3
        ];
        let mut packed = pack_alpha_indices(indices);
        flip_dxt5_alpha(&mut packed);

        let flipped = unpack_alpha_indices(&packed);
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(flipped[row * 4 + col], indices[(3 - row) * 4 + col]);
            }
        }
    }

    #[test]
    fn test_dxt5_alpha_repack_involution() {
        let mut packed = pack_alpha_indices([5, 0, 7, 1, 2, 2, 3, 6, 4, 1, 0, 7, 6, 3, 5, 2]);
        let original = packed;
        flip_dxt5_alpha(&mut packed);
        flip_dxt5_alpha(&mut packed);
        assert_eq!(packed, original);
    }

    #[test]
    fn test_color_rows_keep_endpoints() {
        let mut block = [0xAA, 0xBB, 0xCC, 0xDD, 1, 2, 3, 4];
        flip_color_rows(&mut block);
        assert_eq!(block, [0xAA, 0xBB, 0xCC, 0xDD, 4, 3, 2, 1]);
    }

    #[test]
    fn test_dxt3_block_alpha_rows() {
        let mut block = [1, 2, 3, 4, 5, 6, 7, 8, 0, 0, 0, 0, 10, 11, 12, 13];
        flip_dxt3_block(&mut block);
        // the four 16-bit alpha rows reverse, the color rows reverse
        assert_eq!(&block[..8], &[7, 8, 5, 6, 3, 4, 1, 2]);
        assert_eq!(&block[8..], &[0, 0, 0, 0, 13, 12, 11, 10]);
    }

    #[test]
    fn test_flip_scanlines() {
        // 2x3 single-component image
        let mut surface = Surface::new(2, 3, 1, vec![1, 2, 3, 4, 5, 6]);
        flip_surface(&mut surface, PixelFormat::Uncompressed { components: 1 });
        assert_eq!(surface.data(), &[5, 6, 3, 4, 1, 2]);
    }

    #[test]
    fn test_flip_volume_slices_independently() {
        // 1x2x2, one byte per pixel: each slice reverses on its own
        let mut surface = Surface::new(1, 2, 2, vec![b'a', b'b', b'c', b'd']);
        flip_surface(&mut surface, PixelFormat::Uncompressed { components: 1 });
        assert_eq!(surface.data(), &[b'b', b'a', b'd', b'c']);
    }

    #[test]
    fn test_flip_moves_block_rows() {
        // 8x8 DXT1: 2x2 block grid with distinct row bytes per block
        let block = |tag: u8| [0xC0, 0xC1, 0xC2, 0xC3, tag, tag + 1, tag + 2, tag + 3];
        let mut data = Vec::new();
        for tag in [0x10, 0x20, 0x30, 0x40] {
            data.extend_from_slice(&block(tag));
        }
        let mut surface = Surface::new(8, 8, 1, data);
        flip_surface(&mut surface, PixelFormat::Dxt1);

        // block (0,0) is now the old block (1,0) with its rows reversed
        assert_eq!(
            &surface.data()[..8],
            &[0xC0, 0xC1, 0xC2, 0xC3, 0x33, 0x32, 0x31, 0x30]
        );
        assert_eq!(
            &surface.data()[16..24],
            &[0xC0, 0xC1, 0xC2, 0xC3, 0x13, 0x12, 0x11, 0x10]
        );
    }

    #[test]
    fn test_flip_involution_uncompressed_odd_height() {
        let mut surface = Surface::new(5, 7, 1, filled(5 * 7 * 3));
        let original = surface.data().to_vec();
        let format = PixelFormat::Uncompressed { components: 3 };

        flip_surface(&mut surface, format);
        assert_ne!(surface.data(), &original[..]);
        flip_surface(&mut surface, format);
        assert_eq!(surface.data(), &original[..]);
    }

    #[test]
    fn test_flip_involution_dxt1() {
        // 4x4: a lone block row has nowhere to move
        let mut surface = Surface::new(4, 4, 1, filled(8));
        let original = surface.data().to_vec();

        flip_surface(&mut surface, PixelFormat::Dxt1);
        flip_surface(&mut surface, PixelFormat::Dxt1);
        assert_eq!(surface.data(), &original[..]);

        // 4x8: two block rows trade places and come back
        let mut surface = Surface::new(4, 8, 1, filled(16));
        let original = surface.data().to_vec();

        flip_surface(&mut surface, PixelFormat::Dxt1);
        assert_ne!(surface.data(), &original[..]);
        flip_surface(&mut surface, PixelFormat::Dxt1);
        assert_eq!(surface.data(), &original[..]);
    }

    #[test]
    fn test_flip_involution_dxt5_partial_height() {
        // 10x6: 3x2 block grid, final block row covers only 2 pixel rows
        let mut surface = Surface::new(10, 6, 1, filled(3 * 2 * 16));
        let original = surface.data().to_vec();

        flip_surface(&mut surface, PixelFormat::Dxt5);
        assert_ne!(surface.data(), &original[..]);
        flip_surface(&mut surface, PixelFormat::Dxt5);
        assert_eq!(surface.data(), &original[..]);
    }

    #[test]
    fn test_flip_involution_dxt3() {
        let mut surface = Surface::new(12, 12, 1, filled(3 * 3 * 16));
        let original = surface.data().to_vec();

        flip_surface(&mut surface, PixelFormat::Dxt3);
        flip_surface(&mut surface, PixelFormat::Dxt3);
        assert_eq!(surface.data(), &original[..]);
    }
}
