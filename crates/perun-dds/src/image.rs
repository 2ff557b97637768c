//! The DDS image container: loading, saving and assembly.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use perun_common::BinaryReader;
use zerocopy::byteorder::little_endian::U32;
use zerocopy::IntoBytes;

use crate::flip;
use crate::format::{clamp_size, dword_aligned_linesize, CubemapFace, PixelFormat, TextureKind};
use crate::header::{
    DdsHeader, DdsPixelFormat, DDSF_CAPS, DDSF_COMPLEX, DDSF_CUBEMAP, DDSF_CUBEMAP_ALL_FACES,
    DDSF_DEPTH, DDSF_HEIGHT, DDSF_LINEARSIZE, DDSF_MIPMAP, DDSF_MIPMAPCOUNT, DDSF_PITCH,
    DDSF_PIXELFORMAT, DDSF_TEXTURE, DDSF_VOLUME, DDSF_WIDTH,
};
use crate::surface::Surface;
use crate::texture::Texture;
use crate::{Error, Result, DDS_MAGIC};

/// Largest texture dimension accepted from a header. Anything beyond this
/// is a corrupt or hostile file, not a real GPU texture.
const MAX_DIMENSION: u32 = 65_536;

/// An in-memory DDS image: one or more textures plus format metadata.
///
/// Flat and volume images hold a single [`Texture`]; cubemaps hold six, in
/// +X, -X, +Y, -Y, +Z, -Z order. A successfully loaded or assembled image
/// is always valid; [`clear`](Self::clear) produces the one invalid state.
/// Accessors on an invalid image panic - see the `# Panics` sections.
#[derive(Debug, Clone)]
pub struct DdsImage {
    format: PixelFormat,
    components: u32,
    kind: TextureKind,
    textures: Vec<Texture>,
}

impl DdsImage {
    /// Read a DDS image from a file.
    ///
    /// With `flip` set, every surface is reoriented bottom-to-top for
    /// OpenGL-style row order.
    pub fn from_file<P: AsRef<Path>>(path: P, flip: bool) -> Result<Self> {
        let data = fs::read(path)?;
        Self::parse(&data, flip)
    }

    /// Read a DDS image from an open byte stream.
    pub fn from_reader<R: Read>(mut reader: R, flip: bool) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::parse(&data, flip)
    }

    /// Parse a DDS image from bytes.
    ///
    /// Any structural inconsistency (bad magic, bad size fields, truncated
    /// payload) fails with an error; no partially populated image is ever
    /// returned.
    pub fn parse(data: &[u8], flip: bool) -> Result<Self> {
        if data.len() < 4 + DdsHeader::SIZE as usize {
            return Err(Error::InvalidHeader("file too small".into()));
        }

        // Verify magic
        let magic: [u8; 4] = data[..4].try_into().unwrap();
        if &magic != DDS_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        // Parse header
        let mut reader = BinaryReader::new(&data[4..]);
        let header: DdsHeader = reader.read_struct()?;

        if header.size.get() != DdsHeader::SIZE {
            return Err(Error::InvalidHeader(format!(
                "header size {} (expected {})",
                header.size.get(),
                DdsHeader::SIZE
            )));
        }
        if header.pixel_format.size.get() != DdsPixelFormat::SIZE {
            return Err(Error::InvalidHeader(format!(
                "pixel format size {} (expected {})",
                header.pixel_format.size.get(),
                DdsPixelFormat::SIZE
            )));
        }

        let width = header.width.get();
        let height = header.height.get();
        if width == 0 || height == 0 {
            return Err(Error::InvalidHeader("zero image dimensions".into()));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION || header.depth.get() > MAX_DIMENSION {
            return Err(Error::InvalidHeader("implausible image dimensions".into()));
        }

        // Classify topology
        let (kind, num_faces, depth) = if header.is_cubemap() {
            if !header.has_all_cubemap_faces() {
                return Err(Error::InvalidHeader("cubemap is missing faces".into()));
            }
            (TextureKind::Cubemap, 6, 1)
        } else if header.depth.get() > 1 {
            (TextureKind::Volume, 1, header.depth.get())
        } else {
            (TextureKind::Flat, 1, 1)
        };

        let format = PixelFormat::from_pixel_format(&header.pixel_format)?;

        // The header count includes the base level
        let declared_mipmaps = header.mipmap_count.get().max(1) - 1;

        let mut textures = Vec::with_capacity(num_faces);
        for _ in 0..num_faces {
            let size = format.surface_size(width, height) * depth as usize;
            let buffer = reader.read_bytes(size)?.to_vec();
            let mut texture = Texture::new(Surface::new(width, height, depth, buffer));

            let (mut w, mut h, mut d) = (width, height, depth);
            for _ in 0..declared_mipmaps {
                if w == 1 && h == 1 && d == 1 {
                    // over-declared chain; levels never shrink below 1x1
                    break;
                }
                w = clamp_size(w / 2);
                h = clamp_size(h / 2);
                d = clamp_size(d / 2);

                let size = format.surface_size(w, h) * d as usize;
                let buffer = reader.read_bytes(size)?.to_vec();
                texture.add_mipmap(Surface::new(w, h, d, buffer));
            }
            textures.push(texture);
        }

        let mut image = Self {
            components: format.components(),
            format,
            kind,
            textures,
        };
        if flip {
            image.flip();
        }
        Ok(image)
    }

    /// Assemble a flat (1D or 2D) image from a base texture.
    pub fn create_flat(format: PixelFormat, texture: Texture) -> Result<Self> {
        if texture.surface().is_empty() {
            return Err(Error::EmptyTexture);
        }
        Ok(Self {
            components: format.components(),
            format,
            kind: TextureKind::Flat,
            textures: vec![texture],
        })
    }

    /// Assemble a volume image. The base surface's depth carries the slice
    /// count and must be at least 2.
    pub fn create_volume(format: PixelFormat, texture: Texture) -> Result<Self> {
        if texture.surface().is_empty() {
            return Err(Error::EmptyTexture);
        }
        let depth = texture.surface().depth();
        if depth < 2 {
            return Err(Error::InvalidDepth(depth));
        }
        Ok(Self {
            components: format.components(),
            format,
            kind: TextureKind::Volume,
            textures: vec![texture],
        })
    }

    /// Assemble a cubemap from six faces in +X, -X, +Y, -Y, +Z, -Z order.
    ///
    /// All faces must share base dimensions and mipmap depth; a mismatch is
    /// rejected before the image is built.
    pub fn create_cubemap(format: PixelFormat, faces: [Texture; 6]) -> Result<Self> {
        let base = faces[0].surface();
        if base.is_empty() {
            return Err(Error::EmptyTexture);
        }
        let (width, height) = (base.width(), base.height());
        let num_mipmaps = faces[0].num_mipmaps();

        for (index, face) in faces.iter().enumerate().skip(1) {
            let surface = face.surface();
            if surface.width() != width || surface.height() != height {
                return Err(Error::CubemapFaceMismatch {
                    face: index,
                    reason: format!(
                        "dimensions {}x{} differ from {}x{}",
                        surface.width(),
                        surface.height(),
                        width,
                        height
                    ),
                });
            }
            if face.num_mipmaps() != num_mipmaps {
                return Err(Error::CubemapFaceMismatch {
                    face: index,
                    reason: format!(
                        "mipmap count {} differs from {}",
                        face.num_mipmaps(),
                        num_mipmaps
                    ),
                });
            }
        }

        Ok(Self {
            components: format.components(),
            format,
            kind: TextureKind::Cubemap,
            textures: faces.into(),
        })
    }

    /// Reset to the cleared, invalid state.
    pub fn clear(&mut self) {
        self.textures.clear();
        self.components = 0;
        self.kind = TextureKind::None;
    }

    /// Vertically flip every surface of every texture, mipmaps included.
    pub fn flip(&mut self) {
        let format = self.format;
        for texture in &mut self.textures {
            flip::flip_texture(texture, format);
        }
    }

    /// Serialize to DDS bytes.
    ///
    /// With `flip` set the written payload is reoriented top-to-bottom; the
    /// in-memory image keeps its current orientation.
    ///
    /// # Panics
    ///
    /// Panics if the image is invalid.
    pub fn to_bytes(&self, flip: bool) -> Vec<u8> {
        assert!(self.is_valid(), "cannot serialize an invalid image");

        let header = self.build_header();
        let payload: usize = self
            .textures
            .iter()
            .map(|t| t.surface().size() + t.mipmaps().iter().map(Surface::size).sum::<usize>())
            .sum();

        let mut out = Vec::with_capacity(4 + DdsHeader::SIZE as usize + payload);
        out.extend_from_slice(DDS_MAGIC);
        out.extend_from_slice(header.as_bytes());

        for texture in &self.textures {
            if flip {
                let mut copy = texture.clone();
                flip::flip_texture(&mut copy, self.format);
                write_texture(&mut out, &copy);
            } else {
                write_texture(&mut out, texture);
            }
        }
        out
    }

    /// Write the image to an open byte stream.
    pub fn write_to<W: Write>(&self, mut writer: W, flip: bool) -> Result<()> {
        writer.write_all(&self.to_bytes(flip))?;
        Ok(())
    }

    /// Write the image to a file.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, flip: bool) -> Result<()> {
        fs::write(path, self.to_bytes(flip))?;
        Ok(())
    }

    fn build_header(&self) -> DdsHeader {
        let base = self.textures[0].surface();
        let (width, height) = (base.width(), base.height());
        let num_mipmaps = self.textures[0].num_mipmaps();

        let mut flags = DDSF_CAPS | DDSF_WIDTH | DDSF_HEIGHT | DDSF_PIXELFORMAT;
        let mut caps = DDSF_TEXTURE;
        let mut caps2 = 0;

        let pitch_or_linear_size = if self.format.is_compressed() {
            flags |= DDSF_LINEARSIZE;
            self.format.surface_size(width, height) as u32
        } else {
            flags |= DDSF_PITCH;
            dword_aligned_linesize(width, self.components * 8)
        };

        let mut mipmap_count = 0;
        if num_mipmaps > 0 {
            flags |= DDSF_MIPMAPCOUNT;
            caps |= DDSF_MIPMAP | DDSF_COMPLEX;
            mipmap_count = num_mipmaps + 1;
        }

        let mut depth = 0;
        match self.kind {
            TextureKind::Volume => {
                flags |= DDSF_DEPTH;
                caps |= DDSF_COMPLEX;
                caps2 |= DDSF_VOLUME;
                depth = base.depth();
            }
            TextureKind::Cubemap => {
                caps |= DDSF_COMPLEX;
                caps2 |= DDSF_CUBEMAP | DDSF_CUBEMAP_ALL_FACES;
            }
            _ => {}
        }

        DdsHeader {
            size: U32::new(DdsHeader::SIZE),
            flags: U32::new(flags),
            height: U32::new(height),
            width: U32::new(width),
            pitch_or_linear_size: U32::new(pitch_or_linear_size),
            depth: U32::new(depth),
            mipmap_count: U32::new(mipmap_count),
            reserved1: [U32::new(0); 11],
            pixel_format: self.format.to_pixel_format(),
            caps: U32::new(caps),
            caps2: U32::new(caps2),
            caps3: U32::new(0),
            caps4: U32::new(0),
            reserved2: U32::new(0),
        }
    }

    /// Whether the image holds data from a successful load or assembly.
    pub fn is_valid(&self) -> bool {
        self.kind != TextureKind::None && !self.textures.is_empty()
    }

    fn base(&self) -> &Texture {
        assert!(self.is_valid(), "accessor called on an invalid image");
        &self.textures[0]
    }

    /// Base level width.
    ///
    /// # Panics
    ///
    /// This and the other dimension/data accessors panic on an invalid
    /// image.
    pub fn width(&self) -> u32 {
        self.base().surface().width()
    }

    /// Base level height.
    pub fn height(&self) -> u32 {
        self.base().surface().height()
    }

    /// Base level depth (1 unless this is a volume image).
    pub fn depth(&self) -> u32 {
        self.base().surface().depth()
    }

    /// Byte size of the base level.
    pub fn size(&self) -> usize {
        self.base().surface().size()
    }

    /// Raw bytes of the base level of the first texture.
    pub fn data(&self) -> &[u8] {
        self.base().surface().data()
    }

    /// Number of mipmap levels below the base on the first texture.
    pub fn num_mipmaps(&self) -> u32 {
        self.base().num_mipmaps()
    }

    /// Mipmap accessor on the first texture.
    ///
    /// # Panics
    ///
    /// Panics if the image is invalid or `index` is out of range.
    pub fn mipmap(&self, index: u32) -> &Surface {
        self.base().mipmap(index)
    }

    /// Cubemap face accessor.
    ///
    /// # Panics
    ///
    /// Panics if the image is invalid or not a cubemap.
    pub fn face(&self, face: CubemapFace) -> &Texture {
        assert!(self.is_valid(), "accessor called on an invalid image");
        assert!(
            self.kind == TextureKind::Cubemap,
            "face accessor called on a non-cubemap image"
        );
        &self.textures[face.index()]
    }

    /// All textures: one for flat/volume, six for cubemaps.
    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    /// The pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Channel count, 1-4.
    pub fn components(&self) -> u32 {
        self.components
    }

    /// The image topology.
    pub fn kind(&self) -> TextureKind {
        self.kind
    }

    /// Whether the pixel data is DXT-compressed.
    pub fn is_compressed(&self) -> bool {
        self.format.is_compressed()
    }

    /// Whether this is a cubemap.
    pub fn is_cubemap(&self) -> bool {
        self.kind == TextureKind::Cubemap
    }

    /// Whether this is a volume image.
    pub fn is_volume(&self) -> bool {
        self.kind == TextureKind::Volume
    }

    /// Whether scanlines of the base level already fall on 4-byte
    /// boundaries. Informational only; load and save neither strip nor
    /// insert row padding.
    ///
    /// # Panics
    ///
    /// Panics if the image is invalid.
    pub fn is_dword_aligned(&self) -> bool {
        let line = self.width() * self.components;
        dword_aligned_linesize(self.width(), self.components * 8) == line
    }
}

fn write_texture(out: &mut Vec<u8>, texture: &Texture) {
    out.extend_from_slice(texture.surface().data());
    for mipmap in texture.mipmaps() {
        out.extend_from_slice(mipmap.data());
    }
}
