//! Hand-off of decoded surfaces to a GPU upload collaborator.
//!
//! The image walks its textures in upload order and feeds each surface to
//! a [`TextureSink`] implemented by the rendering backend. All GPU API
//! calls live behind that trait; this crate never makes any itself.

use crate::format::{CubemapFace, TextureKind};
use crate::image::DdsImage;
use crate::texture::Texture;

/// Description of one surface submitted to a [`TextureSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceDesc {
    /// Mipmap level, 0 = base.
    pub level: u32,
    /// Cubemap face, when uploading a cubemap.
    pub face: Option<CubemapFace>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Depth slices (1 unless uploading a volume).
    pub depth: u32,
    /// Whether `data` holds DXT blocks rather than raw pixels.
    pub compressed: bool,
    /// Channel count for raw pixel data.
    pub components: u32,
}

/// Receiver for texture data, implemented by the rendering backend.
pub trait TextureSink {
    /// Accept one surface. `data` is borrowed from the image; copy it or
    /// upload it before returning.
    fn submit(&mut self, desc: &SurfaceDesc, data: &[u8]);
}

impl DdsImage {
    /// Upload a 1D texture (a flat image one pixel tall).
    ///
    /// Returns false without touching the sink if the image is invalid or
    /// has the wrong topology.
    pub fn upload_1d<S: TextureSink>(&self, sink: &mut S) -> bool {
        if !self.is_valid() || self.kind() != TextureKind::Flat || self.height() != 1 {
            return false;
        }
        submit_texture(&self.textures()[0], None, self, sink);
        true
    }

    /// Upload a flat 2D texture with its mipmap chain.
    pub fn upload_2d<S: TextureSink>(&self, sink: &mut S) -> bool {
        if !self.is_valid() || self.kind() != TextureKind::Flat {
            return false;
        }
        submit_texture(&self.textures()[0], None, self, sink);
        true
    }

    /// Upload a volume texture with its mipmap chain.
    pub fn upload_3d<S: TextureSink>(&self, sink: &mut S) -> bool {
        if !self.is_valid() || self.kind() != TextureKind::Volume {
            return false;
        }
        submit_texture(&self.textures()[0], None, self, sink);
        true
    }

    /// Upload all six cubemap faces, each with its mipmap chain, in
    /// +X, -X, +Y, -Y, +Z, -Z order.
    pub fn upload_cubemap<S: TextureSink>(&self, sink: &mut S) -> bool {
        if !self.is_valid() || self.kind() != TextureKind::Cubemap {
            return false;
        }
        for face in CubemapFace::ALL {
            submit_texture(self.face(face), Some(face), self, sink);
        }
        true
    }
}

fn submit_texture<S: TextureSink>(
    texture: &Texture,
    face: Option<CubemapFace>,
    image: &DdsImage,
    sink: &mut S,
) {
    let base = texture.surface();
    sink.submit(
        &SurfaceDesc {
            level: 0,
            face,
            width: base.width(),
            height: base.height(),
            depth: base.depth(),
            compressed: image.is_compressed(),
            components: image.components(),
        },
        base.data(),
    );

    for (index, mipmap) in texture.mipmaps().iter().enumerate() {
        sink.submit(
            &SurfaceDesc {
                level: index as u32 + 1,
                face,
                width: mipmap.width(),
                height: mipmap.height(),
                depth: mipmap.depth(),
                compressed: image.is_compressed(),
                components: image.components(),
            },
            mipmap.data(),
        );
    }
}
