//! 2D textures decoded with the `image` crate.

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::api::GlApi;
use crate::context::{gl_call, Context};
use crate::error::{gl_size, Error, Result};

/// GL internal format for RGBA8 textures, pre-cast to the `i32` that
/// `tex_image_2d` expects.
#[expect(clippy::cast_possible_wrap)]
const RGBA8_INTERNAL_FORMAT: i32 = glow::RGBA8 as i32;

/// An RGBA8 2D texture.
///
/// Pixels are flipped vertically on upload so that the first image row lands
/// at texture coordinate `v = 1`, matching GL's bottom-left origin. Sampling
/// uses linear filtering and clamps to the edge.
pub struct Texture<G: GlApi = glow::Context> {
    ctx: Context<G>,
    handle: G::Texture,
    width: u32,
    height: u32,
    channels: u8,
    path: Option<PathBuf>,
}

impl<G: GlApi> Texture<G> {
    /// Decode an image file and upload it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if the file cannot be opened or decoded, and
    /// otherwise the same errors as [`from_image`](Self::from_image).
    pub fn from_file(ctx: &Context<G>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| Error::Image {
            path: path.to_owned(),
            source,
        })?;
        let mut texture = Self::from_image(ctx, &image)?;
        texture.path = Some(path.to_owned());
        log::info!(
            "loaded texture {} ({}x{}, {} channel(s))",
            path.display(),
            texture.width,
            texture.height,
            texture.channels,
        );
        Ok(texture)
    }

    /// Upload an already decoded image.
    ///
    /// The converted pixel buffer lives only for the duration of this call;
    /// afterwards the GL copy is the only one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] for a zero-sized image (before any GL
    /// call), [`Error::SizeOverflow`] if a dimension does not fit in `i32`,
    /// or [`Error::Create`] if the driver hands out no name.
    pub fn from_image(ctx: &Context<G>, image: &DynamicImage) -> Result<Self> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }
        let gl_width = gl_size("texture width", width as usize)?;
        let gl_height = gl_size("texture height", height as usize)?;

        let channels = image.color().channel_count();
        let pixels = image.flipv().into_rgba8();

        let handle = gl_call!(ctx, create_texture()).map_err(|message| Error::Create {
            kind: "texture",
            message,
        })?;
        let texture = Self {
            ctx: ctx.clone(),
            handle,
            width,
            height,
            channels,
            path: None,
        };

        // GL constant values are small enough that the cast is always safe.
        #[expect(clippy::cast_possible_wrap)]
        let params = [
            (glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32),
            (glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32),
            (glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32),
            (glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32),
        ];

        gl_call!(ctx, bind_texture(glow::TEXTURE_2D, Some(handle)));
        for (parameter, value) in params {
            gl_call!(ctx, tex_parameter_i32(glow::TEXTURE_2D, parameter, value));
        }
        gl_call!(
            ctx,
            tex_image_2d(
                glow::TEXTURE_2D,
                0,
                RGBA8_INTERNAL_FORMAT,
                gl_width,
                gl_height,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels.as_raw().as_slice())
            )
        );
        gl_call!(ctx, bind_texture(glow::TEXTURE_2D, None));

        Ok(texture)
    }

    /// Bind to texture unit `unit` (0 for `TEXTURE0`), leaving that unit
    /// active.
    ///
    /// A unit beyond the driver's limit raises `INVALID_ENUM`.
    pub fn bind(&self, unit: u32) {
        gl_call!(self.ctx, active_texture(glow::TEXTURE0.saturating_add(unit)));
        gl_call!(self.ctx, bind_texture(glow::TEXTURE_2D, Some(self.handle)));
    }

    /// Clear the `TEXTURE_2D` binding of the active unit.
    pub fn unbind(&self) {
        gl_call!(self.ctx, bind_texture(glow::TEXTURE_2D, None));
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel count of the source image before RGBA conversion.
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// The file this texture was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The GL texture name.
    pub fn handle(&self) -> G::Texture {
        self.handle
    }
}

impl<G: GlApi> Drop for Texture<G> {
    fn drop(&mut self) {
        gl_call!(self.ctx, delete_texture(self.handle));
    }
}
