//! Sampled color textures, the depth buffer, and the CPU-side images that
//! feed them.

use std::path::Path;

use crate::error::FlycamError;

/// Depth buffer format shared by the depth texture and every pipeline that
/// tests against it.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Tightly packed RGBA8 pixels, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl ImageData {
    /// Decode an image file (PNG or JPEG) into RGBA8.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::Texture`] naming `path` if the file cannot be
    /// opened or decoded.
    pub fn load(path: &Path) -> Result<Self, FlycamError> {
        let decoded = image::open(path).map_err(|source| FlycamError::Texture {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("loaded texture {} ({width}x{height})", path.display());
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// Load `path` if given, otherwise build the procedural fallback.
    ///
    /// # Errors
    ///
    /// Propagates [`ImageData::load`] failures; a configured path that does
    /// not load is an error, never a silent fallback.
    pub fn load_or_else(
        path: Option<&Path>,
        fallback: impl FnOnce() -> Self,
    ) -> Result<Self, FlycamError> {
        path.map_or_else(|| Ok(fallback()), Self::load)
    }

    /// Square checkerboard alternating `a` and `b` every `cell` pixels.
    #[must_use]
    pub fn checkerboard(size: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let cell = cell.max(1);
        Self::from_fn(size, size, |x, y| {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                a
            } else {
                b
            }
        })
    }

    /// Square grid of filled circles, `count` per side, in `fg` over `bg`.
    #[must_use]
    pub fn dots(size: u32, count: u32, fg: [u8; 4], bg: [u8; 4]) -> Self {
        let cell = (size / count.max(1)).max(1) as f32;
        let radius = cell * 0.35;
        Self::from_fn(size, size, |x, y| {
            let cx = (x as f32 % cell) - cell * 0.5 + 0.5;
            let cy = (y as f32 % cell) - cell * 0.5 + 0.5;
            if cx * cx + cy * cy <= radius * radius {
                fg
            } else {
                bg
            }
        })
    }

    /// Default base texture: a two-tone wooden crate pattern.
    #[must_use]
    pub fn default_base() -> Self {
        Self::checkerboard(256, 32, [181, 130, 72, 255], [122, 82, 41, 255])
    }

    /// Default overlay texture: yellow dots on a dark background.
    #[must_use]
    pub fn default_overlay() -> Self {
        Self::dots(256, 4, [250, 210, 40, 255], [30, 30, 30, 255])
    }

    /// Number of levels in a full mip chain down to 1×1.
    #[must_use]
    pub fn mip_level_count(&self) -> u32 {
        u32::BITS - self.width.max(self.height).max(1).leading_zeros()
    }

    /// Half-size copy, each texel the 2×2 box average of its parents. Odd
    /// edges reuse the last row or column.
    #[must_use]
    pub fn downsample(&self) -> Self {
        let width = (self.width / 2).max(1);
        let height = (self.height / 2).max(1);
        let last_x = self.width.saturating_sub(1);
        let last_y = self.height.saturating_sub(1);
        Self::from_fn(width, height, |x, y| {
            let (x0, y0) = ((x * 2).min(last_x), (y * 2).min(last_y));
            let (x1, y1) = ((x0 + 1).min(last_x), (y0 + 1).min(last_y));
            let mut sum = [0u32; 4];
            for (sx, sy) in [(x0, y0), (x1, y0), (x0, y1), (x1, y1)] {
                let i = ((sy * self.width + sx) * 4) as usize;
                for (acc, &c) in sum.iter_mut().zip(&self.rgba[i..i + 4]) {
                    *acc += u32::from(c);
                }
            }
            sum.map(|c| ((c + 2) / 4) as u8)
        })
    }

    /// This image followed by successive halvings down to 1×1.
    #[must_use]
    pub fn mip_chain(&self) -> Vec<Self> {
        let mut levels = Vec::with_capacity(self.mip_level_count() as usize);
        levels.push(self.clone());
        while let Some(last) = levels.last() {
            if last.width <= 1 && last.height <= 1 {
                break;
            }
            let next = last.downsample();
            levels.push(next);
        }
        levels
    }

    fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Self {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            rgba,
        }
    }
}

/// A sampled RGBA8 texture and its default view.
pub struct Texture2d {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl Texture2d {
    /// Upload `image` as a linear RGBA8 texture with a full mip chain.
    #[must_use]
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &ImageData,
    ) -> Self {
        let levels = image.mip_chain();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip, level) in (0u32..).zip(&levels) {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: mip,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &level.rgba,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(level.width * 4),
                    rows_per_image: Some(level.height),
                },
                wgpu::Extent3d {
                    width: level.width,
                    height: level.height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Depth attachment sized to the surface.
pub struct DepthTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// Create a depth texture of the given size in [`DEPTH_FORMAT`].
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(img: &ImageData, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * img.width + x) * 4) as usize;
        [img.rgba[i], img.rgba[i + 1], img.rgba[i + 2], img.rgba[i + 3]]
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let a = [255, 0, 0, 255];
        let b = [0, 0, 255, 255];
        let img = ImageData::checkerboard(8, 2, a, b);
        assert_eq!(img.rgba.len(), 8 * 8 * 4);
        assert_eq!(pixel(&img, 0, 0), a);
        assert_eq!(pixel(&img, 1, 1), a);
        assert_eq!(pixel(&img, 2, 0), b);
        assert_eq!(pixel(&img, 0, 2), b);
        assert_eq!(pixel(&img, 2, 2), a);
    }

    #[test]
    fn zero_cell_size_does_not_divide_by_zero() {
        let img = ImageData::checkerboard(4, 0, [1; 4], [2; 4]);
        assert_eq!(pixel(&img, 0, 0), [1; 4]);
        assert_eq!(pixel(&img, 1, 0), [2; 4]);
    }

    #[test]
    fn dots_fill_centers_not_corners() {
        let fg = [255, 255, 0, 255];
        let bg = [0, 0, 0, 255];
        let img = ImageData::dots(64, 2, fg, bg);
        assert_eq!(pixel(&img, 16, 16), fg);
        assert_eq!(pixel(&img, 48, 48), fg);
        assert_eq!(pixel(&img, 0, 0), bg);
        assert_eq!(pixel(&img, 32, 0), bg);
    }

    #[test]
    fn default_textures_are_opaque_squares() {
        for img in [ImageData::default_base(), ImageData::default_overlay()] {
            assert_eq!(img.width, img.height);
            assert_eq!(img.rgba.len(), (img.width * img.height * 4) as usize);
            assert!(img.rgba.chunks_exact(4).all(|p| p[3] == 255));
        }
    }

    #[test]
    fn mip_chain_halves_down_to_one_texel() {
        let img = ImageData::checkerboard(256, 32, [0; 4], [255; 4]);
        assert_eq!(img.mip_level_count(), 9);
        let chain = img.mip_chain();
        assert_eq!(chain.len(), 9);
        for (level, mip) in chain.iter().enumerate() {
            let side = 256 >> level;
            assert_eq!((mip.width, mip.height), (side, side));
            assert_eq!(mip.rgba.len(), (side * side * 4) as usize);
        }
        assert_eq!(chain[0], img);
    }

    #[test]
    fn mip_chain_of_non_square_image() {
        let img = ImageData::checkerboard(1, 1, [9; 4], [9; 4]);
        assert_eq!(img.mip_chain().len(), 1);

        let wide = ImageData {
            width: 5,
            height: 2,
            rgba: vec![10; 5 * 2 * 4],
        };
        let sizes: Vec<_> = wide
            .mip_chain()
            .iter()
            .map(|m| (m.width, m.height))
            .collect();
        assert_eq!(sizes, vec![(5, 2), (2, 1), (1, 1)]);
        assert_eq!(wide.mip_level_count(), 3);
    }

    #[test]
    fn downsample_averages_each_block() {
        let img = ImageData::checkerboard(4, 1, [0, 0, 0, 255], [200, 100, 40, 255]);
        let half = img.downsample();
        assert_eq!((half.width, half.height), (2, 2));
        assert!(half
            .rgba
            .chunks_exact(4)
            .all(|p| p == [100, 50, 20, 255]));
    }

    #[test]
    fn no_path_uses_fallback() {
        let img = ImageData::load_or_else(None, ImageData::default_base)
            .unwrap();
        assert_eq!(img, ImageData::default_base());
    }

    #[test]
    fn missing_file_is_a_texture_error() {
        let path = Path::new("/definitely/not/here.png");
        let err =
            ImageData::load_or_else(Some(path), ImageData::default_base)
                .unwrap_err();
        match err {
            FlycamError::Texture { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loads_a_written_png() {
        let dir = std::env::temp_dir()
            .join(format!("flycam-texture-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tiny.png");
        let src = image::RgbaImage::from_raw(2, 1, vec![
            10, 20, 30, 255, 40, 50, 60, 128,
        ])
        .unwrap();
        src.save(&path).unwrap();

        let img = ImageData::load(&path).unwrap();
        assert_eq!((img.width, img.height), (2, 1));
        assert_eq!(img.rgba, vec![10, 20, 30, 255, 40, 50, 60, 128]);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
