// SPDX-License-Identifier: GPL-3.0-only

//! Software raster surface backed by a `tiny-skia` pixmap.

use std::path::Path;

use tiny_skia::{
    BlendMode, FilterQuality, Paint, Pixmap, PixmapPaint, PremultipliedColorU8, Rect, Transform,
};

use super::{AlphaMask, BackendError, Canvas, Color, Surface};
use crate::geometry::{Affine, Bounds, Point};

fn to_transform(affine: &Affine) -> Transform {
    Transform::from_row(
        affine.xx as f32,
        affine.yx as f32,
        affine.xy as f32,
        affine.yy as f32,
        affine.x0 as f32,
        affine.y0 as f32,
    )
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    let c = color.clamped();
    tiny_skia::Color::from_rgba(c.r as f32, c.g as f32, c.b as f32, c.a as f32)
        .unwrap_or(tiny_skia::Color::TRANSPARENT)
}

/// An RGBA pixmap surface.
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Premultiplied RGBA bytes in row-major order.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Demultiplied colour of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::from_rgba8(p.red(), p.green(), p.blue(), p.alpha()))
    }

    /// Writes the surface as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), BackendError> {
        let path = path.as_ref();
        self.pixmap.save_png(path).map_err(|e| BackendError::Encode {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl Canvas for RasterSurface {
    fn fill_rect(&mut self, transform: &Affine, rect: Bounds, color: Color) {
        let Some(rect) = Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(to_skia_color(color));
        paint.anti_alias = true;
        self.pixmap.fill_rect(rect, &paint, to_transform(transform), None);
    }

    fn fill_mask(&mut self, transform: &Affine, mask: &AlphaMask, at: Point, scale_factor: f64, color: Color) {
        let Some(mut tinted) = Pixmap::new(mask.width, mask.height) else {
            return;
        };
        let c = color.clamped();
        for (pixel, coverage) in tinted.pixels_mut().iter_mut().zip(&mask.data) {
            let alpha = (f64::from(*coverage) / 255.0) * c.a;
            let premultiply = |channel: f64| (channel * alpha * 255.0).round() as u8;
            if let Some(value) = PremultipliedColorU8::from_rgba(
                premultiply(c.r),
                premultiply(c.g),
                premultiply(c.b),
                (alpha * 255.0).round() as u8,
            ) {
                *pixel = value;
            }
        }

        let scale = if scale_factor > 0.0 { 1.0 / scale_factor } else { 1.0 };
        let placement = transform.pre_translate(at.x, at.y).pre_scale(scale, scale);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, tinted.as_ref(), &paint, to_transform(&placement), None);
    }
}

impl Surface for RasterSurface {
    fn create(width: u32, height: u32) -> Result<Self, BackendError> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(BackendError::SurfaceAllocation { width, height })?;
        Ok(Self { pixmap })
    }

    fn blit(&mut self, source: &Self) {
        if self.pixmap.width() == source.pixmap.width()
            && self.pixmap.height() == source.pixmap.height()
        {
            self.pixmap.data_mut().copy_from_slice(source.pixmap.data());
            return;
        }
        let paint = PixmapPaint {
            blend_mode: BlendMode::Source,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.pixmap.as_ref(),
            &paint,
            Transform::identity(),
            None,
        );
    }
}
