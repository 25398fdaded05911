// SPDX-License-Identifier: GPL-3.0-only

//! Label shaping with `ab_glyph`.
//!
//! [`GlyphShaper`] lays a label out on a single line with kerning, clips it at
//! the maximum width and rasterises it into an [`AlphaMask`]. [`NoText`] only
//! estimates extents and produces no coverage, for hosts that ship without a
//! font.

use std::path::Path;

use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};

use super::{AlphaMask, BackendError, FontDescription, TextDirection, TextLayout, TextShaper};

/// Base direction of `text`, decided by its first strong character.
///
/// Hebrew, Arabic, Syriac, Thaana and N'Ko (plus their presentation forms)
/// count as right-to-left; any other letter counts as left-to-right.
pub fn base_direction(text: &str) -> TextDirection {
    for ch in text.chars() {
        let rtl = matches!(
            ch as u32,
            0x0590..=0x08FF | 0xFB1D..=0xFDFF | 0xFE70..=0xFEFF | 0x1_0800..=0x1_0FFF | 0x1_E800..=0x1_EFFF
        );
        if rtl {
            return TextDirection::RightToLeft;
        }
        if ch.is_alphabetic() {
            return TextDirection::LeftToRight;
        }
    }
    TextDirection::LeftToRight
}

/// Text shaper backed by a single font face.
///
/// The family in a [`FontDescription`] is ignored; every label uses the loaded
/// face at the requested pixel size.
pub struct GlyphShaper {
    font: FontArc,
}

impl GlyphShaper {
    /// Loads a TrueType or OpenType font from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| BackendError::FontLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(data).map_err(|e| match e {
            BackendError::FontLoad { reason, .. } => BackendError::FontLoad {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Parses font data held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, BackendError> {
        let font = FontArc::try_from_vec(data).map_err(|e| BackendError::FontLoad {
            path: "<memory>".into(),
            reason: e.to_string(),
        })?;
        Ok(Self { font })
    }
}

impl TextShaper for GlyphShaper {
    fn layout(&self, font: &FontDescription, max_width: f64, text: &str) -> Result<TextLayout, BackendError> {
        if font.size <= 0.0 || !font.size.is_finite() {
            return Err(BackendError::text(text, format!("invalid font size {}", font.size)));
        }

        let scale = PxScale::from(font.size as f32);
        let scaled = self.font.as_scaled(scale);
        let ascent = scaled.ascent();
        let height = scaled.height();
        let limit = if max_width > 0.0 { max_width as f32 } else { f32::INFINITY };

        // Place glyphs until the line would run past the limit.
        let mut glyphs = Vec::new();
        let mut cursor_x = 0.0f32;
        let mut previous = None;
        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }
            let id = scaled.glyph_id(ch);
            let kern = previous.map(|prev| scaled.kern(prev, id)).unwrap_or(0.0);
            let advance = scaled.h_advance(id);
            if cursor_x + kern + advance > limit && !glyphs.is_empty() {
                tracing::trace!("Clipping label '{}' at {} px", text, limit);
                break;
            }
            cursor_x += kern;
            glyphs.push(id.with_scale_and_position(scale, point(cursor_x, ascent)));
            cursor_x += advance;
            previous = Some(id);
        }

        let width = cursor_x.min(limit).max(0.0);
        let mut mask = AlphaMask::new(width.ceil() as u32, height.ceil() as u32);
        for glyph in glyphs {
            let Some(outline) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outline.px_bounds();
            outline.draw(|x, y, coverage| {
                let px = bounds.min.x + x as f32;
                let py = bounds.min.y + y as f32;
                if px < 0.0 || py < 0.0 || px >= mask.width as f32 || py >= mask.height as f32 {
                    return;
                }
                let index = py as usize * mask.width as usize + px as usize;
                let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                if let Some(cell) = mask.data.get_mut(index) {
                    *cell = (*cell).max(value);
                }
            });
        }

        Ok(TextLayout {
            text: text.to_string(),
            width: f64::from(width),
            height: f64::from(height),
            direction: base_direction(text),
            mask: Some(mask),
        })
    }
}

/// Shaper that estimates extents from the font size and draws nothing.
///
/// Every character is assumed to be `0.6 × size` wide; the line is `size`
/// tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoText;

impl TextShaper for NoText {
    fn layout(&self, font: &FontDescription, max_width: f64, text: &str) -> Result<TextLayout, BackendError> {
        let natural = 0.6 * font.size * text.chars().filter(|c| !c.is_control()).count() as f64;
        let width = if max_width > 0.0 { natural.min(max_width) } else { natural };
        Ok(TextLayout {
            text: text.to_string(),
            width,
            height: font.size,
            direction: base_direction(text),
            mask: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_direction() {
        assert_eq!(base_direction("abc"), TextDirection::LeftToRight);
        assert_eq!(base_direction("שלום"), TextDirection::RightToLeft);
        assert_eq!(base_direction("123 مرحبا"), TextDirection::RightToLeft);
        assert_eq!(base_direction("1 a مرحبا"), TextDirection::LeftToRight);
        assert_eq!(base_direction(""), TextDirection::LeftToRight);
    }

    #[test]
    fn test_no_text_estimates_and_clips() {
        let font = FontDescription::new("Sans", 10.0);
        let layout = NoText.layout(&font, 100.0, "abcd").unwrap();
        assert!((layout.width - 24.0).abs() < 1e-9);
        assert_eq!(layout.height, 10.0);
        assert!(layout.mask.is_none());

        let clipped = NoText.layout(&font, 12.0, "abcd").unwrap();
        assert_eq!(clipped.width, 12.0);
    }

    #[test]
    fn test_invalid_font_data_rejected() {
        let err = GlyphShaper::from_bytes(vec![0, 1, 2, 3]).err().expect("not a font");
        assert!(matches!(err, BackendError::FontLoad { .. }));
    }

    #[test]
    fn test_missing_font_file_reports_path() {
        let err = GlyphShaper::load("/nonexistent/font.ttf").err().expect("file is missing");
        assert!(err.to_string().contains("/nonexistent/font.ttf"));
    }
}
