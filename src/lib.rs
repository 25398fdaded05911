// SPDX-License-Identifier: GPL-3.0-only

//! keyrender - rendering core of an on-screen keyboard
//!
//! This crate turns a declarative keyboard layout into paint operations and
//! maps pointer positions back to buttons. It owns no window; hosts hand it
//! surfaces to paint on and forward allocation changes and input.
//!
//! # Architecture
//!
//! Rendering is split between pure geometry and a renderer facade that talks
//! to pluggable collaborators:
//!
//! 1. **Geometry**: bounds, affine transforms, rotated-row bounding boxes and
//!    point-in-rotated-rectangle hit testing.
//!
//! 2. **Renderer**: keeps one cached image of the keyboard in its default
//!    state and repaints only buttons whose state differs on top of it.
//!
//! Styles, text shaping, icons and surfaces are traits in [`backend`], with a
//! software raster implementation built on tiny-skia and ab_glyph.
//!
//! # Modules
//!
//! - `app_settings`: Centralized constants and defaults
//! - `backend`: Collaborator traits and the software raster backend
//! - `config`: Renderer configuration loaded from JSON
//! - `geometry`: Bounds, transforms and hit testing
//! - `keyboard`: Active view, button states and change events
//! - `layout`: Layout data model (views, rows, buttons)
//! - `renderer`: The [`Renderer`](renderer::Renderer) facade

pub mod app_settings;
pub mod backend;
pub mod config;
pub mod geometry;
pub mod keyboard;
pub mod layout;
pub mod renderer;

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod integration_tests {
    use crate::backend::glyph::NoText;
    use crate::backend::icons::NoIcons;
    use crate::backend::raster::RasterSurface;
    use crate::backend::testing::{
        FixedShaper, FixedStyle, IconMap, Op, RecordingSurface, FOREGROUND, KEY_BACKGROUND,
        LOCKED_BACKGROUND, PRESSED_BACKGROUND, VIEW_BACKGROUND,
    };
    use crate::backend::{Color, Surface};
    use crate::config::RendererConfig;
    use crate::geometry::{get_button_bounds, Bounds, Point};
    use crate::keyboard::{ButtonState, Keyboard, KeyboardEvent};
    use crate::layout::{ArrangementKind, Button, ButtonId, Layout, Row, View};
    use crate::renderer::{Backends, Renderer, Theme, ThemeStyle};
    use futures::StreamExt;

    /// Two views: "base" with a letter row and a tilted bottom row holding an
    /// icon button, and a single-button "symbols" view.
    fn layout() -> Layout {
        Layout::new("integration", ArrangementKind::Base)
            .with_view(
                View::new("base", Bounds::new(0.0, 0.0, 800.0, 300.0))
                    .with_row(
                        Row::new(Bounds::new(0.0, 0.0, 800.0, 100.0))
                            .with_button(
                                Button::new("q", Bounds::new(10.0, 10.0, 60.0, 60.0))
                                    .with_label("q")
                                    .with_level_labels(["q", "Q"])
                                    .with_keycode(16),
                            )
                            .with_button(
                                Button::new("w", Bounds::new(80.0, 10.0, 60.0, 60.0))
                                    .with_label("w")
                                    .with_keycode(17),
                            ),
                    )
                    .with_row(
                        Row::new(Bounds::new(100.0, 150.0, 400.0, 100.0))
                            .with_angle(10)
                            .with_button(
                                Button::new("Shift_L", Bounds::new(0.0, 0.0, 100.0, 100.0))
                                    .with_outline("special")
                                    .with_icon("key-shift")
                                    .with_label("Shift"),
                            )
                            .with_button(
                                Button::new("space", Bounds::new(100.0, 0.0, 300.0, 100.0))
                                    .with_label(" "),
                            ),
                    ),
            )
            .with_view(
                View::new("symbols", Bounds::new(0.0, 0.0, 400.0, 300.0)).with_row(
                    Row::new(Bounds::new(0.0, 0.0, 400.0, 300.0)).with_button(
                        Button::new("abc", Bounds::new(0.0, 0.0, 400.0, 300.0)).with_label("abc"),
                    ),
                ),
            )
    }

    struct Fixture {
        renderer: Renderer<RecordingSurface>,
        style: FixedStyle,
        icons: IconMap,
        text: FixedShaper,
    }

    fn fixture_with(style: FixedStyle, icons: IconMap) -> Fixture {
        let text = FixedShaper::default();
        let backends = Backends::new(style.clone(), text.clone(), icons.clone());
        let keyboard = Keyboard::new(layout()).unwrap();
        let mut renderer = Renderer::new(keyboard, backends, RendererConfig::default()).unwrap();
        renderer.set_allocation_size(800.0, 300.0);
        Fixture {
            renderer,
            style,
            icons,
            text,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(FixedStyle::new(0.0, 1.0), IconMap::default().with_icon("key-shift", 16))
    }

    fn frame(renderer: &mut Renderer<RecordingSurface>) -> RecordingSurface {
        let mut target = RecordingSurface::target(800, 300);
        renderer.render_keyboard(&mut target).unwrap();
        target
    }

    /// The worked example: an unrotated button keeps its declared bounds and
    /// is found at its centre.
    #[test]
    fn test_unrotated_button_bounds_and_hit() {
        let f = fixture();
        let view_bounds = Bounds::new(0.0, 0.0, 800.0, 300.0);
        let row_bounds = Bounds::new(0.0, 0.0, 800.0, 100.0);
        let button = Bounds::new(10.0, 10.0, 60.0, 60.0);
        assert_eq!(get_button_bounds(view_bounds, row_bounds, 0, button), button);

        let view = f.renderer.keyboard().view();
        let place = view.place(ButtonId::new(0, 0)).unwrap();
        assert_eq!(f.renderer.get_button_bounds(view.bounds, &place), button);

        let hit = f.renderer.hit_test(Point::new(40.0, 40.0)).expect("centre of 'q'");
        assert_eq!(hit.button.name, "q");
        assert!(f.renderer.hit_test(Point::new(75.0, 40.0)).is_none());
    }

    #[test]
    fn test_hit_inside_rotated_row() {
        let f = fixture();
        // Centre of "space" in row-local coordinates is (250, 50); rotate by
        // 10 degrees about the row origin (100, 150).
        let theta = 10f64.to_radians();
        let (x, y) = (250.0, 50.0);
        let centre = Point::new(
            100.0 + x * theta.cos() - y * theta.sin(),
            150.0 + x * theta.sin() + y * theta.cos(),
        );
        let hit = f.renderer.hit_test(centre).expect("centre of 'space'");
        assert_eq!(hit.id, ButtonId::new(1, 1));
    }

    #[test]
    fn test_first_frame_builds_cache_and_blits_it() {
        let mut f = fixture();
        assert_eq!(f.renderer.surface_generation(), 0);

        let target = frame(&mut f.renderer);
        assert_eq!(f.renderer.surface_generation(), 1);
        let cached = f.renderer.cached_surface().expect("cache filled");
        assert_eq!(target.blits(), vec![cached.id]);
        // Nothing but the blit when every button is in its default state.
        assert_eq!(target.ops.len(), 1);

        assert_eq!(cached.fills_with(VIEW_BACKGROUND), 1);
        assert_eq!(cached.fills_with(KEY_BACKGROUND), 4);
        assert_eq!(cached.fills_with(PRESSED_BACKGROUND), 0);
    }

    #[test]
    fn test_unchanged_frame_reuses_cache() {
        let mut f = fixture();
        let first = frame(&mut f.renderer);
        let second = frame(&mut f.renderer);
        assert_eq!(f.renderer.surface_generation(), 1);
        assert_eq!(first.blits(), second.blits());
        f.renderer.set_scale_factor(1);
        frame(&mut f.renderer);
        assert_eq!(f.renderer.surface_generation(), 1);
    }

    #[test]
    fn test_invalidate_forces_rebuild() {
        let mut f = fixture();
        let first = frame(&mut f.renderer);
        f.renderer.invalidate();
        assert!(f.renderer.cached_surface().is_none());
        let second = frame(&mut f.renderer);
        assert_eq!(f.renderer.surface_generation(), 2);
        assert_ne!(first.blits(), second.blits());
    }

    #[test]
    fn test_rebuild_on_allocation_scale_and_view_change() {
        let mut f = fixture();
        frame(&mut f.renderer);

        f.renderer.set_allocation_size(400.0, 150.0);
        frame(&mut f.renderer);
        assert_eq!(f.renderer.surface_generation(), 2);
        let cached = f.renderer.cached_surface().unwrap();
        assert_eq!((cached.width, cached.height), (400, 150));

        f.renderer.set_scale_factor(2);
        frame(&mut f.renderer);
        assert_eq!(f.renderer.surface_generation(), 3);
        assert!(f.icons.lookups.borrow().iter().any(|(_, _, sf)| *sf == 2));

        assert!(f.renderer.set_view("symbols").unwrap());
        frame(&mut f.renderer);
        assert_eq!(f.renderer.surface_generation(), 4);

        // Switching through the keyboard is noticed as well.
        f.renderer.keyboard_mut().set_view("base").unwrap();
        frame(&mut f.renderer);
        assert_eq!(f.renderer.surface_generation(), 5);
    }

    #[test]
    fn test_pressed_button_is_repainted_over_cache() {
        let mut f = fixture();
        frame(&mut f.renderer);

        let id = f.renderer.hit_test(Point::new(110.0, 40.0)).map(|place| place.id).unwrap();
        assert!(f.renderer.keyboard_mut().press(id).unwrap());
        let target = frame(&mut f.renderer);

        assert_eq!(f.renderer.surface_generation(), 1);
        assert!(matches!(target.ops[0], Op::Blit { .. }));
        let fills = target.fills();
        assert_eq!(target.fills_with(PRESSED_BACKGROUND), 1);
        assert_eq!(target.fills_with(KEY_BACKGROUND), 0);
        // Background of "w" starts at its view position (80, 10).
        let corner = fills[0].0.apply(Point::new(fills[0].1.x, fills[0].1.y));
        assert!((corner.x - 81.0).abs() < 1e-9 && (corner.y - 11.0).abs() < 1e-9);
        // Label drawn in the foreground colour.
        assert!(target
            .masks()
            .iter()
            .all(|op| matches!(op, Op::Mask { color, .. } if *color == FOREGROUND)));

        f.renderer.keyboard_mut().release(id).unwrap();
        let target = frame(&mut f.renderer);
        assert_eq!(target.ops.len(), 1);
    }

    #[test]
    fn test_locked_button_uses_locked_style() {
        let mut f = fixture();
        f.renderer.keyboard_mut().set_locked(ButtonId::new(1, 0), true).unwrap();
        let target = frame(&mut f.renderer);
        assert_eq!(target.fills_with(LOCKED_BACKGROUND), 1);
        let queries = f.style.queries.borrow();
        let (name, classes, _, locked) = queries.last().unwrap();
        assert_eq!(name, "Shift_L");
        assert!(*locked);
        assert!(classes.iter().any(|c| c == "locked"));
    }

    #[test]
    fn test_icon_preferred_and_label_fallback() {
        let mut f = fixture();
        frame(&mut f.renderer);
        assert!(!f.text.calls.borrow().iter().any(|(_, _, text)| text == "Shift"));

        let mut f = fixture_with(FixedStyle::new(0.0, 1.0), IconMap::default());
        frame(&mut f.renderer);
        assert_eq!(f.icons.lookups.borrow()[0], ("key-shift".to_string(), 16, 1));
        assert!(f.text.calls.borrow().iter().any(|(_, _, text)| text == "Shift"));
    }

    #[test]
    fn test_style_failure_skips_outline_only() {
        let mut f = fixture_with(FixedStyle::new(0.0, 1.0).failing_for("q"), IconMap::default());
        frame(&mut f.renderer);
        let cached = f.renderer.cached_surface().unwrap();
        assert_eq!(cached.fills_with(KEY_BACKGROUND), 3);
        assert!(f.text.calls.borrow().iter().any(|(_, _, text)| text == "q"));
    }

    #[test]
    fn test_missing_view_style_still_renders_buttons() {
        let mut style = FixedStyle::new(0.0, 1.0);
        style.fail_view = true;
        let mut f = fixture_with(style, IconMap::default());
        frame(&mut f.renderer);
        let cached = f.renderer.cached_surface().unwrap();
        assert_eq!(cached.fills_with(VIEW_BACKGROUND), 0);
        assert_eq!(cached.fills_with(KEY_BACKGROUND), 4);
    }

    /// A host may paint every frame into the same buffer; translucent keys
    /// must not keep colour from earlier frames.
    #[test]
    fn test_reused_target_shows_released_key_clean() {
        let theme = Theme {
            keyboard_background: Color::TRANSPARENT,
            key_background: Color::rgba(0.0, 0.0, 1.0, 0.5),
            key_pressed: Color::rgba(1.0, 0.0, 0.0, 1.0),
            ..Theme::default()
        };
        let backends = Backends::new(ThemeStyle::new(theme), NoText, NoIcons);
        let keyboard = Keyboard::new(layout()).unwrap();
        let mut renderer: Renderer<RasterSurface> =
            Renderer::new(keyboard, backends, RendererConfig::default()).unwrap();
        renderer.set_allocation_size(800.0, 300.0);
        let mut target = RasterSurface::create(800, 300).unwrap();

        renderer.render_keyboard(&mut target).unwrap();
        let clean = target.pixel(40, 40);
        assert!(clean.is_some_and(|c| c.a > 0.4 && c.a < 0.6));

        let id = ButtonId::new(0, 0);
        renderer.keyboard_mut().press(id).unwrap();
        renderer.render_keyboard(&mut target).unwrap();
        assert_ne!(target.pixel(40, 40), clean);

        renderer.keyboard_mut().release(id).unwrap();
        renderer.render_keyboard(&mut target).unwrap();
        assert_eq!(target.pixel(40, 40), clean);
        assert_eq!(target.data(), renderer.cached_surface().unwrap().data());
    }

    #[test]
    fn test_keysym_index_selects_labels_and_rebuilds() {
        let mut f = fixture();
        frame(&mut f.renderer);
        assert!(f.renderer.set_keysym_index(0, 1));
        assert!(!f.renderer.set_keysym_index(0, 1));

        f.text.calls.borrow_mut().clear();
        frame(&mut f.renderer);
        assert_eq!(f.renderer.surface_generation(), 2);
        let shaped: Vec<String> = f.text.calls.borrow().iter().map(|(_, _, text)| text.clone()).collect();
        assert!(shaped.iter().any(|text| text == "Q"));
        assert!(shaped.iter().any(|text| text == "w"));
        assert!(!shaped.iter().any(|text| text == "q"));

        // Changes made on the keyboard directly are noticed as well.
        f.renderer.keyboard_mut().set_keysym_index(1, 1);
        frame(&mut f.renderer);
        assert_eq!(f.renderer.surface_generation(), 3);
    }

    #[test]
    fn test_labels_rasterised_at_output_scale() {
        let mut f = fixture();
        f.renderer.set_allocation_size(1600.0, 600.0);
        assert_eq!(f.renderer.transformation().scale, 2.0);
        frame(&mut f.renderer);

        let calls = f.text.calls.borrow();
        let (font, _, text) = &calls[0];
        assert_eq!(text, "q");
        // 18 px fitted to a 60 unit button with a 1 unit border, at 2 px per unit
        assert!((font.size - 18.0 * 59.0 / 60.0 * 2.0).abs() < 1e-9);

        let cached = f.renderer.cached_surface().unwrap();
        let densities: Vec<f64> = cached
            .masks()
            .iter()
            .filter_map(|op| match op {
                Op::Mask { scale_factor, .. } => Some(*scale_factor),
                _ => None,
            })
            .collect();
        // three labels at 2 px per unit, the shift icon at output scale 1
        assert_eq!(densities.iter().filter(|d| **d == 2.0).count(), 3);
        assert_eq!(densities.iter().filter(|d| **d == 1.0).count(), 1);
    }

    #[tokio::test]
    async fn test_events_surface_once_through_renderer() {
        let mut f = fixture();
        let rx = f.renderer.keyboard_mut().subscribe();
        let id = ButtonId::new(0, 1);

        assert!(f.renderer.keyboard_mut().press(id).unwrap());
        assert!(!f.renderer.keyboard_mut().press(id).unwrap());
        frame(&mut f.renderer);
        assert!(f.renderer.keyboard_mut().release(id).unwrap());
        assert!(f.renderer.set_view("symbols").unwrap());
        drop(f);

        let events: Vec<KeyboardEvent> = rx.collect().await;
        assert_eq!(
            events,
            vec![
                KeyboardEvent::Pressed {
                    view: 0,
                    id,
                    keycode: Some(17)
                },
                KeyboardEvent::Released {
                    view: 0,
                    id,
                    keycode: Some(17)
                },
                KeyboardEvent::ViewChanged { from: 0, to: 1 },
            ]
        );
    }

    #[test]
    fn test_preview_button_matches_keyboard_state() {
        let f = fixture();
        let mut popup = RecordingSurface::target(200, 200);
        f.renderer
            .render_button(&mut popup, ButtonId::new(0, 0), 2.0, ButtonState::PRESSED)
            .unwrap();
        assert_eq!(popup.fills_with(PRESSED_BACKGROUND), 1);
        assert_eq!(f.renderer.keyboard().state(ButtonId::new(0, 0)), ButtonState::DEFAULT);
    }
}
