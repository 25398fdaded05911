// SPDX-License-Identifier: GPL-3.0-only

//! keyrender demo
//!
//! Renders a built-in sample layout through the software raster backend,
//! presses a button to exercise the incremental repaint path, and writes the
//! final frame to a PNG file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use keyrender::app_settings;
use keyrender::backend::glyph::{GlyphShaper, NoText};
use keyrender::backend::icons::{IconDirectory, NoIcons};
use keyrender::backend::raster::RasterSurface;
use keyrender::backend::{IconLookup, Surface, TextShaper};
use keyrender::config::{load_config_file, RendererConfig};
use keyrender::geometry::Bounds;
use keyrender::keyboard::Keyboard;
use keyrender::layout::{ArrangementKind, Button, Layout, Row, View};
use keyrender::renderer::{Backends, Renderer, ThemeStyle};

/// Render a sample on-screen keyboard to a PNG file.
#[derive(Parser, Debug)]
#[command(name = "keyrender", version, about)]
struct Cli {
    /// Output PNG file.
    #[arg(long, short, default_value = "keyboard.png")]
    output: PathBuf,
    /// Output width in pixels.
    #[arg(long, default_value_t = app_settings::DEFAULT_WIDTH)]
    width: u32,
    /// Output height in pixels.
    #[arg(long, default_value_t = app_settings::DEFAULT_HEIGHT)]
    height: u32,
    /// Output scale factor used for icons.
    #[arg(long, default_value_t = app_settings::DEFAULT_SCALE_FACTOR)]
    scale_factor: i32,
    /// JSON renderer configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// TrueType/OpenType font for labels; overrides the configuration.
    #[arg(long)]
    font: Option<PathBuf>,
    /// View to show.
    #[arg(long, default_value = "base")]
    view: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                app_settings::LOG_FILTER
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::INFO.into()),
            ),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => RendererConfig::default(),
    };

    let text: Box<dyn TextShaper> = match cli.font.as_ref().or(config.font.path.as_ref()) {
        Some(path) => Box::new(GlyphShaper::load(path)?),
        None => {
            tracing::warn!("No font given, labels will not be drawn");
            Box::new(NoText)
        }
    };
    let icons: Box<dyn IconLookup> = match &config.icon_dir {
        Some(dir) => Box::new(IconDirectory::new(dir)),
        None => Box::new(NoIcons),
    };
    let backends = Backends {
        style: Box::new(ThemeStyle::new(config.theme.clone()).with_border_width(config.border_width)),
        text,
        icons,
    };

    let mut renderer: Renderer<RasterSurface> =
        Renderer::new(Keyboard::new(sample_layout())?, backends, config)?;
    renderer.set_scale_factor(cli.scale_factor);
    renderer.set_allocation_size(f64::from(cli.width), f64::from(cli.height));
    renderer.set_view(&cli.view)?;

    let mut frame = RasterSurface::create(cli.width, cli.height)?;
    renderer.render_keyboard(&mut frame)?;

    // Press whatever lies under the centre of the first key.
    let probe = {
        let view = renderer.keyboard().view();
        let first = view.places().next().map(|place| place.bounds(view.bounds));
        first.map(|bounds| renderer.transformation().to_widget(bounds.center()))
    };
    let pressed = probe.and_then(|point| {
        let place = renderer.hit_test(point)?;
        tracing::info!(
            "Hit test at ({:.0}, {:.0}) found '{}'",
            point.x,
            point.y,
            place.button.name
        );
        Some(place.id)
    });
    if let Some(id) = pressed {
        renderer.keyboard_mut().press(id)?;
    }

    let mut frame = RasterSurface::create(cli.width, cli.height)?;
    renderer.render_keyboard(&mut frame)?;
    tracing::info!(
        "Rendered view '{}' at {}x{} (surface generation {})",
        renderer.keyboard().view().name,
        cli.width,
        cli.height,
        renderer.surface_generation()
    );

    frame.save_png(&cli.output)?;
    tracing::info!("Wrote {}", cli.output.display());
    Ok(())
}

/// A small two-view layout with a tilted bottom row.
fn sample_layout() -> Layout {
    const KEY: f64 = 40.0;

    let letters = |y: f64, x: f64, keys: &str| {
        keys.chars()
            .enumerate()
            .fold(Row::new(Bounds::new(x, y, KEY * keys.len() as f64, KEY)), |row, (i, c)| {
                row.with_button(
                    Button::new(c.to_string(), Bounds::new(KEY * i as f64, 0.0, KEY, KEY))
                        .with_label(c.to_string()),
                )
            })
    };

    let bottom = Row::new(Bounds::new(20.0, 3.0 * KEY, 360.0, KEY))
        .with_angle(-3)
        .with_button(
            Button::new("Shift_L", Bounds::new(0.0, 0.0, 60.0, KEY))
                .with_outline("special")
                .with_icon("key-shift")
                .with_label("Shift"),
        )
        .with_button(
            Button::new("space", Bounds::new(60.0, 0.0, 240.0, KEY))
                .with_label(" ")
                .with_keycode(57),
        )
        .with_button(
            Button::new("show_numbers", Bounds::new(300.0, 0.0, 60.0, KEY))
                .with_outline("special")
                .with_label("123"),
        );

    let base = View::new("base", Bounds::new(5.0, 5.0, 400.0, 4.0 * KEY))
        .with_row(letters(0.0, 0.0, "qwertyuiop"))
        .with_row(letters(KEY, 20.0, "asdfghjkl"))
        .with_row(letters(2.0 * KEY, 60.0, "zxcvbnm"))
        .with_row(bottom);

    let numbers = View::new("numbers", Bounds::new(5.0, 5.0, 400.0, 3.0 * KEY))
        .with_row(letters(0.0, 0.0, "1234567890"))
        .with_row(letters(KEY, 0.0, "@#$%&-+()/"))
        .with_row(
            Row::new(Bounds::new(0.0, 2.0 * KEY, 400.0, KEY)).with_button(
                Button::new("show_letters", Bounds::new(0.0, 0.0, 80.0, KEY))
                    .with_outline("special")
                    .with_label("abc"),
            ),
        );

    Layout::new("sample", ArrangementKind::Base)
        .with_view(base)
        .with_view(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
        let cli = Cli::parse_from(["keyrender", "--width", "640", "--view", "numbers"]);
        assert_eq!(cli.width, 640);
        assert_eq!(cli.height, app_settings::DEFAULT_HEIGHT);
        assert_eq!(cli.view, "numbers");
    }

    #[test]
    fn test_sample_layout_is_renderable() {
        let layout = sample_layout();
        assert_eq!(layout.view_index("numbers"), Some(1));
        let keyboard = Keyboard::new(layout).unwrap();
        assert_eq!(keyboard.view().rows[3].angle, -3);
        assert!(keyboard.find_button_by_keycode(57).is_some());
    }
}
