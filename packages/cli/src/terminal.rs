//! Text rendering of the map for terminals.
//!
//! Lines go through [`MultiProgress::println`] so they never collide with a
//! running spinner.

use std::time::Duration;

use console::{Color, style};
use roadwatch_cli_utils::MultiProgress;
use roadwatch_geo_models::Region;
use roadwatch_hazard_models::MarkerStyle;
use roadwatch_map::{MapOptions, MapRenderer, MarkerContent, MarkerOverlay};

/// [`MapRenderer`] that prints each command as a line of text.
pub struct TerminalRenderer {
    multi: MultiProgress,
}

impl TerminalRenderer {
    /// Creates a renderer printing through `multi`.
    #[must_use]
    pub const fn new(multi: MultiProgress) -> Self {
        Self { multi }
    }

    fn print(&self, line: &str) {
        if let Err(e) = self.multi.println(line) {
            log::warn!("Failed to write to terminal: {e}");
        }
    }
}

/// Nearest colour in the xterm 6x6x6 cube.
fn ansi256(r: u8, g: u8, b: u8) -> u8 {
    let level = |v: u8| (u16::from(v) * 5 + 127) / 255;
    let index = 16 + 36 * level(r) + 6 * level(g) + level(b);
    u8::try_from(index).unwrap_or(u8::MAX)
}

fn named_color(name: &str) -> Color {
    match name {
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        _ => Color::White,
    }
}

fn marker_color(content: MarkerContent) -> Color {
    match content {
        MarkerContent::Pin { color } => named_color(color),
        MarkerContent::Badge { style } => style
            .rgb()
            .map_or(Color::White, |(r, g, b)| Color::Color256(ansi256(r, g, b))),
    }
}

/// One line per marker: `<icon> <title> @ <lat, lon>`.
pub fn format_marker(marker: &MarkerOverlay) -> String {
    let icon = match marker.content {
        MarkerContent::Pin { .. } => "pin",
        MarkerContent::Badge { style: MarkerStyle { icon, .. } } => icon,
    };
    format!(
        "{} {} @ {}",
        style(format!("[{icon}]")).fg(marker_color(marker.content)).bold(),
        marker.title,
        marker.position
    )
}

impl MapRenderer for TerminalRenderer {
    fn show_placeholder(&mut self, message: &str) {
        self.print(&style(message).dim().to_string());
    }

    fn show_map(&mut self, options: &MapOptions) {
        let region = options.initial_region;
        self.print(&format!(
            "{} centered on {} (span {:.4} x {:.4}), tiles from {}",
            style("Map").green().bold(),
            region.center(),
            region.latitude_delta,
            region.longitude_delta,
            options.tile_url_template
        ));
    }

    fn set_markers(&mut self, markers: &[MarkerOverlay]) {
        self.print(&format!("{} marker(s) on map", markers.len()));
        for marker in markers {
            self.print(&format!("  {}", format_marker(marker)));
        }
    }

    fn animate_to_region(&mut self, region: Region, duration: Duration) {
        self.print(&format!(
            "{} {} over {} ms",
            style("Flying to").cyan(),
            region.center(),
            duration.as_millis()
        ));
    }
}

#[cfg(test)]
mod tests {
    use roadwatch_geo_models::{Destination, Position};
    use roadwatch_hazard_models::{HazardKind, HazardReport, ReportIdGenerator};

    use super::*;

    #[test]
    fn hazard_marker_line_names_icon_and_title() {
        console::set_colors_enabled(false);
        let report = HazardReport {
            id: ReportIdGenerator::new().next_at(7),
            kind: HazardKind::Accident,
            coordinate: Position::new(48.8566, 2.3522),
        };
        let line = format_marker(&MarkerOverlay::hazard(&report));
        assert_eq!(line, "[warning] Report: accident @ 48.85660, 2.35220");
    }

    #[test]
    fn destination_marker_line_uses_pin() {
        console::set_colors_enabled(false);
        let line = format_marker(&MarkerOverlay::destination(&Destination {
            latitude: 1.0,
            longitude: 2.0,
            name: "Somewhere".to_string(),
        }));
        assert_eq!(line, "[pin] Somewhere @ 1.00000, 2.00000");
    }

    #[test]
    fn badge_color_comes_from_style() {
        assert_eq!(
            marker_color(MarkerContent::Badge {
                style: MarkerStyle::ACCIDENT
            }),
            Color::Color256(203)
        );
        assert_eq!(
            marker_color(MarkerContent::Badge {
                style: MarkerStyle::POLICE
            }),
            Color::Color256(69)
        );
        assert_eq!(
            marker_color(MarkerContent::Badge {
                style: MarkerStyle::TRAFFIC
            }),
            Color::Color256(215)
        );
        assert_eq!(
            marker_color(MarkerContent::Badge {
                style: MarkerStyle {
                    icon: "alert-circle",
                    color: "not-a-hex",
                }
            }),
            Color::White
        );
    }

    #[test]
    fn pin_color_comes_from_name() {
        assert_eq!(
            marker_color(MarkerContent::Pin { color: "blue" }),
            Color::Blue
        );
        assert_eq!(
            marker_color(MarkerContent::Pin { color: "teal" }),
            Color::White
        );
    }

    #[test]
    fn cube_corners() {
        assert_eq!(ansi256(0, 0, 0), 16);
        assert_eq!(ansi256(255, 255, 255), 231);
    }
}
