//! Text output formatting with colors.

use evassist_core::BatteryStatus;
use evassist_location::PositionSource;

use super::json::{MechanicOutput, NearbyOutput, PositionOutput};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a position report.
    pub fn format_position(&self, position: &PositionOutput) -> String {
        let mut lines = vec![format!(
            "{} {:.6}, {:.6}",
            self.bold("Position"),
            position.latitude,
            position.longitude
        )];
        lines.push(self.dim(&format!(
            "  span {} x {}",
            position.latitude_delta, position.longitude_delta
        )));

        match position.source {
            PositionSource::Device => lines.push(format!("  source: {}", self.green("device"))),
            PositionSource::Fallback => {
                lines.push(format!("  source: {}", self.yellow("fallback location")));
                if let Some(e) = &position.error {
                    lines.push(format!("  {}", self.dim(e)));
                }
            }
        }
        lines.join("\n")
    }

    /// Formats nearby search results.
    pub fn format_nearby(&self, output: &NearbyOutput) -> String {
        let mut lines = Vec::new();

        let mut header = format!(
            "{} near {:.4}, {:.4}",
            self.bold("Mechanics"),
            output.origin.latitude,
            output.origin.longitude
        );
        if output.degraded {
            header.push_str(&format!(" {}", self.yellow("(approximate location)")));
        }
        lines.push(header);

        if output.mechanics.is_empty() {
            lines.push(self.dim("  No mechanics found in this area"));
        }
        for (i, m) in output.mechanics.iter().enumerate() {
            lines.push(self.format_mechanic(i + 1, m));
        }

        let mut footer = format!("Page {} of {}", output.page, output.total_pages);
        if output.has_more {
            footer.push_str(" - more available (--page or --all)");
        }
        lines.push(self.dim(&footer));
        lines.join("\n")
    }

    fn format_mechanic(&self, index: usize, m: &MechanicOutput) -> String {
        let distance = if m.server_distance {
            self.cyan(&m.distance)
        } else {
            format!("{} {}", self.cyan(&m.distance), self.dim("(approx)"))
        };
        let mut line = format!("{index:>3}. {}  {distance}", self.bold(&m.name));

        if let Some(rating) = m.rating {
            match m.rating_count {
                Some(n) => line.push_str(&format!("  ★ {rating:.1} ({n})")),
                None => line.push_str(&format!("  ★ {rating:.1}")),
            }
        }
        if let Some(address) = &m.address {
            line.push_str(&format!("\n     {}", self.dim(address)));
        }
        if let Some(phone) = &m.phone {
            line.push_str(&format!("\n     {}", self.dim(phone)));
        }
        line
    }

    /// Formats the battery view.
    pub fn format_battery(&self, status: &BatteryStatus) -> String {
        let mut lines = vec![format!("{} {}", self.bold("Battery"), self.dim(&status.ev_model))];

        lines.push(format!("  Health:    {}", self.health(&status.health)));
        lines.push(format!("  Charging:  {}", status.charging_duration_class));
        if let Some(minutes) = status.charging_duration {
            lines.push(format!("  Session:   {minutes} min"));
        }
        lines.push(self.dim(&format!("  Updated {:.1}h ago", status.age_hours)));

        lines.push(String::new());
        lines.push(self.bold("Recommendations"));
        for r in status.recommendations() {
            lines.push(format!("  • {r}"));
        }
        lines.join("\n")
    }

    fn health(&self, health: &str) -> String {
        match health.to_ascii_lowercase().as_str() {
            "good" | "excellent" => self.green(health),
            "poor" | "bad" => self.red(health),
            _ => self.yellow(health),
        }
    }

    // ========================================================================
    // Color helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}
