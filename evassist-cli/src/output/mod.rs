//! Output formatting for CLI.

mod json;
mod text;

pub use json::{BatteryOutput, JsonFormatter, NearbyOutput, PositionOutput};
pub use text::TextFormatter;
#[cfg(test)]
mod tests;
