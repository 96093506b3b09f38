//! Stable colors for request tags in server logs.

use owo_colors::{AnsiColors, DynColors, OwoColorize, Style};

/// Palette cycled through by request IDs, readable on light and dark terminals
const PALETTE: [AnsiColors; 12] = [
    AnsiColors::Red,
    AnsiColors::Green,
    AnsiColors::Yellow,
    AnsiColors::Blue,
    AnsiColors::Magenta,
    AnsiColors::Cyan,
    AnsiColors::BrightRed,
    AnsiColors::BrightGreen,
    AnsiColors::BrightYellow,
    AnsiColors::BrightBlue,
    AnsiColors::BrightMagenta,
    AnsiColors::BrightCyan,
];

/// Maps a request ID to a palette entry. Same ID, same color, across runs.
pub fn color_for(id: &str) -> AnsiColors {
    let hash = id
        .chars()
        .fold(0u32, |acc, c| acc.wrapping_mul(31).wrapping_add(c as u32));
    PALETTE[hash as usize % PALETTE.len()]
}

/// `[id]` wrapped in the request's color
pub fn request_tag(id: &str) -> String {
    let style = Style::new().color(DynColors::Ansi(color_for(id)));
    format!("[{}]", id).style(style).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_deterministic() {
        let a = color_for("abc12");
        let b = color_for("abc12");
        assert!(std::mem::discriminant(&a) == std::mem::discriminant(&b));
    }

    #[test]
    fn test_request_tag_wraps_id() {
        assert!(request_tag("k3x9q").contains("[k3x9q]"));
    }
}
