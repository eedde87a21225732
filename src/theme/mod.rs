// Theme module - fixed color tables for the atlas UI
//
// Marker and connector colors come from the original stylesheet; the
// per-category palette is the fixed category -> color table consumed by
// the presentation builder.

use ratatui::style::Color;

use crate::api::Category;

/// Default work-marker indigo (#667eea).
pub const WORK_INDIGO: Color = Color::Rgb(102, 126, 234);

/// Birth marker and birth-to-work connector green (#48bb78).
pub const BIRTH_GREEN: Color = Color::Rgb(72, 187, 120);

/// Shared-prize connector purple (#764ba2).
pub const PRIZE_PURPLE: Color = Color::Rgb(118, 75, 162);

/// Marker color for groups spanning more than one category in the
/// combined view. Distinct from every single-category color.
pub const MIXED_GOLD: Color = Color::Rgb(250, 204, 21);

/// Coastline color for the canvas world map.
pub const COAST_GRAY: Color = Color::Rgb(90, 98, 120);

/// General text.
pub const TEXT_WHITE: Color = Color::Rgb(226, 232, 240);

/// De-emphasized text: hints, placeholders, secondary lines.
pub const TEXT_DIM: Color = Color::Rgb(140, 148, 166);

/// Accent for borders, titles and key hints.
pub const ACCENT: Color = Color::Rgb(102, 126, 234);

/// Error notices.
pub const NOTICE_RED: Color = Color::Rgb(247, 118, 142);

/// Fixed category -> color table.
pub fn category_color(category: Category) -> Color {
    match category {
        Category::Physics => Color::Rgb(96, 165, 250),
        Category::Chemistry => Color::Rgb(251, 146, 60),
        Category::Medicine => Color::Rgb(239, 83, 80),
        Category::Literature => Color::Rgb(192, 132, 252),
        Category::Peace => Color::Rgb(52, 211, 153),
        Category::Economics => Color::Rgb(45, 212, 191),
    }
}
