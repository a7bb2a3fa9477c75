use clap::ValueEnum;
use ratatui::style::Color;

/// Logical grid dimensions in cells.
///
/// `width` counts columns and `height` counts rows, so call sites never have
/// to guess which half of a tuple is which.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// When the player actually moves.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum MovePolicy {
    /// Move once per timer tick, replaying the last requested direction.
    #[default]
    FixedInterval,
    /// Move once per accepted key press; the intent is consumed by the move.
    PerKeyPress,
}

impl MovePolicy {
    /// Returns true when the direction stays latched across ticks.
    #[must_use]
    pub fn latches_direction(self) -> bool {
        matches!(self, Self::FixedInterval)
    }
}

/// How the play field is drawn.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum RenderMode {
    /// One terminal cell per grid cell.
    #[default]
    Glyph,
    /// Scaled pixel geometry painted on a braille canvas.
    Canvas,
}

/// Colors applied to every visual element.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub wall: Color,
    pub pellet: Color,
    pub player: Color,
    pub field_bg: Color,
    pub border_fg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    /// Used for the value that changed on the latest tick.
    pub hud_accent: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Classic yellow-on-blue arcade look.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    wall: Color::Blue,
    pellet: Color::White,
    player: Color::Yellow,
    field_bg: Color::Black,
    border_fg: Color::Blue,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    hud_accent: Color::Yellow,
    menu_title: Color::Yellow,
    menu_footer: Color::DarkGray,
};

/// Glyph for a wall cell in glyph mode.
pub const GLYPH_WALL: &str = "█";

/// Glyph for a pellet cell in glyph mode.
pub const GLYPH_PELLET: &str = "·";

/// Glyph for the player in glyph mode.
pub const GLYPH_PLAYER: &str = "●";

/// Glyph for an empty cell.
pub const GLYPH_EMPTY: &str = " ";

/// Separator between HUD fields.
pub const HUD_SEPARATOR: &str = "│";

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 30;

/// Input poll timeout per loop iteration in milliseconds.
pub const INPUT_POLL_TIMEOUT_MS: u64 = 16;

/// Side length of one grid cell in drawing-surface units.
pub const DEFAULT_CELL_SIZE: u32 = 40;

/// Player circle radius as a divisor of the cell size.
pub const PLAYER_RADIUS_DIVISOR: f64 = 2.0;

/// Pellet circle radius as a divisor of the cell size.
pub const PELLET_RADIUS_DIVISOR: f64 = 6.0;

/// Points awarded per consumed pellet.
pub const POINTS_PER_PELLET: u32 = 1;

#[cfg(test)]
mod tests {
    use super::{GridSize, MovePolicy};

    #[test]
    fn total_cells_multiplies_dimensions() {
        let size = GridSize {
            width: 8,
            height: 6,
        };

        assert_eq!(size.total_cells(), 48);
    }

    #[test]
    fn only_fixed_interval_latches_direction() {
        assert!(MovePolicy::FixedInterval.latches_direction());
        assert!(!MovePolicy::PerKeyPress.latches_direction());
        assert_eq!(MovePolicy::default(), MovePolicy::FixedInterval);
    }
}
