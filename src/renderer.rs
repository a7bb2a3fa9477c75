use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::Block;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle};

use crate::config::{
    GLYPH_EMPTY, GLYPH_PELLET, GLYPH_PLAYER, GLYPH_WALL, GridSize, RenderMode, Theme,
};
use crate::game::{GameState, Snapshot};
use crate::grid::{Cell, Position};
use crate::scene::{self, DrawCommand, DrawSurface, Paint};
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_help_menu, render_pause_menu};

/// Brush spacing used to fill shapes on the canvas, as a fraction of the cell.
const CANVAS_FILL_STEPS: f64 = 8.0;

/// Per-frame drawing options.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub mode: RenderMode,
    pub cell_size: u32,
    pub theme: &'a Theme,
}

/// Renders the full game frame from immutable state.
pub fn render(
    frame: &mut Frame<'_>,
    state: &GameState,
    options: RenderOptions<'_>,
    hud_info: &HudInfo<'_>,
) {
    let snapshot = state.snapshot();
    let area = frame.area();
    let play_area = render_hud(frame, area, &snapshot, hud_info);

    match options.mode {
        RenderMode::Glyph => render_glyphs(frame, play_area, &snapshot, options.theme),
        RenderMode::Canvas => render_canvas(frame, play_area, &snapshot, options),
    }

    if hud_info.show_help {
        render_help_menu(frame, play_area, options.theme);
    } else if hud_info.paused {
        render_pause_menu(frame, play_area, options.theme);
    }
}

fn field_block(theme: &Theme) -> Block<'static> {
    Block::bordered()
        .border_style(Style::new().fg(theme.border_fg).bg(theme.field_bg))
        .style(Style::new().bg(theme.field_bg))
}

fn render_glyphs(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot<'_>, theme: &Theme) {
    let bounds = snapshot.grid.size();
    let outer = centered_rect(
        area,
        bounds.width.saturating_add(2),
        bounds.height.saturating_add(2),
    );
    let block = field_block(theme);
    let inner = block.inner(outer);
    frame.render_widget(block, outer);

    let buffer = frame.buffer_mut();
    for (position, cell) in snapshot.grid.cells() {
        let Some((x, y)) = logical_to_terminal(inner, bounds, position) else {
            continue;
        };

        let (glyph, style) = match cell {
            Cell::Wall => (GLYPH_WALL, Style::new().fg(theme.wall)),
            Cell::Pellet => (GLYPH_PELLET, Style::new().fg(theme.pellet)),
            Cell::Empty => (GLYPH_EMPTY, Style::new()),
        };
        buffer.set_string(x, y, glyph, style.bg(theme.field_bg));
    }

    if let Some((x, y)) = logical_to_terminal(inner, bounds, snapshot.position) {
        buffer.set_string(
            x,
            y,
            GLYPH_PLAYER,
            Style::new()
                .fg(theme.player)
                .bg(theme.field_bg)
                .add_modifier(Modifier::BOLD),
        );
    }
}

fn render_canvas(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot<'_>,
    options: RenderOptions<'_>,
) {
    let commands = scene::compose(snapshot, options.cell_size);
    let (width, height) = surface_extent(&commands);
    let theme = options.theme;

    let canvas = Canvas::default()
        .block(field_block(theme))
        .background_color(theme.field_bg)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            let mut painter = CanvasPainter { ctx, theme, height };
            scene::render_to(&mut painter, &commands);
        });

    frame.render_widget(canvas, area);
}

fn surface_extent(commands: &[DrawCommand]) -> (f64, f64) {
    match commands.first() {
        Some(DrawCommand::Clear { width, height }) => (*width, *height),
        _ => (0.0, 0.0),
    }
}

/// Paints scene commands onto a ratatui canvas, whose y axis points up.
struct CanvasPainter<'a, 'b> {
    ctx: &'a mut Context<'b>,
    theme: &'a Theme,
    height: f64,
}

impl CanvasPainter<'_, '_> {
    fn color(&self, paint: Paint) -> Color {
        match paint {
            Paint::Wall => self.theme.wall,
            Paint::Pellet => self.theme.pellet,
            Paint::Player => self.theme.player,
        }
    }
}

impl DrawSurface for CanvasPainter<'_, '_> {
    fn draw(&mut self, command: &DrawCommand) {
        match *command {
            DrawCommand::Clear { height, .. } => {
                self.height = height;
            }
            DrawCommand::FillSquare { x, y, size, paint } => {
                let color = self.color(paint);
                let bottom = self.height - (y + size);
                self.ctx.draw(&Rectangle {
                    x,
                    y: bottom,
                    width: size,
                    height: size,
                    color,
                });

                let step = size / CANVAS_FILL_STEPS;
                let mut offset = step;
                while offset < size {
                    self.ctx.draw(&CanvasLine {
                        x1: x,
                        y1: bottom + offset,
                        x2: x + size,
                        y2: bottom + offset,
                        color,
                    });
                    offset += step;
                }
            }
            DrawCommand::FillCircle {
                cx,
                cy,
                radius,
                paint,
            } => {
                let color = self.color(paint);
                let y = self.height - cy;
                let step = (radius / 4.0).max(f64::EPSILON);
                let mut current = radius;
                while current > 0.0 {
                    self.ctx.draw(&Circle {
                        x: cx,
                        y,
                        radius: current,
                        color,
                    });
                    current -= step;
                }
            }
        }
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::config::{GridSize, MovePolicy, RenderMode, THEME_CLASSIC};
    use crate::game::GameState;
    use crate::grid::{Layout, Position};
    use crate::ui::hud::HudInfo;

    use super::{RenderOptions, centered_rect, logical_to_terminal, render};

    fn state() -> GameState {
        GameState::from_layout(
            Layout::parse("#####\n#P..#\n#####").expect("test layout should parse"),
            MovePolicy::FixedInterval,
        )
    }

    fn draw(mode: RenderMode) -> String {
        let state = state();
        let mut terminal =
            Terminal::new(TestBackend::new(40, 12)).expect("test terminal should build");
        let hud_info = HudInfo::new(&THEME_CLASSIC, MovePolicy::FixedInterval);

        terminal
            .draw(|frame| {
                render(
                    frame,
                    &state,
                    RenderOptions {
                        mode,
                        cell_size: 40,
                        theme: &THEME_CLASSIC,
                    },
                    &hud_info,
                );
            })
            .expect("test draw should succeed");

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn glyph_mode_draws_player_pellets_and_score() {
        let screen = draw(RenderMode::Glyph);

        assert!(screen.contains("●"));
        assert!(screen.contains("··"));
        assert!(screen.contains("Score"));
    }

    #[test]
    fn canvas_mode_renders_without_panicking() {
        let screen = draw(RenderMode::Canvas);

        assert!(screen.contains("Level"));
    }

    #[test]
    fn logical_positions_outside_the_grid_are_skipped() {
        let inner = Rect::new(1, 1, 5, 3);
        let bounds = GridSize {
            width: 5,
            height: 3,
        };

        assert_eq!(
            logical_to_terminal(inner, bounds, Position::new(0, 0)),
            Some((1, 1))
        );
        assert_eq!(
            logical_to_terminal(inner, bounds, Position::new(5, 0)),
            None
        );
        assert_eq!(
            logical_to_terminal(inner, bounds, Position::new(0, -1)),
            None
        );
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 4);

        assert_eq!(centered_rect(area, 4, 2), Rect::new(3, 1, 4, 2));
        assert_eq!(centered_rect(area, 40, 20), area);
    }
}
