use crate::config::{PELLET_RADIUS_DIVISOR, PLAYER_RADIUS_DIVISOR};
use crate::game::Snapshot;
use crate::grid::{Cell, Position};

/// What a primitive represents, so a surface can pick its color.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Paint {
    Wall,
    Pellet,
    Player,
}

/// One primitive draw call in surface units (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    FillSquare {
        x: f64,
        y: f64,
        size: f64,
        paint: Paint,
    },
    FillCircle {
        cx: f64,
        cy: f64,
        radius: f64,
        paint: Paint,
    },
}

/// Anything that can replay primitive draw calls.
pub trait DrawSurface {
    fn draw(&mut self, command: &DrawCommand);
}

impl DrawSurface for Vec<DrawCommand> {
    fn draw(&mut self, command: &DrawCommand) {
        self.push(*command);
    }
}

/// Builds the ordered draw calls for one frame.
///
/// Order: clear, walls, pellets, then the player on top. Cells are visited
/// row-major.
#[must_use]
pub fn compose(snapshot: &Snapshot<'_>, cell_size: u32) -> Vec<DrawCommand> {
    let size = f64::from(cell_size);
    let grid_size = snapshot.grid.size();
    let mut commands = vec![DrawCommand::Clear {
        width: f64::from(grid_size.width) * size,
        height: f64::from(grid_size.height) * size,
    }];

    commands.extend(
        snapshot
            .grid
            .cells()
            .filter(|(_, cell)| *cell == Cell::Wall)
            .map(|(position, _)| {
                let (x, y) = cell_origin(position, size);
                DrawCommand::FillSquare {
                    x,
                    y,
                    size,
                    paint: Paint::Wall,
                }
            }),
    );

    commands.extend(
        snapshot
            .grid
            .cells()
            .filter(|(_, cell)| *cell == Cell::Pellet)
            .map(|(position, _)| {
                let (cx, cy) = cell_center(position, size);
                DrawCommand::FillCircle {
                    cx,
                    cy,
                    radius: size / PELLET_RADIUS_DIVISOR,
                    paint: Paint::Pellet,
                }
            }),
    );

    let (cx, cy) = cell_center(snapshot.position, size);
    commands.push(DrawCommand::FillCircle {
        cx,
        cy,
        radius: size / PLAYER_RADIUS_DIVISOR,
        paint: Paint::Player,
    });

    commands
}

/// Replays `commands` onto `surface` in order.
pub fn render_to<S: DrawSurface + ?Sized>(surface: &mut S, commands: &[DrawCommand]) {
    for command in commands {
        surface.draw(command);
    }
}

/// Returns the top-left surface coordinate of a cell.
#[must_use]
pub fn cell_origin(position: Position, size: f64) -> (f64, f64) {
    (f64::from(position.x) * size, f64::from(position.y) * size)
}

/// Returns the surface coordinate of a cell's midpoint.
#[must_use]
pub fn cell_center(position: Position, size: f64) -> (f64, f64) {
    let (x, y) = cell_origin(position, size);
    (x + size / 2.0, y + size / 2.0)
}
