use std::{
    fmt,
    io::{Stdout, Write},
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::generators::{GridEvent, Outcome};
use crate::maze::{Coord, Grid, GridShape, WallRemoved};

/// One character cell of the terminal canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Passage,
    /// The wall removed most recently
    Fresh,
    /// A coordinate left out of the grid
    Blocked,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const WIDTH: u16 = 2;
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "⬜".with(Color::White),
            Tile::Passage => "  ".with(Color::Reset),
            Tile::Fresh => "🟨".with(Color::Yellow),
            Tile::Blocked => "🟪".with(Color::Magenta),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Draws carving events as they arrive.
///
/// Rectangular grids are drawn as a `(2w + 1) x (2h + 1)` tile canvas where cells
/// sit on odd positions and walls between them on the even ones, north at the top.
/// Hex grids only get the status line.
pub struct Renderer {
    shape: GridShape,
    /// Name of the running pass, shown on the status line
    phase: &'static str,
    width: i32,
    height: i32,
    /// Interior walls standing when the pass started
    total_walls: usize,
    removed: usize,
    last_fresh: Option<(usize, usize)>,
    last_carved: Option<WallRemoved>,
    /// Size in tiles of the drawn canvas, `None` when it does not fit the terminal
    visible_canvas: Option<(u16, u16)>,
}

impl Renderer {
    pub fn new(grid: &Grid) -> Self {
        Renderer {
            shape: grid.shape(),
            phase: "carving",
            width: grid.width(),
            height: grid.height(),
            total_walls: grid.wall_count(),
            removed: 0,
            last_fresh: None,
            last_carved: None,
            visible_canvas: None,
        }
    }

    /// Canvas size in tiles, `None` for hex grids.
    pub fn canvas_size(&self) -> Option<(usize, usize)> {
        match self.shape {
            GridShape::Rectangular => {
                Some((self.width as usize * 2 + 1, self.height as usize * 2 + 1))
            }
            GridShape::HexFlatTop | GridShape::HexPointyTop => None,
        }
    }

    /// Tile position of a cell.
    pub fn cell_tile(&self, coord: Coord) -> (usize, usize) {
        (
            coord.x as usize * 2 + 1,
            (self.height - 1 - coord.z) as usize * 2 + 1,
        )
    }

    /// Tile position of the wall removed by `event`.
    pub fn wall_tile(&self, event: &WallRemoved) -> (usize, usize) {
        let (ax, ay) = self.cell_tile(event.from);
        let (bx, by) = self.cell_tile(event.to);
        ((ax + bx) / 2, (ay + by) / 2)
    }

    /// The canvas size in terminal units if it fits a `term_width x term_height`
    /// terminal with one row left for the status line.
    fn fit_canvas(&self, term_width: u16, term_height: u16) -> Option<(u16, u16)> {
        let (width, height) = self.canvas_size()?;
        let width = u16::try_from(width).ok()?;
        let height = u16::try_from(height).ok()?;
        (width.checked_mul(Tile::WIDTH)? <= term_width && height < term_height)
            .then_some((width, height))
    }

    fn status_row(&self) -> u16 {
        self.visible_canvas.map_or(0, |(_, height)| height)
    }

    /// Draws the fully walled grid. Falls back to the status line alone when the
    /// terminal is too small.
    pub fn draw_grid(&mut self, stdout: &mut Stdout, grid: &Grid) -> std::io::Result<()> {
        queue!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        self.phase = "carving";
        self.removed = 0;
        self.last_fresh = None;
        self.last_carved = None;
        self.total_walls = grid.wall_count();

        let (term_width, term_height) = terminal::size()?;
        self.visible_canvas = self.fit_canvas(term_width, term_height);
        match (self.visible_canvas, self.canvas_size()) {
            (Some((canvas_width, canvas_height)), _) => {
                for row in 0..canvas_height {
                    stdout.queue(cursor::MoveTo(0, row))?;
                    for col in 0..canvas_width {
                        let tile = self.initial_tile(grid, col as usize, row as usize);
                        stdout.queue(style::Print(tile))?;
                    }
                }
            }
            (None, Some((canvas_width, canvas_height))) => tracing::warn!(
                canvas_width,
                canvas_height,
                term_width,
                term_height,
                "Terminal too small for the maze canvas, showing progress only"
            ),
            (None, None) => {}
        }
        self.draw_progress(stdout)?;
        stdout.flush()
    }

    /// Switches the status line to the loop pass, which starts from the walls
    /// `grid` has left.
    pub fn start_loops(&mut self, stdout: &mut Stdout, grid: &Grid) -> std::io::Result<()> {
        self.phase = "adding loops";
        self.removed = 0;
        self.last_carved = None;
        self.total_walls = grid.wall_count();
        self.draw_progress(stdout)?;
        stdout.flush()
    }

    fn initial_tile(&self, grid: &Grid, col: usize, row: usize) -> Tile {
        if col % 2 == 1 && row % 2 == 1 {
            let x = (col / 2) as i32;
            let z = self.height - 1 - (row / 2) as i32;
            match grid.get(Coord::new(x, z)) {
                Some(_) => Tile::Passage,
                None => Tile::Blocked,
            }
        } else {
            Tile::Wall
        }
    }

    /// Draws one carving event. The wall removed last is highlighted.
    pub fn draw_event(&mut self, stdout: &mut Stdout, event: &GridEvent) -> std::io::Result<()> {
        match event {
            GridEvent::WallRemoved(removed) => {
                self.removed += 1;
                self.last_carved = Some(*removed);
                if self.visible_canvas.is_some() {
                    if let Some((col, row)) = self.last_fresh.take() {
                        self.draw_tile(stdout, col, row, Tile::Passage)?;
                    }
                    let (col, row) = self.wall_tile(removed);
                    self.draw_tile(stdout, col, row, Tile::Fresh)?;
                    self.last_fresh = Some((col, row));
                }
                self.draw_progress(stdout)?;
            }
            GridEvent::Done(outcome) => {
                if let Some((col, row)) = self.last_fresh.take() {
                    self.draw_tile(stdout, col, row, Tile::Passage)?;
                }
                let msg = match outcome {
                    Outcome::Complete => format!("Done: {} walls removed", self.removed),
                    Outcome::Disconnected { reached, total } => format!(
                        "Done, grid is disconnected: tree reaches {reached} of {total} cells"
                    ),
                };
                self.draw_status(stdout, &msg, Color::Green)?;
            }
        }
        stdout.flush()
    }

    /// Draws `tile` at a canvas position. Positions are only produced for a
    /// visible canvas, which fits in `u16` terminal units.
    fn draw_tile(
        &self,
        stdout: &mut Stdout,
        col: usize,
        row: usize,
        tile: Tile,
    ) -> std::io::Result<()> {
        let (Ok(col), Ok(row)) = (u16::try_from(col), u16::try_from(row)) else {
            return Ok(());
        };
        queue!(
            stdout,
            cursor::MoveTo(col * Tile::WIDTH, row),
            style::Print(tile)
        )
    }

    fn progress_message(&self) -> String {
        let mut msg = format!(
            "{} {}: {} of {} walls removed",
            self.shape, self.phase, self.removed, self.total_walls
        );
        if let Some(carved) = self.last_carved {
            msg.push_str(&format!(
                ", last {} {}",
                carved.from,
                self.shape.direction_name(carved.direction)
            ));
        }
        msg
    }

    fn draw_progress(&self, stdout: &mut Stdout) -> std::io::Result<()> {
        self.draw_status(stdout, &self.progress_message(), Color::Cyan)
    }

    /// Prints `msg` on the status line, cut to the terminal width.
    pub fn draw_status(
        &self,
        stdout: &mut Stdout,
        msg: &str,
        color: Color,
    ) -> std::io::Result<()> {
        let (term_width, _) = terminal::size()?;
        let (msg, _) = msg.unicode_truncate(term_width as usize);
        queue!(
            stdout,
            cursor::MoveTo(0, self.status_row()),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(msg.with(color).attribute(Attribute::Bold)),
        )
    }

    /// Moves the cursor below everything that was drawn.
    pub fn park_cursor(&self, stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, cursor::MoveTo(0, self.status_row() + 1))?;
        stdout.flush()
    }
}

/// Plain text picture of a rectangular grid, `#` for walls and blocked cells.
/// Hex grids have no text form.
pub fn render_ascii(grid: &Grid) -> Option<String> {
    if grid.shape() != GridShape::Rectangular || grid.is_empty() {
        return None;
    }
    let renderer = Renderer::new(grid);
    let (canvas_width, canvas_height) = renderer.canvas_size()?;
    let mut canvas = (0..canvas_height)
        .map(|row| {
            (0..canvas_width)
                .map(|col| match renderer.initial_tile(grid, col, row) {
                    Tile::Passage => ' ',
                    _ => '#',
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    for edge in grid.passages() {
        let from = grid.cell(edge.from).coord();
        let to = grid.cell(edge.to).coord();
        let (col, row) = renderer.wall_tile(&WallRemoved {
            from,
            to,
            direction: edge.direction,
        });
        canvas[row][col] = ' ';
    }

    Some(
        canvas
            .into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n"),
    )
}
