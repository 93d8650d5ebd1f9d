//! Terminal rendering for rover trial reports.
//!
//! [`AsciiRenderer`] draws an elevation map downsampled to a terminal-sized
//! view, overlays the trial's path, and marks the start and goal. With color
//! enabled each cell is shaded on a yellow-orange-brown ramp via crossterm;
//! otherwise elevation bands are drawn with ASCII glyphs.

use std::io::{self, IsTerminal, Write};

use crossterm::style::{Color, Stylize, style};
use log::warn;
use rover_core::{Coord, ElevationGrid};
use rover_paths::{TrialObserver, TrialReport};

/// Default view size in terminal cells.
pub const DEFAULT_VIEW: (usize, usize) = (50, 100);

/// Glyphs for elevation bands, low to high.
const SHADES: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Low and high ends of the color ramp (pale yellow to dark brown).
const RAMP_LOW: (u8, u8, u8) = (255, 255, 229);
const RAMP_HIGH: (u8, u8, u8) = (102, 37, 6);

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    None,
    Path,
    Start,
    Goal,
}

/// Renders each trial to a writer.
pub struct AsciiRenderer<W: Write> {
    out: W,
    max_rows: usize,
    max_cols: usize,
    color: bool,
}

impl AsciiRenderer<io::Stdout> {
    /// Render to stdout, colored when stdout is a terminal and `NO_COLOR` is
    /// unset.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let color = out.is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::new(out, color)
    }
}

impl<W: Write> AsciiRenderer<W> {
    /// Render to `out` with the default view size.
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            max_rows: DEFAULT_VIEW.0,
            max_cols: DEFAULT_VIEW.1,
            color,
        }
    }

    /// Limit the view to `rows × cols` terminal cells.
    pub fn with_view(mut self, rows: usize, cols: usize) -> Self {
        self.max_rows = rows.max(1);
        self.max_cols = cols.max(1);
        self
    }

    /// Consume the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draw one trial.
    pub fn render(&mut self, report: &TrialReport<'_>) -> io::Result<()> {
        let grid = report.grid;
        writeln!(
            self.out,
            "MARS Rover Simulation: iteration {}, cost {:.2}",
            report.index, report.cost
        )?;
        if grid.is_empty() {
            return writeln!(self.out, "(empty terrain)");
        }

        let view_rows = grid.rows().min(self.max_rows);
        let view_cols = grid.cols().min(self.max_cols);
        let to_view = |c: Coord| {
            let r = c.row as usize * view_rows / grid.rows();
            let k = c.col as usize * view_cols / grid.cols();
            r * view_cols + k
        };

        let mut marks = vec![Mark::None; view_rows * view_cols];
        for &c in report.path {
            if grid.contains(c) {
                marks[to_view(c)] = Mark::Path;
            }
        }
        for (c, mark) in [(report.start, Mark::Start), (report.goal, Mark::Goal)] {
            if grid.contains(c) {
                marks[to_view(c)] = mark;
            }
        }

        let (lo, hi) = grid.min_max().unwrap_or((0.0, 0.0));
        for vr in 0..view_rows {
            for vc in 0..view_cols {
                let level = normalized(block_mean(grid, vr, vc, view_rows, view_cols), lo, hi);
                let mark = marks[vr * view_cols + vc];
                self.cell(level, mark)?;
            }
            writeln!(self.out)?;
        }

        if report.path.is_found() {
            writeln!(
                self.out,
                "S = start {}, G = goal {}, o = path ({} cells), elevation {lo:.1}..{hi:.1}",
                report.start,
                report.goal,
                report.path.len()
            )?;
        } else {
            writeln!(self.out, "no path found from {} to {}", report.start, report.goal)?;
        }
        self.out.flush()
    }

    fn cell(&mut self, level: f64, mark: Mark) -> io::Result<()> {
        let glyph = match mark {
            Mark::None => None,
            Mark::Path => Some('o'),
            Mark::Start => Some('S'),
            Mark::Goal => Some('G'),
        };
        if !self.color {
            let band = (level * (SHADES.len() - 1) as f64).round() as usize;
            let shade = SHADES[band.min(SHADES.len() - 1)];
            return write!(self.out, "{}", glyph.unwrap_or(shade));
        }
        let bg = ramp(level);
        let styled = match mark {
            Mark::None => style(' ').on(bg),
            Mark::Path => style('o').on(bg).with(Color::Black).bold(),
            Mark::Start => style('S').on(Color::Blue).with(Color::White).bold(),
            Mark::Goal => style('G').on(Color::Green).with(Color::Black).bold(),
        };
        write!(self.out, "{styled}")
    }
}

impl<W: Write> TrialObserver for AsciiRenderer<W> {
    fn observe(&mut self, report: &TrialReport<'_>) {
        if let Err(e) = self.render(report) {
            warn!("failed to render trial {}: {e}", report.index);
        }
    }
}

/// Mean elevation of the grid block behind view cell `(vr, vc)`.
fn block_mean(
    grid: &ElevationGrid,
    vr: usize,
    vc: usize,
    view_rows: usize,
    view_cols: usize,
) -> f64 {
    let r0 = vr * grid.rows() / view_rows;
    let r1 = ((vr + 1) * grid.rows() / view_rows).max(r0 + 1);
    let c0 = vc * grid.cols() / view_cols;
    let c1 = ((vc + 1) * grid.cols() / view_cols).max(c0 + 1);

    let mut sum = 0.0;
    let mut n = 0usize;
    for r in r0..r1 {
        for c in c0..c1 {
            if let Some(h) = grid.at(Coord::new(r as i32, c as i32)) {
                sum += h;
                n += 1;
            }
        }
    }
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Map `h` from `[lo, hi]` onto `[0, 1]`.
fn normalized(h: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        ((h - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn ramp(t: f64) -> Color {
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Color::Rgb {
        r: lerp(RAMP_LOW.0, RAMP_HIGH.0),
        g: lerp(RAMP_LOW.1, RAMP_HIGH.1),
        b: lerp(RAMP_LOW.2, RAMP_HIGH.2),
    }
}
