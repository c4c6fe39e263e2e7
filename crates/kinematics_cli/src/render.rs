//! Console rendering.
//!
//! [`AsciiCanvas`] rasterises a [`Frame`] to a character grid: two wall
//! columns, a floor row, an open top, and the ball drawn as `o`.
//! [`ConsoleSink`] is the [`RenderSink`] that writes canvases and telemetry
//! lines every N ticks.

use std::io::{self, Write};

use kinematics::driver::RenderSink;
use kinematics::{ControlHandle, Frame, TelemetrySnapshot};

use crate::display::{self, ControlReadout};

/// Character-grid view of the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiCanvas {
    columns: usize,
    rows: usize,
}

impl AsciiCanvas {
    /// Smallest grid that still has room inside the border.
    pub const MIN_SIZE: usize = 3;

    /// Creates a canvas of `columns` × `rows` characters, borders included.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: columns.max(Self::MIN_SIZE),
            rows: rows.max(Self::MIN_SIZE),
        }
    }

    /// Grid size as `(columns, rows)`.
    pub const fn size(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Cell holding the ball centre, as `(column, row)` in grid coordinates.
    pub fn cell(&self, frame: &Frame) -> (usize, usize) {
        let inner_cols = self.columns - 2;
        let inner_rows = self.rows - 1;
        let col = 1 + scale(frame.position.x, frame.bounds.width, inner_cols);
        let row = scale(frame.position.y, frame.bounds.height, inner_rows);
        (col, row)
    }

    /// Draws `frame`, one line per row, each ending in a newline.
    pub fn draw(&self, frame: &Frame) -> String {
        let (ball_col, ball_row) = self.cell(frame);
        let mut out = String::with_capacity((self.columns + 1) * self.rows);

        for row in 0..self.rows - 1 {
            out.push('|');
            for col in 1..self.columns - 1 {
                out.push(if (col, row) == (ball_col, ball_row) {
                    'o'
                } else {
                    ' '
                });
            }
            out.push('|');
            out.push('\n');
        }

        out.push('+');
        out.extend(std::iter::repeat_n('=', self.columns - 2));
        out.push('+');
        out.push('\n');
        out
    }
}

/// Maps `value` in `[0, extent]` to a cell index in `[0, cells)`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scale(value: f64, extent: f64, cells: usize) -> usize {
    if !(value.is_finite() && extent > 0.0) {
        return 0;
    }
    let idx = (value / extent * cells as f64).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(cells - 1)
    }
}

/// Writes telemetry, and optionally a canvas, every `every` ticks.
///
/// An `every` of zero writes nothing; the caller prints the final state.
/// The first write error stops all further output and is returned by
/// [`ConsoleSink::finish`].
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    out: W,
    every: u64,
    canvas: Option<AsciiCanvas>,
    controls: Option<ControlHandle>,
    error: Option<io::Error>,
    last_written: Option<u64>,
}

impl<W: Write> ConsoleSink<W> {
    /// Creates a sink writing to `out`.
    ///
    /// When `controls` is given, each line also shows the live mass and
    /// bounce values.
    pub fn new(
        out: W,
        every: u64,
        canvas: Option<AsciiCanvas>,
        controls: Option<ControlHandle>,
    ) -> Self {
        Self {
            out,
            every,
            canvas,
            controls,
            error: None,
            last_written: None,
        }
    }

    /// Step count of the last snapshot written, if any.
    pub const fn last_written(&self) -> Option<u64> {
        self.last_written
    }

    /// Flushes and returns the writer, or the first error encountered.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error from rendering or the final flush.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_frame(&mut self, frame: &Frame, snapshot: &TelemetrySnapshot) -> io::Result<()> {
        if let Some(canvas) = &self.canvas {
            self.out.write_all(canvas.draw(frame).as_bytes())?;
        }
        let readout = self.controls.as_ref().map(|handle| {
            let controls = handle.snapshot();
            ControlReadout {
                mass: controls.mass,
                bounce: controls.bounce,
            }
        });
        writeln!(self.out, "{}", display::telemetry_line(snapshot, readout))
    }
}

impl<W: Write> RenderSink for ConsoleSink<W> {
    fn render(&mut self, frame: &Frame, snapshot: &TelemetrySnapshot) {
        if self.error.is_some() || self.every == 0 || snapshot.steps % self.every != 0 {
            return;
        }
        match self.write_frame(frame, snapshot) {
            Ok(()) => self.last_written = Some(snapshot.steps),
            Err(err) => self.error = Some(err),
        }
    }
}
