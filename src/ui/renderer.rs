/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. `begin_frame` clears the `front` buffer
///   2. Screens draw into it through the `Canvas` trait
///   3. `end_frame` compares each cell with `back` (previous frame)
///      and only emits terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once, then
///      front/back are swapped
///
/// The play field is centred in the terminal; canvas coordinates are
/// relative to its top-left corner.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::sim::tile::{ARENA_H, ARENA_W, CELL_W, FIELD_TOP};
use crate::sim::Status;
use crate::ui::sprites;
use crate::ui::Canvas;

pub const FIELD_W: usize = ARENA_W * CELL_W as usize;
pub const FIELD_H: usize = FIELD_TOP as usize + ARENA_H;

const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };
const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const HUD_ROW: usize = 0;

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: BASE_BG };

    /// Never equal to a drawn cell, so the next flush repaints everything.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    /// Terminal position of the field's top-left corner.
    origin: (usize, usize),
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            origin: (0, 0),
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.set_size(tw as usize, th as usize);
        if self.term_w < FIELD_W || self.term_h < FIELD_H {
            log::warn!(
                "terminal is {}x{}, the field needs {}x{}; output will be clipped",
                self.term_w, self.term_h, FIELD_W, FIELD_H
            );
        }
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Start a frame: pick up terminal resizes and clear the front buffer.
    pub fn begin_frame(&mut self) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            log::debug!("terminal resized to {tw}x{th}");
            self.set_size(tw as usize, th as usize);
            queue!(self.writer, SetBackgroundColor(BASE_BG), Clear(ClearType::All))?;
        }
        self.front.clear();
        Ok(())
    }

    /// Finish a frame: emit changed cells and swap buffers.
    pub fn end_frame(&mut self) -> io::Result<()> {
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    fn set_size(&mut self, w: usize, h: usize) {
        self.term_w = w;
        self.term_h = h;
        self.front.resize(w, h);
        self.back.resize(w, h);
        // Force full repaint: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);
        self.origin = (
            w.saturating_sub(FIELD_W) / 2,
            h.saturating_sub(FIELD_H) / 2,
        );
    }

    /// Write one character at field position (x, y); off-field writes are dropped.
    fn put(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Color) {
        if x < 0 || y < 0 || x as usize >= FIELD_W || y as usize >= FIELD_H {
            return;
        }
        let tx = self.origin.0 + x as usize;
        let ty = self.origin.1 + y as usize;
        self.front.set(tx, ty, Cell { ch, fg, bg });
    }

    fn put_str(&mut self, x: i32, y: i32, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.put(x + i as i32, y, ch, fg, bg);
        }
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = BASE_BG;

        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height {
            let mut need_move = true;
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
            }
        }

        self.writer.flush()
    }
}

impl Canvas for Renderer {
    fn blit(&mut self, image: &str, pos: (i32, i32)) {
        let Some(sprite) = sprites::lookup(image) else { return };
        for (dy, row) in sprite.rows.iter().enumerate() {
            for (dx, ch) in row.chars().enumerate() {
                if ch != ' ' {
                    self.put(pos.0 + dx as i32, pos.1 + dy as i32, ch, sprite.fg, BASE_BG);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, y: i32) {
        let len = text.chars().count();
        let x = FIELD_W.saturating_sub(len) / 2;
        self.put_str(x as i32, y, text, Color::White, BASE_BG);
    }

    fn draw_status(&mut self, status: &Status) {
        let row = HUD_ROW as i32;
        for x in 0..FIELD_W as i32 {
            self.put(x, row, ' ', Color::White, HUD_BG);
        }
        let score = format!(" SCORE {:06}", status.score);
        self.put_str(0, row, &score, Color::White, HUD_BG);

        if let Some(lives) = status.lives {
            let hearts = "♥".repeat(lives.max(0) as usize);
            let text = format!("LIVES {hearts:<3} ");
            let x = FIELD_W as i32 - text.chars().count() as i32;
            self.put_str(x, row, &text, Color::Rgb { r: 255, g: 110, b: 110 }, HUD_BG);
        }
    }
}
