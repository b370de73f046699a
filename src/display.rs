//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable `Snapshot`.
//! No game logic is performed; this module only translates field
//! coordinates into terminal cells and cells into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use alien_defense::geometry::Rect;
use alien_defense::{SessionPhase, Shape, ShapeKind, Snapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Blue;
const C_ALIEN: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::White;
const C_BULLET_ALIEN: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Field → terminal mapping ──────────────────────────────────────────────────

/// The play area inside the border: rows 0 and 1 hold the HUD and the top
/// bar, the last two rows the bottom bar and the controls hint.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    fn new(snapshot: &Snapshot, width: u16, height: u16) -> Self {
        let cols = width.saturating_sub(2).max(1);
        let rows = height.saturating_sub(4).max(1);
        Viewport {
            left: 1,
            top: 2,
            cols,
            rows,
            scale_x: cols as f32 / snapshot.field.width(),
            scale_y: rows as f32 / snapshot.field.height(),
        }
    }

    fn col(&self, x: f32) -> u16 {
        let c = (x * self.scale_x).floor().max(0.0) as u16;
        self.left + c.min(self.cols - 1)
    }

    fn row(&self, y: f32) -> u16 {
        let r = (y * self.scale_y).floor().max(0.0) as u16;
        self.top + r.min(self.rows - 1)
    }

    /// Inclusive cell bounds covered by `rect`; always at least one cell.
    fn cells(&self, rect: &Rect) -> (u16, u16, u16, u16) {
        let c0 = self.col(rect.x);
        let r0 = self.row(rect.y);
        let c1 = self.col(rect.right()).max(c0);
        let r1 = self.row(rect.bottom()).max(r0);
        (c0, r0, c1, r1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `width`×`height` terminal.
pub fn render<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let view = Viewport::new(snapshot, width, height);

    draw_border(out, width, height)?;
    draw_hud(out, snapshot, width)?;

    for shape in snapshot.shapes.iter().filter(|s| s.alive) {
        draw_shape(out, &view, shape)?;
    }

    draw_controls_hint(out, height)?;

    if let Some(banner) = snapshot.phase.banner() {
        draw_banner(out, snapshot, banner, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snapshot: &Snapshot, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", snapshot.score)))?;

    let lives_str = format!("Lives:{}", "♥".repeat(snapshot.lives as usize));
    let rx = width.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_shape<W: Write>(out: &mut W, view: &Viewport, shape: &Shape) -> std::io::Result<()> {
    let (c0, r0, c1, r1) = view.cells(&shape.rect);
    let span = (c1 - c0 + 1) as usize;

    match shape.kind {
        ShapeKind::Player => {
            // Ship points up: a tip on the top row, hull underneath.
            out.queue(style::SetForegroundColor(C_PLAYER))?;
            out.queue(cursor::MoveTo(c0 + (c1 - c0) / 2, r0))?;
            out.queue(Print("▲"))?;
            for row in r0 + 1..=r1 {
                out.queue(cursor::MoveTo(c0, row))?;
                out.queue(Print("█".repeat(span)))?;
            }
        }
        ShapeKind::Alien => {
            out.queue(style::SetForegroundColor(C_ALIEN))?;
            for row in r0..=r1 {
                out.queue(cursor::MoveTo(c0, row))?;
                out.queue(Print("▓".repeat(span)))?;
            }
        }
        ShapeKind::PlayerBullet => {
            out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
            out.queue(cursor::MoveTo(c0, r0))?;
            out.queue(Print("║"))?;
        }
        ShapeKind::AlienBullet => {
            out.queue(style::SetForegroundColor(C_BULLET_ALIEN))?;
            out.queue(cursor::MoveTo(c0, r0))?;
            out.queue(Print("↓"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Win / game-over overlay ───────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    banner: &str,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let color = match snapshot.phase {
        SessionPhase::Won => Color::Green,
        _ => Color::Red,
    };
    let score_line = format!("Final Score: {}", snapshot.score);
    let hint = "R - Play Again  Q - Quit";

    let lines: [(&str, Color); 3] = [
        (banner, color),
        (score_line.as_str(), Color::Yellow),
        (hint, Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
