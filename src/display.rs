/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and a read-only view of the
/// game.  No game logic is performed; this module only translates the
/// simulation's snapshots into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use tank_versus_cubes::config::{TARGET_MAX, TARGET_MIN};
use tank_versus_cubes::entities::{GameState, Outcome, Rect, Rgb, SessionEnd};
use tank_versus_cubes::snapshot::{self, EntityKind, EntitySnapshot, HudSnapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::White;
const C_HUD_TARGET: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_BAR_FULL: Color = Color::Green;
const C_BAR_EMPTY: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn term_color(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

// ── Field → terminal mapping ──────────────────────────────────────────────────

/// Maps the simulation's pixel plane onto the cells inside the border.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// First column / row inside the border.
    pub col0: u16,
    pub row0: u16,
    pub cols: u16,
    pub rows: u16,
    pub field_w: i32,
    pub field_h: i32,
}

/// A rectangle in terminal cells, already clipped to the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub w: u16,
    pub h: u16,
}

impl Viewport {
    /// Layout: HUD on row 0, border on rows 1 and `height - 2`, hint line on
    /// the last row.
    pub fn new(term_w: u16, term_h: u16, field_w: i32, field_h: i32) -> Self {
        Self {
            col0: 1,
            row0: 2,
            cols: term_w.saturating_sub(2).max(1),
            rows: term_h.saturating_sub(4).max(1),
            field_w: field_w.max(1),
            field_h: field_h.max(1),
        }
    }

    fn scale(v: i32, field: i32, cells: u16) -> i64 {
        (v as i64 * cells as i64).div_euclid(field as i64)
    }

    /// `None` when the rectangle is entirely off-screen.
    pub fn project(&self, r: &Rect) -> Option<CellRect> {
        let c0 = Self::scale(r.left(), self.field_w, self.cols);
        let c1 = Self::scale(r.right(), self.field_w, self.cols).max(c0 + 1);
        let r0 = Self::scale(r.top(), self.field_h, self.rows);
        let r1 = Self::scale(r.bottom(), self.field_h, self.rows).max(r0 + 1);

        let (c0, c1) = (c0.max(0), c1.min(self.cols as i64));
        let (r0, r1) = (r0.max(0), r1.min(self.rows as i64));
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some(CellRect {
            col: self.col0 + c0 as u16,
            row: self.row0 + r0 as u16,
            w: (c1 - c0) as u16,
            h: (r1 - r0) as u16,
        })
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(width, height, state.width(), state.height());
    let hud = snapshot::hud(state);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, &hud, state.mode.label(), width)?;

    for entity in snapshot::entities(state) {
        draw_entity(out, &view, &entity)?;
    }

    if let Some((hp, max)) = hud.boss_health {
        draw_boss_bar(out, hp, max, width, height)?;
    }
    draw_controls_hint(out, height)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Title screen with mode list and target slider.
pub fn render_menu<W: Write>(out: &mut W, target: u32) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    centered(out, cx, cy.saturating_sub(7), "TANK  VERSUS  CUBES", Color::Cyan)?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Infinite", Color::Green, "Survive as long as you can"),
        ("2", "Score   ", Color::Yellow, "Reach the target, beat the boss"),
        ("3", "Extreme ", Color::Red, "Tough cubes, rapid fire"),
    ];
    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(4) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(22), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(label))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("  {}", desc)))?;
    }

    // Slider
    let label = format!("Target score ({}-{}): {}", TARGET_MIN, TARGET_MAX, target);
    centered(out, cx, cy + 1, &label, Color::White)?;
    const SLIDER_W: u32 = 30;
    let span = TARGET_MAX - TARGET_MIN;
    let knob = (target.saturating_sub(TARGET_MIN) * SLIDER_W / span).min(SLIDER_W - 1);
    let track: String = (0..SLIDER_W)
        .map(|i| if i == knob { '●' } else { '─' })
        .collect();
    centered(out, cx, cy + 2, &track, Color::Blue)?;

    centered(
        out,
        cx,
        cy + 5,
        "← → / A D : Target   1-3 : Start   Q : Quit",
        C_HINT,
    )?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

/// End-of-session overlay drawn over the last frame.
pub fn render_session_end<W: Write>(out: &mut W, end: &SessionEnd) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let score_line = format!("Score: {}", end.score);
    let (banner, color) = match end.outcome {
        Outcome::Won => ("║     YOU  WIN     ║", Color::Green),
        Outcome::Lost => ("║    GAME  OVER    ║", Color::Red),
    };
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", color),
        (banner, color),
        ("╚══════════════════╝", color),
        (&score_line, Color::Yellow),
        ("R - Menu   Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        centered(out, cx, start_row + i as u16, msg, *color)?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

fn centered<W: Write>(
    out: &mut W,
    cx: u16,
    row: u16,
    msg: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(msg))?;
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

fn draw_hud<W: Write>(
    out: &mut W,
    hud: &HudSnapshot,
    mode: &str,
    width: u16,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:<4} [{}]", hud.score, mode)))?;

    if let Some(target) = hud.target {
        centered(out, width / 2, 0, &format!("Target: {}", target), C_HUD_TARGET)?;
    }

    let lives_text = format!("Lives: {}", hud.lives.max(0));
    let rx = width.saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn glyph(kind: EntityKind) -> char {
    match kind {
        EntityKind::Player => '█',
        EntityKind::Enemy => '▓',
        EntityKind::Boss => '█',
        EntityKind::Minion => '▒',
        EntityKind::PlayerBullet => '║',
        EntityKind::BossBullet => '●',
        EntityKind::MinionBullet => '•',
    }
}

fn draw_entity<W: Write>(
    out: &mut W,
    view: &Viewport,
    entity: &EntitySnapshot,
) -> std::io::Result<()> {
    let Some(cells) = view.project(&entity.rect) else {
        return Ok(());
    };

    let row_text: String = std::iter::repeat(glyph(entity.kind))
        .take(cells.w as usize)
        .collect();
    out.queue(style::SetForegroundColor(term_color(entity.color)))?;
    for dy in 0..cells.h {
        out.queue(cursor::MoveTo(cells.col, cells.row + dy))?;
        out.queue(Print(&row_text))?;
    }

    // The boss gets its own bar at the bottom of the screen.
    if entity.kind != EntityKind::Boss {
        if let Some(ratio) = entity.health_ratio {
            if cells.row > view.row0 {
                draw_bar(out, cells.col, cells.row - 1, cells.w, ratio)?;
            }
        }
    }
    Ok(())
}

fn draw_bar<W: Write>(
    out: &mut W,
    col: u16,
    row: u16,
    width: u16,
    ratio: f32,
) -> std::io::Result<()> {
    let filled = ((width as f32 * ratio) as u16).min(width);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_BAR_FULL))?;
    out.queue(Print("▬".repeat(filled as usize)))?;
    out.queue(style::SetForegroundColor(C_BAR_EMPTY))?;
    out.queue(Print("▬".repeat((width - filled) as usize)))?;
    Ok(())
}

fn boss_bar_label(health: i32, max_health: i32) -> String {
    format!("HP: {}/{} ", health.max(0), max_health)
}

/// Last play-area row, just above the bottom border.
fn boss_bar_row(height: u16) -> u16 {
    height.saturating_sub(3)
}

fn draw_boss_bar<W: Write>(
    out: &mut W,
    health: i32,
    max_health: i32,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let label = boss_bar_label(health, max_health);
    let label_w = label.chars().count() as u16;
    let bar_w = width.saturating_sub(label_w + 2);
    let ratio = if max_health > 0 {
        health.max(0) as f32 / max_health as f32
    } else {
        0.0
    };
    let row = boss_bar_row(height);
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&label))?;
    draw_bar(out, 1 + label_w, row, bar_w, ratio)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   E / SPACE : Shoot   Q : Quit"))?;
    Ok(())
}
