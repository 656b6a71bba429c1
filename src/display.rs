/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable `FrameView`.
/// No game logic is performed; this module only projects world pixels onto
/// the terminal grid and translates them into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use sidescroller::assets::{Appearance, Assets};
use sidescroller::compute::FrameView;
use sidescroller::geometry::{Facing, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_GROUND: Color = Color::DarkYellow;
const C_PLATFORM: Color = Color::Yellow;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BALLS: Color = Color::DarkYellow;
const C_HUD_LIVES: Color = Color::Red;
const C_MESSAGE: Color = Color::White;
const C_PLAYER: Color = Color::DarkRed;
const C_ENEMY: Color = Color::Red;
const C_ENEMY_FLEX: Color = Color::Magenta;
const C_COLLECTIBLE: Color = Color::DarkYellow;
const C_FLAG: Color = Color::Green;
const C_POLE: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const CONFETTI: [Color; 5] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
];

// ── Projection ────────────────────────────────────────────────────────────────

/// Maps world pixels inside the camera window onto terminal cells.  Row 0
/// holds the HUD and the last row the controls hint, so the play field is
/// everything in between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub camera_x: f32,
    pub px_per_col: f32,
    pub px_per_row: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, camera_x: f32, view_w: f32, view_h: f32) -> Self {
        let play_rows = rows.saturating_sub(2).max(1);
        Self {
            cols,
            rows,
            camera_x,
            px_per_col: view_w / cols.max(1) as f32,
            px_per_row: view_h / play_rows as f32,
        }
    }

    pub fn col(&self, x: f32) -> i32 {
        ((x - self.camera_x) / self.px_per_col).floor() as i32
    }

    pub fn row(&self, y: f32) -> i32 {
        1 + (y / self.px_per_row).floor() as i32
    }

    fn visible(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.cols as i32 && row >= 1 && row < self.rows as i32 - 1
    }

    /// Cells covered by `rect`, at least one cell wide and tall.
    pub fn cells(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let c0 = self.col(rect.left());
        let r0 = self.row(rect.top());
        let c1 = self.col(rect.right() - 0.01).max(c0);
        let r1 = self.row(rect.bottom() - 0.01).max(r0);
        (c0, r0, c1, r1)
    }
}

fn put<W: Write>(
    out: &mut W,
    vp: &Viewport,
    col: i32,
    row: i32,
    glyph: &str,
) -> std::io::Result<()> {
    if vp.visible(col, row) {
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn fill<W: Write>(out: &mut W, vp: &Viewport, rect: &Rect, glyph: &str) -> std::io::Result<()> {
    let (c0, r0, c1, r1) = vp.cells(rect);
    for row in r0..=r1 {
        for col in c0..=c1 {
            put(out, vp, col, row, glyph)?;
        }
    }
    Ok(())
}

/// Mirror a line of text art so a right-facing sprite faces left.
fn mirror(line: &str) -> String {
    line.chars()
        .rev()
        .map(|c| match c {
            '/' => '\\',
            '\\' => '/',
            '(' => ')',
            ')' => '(',
            '[' => ']',
            ']' => '[',
            '<' => '>',
            '>' => '<',
            other => other,
        })
        .collect()
}

fn draw_appearance<W: Write>(
    out: &mut W,
    vp: &Viewport,
    rect: &Rect,
    appearance: &Appearance,
    facing: Facing,
) -> std::io::Result<()> {
    match appearance {
        Appearance::Placeholder => fill(out, vp, rect, "█"),
        Appearance::Sprite(rows) => {
            // Anchor the art to the rectangle's bottom so it stands on platforms.
            let (c0, _, _, r1) = vp.cells(rect);
            let top = r1 - rows.len() as i32 + 1;
            for (i, line) in rows.iter().enumerate() {
                let line = match facing {
                    Facing::Right => line.clone(),
                    Facing::Left => mirror(line),
                };
                for (j, ch) in line.chars().enumerate() {
                    if ch != ' ' {
                        put(out, vp, c0 + j as i32, top + i as i32, &ch.to_string())?;
                    }
                }
            }
            Ok(())
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    view: &FrameView,
    assets: &Assets,
    level_name: &str,
    view_w: f32,
    view_h: f32,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let vp = Viewport::new(cols, rows, view.camera_x, view_w, view_h);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_world(out, &vp, view)?;
    draw_goal(out, &vp, &view.goal)?;

    out.queue(style::SetForegroundColor(C_COLLECTIBLE))?;
    for c in &view.collectibles {
        draw_appearance(out, &vp, c, &assets.collectible, Facing::Right)?;
    }

    for enemy in &view.enemies {
        let color = if enemy.flexing { C_ENEMY_FLEX } else { C_ENEMY };
        out.queue(style::SetForegroundColor(color))?;
        draw_appearance(out, &vp, &enemy.rect, &assets.enemy, enemy.facing)?;
        if enemy.flexing {
            let (c0, r0, _, _) = vp.cells(&enemy.rect);
            put(out, &vp, c0, r0 - 1, "!")?;
        }
    }

    if !view.player.hidden {
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        draw_appearance(out, &vp, &view.player.rect, &assets.player, view.player.facing)?;
    }

    for (i, &(x, y)) in view.confetti.iter().enumerate() {
        out.queue(style::SetForegroundColor(CONFETTI[i % CONFETTI.len()]))?;
        put(out, &vp, vp.col(x), vp.row(y), "*")?;
    }

    draw_hud(out, &vp, view, level_name)?;
    draw_controls_hint(out, &vp)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Level geometry ────────────────────────────────────────────────────────────

fn draw_world<W: Write>(out: &mut W, vp: &Viewport, view: &FrameView) -> std::io::Result<()> {
    for (i, platform) in view.platforms.iter().enumerate() {
        if i == 0 {
            out.queue(style::SetForegroundColor(C_GROUND))?;
            fill(out, vp, platform, "▓")?;
        } else {
            out.queue(style::SetForegroundColor(C_PLATFORM))?;
            fill(out, vp, platform, "▀")?;
        }
    }
    Ok(())
}

fn draw_goal<W: Write>(out: &mut W, vp: &Viewport, goal: &Rect) -> std::io::Result<()> {
    let (c0, r0, _, r1) = vp.cells(goal);
    out.queue(style::SetForegroundColor(C_POLE))?;
    for row in r0..=r1 {
        put(out, vp, c0, row, "|")?;
    }
    out.queue(style::SetForegroundColor(C_FLAG))?;
    put(out, vp, c0 + 1, r0, "▶")?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    vp: &Viewport,
    view: &FrameView,
    level_name: &str,
) -> std::io::Result<()> {
    let hud = &view.hud;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}  ", hud.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_BALLS))?;
    out.queue(Print(format!("Footballs: {}/{}", hud.collected, hud.total)))?;

    // Message, or level name when idle, centred
    let (centre, color) = match &hud.message {
        Some(msg) => (msg.clone(), C_MESSAGE),
        None => (format!("[ {} ]", level_name), C_HINT),
    };
    let mx = (vp.cols / 2).saturating_sub(centre.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(mx, 0))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(&centre))?;

    // Lives, right-aligned
    let hearts: String = "♥".repeat(hud.lives as usize);
    let lives_text = format!("Lives: {}", hearts);
    let rx = vp
        .cols
        .saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE / W / ↑ : Jump   R : Reset   Q : Quit"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_maps_camera_left_edge_to_column_zero() {
        let vp = Viewport::new(90, 29, 1000.0, 900.0, 540.0);
        assert_eq!(vp.col(1000.0), 0);
        assert_eq!(vp.col(1899.0), 89);
        assert_eq!(vp.row(0.0), 1);
    }

    #[test]
    fn mirror_swaps_slashes() {
        assert_eq!(mirror("/|\\"), "/|\\");
        assert_eq!(mirror("[# "), " #]");
    }
}
