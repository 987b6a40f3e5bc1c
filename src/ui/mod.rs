//! Terminal drawing for the arena.
//!
//! Strictly presentation: the simulation state is read, never mutated,
//! and the 800x600 logical space is scaled onto whatever character grid
//! the terminal currently offers.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::sim::{Actor, ActorKind, GamePhase, GameState, Projectile, ProjectileOwner};

// Colour palette
const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Blue;
const C_OPPONENT: Color = Color::Red;
const C_BOSS: Color = Color::Magenta;
const C_STAR: Color = Color::Cyan;
const C_SHOT_PLAYER: Color = Color::Cyan;
const C_SHOT_OPPONENT: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_CARD: Color = Color::White;

/// Maps the 800x600 arena onto the playfield rows of the terminal
/// (row 0 is the HUD, the last row holds the controls hint).
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Below this there is no playfield row left to draw into
    fn too_small(&self) -> bool {
        self.cols < 2 || self.rows < 4
    }

    /// Panic-free for any terminal size, including degenerate ones
    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let max_col = self.cols.saturating_sub(1) as i32;
        let max_row = self.rows.saturating_sub(2) as i32;
        let col = (x / ARENA_WIDTH * self.cols as f32) as i32;
        let row = 1 + (y / ARENA_HEIGHT * self.rows.saturating_sub(3) as f32) as i32;
        (
            col.max(0).min(max_col) as u16,
            row.max(1).min(max_row).max(0) as u16,
        )
    }
}

/// Render one complete frame. Skips drawing entirely if the terminal has
/// been shrunk past the point where a playfield exists.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(cols, rows);
    if view.too_small() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        out.flush()?;
        return Ok(());
    }

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, &view, state)?;

    if state.phase != GamePhase::Start {
        if let Some(opponent) = &state.opponent {
            draw_actor(out, &view, opponent)?;
        }
        for shot in state.player_shots.iter().chain(&state.opponent_shots) {
            draw_shot(out, &view, shot)?;
        }
        draw_actor(out, &view, &state.player)?;
    }

    draw_overlay(out, &view, state)?;
    draw_controls_hint(out, &view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..view.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>4}", state.score)))?;

    let hearts: String = "♥".repeat(state.lives() as usize);
    let lives_str = format!("Lives:{}", hearts);
    let lx = view
        .cols
        .saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(lives_str))?;
    Ok(())
}

fn draw_actor<W: Write>(out: &mut W, view: &Viewport, actor: &Actor) -> std::io::Result<()> {
    // Dead actors flash a star for the duration of the cosmetic delay
    let (glyph, color) = if actor.dead {
        ("✶✶", C_STAR)
    } else {
        match actor.kind {
            ActorKind::Player { .. } => ("███", C_PLAYER),
            ActorKind::Opponent { .. } => ("▲▲", C_OPPONENT),
            ActorKind::Boss { .. } => ("⬟⬟", C_BOSS),
        }
    };

    let (col, row) = view.cell(actor.rect.center_x(), actor.rect.pos.y + actor.rect.size.y / 2.0);
    let col = col.saturating_sub(glyph.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_shot<W: Write>(out: &mut W, view: &Viewport, shot: &Projectile) -> std::io::Result<()> {
    let (glyph, color) = match shot.owner {
        ProjectileOwner::Player => ("|", C_SHOT_PLAYER),
        ProjectileOwner::Opponent => ("¦", C_SHOT_OPPONENT),
    };
    let (col, row) = view.cell(shot.rect.center_x(), shot.rect.pos.y);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_overlay<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let lines: Vec<String> = match state.phase {
        GamePhase::Start => vec![
            "★  STAR  SQUARE  SHOOTER  ★".to_string(),
            String::new(),
            "Move with ← → or A/D, or drag with the mouse.".to_string(),
            "Fire with Space / ↑ / W.".to_string(),
            String::new(),
            "Press Enter to start".to_string(),
        ],
        GamePhase::Win => vec![
            "You Win!".to_string(),
            format!("Final Score: {}", state.score),
            String::new(),
            "Press Enter to play again".to_string(),
        ],
        GamePhase::GameOver => vec![
            "Game Over".to_string(),
            format!("Final Score: {}", state.score),
            String::new(),
            "Press Enter to play again".to_string(),
        ],
        _ => return Ok(()),
    };

    let cy = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    out.queue(style::SetForegroundColor(C_CARD))?;
    for (i, line) in lines.iter().enumerate() {
        let cx = (view.cols / 2).saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(cx, cy + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE / ↑ / W : Fire   Q : Quit"))?;
    Ok(())
}
