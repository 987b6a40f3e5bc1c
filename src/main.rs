//! Star Square Shooter entry point
//!
//! Terminal frontend: owns the raw-mode lifecycle and the input thread,
//! samples event state into a `TickInput` snapshot each frame, and drives
//! the fixed-step simulation through a real-time accumulator.

use std::collections::HashMap;
use std::io::{BufWriter, Write, stdout};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use star_square_shooter::consts::{ARENA_WIDTH, MAX_SUBSTEPS, SIM_DT_MS};
use star_square_shooter::sim::{GameState, TickInput, tick};
use star_square_shooter::tuning::Tuning;
use star_square_shooter::ui;

/// Render cadence (the simulation itself steps at a fixed 60 Hz)
const FRAME: Duration = Duration::from_millis(16);

/// A key counts as "held" if its last press/repeat event arrived within
/// this many frames. On keyboard-enhancement terminals release events
/// remove keys immediately and the window rarely matters. On classic
/// terminals only repeated presses arrive, so the window must outlast
/// the OS *initial* auto-repeat delay (commonly 250-600 ms) or a held
/// key goes dead between the first press and the repeat stream.
/// 40 frames at ~16 ms is roughly 640 ms.
const HOLD_WINDOW: u64 = 40;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|&k| is_held(key_frame, k, frame))
}

/// Map a terminal column to an arena x coordinate
fn column_to_arena_x(column: u16) -> f32 {
    let cols = terminal::size().map(|(c, _)| c).unwrap_or(80).max(1);
    column as f32 / cols as f32 * ARENA_WIDTH
}

fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    // Maps each held key to the frame it was last seen (press or repeat)
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut pointer_x: Option<f32> = None;
    let mut start_pressed = false;
    let mut frame: u64 = 0;

    let mut accumulator = 0.0f64;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // Drain all pending input events (non-blocking)
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                                start_pressed = true;
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                // Mouse drag stands in for the touch steering input
                Event::Mouse(MouseEvent { kind, column, .. }) => match kind {
                    MouseEventKind::Down(_) | MouseEventKind::Drag(_) => {
                        pointer_x = Some(column_to_arena_x(column));
                    }
                    MouseEventKind::Up(_) => {
                        pointer_x = None;
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Rebuild the input snapshot from the sampled event state
        let mut input = TickInput {
            left: any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            ),
            right: any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            ),
            fire: any_held(
                &key_frame,
                &[
                    KeyCode::Char(' '),
                    KeyCode::Up,
                    KeyCode::Char('w'),
                    KeyCode::Char('W'),
                ],
                frame,
            ),
            pointer_x,
            start: start_pressed,
        };

        // Advance the simulation by however many fixed steps have elapsed
        let now = Instant::now();
        accumulator += now.duration_since(last_frame).as_secs_f64() * 1000.0;
        last_frame = now;
        accumulator = accumulator.min(SIM_DT_MS * MAX_SUBSTEPS as f64);

        while accumulator >= SIM_DT_MS {
            tick(state, &input);
            accumulator -= SIM_DT_MS;
            // Clear one-shot inputs after processing
            input.start = false;
            start_pressed = false;
        }

        ui::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::with_tuning(seed, Tuning::load());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Ask for key-release events; terminals without the kitty keyboard
    // protocol fall back to the held-key window heuristic.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the frame loop never
    // has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped, program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = game_loop(&mut out, &mut state, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
