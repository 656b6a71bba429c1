mod display;

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use sidescroller::assets::{Assets, AudioCue, AudioGate};
use sidescroller::compute::{init_state, reset, snapshot, tick};
use sidescroller::config::Tuning;
use sidescroller::entities::{GameEvent, GameState, Input};
use sidescroller::level::{Difficulty, LevelData};

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sidescroller", about = "Side-scrolling platformer for the terminal")]
struct Args {
    /// Skip the menu and start on this course.
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,
    /// Play a custom level described in RON instead of a built-in course.
    #[arg(long)]
    level_file: Option<PathBuf>,
    /// RON file overriding gameplay tuning.
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Directory holding text-art sprites.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
    /// Never ring the terminal bell.
    #[arg(long)]
    mute: bool,
    /// Where log output goes; the terminal itself is busy drawing the game.
    #[arg(long, default_value = "sidescroller.log")]
    log_file: PathBuf,
}

fn init_tracing(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn sample_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Input {
    Input {
        left: any_held(
            key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        ),
        right: any_held(
            key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        ),
        jump: any_held(
            key_frame,
            &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W'), KeyCode::Char(' ')],
            frame,
        ),
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Difficulty),
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "⚑  RED RIVER RUN  ⚑";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::DarkYellow))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select a course:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Easy  ", Color::Green,  "Three slow defenders"),
        ("2", "Medium", Color::Yellow, "More defenders, more footballs"),
        ("3", "Hard  ", Color::Red,    "Crowded and quick"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" - {}", desc)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Collect every football, then touch the flag."))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 5))?;
    out.queue(Print("← → / A D : Move   SPACE : Jump   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        let Ok(ev) = rx.recv() else {
            // Input thread is gone; nothing more can be chosen.
            return Ok(MenuResult::Quit);
        };
        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = ev {
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(Difficulty::Easy)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(Difficulty::Medium)),
                KeyCode::Char('3') => return Ok(MenuResult::Start(Difficulty::Hard)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn ring<W: Write>(out: &mut W, audio: &AudioGate) -> std::io::Result<()> {
    if audio.cue() == AudioCue::Bell {
        out.queue(Print("\x07"))?;
    }
    Ok(())
}

/// Runs one session until the player quits.  Held keys are tracked in a
/// `key_frame` map (frame each key was last seen) so left/right and jump can
/// be held together; each frame they are folded into one `Input`.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    assets: &Assets,
    audio: &mut AudioGate,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();
    let mut running = true;

    while running {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last).as_secs_f32();
        last = frame_start;
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    audio.unlock();
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            running = false;
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            running = false;
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => match reset(&state) {
                            Ok(fresh) => state = fresh,
                            Err(err) => warn!(%err, "reset ignored"),
                        },
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }
        if !running {
            break;
        }

        let input = sample_input(&key_frame, frame);
        state = tick(&state, &input, dt, &mut rng);

        for ev in &state.events {
            match ev {
                GameEvent::EnemyTaunt { .. } | GameEvent::Victory => ring(out, audio)?,
                GameEvent::DeathFinished => info!(score = state.player.score, "game over"),
                _ => {}
            }
        }

        display::render(
            out,
            &snapshot(&state),
            assets,
            &state.level.name,
            state.tuning.view_width,
            state.tuning.view_height,
        )?;

        // Yield to the host until the next tick is due.
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(&args.log_file)?;

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let custom_level = match &args.level_file {
        Some(path) => Some(LevelData::load(path, &tuning)?),
        None => None,
    };
    let assets = Assets::load(&args.assets);
    let mut audio = AudioGate::new(args.mute);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let level = match custom_level {
        Some(level) => Some(level),
        None => match args.difficulty {
            Some(d) => Some(LevelData::builtin(d.into())),
            None => match show_menu(&mut out, &rx) {
                Ok(MenuResult::Start(d)) => Some(LevelData::builtin(d)),
                Ok(MenuResult::Quit) => None,
                Err(err) => {
                    error!(%err, "menu failed");
                    None
                }
            },
        },
    };

    let result: Result<(), Box<dyn Error>> = match level {
        Some(level) => {
            info!(level = %level.name, "starting run");
            match init_state(level, tuning) {
                Ok(state) => game_loop(&mut out, state, &assets, &mut audio, &rx)
                    .map_err(Into::into),
                Err(err) => Err(err.into()),
            }
        }
        None => Ok(()),
    };

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        error!(%err, "run aborted");
    }
    result
}
