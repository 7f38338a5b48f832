mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tank_versus_cubes::compute::{init_state, tick, TickInput};
use tank_versus_cubes::config::{clamp_target, Config, TARGET_DEFAULT, TARGET_MAX, TARGET_MIN, TICK_RATE};
use tank_versus_cubes::entities::{GameState, Mode, SessionEnd};
use tank_versus_cubes::progression::session_end;

const FRAME: Duration = Duration::from_micros(1_000_000 / TICK_RATE as u64);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliMode {
    Infinite,
    Score,
    Extreme,
}

#[derive(Parser, Debug)]
#[command(name = "tank_versus_cubes")]
#[command(about = "Terminal arcade shooter: a tank against falling cubes and their boss")]
struct Cli {
    /// Start this mode straight away instead of showing the menu
    #[arg(long, value_enum)]
    mode: Option<CliMode>,
    /// Target score for the score and extreme modes
    #[arg(
        long,
        default_value_t = TARGET_DEFAULT,
        value_parser = clap::value_parser!(u32).range((TARGET_MIN as i64)..=(TARGET_MAX as i64))
    )]
    target: u32,
    /// JSON file overriding tuning values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed the spawn RNG for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn start_mode(&self) -> Option<Mode> {
        self.mode.map(|m| match m {
            CliMode::Infinite => Mode::Infinite,
            CliMode::Score => Mode::ScoreRace { target: self.target },
            CliMode::Extreme => Mode::Extreme { target: self.target },
        })
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Mode),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    target: &mut u32,
) -> std::io::Result<MenuResult> {
    loop {
        display::render_menu(out, *target)?;

        // Block until the user does something
        let Ok(ev) = rx.recv() else {
            return Ok(MenuResult::Quit);
        };
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        if is_quit(&code, modifiers) {
            return Ok(MenuResult::Quit);
        }
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                *target = clamp_target(target.saturating_sub(1));
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                *target = clamp_target(*target + 1);
            }
            KeyCode::Char('1') => return Ok(MenuResult::Start(Mode::Infinite)),
            KeyCode::Char('2') => {
                return Ok(MenuResult::Start(Mode::ScoreRace { target: *target }))
            }
            KeyCode::Char('3') => {
                return Ok(MenuResult::Start(Mode::Extreme { target: *target }))
            }
            _ => {}
        }
    }
}

// ── End screen ────────────────────────────────────────────────────────────────

enum EndChoice {
    Menu,
    Quit,
}

fn show_session_end<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    end: &SessionEnd,
) -> std::io::Result<EndChoice> {
    display::render_session_end(out, end)?;
    loop {
        let Ok(ev) = rx.recv() else {
            return Ok(EndChoice::Quit);
        };
        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) = ev {
            if is_quit(&code, modifiers) {
                return Ok(EndChoice::Quit);
            }
            if matches!(code, KeyCode::Char('r') | KeyCode::Char('R')) {
                return Ok(EndChoice::Menu);
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Finished(SessionEnd),
}

/// Runs one session until it ends or the player quits.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key, so movement keys count as held while they keep
/// refreshing.  Fire is different: only a fresh `Press` fires, repeats are
/// ignored, and the simulation's shot delay does the rest.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` frames of silence.
///   Fire may then auto-repeat at the OS rate, still capped by the delay.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<LoopExit> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let session_start = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut fire = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    if is_quit(&code, modifiers) {
                        return Ok(LoopExit::Quit);
                    }
                    if matches!(code, KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Char(' ')) {
                        fire = true;
                    }
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let left = is_held(&key_frame, &KeyCode::Left, frame)
            || is_held(&key_frame, &KeyCode::Char('a'), frame)
            || is_held(&key_frame, &KeyCode::Char('A'), frame);
        let right = is_held(&key_frame, &KeyCode::Right, frame)
            || is_held(&key_frame, &KeyCode::Char('d'), frame)
            || is_held(&key_frame, &KeyCode::Char('D'), frame);

        let input = TickInput {
            left,
            right,
            fire,
            now_ms: session_start.elapsed().as_millis() as u64,
        };
        *state = tick(state, &input, rng);

        display::render(out, state)?;

        if let Some(end) = session_end(state) {
            return Ok(LoopExit::Finished(end));
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
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
            Err(err) => {
                log::error!("input reader stopped: {}", err);
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &config, &cli, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    Ok(result?)
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    cli: &Cli,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let mut target = cli.target;
    let mut pending = cli.start_mode();

    loop {
        let mode = match pending.take() {
            Some(mode) => mode,
            None => match show_menu(out, rx, &mut target)? {
                MenuResult::Quit => break,
                MenuResult::Start(mode) => mode,
            },
        };

        let mut state = init_state(mode, config);
        match game_loop(out, &mut state, rx, rng)? {
            LoopExit::Quit => break,
            LoopExit::Finished(end) => match show_session_end(out, rx, &end)? {
                EndChoice::Quit => break,
                // Otherwise loop back to the menu
                EndChoice::Menu => {}
            },
        }
    }
    Ok(())
}
