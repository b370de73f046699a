mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use alien_defense::config::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};
use alien_defense::{FieldConfig, Intents, Session};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

#[derive(Parser, Debug)]
#[command(name = "alien_defense", about = "Defend against a grid of aliens in your terminal")]
struct Args {
    /// Play-field width in field units.
    #[arg(long, default_value_t = DEFAULT_FIELD_WIDTH)]
    width: f32,

    /// Play-field height in field units.
    #[arg(long, default_value_t = DEFAULT_FIELD_HEIGHT)]
    height: f32,

    /// Seed for alien fire selection; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Whether a `Press` of Space is a fresh trigger.  Without keyboard
/// enhancement the OS auto-repeat arrives as more `Press` events, so a press
/// while Space is still held counts as a repeat, not a new shot.
fn is_fire_edge(key_frame: &HashMap<KeyCode, u64>, frame: u64, keyboard_enhanced: bool) -> bool {
    keyboard_enhanced || !is_held(key_frame, &KeyCode::Char(' '), frame)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Movement is an intent: `key_frame` records the frame of the last
/// press/repeat for every key and a direction counts as held while that
/// timestamp is fresh (or until a release event on terminals that report
/// them).  Fire is a trigger: only a fresh `Press` of Space requests a shot,
/// so holding the key never turns into rapid fire.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session<StdRng>,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
) -> std::io::Result<()> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut fire_requested = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    if code == KeyCode::Char(' ')
                        && is_fire_edge(&key_frame, frame, keyboard_enhanced)
                    {
                        fire_requested = true;
                    }
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if session.phase().is_terminal() =>
                        {
                            session.reset();
                            key_frame.clear();
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
            }
        }

        let intents = Intents {
            move_left: any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            ),
            move_right: any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            ),
        };

        let snapshot = if session.phase().is_terminal() {
            session.snapshot()
        } else {
            session
                .tick(intents, fire_requested)
                .map_err(std::io::Error::other)?
        };

        let (width, height) = terminal::size()?;
        display::render(out, &snapshot, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let field = FieldConfig::new(args.width, args.height).map_err(std::io::Error::other)?;
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("field {}x{}, seed {:?}", field.width(), field.height(), args.seed);

    let mut session = Session::new(field, rng);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
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

    session.start();
    let result = game_loop(&mut out, &mut session, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
