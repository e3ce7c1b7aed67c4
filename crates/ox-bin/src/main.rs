//! Genome viewer entrypoint: parses the `CHR[.POS[%]]`/`hl=NAME[,NAME...]`
//! command line, opens the starting chromosome, and drives the synchronous
//! terminal event loop described in spec.md §4.7/§5 — no worker tasks, a
//! single ~100ms poll tick driving auto-scroll while playing.
//!
//! Grounded on the teacher's `AppStartup` entrypoint shape (logging setup,
//! panic hook, terminal guard lifetime) with the event loop itself
//! replaced: the reference implementation's async event channel has no
//! counterpart here, since the system this viewer reimplements (`main`
//! in the original Python) is itself a plain blocking `getch()` loop.

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Once;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use core_config::Palette;
use core_render::color;
use core_render::writer::Writer;
use core_render::{fill, Frame};
use core_state::{AppState, PlayState};
use core_terminal::{CrosstermBackend, TerminalBackend};
use core_view::{Position, View};

/// How often the event loop wakes up to check for input (and, while
/// playing, to advance one line). Mirrors the `time.sleep(0.1)` cadence in
/// the reference implementation's main loop.
const TICK: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "viewer", about = "Interactive terminal viewer of the human reference genome")]
struct Args {
    /// `CHR[.POS[%]]` and/or `hl=NAME[,NAME...]`, in either order.
    /// Unrecognized arguments are ignored.
    #[arg(num_args = 0..)]
    args: Vec<String>,

    /// Directory holding `<chromosome>.bin`/`.dat` files. Defaults to the
    /// current directory (the reference implementation hardcodes "next to
    /// the script"; an installed binary has no such directory, so this is a
    /// CLI override instead — see DESIGN.md).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Path to `config.ini`. Defaults to `core_config::discover`.
    #[arg(long)]
    config: Option<PathBuf>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn configure_logging(&mut self) {
        let log_dir = std::path::Path::new(".");
        let log_path = log_dir.join("viewer.log");
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, "viewer.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(()) => self.log_guard = Some(guard),
            Err(_) => {
                // A global subscriber is already installed (e.g. under test harnesses).
            }
        }
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging();
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let palette = match core_config::load(args.config.clone()) {
        Ok(palette) => palette,
        Err(err) => {
            error!(target: "runtime", error = %err, "config load failed");
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let data_dir = args.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let start = cli::parse(&args.args);

    let (scrw, scrh) = match crossterm::terminal::size() {
        Ok(size) => size,
        Err(err) => {
            eprintln!("error: failed to query terminal size: {err}");
            return ExitCode::from(1);
        }
    };

    let play_state = if start.paused {
        PlayState::Paused
    } else {
        PlayState::Playing
    };
    let mut state = AppState::new(scrw, scrh, play_state, start.highlights);
    if state.too_small() {
        eprintln!("error: terminal too small (need at least 20x10, got {scrw}x{scrh})");
        return ExitCode::from(3);
    }

    let mut view = View::new(Position::start_of(start.chromosome.as_str()), &data_dir);
    let ch_size = match view.cache_mut().get_or_open(&start.chromosome) {
        Ok(reader) => reader.ch_size(),
        Err(err) => {
            error!(target: "runtime", chromosome = %start.chromosome, error = %err, "failed to open starting chromosome");
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };
    let initial_pos = cli::resolve_position(ch_size, start.pos, start.percent);
    view.cache_mut()
        .get_or_open(&start.chromosome)
        .expect("just opened above")
        .jump_to(initial_pos);
    view.top_pos = Position::InSequence {
        chromosome: start.chromosome.as_str().into(),
        pos: initial_pos as i64,
    };

    startup.backend.set_title("Genome Viewer").ok();
    let guard = match startup.backend.enter_guard() {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("error: failed to enter terminal: {err}");
            return ExitCode::from(1);
        }
    };

    let result = run(&mut view, &mut state, &palette);
    drop(guard);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "runtime", error = %err, "event loop exited with an error");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// The synchronous paint-and-poll loop: one ~100ms tick drives auto-scroll
/// while playing; `Space`/`Enter` toggles play state; `Up`/`Down` scroll by
/// one line in either state; `Resize` rebuilds the frame; `Esc` exits.
/// Mirrors `main(stdscr)` in the reference implementation, minus its
/// always-non-blocking `getch()` busy-spin while paused — polling with a
/// timeout regardless of play state gets the same responsiveness without
/// spinning the CPU (see DESIGN.md).
fn run(view: &mut View, state: &mut AppState, palette: &Palette) -> Result<()> {
    let mut frame = Frame::new(state.scrw, state.scrh);
    fill::fill(&mut frame, view, state, 0, 0, state.scrh)?;
    paint_rows(&frame, palette, 0, state.scrh)?;

    loop {
        if !event::poll(TICK)? {
            if state.play_state.is_playing() {
                scroll_and_paint(&mut frame, view, state, palette, 1)?;
            }
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char(' ') | KeyCode::Enter => state.play_state.toggle(),
                KeyCode::Down => scroll_and_paint(&mut frame, view, state, palette, 1)?,
                KeyCode::Up => scroll_up_and_paint(&mut frame, view, state, palette, 1)?,
                _ => {}
            },
            Event::Resize(w, h) => {
                state.resize(w, h);
                frame.resize(w, h);
                if state.too_small() {
                    continue;
                }
                fill::fill(&mut frame, view, state, 0, 0, state.scrh)?;
                paint_rows(&frame, palette, 0, state.scrh)?;
            }
            _ => {}
        }
    }
}

/// Scroll down by `n` lines: physically scroll the terminal up by `moved`
/// rows (mirroring `View.scroll_down`'s `self.screen.scroll(1)`), shift the
/// in-memory `Frame` to match, then repaint only the newly exposed bottom
/// rows plus the status line. Without the physical scroll + frame shift,
/// every row above the freshly filled ones would keep showing whatever it
/// held before — the viewer would appear frozen except for the bottom line.
fn scroll_and_paint(
    frame: &mut Frame,
    view: &mut View,
    state: &AppState,
    palette: &Palette,
    n: u32,
) -> Result<()> {
    let moved = view.scroll_down(n, state.scrw, state.scrh)?;
    if moved == 0 {
        return Ok(());
    }
    let moved = moved as u16;
    scroll_terminal_up(moved)?;
    frame.shift_up(moved);
    let y = state.scrh.saturating_sub(moved);
    fill::fill(frame, view, state, 0, y, moved)?;
    paint_rows(frame, palette, y, moved)?;
    paint_rows(frame, palette, 0, 1)?;
    Ok(())
}

/// Scroll up by `n` lines: physically scroll the terminal down by `moved`
/// rows (mirroring `View.scroll_up`'s `self.screen.scroll(-1)`), shift the
/// `Frame` to match, then repaint the top rows. Unlike scrolling down, a row
/// entering from above can recolor consensus highlights that reach backward
/// into rows already on screen, so the top two rows are always repainted
/// together (mirrors `View.scroll_up`'s `fill(0, 0, 2)`).
fn scroll_up_and_paint(
    frame: &mut Frame,
    view: &mut View,
    state: &AppState,
    palette: &Palette,
    n: u32,
) -> Result<()> {
    let moved = view.scroll_up(n, state.scrw)?;
    if moved == 0 {
        return Ok(());
    }
    let moved = moved as u16;
    scroll_terminal_down(moved)?;
    frame.shift_down(moved);
    let h = 2.min(state.scrh);
    fill::fill(frame, view, state, 0, 0, h)?;
    paint_rows(frame, palette, 0, h)?;
    Ok(())
}

fn scroll_terminal_up(n: u16) -> Result<()> {
    let mut writer = Writer::new();
    writer.scroll_up(n);
    writer.flush()
}

fn scroll_terminal_down(n: u16) -> Result<()> {
    let mut writer = Writer::new();
    writer.scroll_down(n);
    writer.flush()
}

fn paint_rows(frame: &Frame, palette: &Palette, y0: u16, h: u16) -> Result<()> {
    let mut writer = Writer::new();
    for y in y0..y0 + h {
        writer.move_to(0, y);
        writer.clear_line(0, y);
        for x in 0..frame.width() {
            let Some(cell) = frame.get(x, y) else {
                continue;
            };
            let (fg, bg) = color::resolve(cell.pair, palette);
            writer.set_colors(crossterm::style::Colors {
                foreground: fg,
                background: bg,
            });
            writer.print_char(cell.ch);
        }
        writer.reset_colors();
    }
    writer.flush()
}
