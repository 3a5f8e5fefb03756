//! Terminal front end: command line, logging, terminal session and the
//! frame loop.

use crate::audio::Sounds;
use crate::driver::{Control, Driver};
use crate::input::command_for;
use crate::render::{PixelBuf, Renderer};
use crate::sim::StepReport;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, terminal,
};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Redraw budget. Ticks are paced separately by the fixed timestep.
const FRAME_BUDGET: Duration = Duration::from_millis(16);

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Flap through the pipes. Space or click to flap, q to quit.")]
pub struct Settings {
    /// Seed for pipe gap placement (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable sound effects
    #[arg(long)]
    pub mute: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Set up env_logger. `RUST_LOG` overrides the default filter.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let default_filter = if settings.log_file.is_some() {
        "debug"
    } else {
        "warn"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    // Anything on stderr would land on top of the game screen.
    if let Some(path) = &settings.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("installing logger")?;
    Ok(())
}

/// Raw mode + alternate screen for as long as this value lives.
struct TerminalSession {
    out: BufWriter<Stdout>,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        // Guard exists before any further setup so a failure still restores.
        let mut session = Self {
            out: BufWriter::with_capacity(1 << 16, io::stdout()),
        };
        execute!(
            session.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )
        .context("preparing terminal")?;
        Ok(session)
    }
}

fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(
        out,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    out.flush()
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = leave_screen(&mut self.out);
        let _ = terminal::disable_raw_mode();
    }
}

fn play_effects(sounds: &Sounds, report: &StepReport) {
    if report.crash.is_some() {
        sounds.crash();
    } else if report.scored > 0 {
        sounds.point();
    } else if report.flapped {
        sounds.flap();
    }
}

/// Play until the user quits.
pub fn run(settings: &Settings) -> Result<()> {
    let seed = settings.seed.unwrap_or_else(rand::random);
    info!("starting with pipe seed {seed}");

    let sounds = if settings.mute {
        Sounds::muted()
    } else {
        Sounds::open()
    };

    let mut driver = Driver::new(StdRng::seed_from_u64(seed));
    let mut session = TerminalSession::enter()?;
    let (cols, rows) = terminal::size().context("reading terminal size")?;
    let mut renderer = Renderer::new(PixelBuf::for_terminal(cols, rows));

    let mut last = Instant::now();
    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO).context("polling input")? {
            let ev = event::read().context("reading input")?;
            if let Event::Resize(c, r) = ev {
                renderer.resize(c, r);
                continue;
            }
            if let Some(cmd) = command_for(&ev) {
                if driver.handle(cmd) == Control::Quit {
                    info!(
                        "quit at frame {} with score {}",
                        driver.frame(),
                        driver.world.score
                    );
                    return Ok(());
                }
            }
        }

        // Update
        let now = Instant::now();
        for report in driver.advance(now - last) {
            play_effects(&sounds, &report);
        }
        last = now;

        // Render
        renderer.draw(&driver.world);
        renderer
            .present(&mut session.out)
            .context("drawing frame")?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_BUDGET {
            std::thread::sleep(FRAME_BUDGET - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Crash;

    #[test]
    fn test_settings_parse() {
        let s = Settings::try_parse_from(["flappy-arcade", "--seed", "42", "--mute"]).unwrap();
        assert_eq!(s.seed, Some(42));
        assert!(s.mute);
        assert!(s.log_file.is_none());

        let s = Settings::try_parse_from(["flappy-arcade", "--log-file", "/tmp/f.log"]).unwrap();
        assert_eq!(s.log_file, Some(PathBuf::from("/tmp/f.log")));
        assert!(s.seed.is_none());
    }

    #[test]
    fn test_settings_reject_unknown_flag() {
        assert!(Settings::try_parse_from(["flappy-arcade", "--gravity", "2"]).is_err());
    }

    #[test]
    fn test_leave_screen_restores_terminal_state() {
        let mut out = Vec::new();
        leave_screen(&mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        // Leave alternate screen, show cursor, re-enable wrapping.
        assert!(s.contains("\x1b[?1049l"));
        assert!(s.contains("\x1b[?25h"));
        assert!(s.contains("\x1b[?7h"));
    }

    #[test]
    fn test_effects_with_muted_sounds() {
        let sounds = Sounds::muted();
        let report = StepReport {
            crash: Some(Crash::Pipe),
            scored: 1,
            ..Default::default()
        };
        play_effects(&sounds, &report);
    }
}
