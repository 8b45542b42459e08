// SPDX-License-Identifier: MIT
//
// ttyfx — demo driver for the rendering primitives.
//
// Draws into the live terminal, in place, below the current line:
//
//   ┌──────────────────────────────────────┐
//   │                ttyfx                 │  ← text (centered)
//   │ ▋▋▋▋▋▋▋▋▋▋▋▋▋░░░░░░░░░░░░░░░░░░░░░  │  ← progress bar (own thread)
//   │ working /                            │  ← spinner (own thread)
//   │                                      │
//   └──────────────────────────────────────┘
//
// Everything is positioned with relative motion, so nothing else may write
// to the terminal while a demo runs. Logs go to stderr; redirect them
// (`2>ttyfx.log`) when running with `--verbose` or `RUST_LOG`.

use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ttyfx_draw::{Align, shell, task, text};
use ttyfx_term::ansi;
use ttyfx_term::style::{Attr, Bg, Color, Fg};

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "ttyfx", version, about = "Draw frames, text, spinners and progress bars in place")]
struct Cli {
    /// Field width in columns
    #[arg(short, long, default_value_t = 40, global = true)]
    width: u16,

    /// Frame height in rows
    #[arg(long, default_value_t = 6, global = true)]
    height: u16,

    /// Number of progress updates to send
    #[arg(long, default_value_t = 60, global = true)]
    steps: u32,

    /// Pause between updates, in milliseconds
    #[arg(long, default_value_t = 25, global = true)]
    delay_ms: u64,

    /// Foreground color
    #[arg(long, default_value = "white", value_parser = parse_color, global = true)]
    fg: Color,

    /// Background color
    #[arg(long, default_value = "blue", value_parser = parse_color, global = true)]
    bg: Color,

    /// Fill the progress bar when its stream closes
    #[arg(long, global = true)]
    finish: bool,

    /// Log at debug level (to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Draw an empty frame
    Shell,
    /// Draw a one-line frame with aligned text
    Text {
        /// Text to place inside the frame
        #[arg(default_value = "ttyfx")]
        text: String,
        /// Horizontal alignment
        #[arg(long, value_enum, default_value_t = AlignArg::Center)]
        align: AlignArg,
    },
    /// Spin for `--steps` ticks
    Spinner,
    /// Run a progress bar for `--steps` updates
    Progress,
    /// Everything inside one frame (the default)
    All,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum AlignArg {
    Left,
    Right,
    Center,
}

impl From<AlignArg> for Align {
    fn from(a: AlignArg) -> Self {
        match a {
            AlignArg::Left => Self::Left,
            AlignArg::Right => Self::Right,
            AlignArg::Center => Self::Center,
        }
    }
}

fn parse_color(name: &str) -> Result<Color, String> {
    Color::from_name(name).ok_or_else(|| {
        let names: Vec<_> = Color::ALL.iter().map(|c| c.name()).collect();
        format!("unknown color `{name}` (expected one of: {})", names.join(", "))
    })
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let command = cli.command.clone().unwrap_or(Command::All);
    info!(?command, width = cli.width, height = cli.height, "starting");

    let mut out = io::stdout();
    ansi::hide_cursor(&mut out)?;
    let result = run(&cli, &command, out);

    // Whatever happened, hand the terminal back usable.
    let mut out = io::stdout();
    ansi::reset_attributes(&mut out)?;
    ansi::show_cursor(&mut out)?;
    out.flush()?;
    result
}

fn run(cli: &Cli, command: &Command, mut out: Stdout) -> Result<()> {
    match command {
        Command::Shell => {
            reserve(&mut out, cli.height)?;
            styled(&mut out, cli)?;
            shell::shell_checked(&mut out, cli.width, cli.height)?;
            ansi::reset_attributes(&mut out)?;
            writeln!(out)?;
        }
        Command::Text { text: label, align } => {
            reserve(&mut out, 3)?;
            styled(&mut out, cli)?;
            shell::shell_checked(&mut out, cli.width, 3)?;
            ansi::cursor_up(&mut out, 1)?;
            ansi::cursor_left(&mut out, cli.width - 1)?;
            text::text(&mut out, cli.width, (*align).into(), label)?;
            ansi::reset_attributes(&mut out)?;
            ansi::cursor_down(&mut out, 1)?;
            writeln!(out)?;
        }
        Command::Spinner => {
            write!(out, "\rworking  ")?;
            let out = spin(out, cli)?;
            finish_line(out)?;
        }
        Command::Progress => {
            write!(out, "\r")?;
            let out = fill(out, cli.width, cli)?;
            finish_line(out)?;
        }
        Command::All => all(cli, out)?,
    }
    Ok(())
}

/// Frame, title, bar and spinner laid out inside one box.
fn all(cli: &Cli, mut out: Stdout) -> Result<()> {
    let (width, height) = (cli.width, cli.height.max(5));
    if width < 8 {
        return Err(anyhow!("`all` needs --width of at least 8, got {width}"));
    }

    reserve(&mut out, height)?;
    styled(&mut out, cli)?;
    shell::shell_checked(&mut out, width, height)?;

    // Cursor is past the bottom-right corner. Step to the first interior
    // row and remember where the interior starts.
    ansi::cursor_up(&mut out, height - 2)?;
    ansi::cursor_left(&mut out, width - 1)?;
    ansi::save_cursor(&mut out)?;
    text::text(&mut out, width, Align::Center, "ttyfx")?;

    ansi::restore_cursor(&mut out)?;
    ansi::cursor_down(&mut out, 1)?;
    ansi::cursor_right(&mut out, 1)?;
    ansi::save_cursor(&mut out)?;
    let mut out = fill(out, width - 4, cli)?;

    ansi::restore_cursor(&mut out)?;
    ansi::cursor_down(&mut out, 1)?;
    write!(out, "working  ")?;
    let mut out = spin(out, cli)?;

    ansi::restore_cursor(&mut out)?;
    ansi::cursor_down(&mut out, height - 2)?;
    ansi::reset_attributes(&mut out)?;
    writeln!(out)?;
    Ok(())
}

// ─── Stream producers ───────────────────────────────────────────────────────

/// Feed a progress bar from this thread while it draws on its own.
fn fill(out: Stdout, width: u16, cli: &Cli) -> Result<Stdout> {
    let (tx, handle) = task::spawn_progress_bar(out, width);
    tx.send(cli.steps)?;
    for done in 1..=cli.steps {
        thread::sleep(Duration::from_millis(cli.delay_ms));
        tx.send(done)?;
    }
    drop(tx);

    let (mut out, mut bar) = handle
        .join()
        .map_err(|_| anyhow!("progress bar thread panicked"))??;
    debug!(last = bar.last(), complete = bar.is_complete(), "progress done");
    if cli.finish && !bar.is_complete() {
        bar.finish(&mut out)?;
    }
    Ok(out)
}

fn spin(out: Stdout, cli: &Cli) -> Result<Stdout> {
    let (tx, handle) = task::spawn_spinner(out);
    for tick in 0..cli.steps {
        tx.send(tick)?;
        thread::sleep(Duration::from_millis(cli.delay_ms));
    }
    drop(tx);
    let out = handle
        .join()
        .map_err(|_| anyhow!("spinner thread panicked"))??;
    Ok(out)
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Make room for `rows` lines below the cursor, scrolling if needed, then
/// return to the first of them, one column in from the left edge.
fn reserve(out: &mut impl Write, rows: u16) -> io::Result<()> {
    for _ in 0..rows {
        out.write_all(b"\n")?;
    }
    ansi::cursor_up(out, rows)?;
    out.write_all(b"\r")?;
    ansi::cursor_right(out, 1)
}

fn styled(out: &mut impl Write, cli: &Cli) -> io::Result<()> {
    ansi::colors(out, Fg(cli.fg), Bg(cli.bg))?;
    ansi::attribute(out, Attr::Bright)
}

fn finish_line(mut out: Stdout) -> io::Result<()> {
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttyfx_term::screen::Screen;

    #[test]
    fn cli_defaults_to_all() {
        let cli = Cli::parse_from(["ttyfx"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.width, 40);
        assert_eq!(cli.fg, Color::White);
        assert_eq!(cli.bg, Color::Blue);
    }

    #[test]
    fn cli_parses_subcommand_and_globals() {
        let cli = Cli::parse_from(["ttyfx", "text", "hello", "--align", "right", "-w", "20"]);
        assert_eq!(cli.width, 20);
        match cli.command {
            Some(Command::Text { text, align }) => {
                assert_eq!(text, "hello");
                assert_eq!(Align::from(align), Align::Right);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_color() {
        assert!(Cli::try_parse_from(["ttyfx", "--fg", "mauve"]).is_err());
        let cli = Cli::try_parse_from(["ttyfx", "--bg", "red"]).unwrap();
        assert_eq!(cli.bg, Color::Red);
    }

    #[test]
    fn reserve_returns_to_first_row() {
        let mut screen = Screen::new(10, 8);
        screen.feed(b"prompt$ ");
        reserve(&mut screen, 4).unwrap();
        assert_eq!(screen.cursor(), (1, 0));
    }

    #[test]
    fn framed_title_lands_inside_box() {
        let mut screen = Screen::new(20, 4);
        ansi::cursor_right(&mut screen, 1).unwrap();
        shell::shell(&mut screen, 12, 3).unwrap();
        ansi::cursor_up(&mut screen, 1).unwrap();
        ansi::cursor_left(&mut screen, 11).unwrap();
        text::text(&mut screen, 12, Align::Center, "ttyfx").unwrap();
        assert_eq!(screen.line(0), " ┌──────────┐");
        assert_eq!(screen.line(1), " │   ttyfx  │");
        assert_eq!(screen.line(2), " └──────────┘");
    }
}
