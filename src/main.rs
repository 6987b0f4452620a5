use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use retype::{
    buffer::TextBuffer,
    config::{Config, ConfigStore, FileConfigStore},
    language, loader,
    metrics::Summary,
    picker::Picker,
    runtime::{
        Clock, CrosstermEventSource, EventSource, FixedTicker, Runner, SessionEvent,
        SystemClock, Ticker,
    },
    session::{Applied, KeyPress, Session},
    ui::{self, ColorMode, Theme},
};

const TICK_RATE_MS: u64 = 100;

/// practice typing by retyping real source files
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Practice typing against your own source files: the file is shown page by page, every keystroke is scored, and the session ends with accuracy and words-per-minute."
)]
struct Cli {
    /// file to practice on; opens the file picker when omitted
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// override the tab width inferred from the file extension
    #[clap(short = 't', long)]
    tab_width: Option<usize>,

    /// color handling
    #[clap(long, value_enum)]
    color: Option<ColorMode>,

    /// show hidden files in the picker
    #[clap(long)]
    hidden: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = FileConfigStore::new().load();

    // resolve a command-line path before the terminal is touched, so a bad
    // path fails with a plain message and a non-zero exit
    let preloaded = match &cli.file {
        Some(path) => match loader::load_lines(path) {
            Ok(lines) => Some((path.clone(), lines)),
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        None => None,
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let result = run(&mut terminal, &runner, &cli, &config, preloaded);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

fn run<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    runner: &Runner<E, T>,
    cli: &Cli,
    config: &Config,
    preloaded: Option<(PathBuf, Vec<String>)>,
) -> Result<(), Box<dyn Error>> {
    let (theme, warning) = Theme::select(cli.color.unwrap_or(config.color));

    let (path, lines) = match preloaded {
        Some(loaded) => loaded,
        None => match pick_file(terminal, runner, config.show_hidden || cli.hidden)? {
            Some(path) => {
                let lines = loader::load_lines(&path)?;
                (path, lines)
            }
            // picker cancelled: a normal exit
            None => return Ok(()),
        },
    };

    let tab_width = cli
        .tab_width
        .unwrap_or_else(|| language::resolve_tab_width(&path, config.tab_width));
    let buffer = TextBuffer::new(lines, tab_width)?;
    let height = terminal.size()?.height as usize;
    let mut session = Session::new(buffer, height);

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("practice")
        .to_owned();
    terminal.draw(|f| ui::render_ready(f, &file_name, warning))?;
    if !wait_for_key(runner) {
        return Ok(());
    }

    // elapsed time is wall-clock from the first page render to loop exit
    let clock = SystemClock;
    let started = clock.now();

    'pages: while session.pages_remaining() {
        terminal.draw(|f| ui::render_page(f, &session, &theme))?;

        while !session.end_of_page() {
            match runner.step() {
                SessionEvent::Tick => {}
                SessionEvent::Resize => {
                    terminal.draw(|f| ui::render_page(f, &session, &theme))?;
                }
                SessionEvent::Key(key) => {
                    let Some(press) = translate_key(key) else {
                        continue;
                    };
                    match session.apply(press) {
                        Applied::Aborted => break 'pages,
                        Applied::ExpandTab(width) => {
                            for _ in 0..width {
                                runner.inject_key(KeyEvent::new(
                                    KeyCode::Char(' '),
                                    KeyModifiers::NONE,
                                ));
                            }
                        }
                        Applied::Scored(_) | Applied::Retreated => {}
                    }
                    terminal.draw(|f| ui::render_page(f, &session, &theme))?;
                }
            }
        }

        let height = terminal.size()?.height as usize;
        session.advance_page(height);
    }

    let elapsed = clock.now() - started;
    let summary = Summary::compute(session.correct(), session.wrong(), elapsed);
    terminal.draw(|f| ui::render_summary(f, summary.as_ref()))?;
    wait_for_key(runner);

    Ok(())
}

/// Run the picker until a file is chosen or the user cancels.
fn pick_file<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    runner: &Runner<E, T>,
    show_hidden: bool,
) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let mut picker = Picker::new(std::env::current_dir()?, show_hidden)?;

    loop {
        terminal.draw(|f| ui::render_picker(f, &picker))?;
        if let SessionEvent::Key(key) = runner.step() {
            match key.code {
                KeyCode::Esc => return Ok(None),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(None)
                }
                KeyCode::Up => picker.move_up(),
                KeyCode::Down => picker.move_down(),
                KeyCode::Enter => {
                    if let Some(path) = picker.enter()? {
                        return Ok(Some(path));
                    }
                }
                KeyCode::Backspace => picker.ascend()?,
                _ => {}
            }
        }
    }
}

/// Block until any key arrives; false means the user asked to leave.
fn wait_for_key<E: EventSource, T: Ticker>(runner: &Runner<E, T>) -> bool {
    loop {
        if let SessionEvent::Key(key) = runner.step() {
            return !matches!(translate_key(key), Some(KeyPress::Escape));
        }
    }
}

/// Terminal key event to session alphabet. Keys outside the alphabet
/// (arrows, function keys) are dropped before the core sees them.
fn translate_key(key: KeyEvent) -> Option<KeyPress> {
    match key.code {
        KeyCode::Esc => Some(KeyPress::Escape),
        KeyCode::Backspace => Some(KeyPress::Backspace),
        KeyCode::Enter => Some(KeyPress::Enter),
        KeyCode::Tab => Some(KeyPress::Tab),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // ctrl+c aborts like escape
            Some(KeyPress::Escape)
        }
        KeyCode::Char(c) => Some(KeyPress::Char(c)),
        _ => None,
    }
}
