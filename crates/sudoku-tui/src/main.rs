mod app;
mod render;
mod session;
mod theme;

use app::{App, AppAction};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use sudoku_engine::Grid;
use theme::Theme;

/// The built-in demo puzzle (unique solution)
const DEFAULT_PUZZLE: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

/// Interactive Sudoku solver
#[derive(Parser)]
#[command(name = "sudoku", version, about)]
struct Cli {
    /// Puzzle as 81 characters, row-major, '0' or '.' for empty cells
    puzzle: Option<String>,

    /// Use the light color theme
    #[arg(long)]
    light: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Validate the puzzle before touching the terminal so contract
    // violations fail fast with a readable message.
    let initial = match Grid::from_string(cli.puzzle.as_deref().unwrap_or(DEFAULT_PUZZLE)) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("invalid puzzle: {}", err);
            std::process::exit(2);
        }
    };

    let theme = if cli.light {
        Theme::light()
    } else {
        Theme::dark()
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let result = run_app(&mut stdout, App::new(initial, theme));

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    result
}

fn run_app(stdout: &mut io::Stdout, mut app: App) -> io::Result<()> {
    loop {
        render::render(stdout, &app)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    break;
                }
                match app.handle_key(key) {
                    AppAction::Continue => {}
                    AppAction::Quit => break,
                }
            }
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    app.handle_click(mouse.column, mouse.row);
                }
            }
            _ => {}
        }
    }

    Ok(())
}
