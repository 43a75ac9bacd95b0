use crate::app::App;
use crate::session::MessageKind;
use crossterm::{
    cursor::{Hide, MoveTo},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io;
use sudoku_engine::Position;

/// Top-left corner of the grid on screen
pub const GRID_X: u16 = 2;
pub const GRID_Y: u16 = 1;

/// Screen column of a cell's digit
fn cell_x(col: usize) -> u16 {
    GRID_X + 2 + 2 * col as u16 + 2 * (col / 3) as u16
}

/// Screen row of a cell's digit
fn cell_y(row: usize) -> u16 {
    GRID_Y + 1 + row as u16 + (row / 3) as u16
}

/// Map a screen coordinate (e.g. a mouse click) back to the cell it lands
/// on, if any. A click on the blank padding next to a digit still counts.
pub fn cell_at(x: u16, y: u16) -> Option<Position> {
    let row = (0..9).find(|&r| cell_y(r) == y)?;
    let col = (0..9).find(|&c| {
        let cx = cell_x(c);
        x + 1 >= cx && x <= cx + 1
    })?;
    Some(Position::new(row, col))
}

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(theme.bg),
        Clear(ClearType::All)
    )?;

    render_grid(stdout, app)?;
    render_message(stdout, app)?;
    render_controls(stdout, app)?;

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;

    // Borders: thick lines on box boundaries only.
    //   ╔═══════╦═══════╦═══════╗
    //   ║ 5 3 . ║ . 7 . ║ . . . ║
    let top = "╔═══════╦═══════╦═══════╗";
    let mid = "╠═══════╬═══════╬═══════╣";
    let bottom = "╚═══════╩═══════╩═══════╝";

    execute!(
        stdout,
        MoveTo(GRID_X, GRID_Y),
        SetForegroundColor(theme.box_border),
        Print(top)
    )?;
    execute!(stdout, MoveTo(GRID_X, cell_y(2) + 1), Print(mid))?;
    execute!(stdout, MoveTo(GRID_X, cell_y(5) + 1), Print(mid))?;
    execute!(stdout, MoveTo(GRID_X, cell_y(8) + 1), Print(bottom))?;

    for row in 0..9 {
        let y = cell_y(row);
        for band in 0..4u16 {
            let x = GRID_X + 8 * band;
            execute!(
                stdout,
                MoveTo(x, y),
                SetForegroundColor(theme.box_border),
                Print("║")
            )?;
        }
        for col in 0..9 {
            render_cell(stdout, app, Position::new(row, col))?;
        }
    }

    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position) -> io::Result<()> {
    let theme = &app.theme;
    let value = app.session.grid().get(pos);

    let fg = if app.session.is_conflict(pos) {
        theme.error
    } else if app.session.is_fixed(pos) {
        theme.fixed
    } else {
        theme.filled
    };
    let bg = if pos == app.cursor {
        theme.selected_bg
    } else {
        theme.bg
    };

    let glyph = if value == 0 {
        '.'
    } else {
        (b'0' + value) as char
    };

    execute!(
        stdout,
        MoveTo(cell_x(pos.col), cell_y(pos.row)),
        SetBackgroundColor(bg),
        SetForegroundColor(if value == 0 { theme.border } else { fg }),
        Print(glyph),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}

fn render_message(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    let y = cell_y(8) + 3;

    if let Some(message) = app.session.message() {
        let color = match message.kind {
            MessageKind::Info => theme.fg,
            MessageKind::Success => theme.success,
            MessageKind::Error => theme.error,
        };
        execute!(
            stdout,
            MoveTo(GRID_X, y),
            SetForegroundColor(color),
            Print(&message.text)
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    let y = cell_y(8) + 5;

    let lines: [(&str, &str); 4] = [
        ("arrows/click", "select cell"),
        ("1-9, 0/del", "enter / clear digit"),
        ("b / d", "solve (backtracking / exact cover)"),
        ("r / q", "reset / quit"),
    ];

    for (i, (keys, what)) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(GRID_X, y + i as u16),
            SetForegroundColor(theme.key),
            Print(format!("{:<13}", keys)),
            SetForegroundColor(theme.fg),
            Print(*what)
        )?;
    }

    Ok(())
}
