use crate::render;
use crate::session::Session;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use sudoku_engine::{Grid, Position, SolverKind};

/// Result of handling an input event
pub enum AppAction {
    Continue,
    Quit,
}

/// The application state: one editing session plus the cursor and theme
pub struct App {
    pub session: Session,
    pub cursor: Position,
    pub theme: Theme,
}

impl App {
    pub fn new(initial: Grid, theme: Theme) -> Self {
        Self {
            session: Session::new(initial),
            cursor: Position::new(4, 4),
            theme,
        }
    }

    /// Dispatch a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,

            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),

            KeyCode::Char(c @ '1'..='9') => {
                self.session.enter_digit(self.cursor, c as u8 - b'0');
            }
            KeyCode::Char('0') | KeyCode::Backspace | KeyCode::Delete => {
                self.session.enter_digit(self.cursor, 0);
            }

            KeyCode::Char('b') => self.session.solve(SolverKind::Backtracking),
            KeyCode::Char('d') => self.session.solve(SolverKind::ExactCover),
            KeyCode::Char('r') => self.session.reset(),

            _ => {}
        }
        AppAction::Continue
    }

    /// Dispatch a mouse click at a screen coordinate
    pub fn handle_click(&mut self, x: u16, y: u16) {
        if let Some(pos) = render::cell_at(x, y) {
            self.cursor = pos;
            self.session.clear_message();
        }
    }

    fn move_cursor(&mut self, drow: isize, dcol: isize) {
        let row = (self.cursor.row as isize + drow).clamp(0, 8) as usize;
        let col = (self.cursor.col as isize + dcol).clamp(0, 8) as usize;
        self.cursor = Position::new(row, col);
    }
}
