//! TUI (Terminal User Interface) for the game
//!
//! Renders the board, an on-screen keyboard coloured by what each letter is
//! known to be, the current advisory message and, once a game ends, a result
//! overlay.
//!
//! # Keys
//! - Letters, `ENTER` and `BACKSPACE` go to the game as [`KeyInput`]s.
//! - `CTRL-R` starts a new game at any time, `ESC` quits.
//! - With the result overlay up: `ENTER`/`N` play again, `C` closes the overlay.

use crate::feedback::LetterStatus;
use crate::game_state::{
    GameInterface, GameView, KeyInput, MAX_ATTEMPTS, Phase, Transition, UserAction,
};
use crate::word::WORD_LENGTH;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

const MESSAGE_DURATION: Duration = Duration::from_secs(2);
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];
const BOARD_HEIGHT: u16 = MAX_ATTEMPTS as u16 * 2 + 1;
const OVERLAY_WIDTH: u16 = 36;
const OVERLAY_HEIGHT: u16 = 7;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Background and foreground for a tile or key.
fn status_colors(status: Option<LetterStatus>) -> (Color, Color) {
    match status {
        None => (Color::DarkGray, Color::White),
        Some(LetterStatus::Correct) => (Color::Green, Color::Black),
        Some(LetterStatus::Present) => (Color::Yellow, Color::Black),
        Some(LetterStatus::Absent) => (Color::Gray, Color::White),
    }
}

fn tile(letter: char, status: Option<LetterStatus>) -> Span<'static> {
    let (bg, fg) = status_colors(status);
    Span::styled(format!(" {letter} "), Style::default().fg(fg).bg(bg))
}

/// What a key press means here.
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyCommand {
    Action(UserAction),
    HideOverlay,
    Ignore,
}

fn map_key(key: KeyEvent, game_over: bool) -> KeyCommand {
    // Release and repeat events would double the input.
    if key.kind != KeyEventKind::Press {
        return KeyCommand::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => KeyCommand::Action(UserAction::Exit),
        KeyCode::Char('c') if ctrl => KeyCommand::Action(UserAction::Exit),
        KeyCode::Char('r') if ctrl => KeyCommand::Action(UserAction::Restart),
        _ if ctrl || alt => KeyCommand::Ignore,
        KeyCode::Enter if game_over => KeyCommand::Action(UserAction::Restart),
        KeyCode::Char('n' | 'N') if game_over => KeyCommand::Action(UserAction::Restart),
        KeyCode::Char('c' | 'C') if game_over => KeyCommand::HideOverlay,
        _ if game_over => KeyCommand::Ignore,
        KeyCode::Enter => KeyCommand::Action(UserAction::Key(KeyInput::Submit)),
        KeyCode::Backspace => KeyCommand::Action(UserAction::Key(KeyInput::Delete)),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            KeyCommand::Action(UserAction::Key(KeyInput::Letter(c)))
        }
        _ => KeyCommand::Ignore,
    }
}

/// Full-screen implementation of [`GameInterface`].
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    overlay_visible: bool,
    game_over: bool,
    signal_shown_at: Option<Instant>,
    needs_redraw: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            overlay_visible: false,
            game_over: false,
            signal_shown_at: None,
            needs_redraw: false,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self, view: &GameView<'_>) -> Result<(), io::Error> {
        let overlay = self.overlay_visible && view.phase.is_over();
        self.terminal.draw(|f| render_frame(f, view, overlay))?;
        Ok(())
    }

    fn draw_or_log(&mut self, view: &GameView<'_>) {
        self.needs_redraw = false;
        if let Err(e) = self.draw(view) {
            debug_log!("Draw error: {}", e);
        }
    }
}

impl GameInterface for TuiInterface {
    fn render(&mut self, view: &GameView<'_>) {
        self.game_over = view.phase.is_over();
        self.draw_or_log(view);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        let ready = match event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS)) {
            Ok(ready) => ready,
            Err(e) => {
                log::error!("Failed to poll terminal events: {e}");
                return Some(UserAction::Exit);
            }
        };
        if !ready {
            return None;
        }

        match event::read() {
            Ok(Event::Key(key)) => match map_key(key, self.game_over) {
                KeyCommand::Action(action) => Some(action),
                KeyCommand::HideOverlay => {
                    self.overlay_visible = false;
                    self.needs_redraw = true;
                    None
                }
                KeyCommand::Ignore => {
                    debug_log!("read_action() - ignoring key {:?}", key.code);
                    None
                }
            },
            Ok(Event::Resize(_, _)) => {
                self.needs_redraw = true;
                None
            }
            Ok(_) => None,
            Err(e) => {
                log::error!("Failed to read terminal event: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn show_transition(&mut self, transition: &Transition, view: &GameView<'_>) {
        if transition.signal.is_some() {
            self.signal_shown_at = Some(Instant::now());
        }
        if transition.phase_changed() {
            self.overlay_visible = transition.phase.is_over();
        }
        self.render(view);
    }

    fn idle(&mut self, view: &GameView<'_>) -> bool {
        let expired = self
            .signal_shown_at
            .is_some_and(|shown| shown.elapsed() >= MESSAGE_DURATION);
        if expired {
            self.signal_shown_at = None;
            return true;
        }
        if self.needs_redraw {
            self.draw_or_log(view);
        }
        false
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            debug_log!("Terminal cleanup failed: {}", e);
        }
    }
}

fn render_frame(f: &mut Frame, view: &GameView<'_>, overlay: bool) {
    let area = f.area();
    if view.phase == Phase::Loading {
        render_loading(f, area, view);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                // Title
            Constraint::Length(BOARD_HEIGHT + 2), // Board
            Constraint::Length(5),                // Keyboard
            Constraint::Length(3),                // Message
            Constraint::Min(3),                   // Instructions
        ])
        .split(area);

    render_title(f, chunks[0]);
    render_board(f, chunks[1], view);
    render_keyboard(f, chunks[2], view);
    render_message(f, chunks[3], view);
    render_instructions(f, chunks[4], view.phase);

    if overlay {
        render_overlay(f, area, view);
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("WORDLE")
        .style(HEADER_STYLE)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_loading(f: &mut Frame, area: Rect, view: &GameView<'_>) {
    let lines = match view.load_error {
        Some(e) => vec![
            Line::from(Span::styled("Unable to load the word list", ERROR_STYLE)),
            Line::from(e.to_string()),
            Line::from(""),
            Line::from("ESC: Quit"),
        ],
        None => vec![Line::from("Loading dictionary...")],
    };
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Wordle").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// Submitted rows, then the row being typed, then empty rows.
fn board_lines(view: &GameView<'_>) -> Vec<Line<'static>> {
    let mut rows: Vec<Vec<Span>> = view
        .attempts
        .iter()
        .map(|attempt| {
            attempt
                .word()
                .chars()
                .zip(attempt.feedback().iter())
                .map(|(letter, status)| tile(letter, Some(status)))
                .collect()
        })
        .collect();

    if view.phase == Phase::Playing && rows.len() < MAX_ATTEMPTS {
        let mut typed = view.current_input.chars();
        rows.push(
            (0..WORD_LENGTH)
                .map(|_| tile(typed.next().unwrap_or(' '), None))
                .collect(),
        );
    }
    while rows.len() < MAX_ATTEMPTS {
        rows.push((0..WORD_LENGTH).map(|_| tile(' ', None)).collect());
    }

    let mut lines = Vec::with_capacity(MAX_ATTEMPTS * 2);
    for row in rows {
        let mut spans = Vec::with_capacity(WORD_LENGTH * 2);
        for span in row {
            spans.push(span);
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    lines
}

fn render_board(f: &mut Frame, area: Rect, view: &GameView<'_>) {
    let title = format!("Attempts left: {}", view.attempts_remaining);
    let paragraph = Paragraph::new(board_lines(view))
        .alignment(Alignment::Center)
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_keyboard(f: &mut Frame, area: Rect, view: &GameView<'_>) {
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .flat_map(|c| [tile(c, view.hints.get(c)), Span::raw(" ")])
                .collect();
            Line::from(spans)
        })
        .collect();
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("Keyboard").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_message(f: &mut Frame, area: Rect, view: &GameView<'_>) {
    let text = match (view.signal, view.phase, view.solution) {
        (Some(signal), _, _) => Span::styled(signal.to_string(), MESSAGE_STYLE),
        (None, Phase::Won, _) => Span::styled("Solved!", SUCCESS_STYLE),
        (None, Phase::Lost, Some(solution)) => {
            Span::styled(format!("The word was {solution}"), ERROR_STYLE)
        }
        _ => Span::raw(""),
    };
    let paragraph = Paragraph::new(Line::from(text))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, phase: Phase) {
    let text = match phase {
        Phase::Playing => {
            "Type letters | ENTER: Submit | BACKSPACE: Delete | CTRL-R: New game | ESC: Quit"
        }
        Phase::Won | Phase::Lost => "ENTER/N: New game | C: Close overlay | ESC: Quit",
        Phase::Loading => "ESC: Quit",
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_overlay(f: &mut Frame, area: Rect, view: &GameView<'_>) {
    let (title, body, style) = match (view.phase, view.solution) {
        (Phase::Won, _) => (
            "You won!",
            format!("Solved in {}/{}. Great job!", view.attempts.len(), MAX_ATTEMPTS),
            SUCCESS_STYLE,
        ),
        (_, Some(solution)) => ("Game over", format!("Correct word: {solution}"), ERROR_STYLE),
        _ => return,
    };

    let popup = centered_rect(OVERLAY_WIDTH, OVERLAY_HEIGHT, area);
    let lines = vec![
        Line::from(Span::styled(body, style)),
        Line::from(""),
        Line::from("ENTER: Play again"),
        Line::from("C: Continue"),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Game;
    use crate::store::MemoryStore;
    use crate::word::Word;
    use crate::wordbank::Dictionary;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn action(key: KeyInput) -> KeyCommand {
        KeyCommand::Action(UserAction::Key(key))
    }

    #[test]
    fn test_map_key_while_playing() {
        assert_eq!(
            map_key(press(KeyCode::Char('a')), false),
            action(KeyInput::Letter('a'))
        );
        assert_eq!(map_key(press(KeyCode::Enter), false), action(KeyInput::Submit));
        assert_eq!(
            map_key(press(KeyCode::Backspace), false),
            action(KeyInput::Delete)
        );
        assert_eq!(map_key(press(KeyCode::Char('1')), false), KeyCommand::Ignore);
        assert_eq!(map_key(press(KeyCode::Tab), false), KeyCommand::Ignore);
    }

    #[test]
    fn test_map_key_control_keys() {
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(
            map_key(ctrl_r, false),
            KeyCommand::Action(UserAction::Restart)
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, true), KeyCommand::Action(UserAction::Exit));
        let alt_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT);
        assert_eq!(map_key(alt_a, false), KeyCommand::Ignore);
        assert_eq!(
            map_key(press(KeyCode::Esc), false),
            KeyCommand::Action(UserAction::Exit)
        );
    }

    #[test]
    fn test_map_key_after_game_over() {
        assert_eq!(
            map_key(press(KeyCode::Enter), true),
            KeyCommand::Action(UserAction::Restart)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('N')), true),
            KeyCommand::Action(UserAction::Restart)
        );
        assert_eq!(map_key(press(KeyCode::Char('c')), true), KeyCommand::HideOverlay);
        assert_eq!(map_key(press(KeyCode::Char('a')), true), KeyCommand::Ignore);
    }

    #[test]
    fn test_map_key_ignores_release() {
        let mut key = press(KeyCode::Char('a'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key, false), KeyCommand::Ignore);
    }

    #[test]
    fn test_board_lines_layout() {
        let words: Dictionary = ["CRANE", "SLATE"]
            .iter()
            .map(|w| Word::new(w).unwrap())
            .collect();
        let solution = Word::new("CRANE").unwrap();
        let mut game = Game::new(MemoryStore::new(), move |_: &Dictionary| Some(solution));
        game.initialize(words, None);
        game.enter_guess("SLATE");
        game.submit_letter('C');

        let lines = board_lines(&game.view());
        assert_eq!(lines.len(), MAX_ATTEMPTS * 2);
        assert_eq!(lines[0].spans[0].content, " S ");
        assert_eq!(lines[0].spans[0].style.bg, Some(Color::Gray));
        assert_eq!(lines[0].spans[4].style.bg, Some(Color::Green));
        assert_eq!(lines[2].spans[0].content, " C ");
        assert_eq!(lines[2].spans[2].content, "   ");
    }

    #[test]
    fn test_centered_rect_fits_small_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(OVERLAY_WIDTH, OVERLAY_HEIGHT, area);
        assert_eq!(rect, Rect::new(0, 0, 20, 5));
        let rect = centered_rect(10, 3, Rect::new(0, 0, 20, 9));
        assert_eq!(rect, Rect::new(5, 3, 10, 3));
    }
}
