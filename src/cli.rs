use crate::feedback::LetterStatus;
use crate::game_state::{GameInterface, GameView, MAX_ATTEMPTS, Phase, Transition, UserAction};
use crate::word::WORD_LENGTH;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Guess the hidden five-letter word in six tries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list (defaults to the bundled list)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Directory that holds the saved in-progress game
    #[arg(long = "state-dir", conflicts_with = "no_save")]
    pub state_dir: Option<PathBuf>,

    /// Do not save or resume games
    #[arg(long = "no-save")]
    pub no_save: bool,

    /// Seed for choosing solutions, for repeatable games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Write log output to this file. The full-screen interface logs to
    /// `wordle-clone.log` in the local data directory by default.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn is_guess_shaped(text: &str) -> bool {
    !text.is_empty()
        && text.chars().count() <= WORD_LENGTH
        && text.chars().all(|c| c.is_ascii_alphabetic())
}

/// Read one line and turn it into an action.
///
/// `None` means the line was refused locally and nothing reaches the game.
pub fn read_guess<R: BufRead>(reader: &mut R) -> Option<UserAction> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => return Some(UserAction::Exit),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to read input: {e}");
            return Some(UserAction::Exit);
        }
    }
    let input = input.trim().to_uppercase();

    match input.as_str() {
        "EXIT" => Some(UserAction::Exit),
        "NEXT" => Some(UserAction::Restart),
        _ if is_guess_shaped(&input) => Some(UserAction::Guess(input)),
        _ => {
            println!("Invalid guess. Please enter up to 5 letters.");
            None
        }
    }
}

/// One line per attempt: the word and its `G`/`Y`/`X` code.
pub fn format_board(view: &GameView<'_>) -> Vec<String> {
    view.attempts
        .iter()
        .enumerate()
        .map(|(i, attempt)| {
            let code: String = attempt.feedback().iter().map(LetterStatus::to_char).collect();
            format!("{}. {}  {}", i + 1, attempt.word(), code)
        })
        .collect()
}

pub fn display_board(view: &GameView<'_>) {
    for line in format_board(view) {
        println!("{line}");
    }
}

pub fn display_prompt(view: &GameView<'_>) {
    println!(
        "\nEnter your guess ({} of {}), 'next' for a new game or 'exit' to quit:",
        MAX_ATTEMPTS - view.attempts_remaining + 1,
        MAX_ATTEMPTS
    );
}

pub fn display_outcome(view: &GameView<'_>) {
    match (view.phase, view.solution) {
        (Phase::Won, _) => println!(
            "You won in {}/{}! Type 'next' to play again.",
            view.attempts.len(),
            MAX_ATTEMPTS
        ),
        (Phase::Lost, Some(solution)) => {
            println!("Game over. The word was {solution}. Type 'next' to play again.");
        }
        _ => {}
    }
}

/// Line-oriented implementation of [`GameInterface`].
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn render(&mut self, view: &GameView<'_>) {
        match view.phase {
            Phase::Loading => {
                if let Some(e) = view.load_error {
                    println!("Unable to load the word list: {e}");
                    println!("Type 'exit' to quit.");
                } else {
                    println!("Loading dictionary...");
                }
            }
            Phase::Playing => {
                display_board(view);
                display_prompt(view);
            }
            Phase::Won | Phase::Lost => {
                display_board(view);
                display_outcome(view);
            }
        }
    }

    fn read_action(&mut self) -> Option<UserAction> {
        read_guess(&mut self.reader)
    }

    fn show_transition(&mut self, transition: &Transition, view: &GameView<'_>) {
        if let Some(signal) = transition.signal {
            println!("{signal}");
            return;
        }
        if transition.phase == Phase::Playing && transition.previous != Phase::Playing {
            println!("New game started.");
        }
        self.render(view);
    }
}
