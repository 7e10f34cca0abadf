//! Game state machine and the loop that feeds it.
//!
//! # State Machine
//! `Loading` → `Playing` → `Won` | `Lost`
//!
//! - `Loading` lasts until a non-empty dictionary arrives. A failed load keeps
//!   the game here and records the error.
//! - `Won` and `Lost` accept no input; [`Game::restart`] starts a new session.
//!
//! Every operation returns a [`Transition`]. Rejected submissions carry a
//! [`Signal`] and leave the session untouched.

use crate::error::LoadError;
use crate::feedback::{Feedback, LetterHints, evaluate};
use crate::store::{self, KeyValueStore, PersistedSession, SessionStatus};
use crate::word::{WORD_LENGTH, Word};
use crate::wordbank::Dictionary;
use crate::{debug_log, info_log};
use rand::Rng;
use std::fmt;

pub const MAX_ATTEMPTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A submitted guess with its feedback, fixed at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    word: Word,
    feedback: Feedback,
}

impl Attempt {
    fn new(word: Word, solution: &Word) -> Self {
        Self {
            word,
            feedback: evaluate(&word, solution),
        }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }
}

/// Abstract key events, independent of where they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Letter(char),
    Submit,
    Delete,
}

/// Advisory message for a rejected submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    IncompleteAttempt,
    NotInWordList,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteAttempt => f.write_str("Not enough letters"),
            Self::NotInWordList => f.write_str("Not in word list"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub previous: Phase,
    pub phase: Phase,
    pub signal: Option<Signal>,
}

impl Transition {
    fn stay(phase: Phase) -> Self {
        Self {
            previous: phase,
            phase,
            signal: None,
        }
    }

    fn rejected(signal: Signal) -> Self {
        Self {
            previous: Phase::Playing,
            phase: Phase::Playing,
            signal: Some(signal),
        }
    }

    pub fn phase_changed(&self) -> bool {
        self.previous != self.phase
    }
}

/// Chooses the solution for a new session.
pub trait SolutionPicker {
    fn pick(&mut self, words: &Dictionary) -> Option<Word>;
}

/// Uniform choice driven by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomPicker<R> {
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SolutionPicker for RandomPicker<R> {
    fn pick(&mut self, words: &Dictionary) -> Option<Word> {
        words.choose(&mut self.rng)
    }
}

impl<F> SolutionPicker for F
where
    F: FnMut(&Dictionary) -> Option<Word>,
{
    fn pick(&mut self, words: &Dictionary) -> Option<Word> {
        self(words)
    }
}

/// Read-only snapshot for presentation code.
#[derive(Debug, Clone)]
pub struct GameView<'a> {
    pub phase: Phase,
    pub attempts: &'a [Attempt],
    pub current_input: &'a str,
    /// Only revealed once the game is over.
    pub solution: Option<Word>,
    pub attempts_remaining: usize,
    pub signal: Option<Signal>,
    pub load_error: Option<&'a LoadError>,
    pub hints: LetterHints,
}

/// One game session plus the collaborators it needs.
pub struct Game<S, P> {
    store: S,
    picker: P,
    words: Option<Dictionary>,
    solution: Option<Word>,
    attempts: Vec<Attempt>,
    input: String,
    phase: Phase,
    signal: Option<Signal>,
    load_error: Option<LoadError>,
}

impl<S: KeyValueStore, P: SolutionPicker> Game<S, P> {
    pub fn new(store: S, picker: P) -> Self {
        Self {
            store,
            picker,
            words: None,
            solution: None,
            attempts: Vec::new(),
            input: String::new(),
            phase: Phase::Loading,
            signal: None,
            load_error: None,
        }
    }

    /// Completion of the dictionary load.
    ///
    /// On success any saved session in the store is resumed. On failure the
    /// game stays in `Loading` with the error recorded.
    pub fn words_loaded(&mut self, result: Result<Dictionary, LoadError>) -> Transition {
        match result {
            Ok(words) => {
                let restored = store::load_session(&self.store);
                self.initialize(words, restored)
            }
            Err(e) => {
                log::error!("Unable to load word list: {e}");
                self.load_error = Some(e);
                Transition::stay(self.phase)
            }
        }
    }

    /// Leave `Loading` with either the restored session or a fresh solution.
    ///
    /// Restored guesses are adopted as they are, without checking them against
    /// `words`.
    pub fn initialize(
        &mut self,
        words: Dictionary,
        restored: Option<PersistedSession>,
    ) -> Transition {
        let previous = self.phase;
        if previous != Phase::Loading {
            debug_log!("initialize() - ignored in phase {:?}", previous);
            return Transition::stay(previous);
        }
        if words.is_empty() {
            log::error!("Unable to start: {}", LoadError::NoValidWords);
            self.load_error = Some(LoadError::NoValidWords);
            return Transition::stay(previous);
        }

        let (solution, guesses) = match restored {
            Some(session)
                if session.status == SessionStatus::Playing && session.is_resumable() =>
            {
                info_log!(
                    "initialize() - resuming session with {} guesses",
                    session.guesses.len()
                );
                (session.solution, session.guesses)
            }
            _ => match self.picker.pick(&words) {
                Some(solution) => (solution, Vec::new()),
                None => {
                    self.load_error = Some(LoadError::NoValidWords);
                    return Transition::stay(previous);
                }
            },
        };

        self.words = Some(words);
        self.start(solution, guesses);
        self.persist();
        Transition {
            previous,
            phase: self.phase,
            signal: None,
        }
    }

    pub fn submit_letter(&mut self, ch: char) -> Transition {
        if self.phase != Phase::Playing
            || self.input.len() >= WORD_LENGTH
            || !ch.is_ascii_alphabetic()
        {
            return Transition::stay(self.phase);
        }
        self.signal = None;
        self.input.push(ch.to_ascii_uppercase());
        debug_log!("submit_letter() - input now '{}'", self.input);
        Transition::stay(self.phase)
    }

    pub fn delete_letter(&mut self) -> Transition {
        if self.phase == Phase::Playing && self.input.pop().is_some() {
            self.signal = None;
            debug_log!("delete_letter() - input now '{}'", self.input);
        }
        Transition::stay(self.phase)
    }

    pub fn submit_attempt(&mut self) -> Transition {
        if self.phase != Phase::Playing {
            return Transition::stay(self.phase);
        }
        if self.input.len() < WORD_LENGTH {
            return self.reject(Signal::IncompleteAttempt);
        }
        let (Some(solution), Some(words)) = (self.solution, self.words.as_ref()) else {
            return Transition::stay(self.phase);
        };
        let word = match Word::new(&self.input) {
            Ok(word) if words.contains(&word) => word,
            _ => return self.reject(Signal::NotInWordList),
        };

        self.attempts.push(Attempt::new(word, &solution));
        self.input.clear();
        self.signal = None;
        info_log!(
            "submit_attempt() - attempt {} of {}: {}",
            self.attempts.len(),
            MAX_ATTEMPTS,
            word
        );

        if word == solution {
            self.phase = Phase::Won;
        } else if self.attempts.len() >= MAX_ATTEMPTS {
            self.phase = Phase::Lost;
        }

        if self.phase.is_over() {
            info_log!("submit_attempt() - game over: {:?}", self.phase);
            self.forget_session();
        } else {
            self.persist();
        }
        Transition {
            previous: Phase::Playing,
            phase: self.phase,
            signal: None,
        }
    }

    /// New session from the current dictionary. No-op while nothing is loaded.
    pub fn restart(&mut self) -> Transition {
        let previous = self.phase;
        let Some(words) = &self.words else {
            return Transition::stay(previous);
        };
        let Some(solution) = self.picker.pick(words) else {
            return Transition::stay(previous);
        };

        info_log!("restart() - new session from phase {:?}", previous);
        self.forget_session();
        self.start(solution, Vec::new());
        self.persist();
        Transition {
            previous,
            phase: self.phase,
            signal: None,
        }
    }

    /// Replace the dictionary, then [`restart`](Self::restart).
    pub fn restart_with(&mut self, words: Dictionary) -> Transition {
        if words.is_empty() {
            return Transition::stay(self.phase);
        }
        self.words = Some(words);
        self.restart()
    }

    pub fn handle_key(&mut self, key: KeyInput) -> Transition {
        match key {
            KeyInput::Letter(ch) => self.submit_letter(ch),
            KeyInput::Delete => self.delete_letter(),
            KeyInput::Submit => self.submit_attempt(),
        }
    }

    /// Replace the current input with `text` and submit it.
    pub fn enter_guess(&mut self, text: &str) -> Transition {
        if self.phase != Phase::Playing {
            return Transition::stay(self.phase);
        }
        self.input.clear();
        for ch in text.chars() {
            self.submit_letter(ch);
        }
        self.submit_attempt()
    }

    /// Drop the last rejection signal, e.g. once it has been shown long enough.
    pub fn dismiss_signal(&mut self) {
        self.signal = None;
    }

    fn start(&mut self, solution: Word, guesses: Vec<Word>) {
        self.attempts = guesses
            .into_iter()
            .map(|word| Attempt::new(word, &solution))
            .collect();
        self.solution = Some(solution);
        self.input.clear();
        self.signal = None;
        self.load_error = None;
        self.phase = Phase::Playing;
    }

    fn reject(&mut self, signal: Signal) -> Transition {
        debug_log!("reject() - {:?} for input '{}'", signal, self.input);
        self.signal = Some(signal);
        Transition::rejected(signal)
    }

    fn persist(&mut self) {
        let Some(session) = self.snapshot() else {
            return;
        };
        if let Err(e) = store::save_session(&mut self.store, &session) {
            log::warn!("Failed to save session: {e}");
        }
    }

    fn forget_session(&mut self) {
        if let Err(e) = store::clear_session(&mut self.store) {
            log::warn!("Failed to clear saved session: {e}");
        }
    }
}

impl<S, P> Game<S, P> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn current_input(&self) -> &str {
        &self.input
    }

    /// The solution, but only once the game is over.
    pub fn solution(&self) -> Option<Word> {
        if self.phase.is_over() {
            self.solution
        } else {
            None
        }
    }

    pub fn attempts_remaining(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.attempts.len())
    }

    pub fn last_signal(&self) -> Option<Signal> {
        self.signal
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    pub fn words(&self) -> Option<&Dictionary> {
        self.words.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keyboard_hints(&self) -> LetterHints {
        let mut hints = LetterHints::default();
        for attempt in &self.attempts {
            hints.record(&attempt.word, &attempt.feedback);
        }
        hints
    }

    /// What would be persisted right now; `None` unless playing.
    pub fn snapshot(&self) -> Option<PersistedSession> {
        match (self.phase, self.solution) {
            (Phase::Playing, Some(solution)) => Some(PersistedSession::playing(
                solution,
                self.attempts.iter().map(|a| a.word).collect(),
            )),
            _ => None,
        }
    }

    pub fn view(&self) -> GameView<'_> {
        GameView {
            phase: self.phase,
            attempts: &self.attempts,
            current_input: &self.input,
            solution: self.solution(),
            attempts_remaining: self.attempts_remaining(),
            signal: self.signal,
            load_error: self.load_error.as_ref(),
            hints: self.keyboard_hints(),
        }
    }
}

/// Requests coming from an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Key(KeyInput),
    /// A whole word typed at once (line-based input).
    Guess(String),
    Restart,
    Exit,
}

/// A frontend that can show the game and produce input.
pub trait GameInterface {
    fn render(&mut self, view: &GameView<'_>);

    /// `None` means no input this time around.
    fn read_action(&mut self) -> Option<UserAction>;

    fn show_transition(&mut self, transition: &Transition, view: &GameView<'_>) {
        let _ = transition;
        self.render(view);
    }

    /// Called when there was no input. Return `true` once the current
    /// rejection signal has been on screen long enough to drop it.
    fn idle(&mut self, _view: &GameView<'_>) -> bool {
        false
    }
}

/// Serialize interface input through the state machine until the user exits.
pub fn game_loop<S, P, I>(game: &mut Game<S, P>, interface: &mut I)
where
    S: KeyValueStore,
    P: SolutionPicker,
    I: GameInterface + ?Sized,
{
    interface.render(&game.view());

    loop {
        let Some(action) = interface.read_action() else {
            if interface.idle(&game.view()) {
                game.dismiss_signal();
                interface.render(&game.view());
            }
            continue;
        };
        debug_log!("game_loop() - action {:?}", action);

        let transition = match action {
            UserAction::Exit => {
                info_log!("game_loop() - exit requested");
                break;
            }
            UserAction::Key(key) => game.handle_key(key),
            UserAction::Guess(text) => game.enter_guess(&text),
            UserAction::Restart => game.restart(),
        };
        interface.show_transition(&transition, &game.view());
    }
}
