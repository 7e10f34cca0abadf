// Library interface for wordle-clone
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod store;
pub mod tui;
pub mod word;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{LoadError, StoreError, WordError};
pub use feedback::{Feedback, LetterHints, LetterStatus, evaluate, evaluate_str};
pub use game_state::{
    Game, GameInterface, GameView, KeyInput, MAX_ATTEMPTS, Phase, RandomPicker, Signal,
    SolutionPicker, Transition, UserAction, game_loop,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, PersistedSession, SESSION_KEY};
pub use word::{WORD_LENGTH, Word};
pub use wordbank::{
    Dictionary, EmbeddedWords, FileWords, WordSource, load_dictionary, load_wordbank_from_file,
    load_wordbank_from_str,
};
