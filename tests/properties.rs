//! Property-based tests for guess evaluation and the game state machine

use proptest::prelude::*;
use std::collections::HashMap;
use wordle_clone::*;

/// Words over a small alphabet so duplicate letters are common.
fn word_strategy() -> impl Strategy<Value = Word> {
    prop_oneof!["[A-Z]{5}", "[ABELS]{5}"].prop_map(|s| Word::new(&s).unwrap())
}

fn letter_counts(word: &Word) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for c in word.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Property: credited letters never exceed their count in the solution
#[test]
fn prop_feedback_never_over_credits_letters() {
    proptest!(|(guess in word_strategy(), solution in word_strategy())| {
        let feedback = evaluate(&guess, &solution);
        prop_assert_eq!(feedback.statuses().len(), WORD_LENGTH);

        let mut credited: HashMap<char, usize> = HashMap::new();
        for (c, status) in guess.chars().zip(feedback.iter()) {
            if status != LetterStatus::Absent {
                *credited.entry(c).or_insert(0) += 1;
            }
        }
        let available = letter_counts(&solution);
        for (c, n) in credited {
            prop_assert!(n <= available.get(&c).copied().unwrap_or(0));
        }
    });
}

/// Property: Correct exactly where letters line up
#[test]
fn prop_correct_marks_exact_positions() {
    proptest!(|(guess in word_strategy(), solution in word_strategy())| {
        let feedback = evaluate(&guess, &solution);
        for (i, status) in feedback.iter().enumerate() {
            let same = guess.letters()[i] == solution.letters()[i];
            prop_assert_eq!(status == LetterStatus::Correct, same);
        }
    });
}

/// Property: a word scored against itself is all Correct
#[test]
fn prop_self_evaluation_is_solved() {
    proptest!(|(word in word_strategy())| {
        prop_assert!(evaluate(&word, &word).is_solved());
    });
}

/// Property: evaluation is deterministic
#[test]
fn prop_evaluation_is_idempotent() {
    proptest!(|(guess in word_strategy(), solution in word_strategy())| {
        prop_assert_eq!(evaluate(&guess, &solution), evaluate(&guess, &solution));
    });
}

fn dictionary() -> Dictionary {
    load_wordbank_from_str("crane\nslate\nraise\nstare\narise\nirate\natone\nstone")
        .into_iter()
        .collect()
}

/// Property: partial input never changes the session
#[test]
fn prop_incomplete_attempts_are_rejected() {
    proptest!(|(letters in "[a-zA-Z]{0,4}")| {
        let solution = Word::new("CRANE").unwrap();
        let mut game = Game::new(MemoryStore::new(), move |_: &Dictionary| Some(solution));
        game.initialize(dictionary(), None);

        for c in letters.chars() {
            game.submit_letter(c);
        }
        let transition = game.submit_attempt();

        prop_assert_eq!(transition.signal, Some(Signal::IncompleteAttempt));
        prop_assert_eq!(game.phase(), Phase::Playing);
        prop_assert!(game.attempts().is_empty());
    });
}

/// Property: restart always yields a clean session drawn from the dictionary
#[test]
fn prop_restart_yields_clean_session() {
    proptest!(|(seed in any::<u64>(), guesses in prop::collection::vec(0usize..8, 0..8))| {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let words = dictionary();
        let mut game = Game::new(
            MemoryStore::new(),
            RandomPicker::new(StdRng::seed_from_u64(seed)),
        );
        game.initialize(words.clone(), None);
        for i in guesses {
            game.enter_guess(words.words()[i].as_str());
        }
        game.submit_letter('Q');

        let transition = game.restart();
        prop_assert_eq!(transition.phase, Phase::Playing);
        prop_assert!(game.attempts().is_empty());
        prop_assert_eq!(game.current_input(), "");
        let solution = game.snapshot().unwrap().solution;
        prop_assert!(words.contains(&solution));
    });
}
