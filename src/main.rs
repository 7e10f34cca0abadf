use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;
use wordle_clone::cli::{Cli, CliInterface, parse_cli};
use wordle_clone::logging::{default_log_file, init_logging};
use wordle_clone::store::{FileStore, KeyValueStore, MemoryStore};
use wordle_clone::tui::TuiInterface;
use wordle_clone::wordbank::{EmbeddedWords, FileWords, WordSource, load_dictionary};
use wordle_clone::{Game, RandomPicker, game_loop, info_log};

fn open_store(cli: &Cli) -> Box<dyn KeyValueStore> {
    if cli.no_save {
        return Box::new(MemoryStore::new());
    }
    match cli.state_dir.clone().or_else(FileStore::default_dir) {
        Some(dir) => {
            info_log!("Saving sessions under {}", dir.display());
            Box::new(FileStore::new(dir))
        }
        None => {
            log::warn!("No data directory available; progress will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

fn word_source(cli: &Cli) -> Box<dyn WordSource> {
    match &cli.wordbank_path {
        Some(path) => Box::new(FileWords::new(path)),
        None => Box::new(EmbeddedWords),
    }
}

fn main() -> ExitCode {
    let cli = parse_cli();
    // The full-screen interface owns the terminal, so its logs go to a file.
    let log_file = match (&cli.log_file, cli.plain) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => None,
        (None, false) => default_log_file(),
    };
    init_logging(log_file.as_deref(), cli.plain);

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut game = Game::new(open_store(&cli), RandomPicker::new(rng));
    game.words_loaded(load_dictionary(word_source(&cli).as_mut()));

    if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut game, &mut interface);
        return ExitCode::SUCCESS;
    }

    match TuiInterface::new() {
        Ok(mut interface) => {
            game_loop(&mut game, &mut interface);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to start the terminal interface: {e}");
            eprintln!("Try --plain for line-based input.");
            ExitCode::FAILURE
        }
    }
}
