use std::{fs, io, process};

use clap::Parser;
use hangman::{parse_words, Game};

mod console;

#[derive(Clone, Debug, Parser)]
#[clap(version, about = "Guess the word one letter at a time")]
struct Args {
    /// paths to word lists with extra words, one word per line
    paths: Vec<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(&Args::parse()) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();

    let paths = if args.paths.is_empty() {
        console::filename_prompt(&mut input, &mut output)?
            .into_iter()
            .collect()
    } else {
        args.paths.clone()
    };

    let mut game = Game::default();
    for path in &paths {
        match fs::read_to_string(path) {
            Ok(text) => {
                let words = parse_words(&text);
                log::info!("loaded {} words from {path}", words.len());
                game.add_words(words);
            }
            Err(e) => {
                log::warn!("failed to read {path}: {e}");
                console::file_error(&mut output, path)?;
            }
        }
    }

    console::play(&mut game, &mut input, &mut output)?;
    Ok(())
}
