use std::io::{self, BufRead, Write};

use hangman::{Game, MAX_MISSES};
use rand::Rng;

/// One picture per miss count, from an empty gallows to a full hangman.
const GALLOWS: [&str; MAX_MISSES + 1] = [
    r"
   +-----+
   |     |
         |
         |
         |
         |
 =========",
    r"
   +-----+
   |     |
   O     |
         |
         |
         |
 =========",
    r"
   +-----+
   |     |
   O     |
   |     |
         |
         |
 =========",
    r"
   +-----+
   |     |
   O     |
  /|     |
         |
         |
 =========",
    r"
   +-----+
   |     |
   O     |
  /|\    |
         |
         |
 =========",
    r"
   +-----+
   |     |
   O     |
  /|\    |
  /      |
         |
 =========",
    r"
   +-----+
   |     |
   O     |
  /|\    |
  / \    |
         |
 =========",
];

/// Ask whether extra words should be loaded, returning the file name if so.
pub fn filename_prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<String>> {
    writeln!(output, "Do you want to load words from a file? [y/N]")?;
    let answer = read_line(input)?.unwrap_or_default();
    if !answer.to_lowercase().starts_with('y') {
        return Ok(None);
    }

    writeln!(output, "Enter the file name: ")?;
    Ok(read_line(input)?.filter(|name| !name.is_empty()))
}

pub fn file_error<W: Write>(output: &mut W, path: &str) -> io::Result<()> {
    writeln!(output, "Could not read file `{path}`, using internal dictionary.")
}

/// Play rounds until the game is over, the player quits or the input runs out.
pub fn play<G, R, W>(game: &mut Game<G>, input: &mut R, output: &mut W) -> io::Result<()>
where
    G: Rng,
    R: BufRead,
    W: Write,
{
    game.reset();

    while !game.is_game_over() {
        writeln!(output, "The word is {}", game.masked_word())?;
        writeln!(output, "Enter a letter (or quit/restart): ")?;

        let response = match read_response(input)? {
            Some(response) => response,
            None => break,
        };

        match response.as_str() {
            "quit" => break,
            "restart" => {
                game.reset();
                continue;
            }
            guess => match game.try_letter(guess) {
                Ok(correct) => print_guess(output, correct, game.misses())?,
                Err(e) => {
                    log::debug!("{e}");
                    writeln!(output, "Your guess was too long!\n")?;
                    continue;
                }
            },
        }

        if game.is_round_over() {
            let word = game.current_word().unwrap_or_default();
            writeln!(output, "You've won this round! The word was: {word}\n")?;
            game.reset();
        }
    }

    if game.did_win() {
        writeln!(output, "Congratulations, you've guessed all of my words!")?;
    } else if let Some(word) = game.current_word() {
        writeln!(output, "You've lost! The word was: {word}")?;
    } else {
        writeln!(output, "You've lost! Some words were skipped.")?;
    }
    writeln!(output)
}

fn print_guess<W: Write>(output: &mut W, correct: bool, misses: usize) -> io::Result<()> {
    writeln!(output, "{}", GALLOWS[misses.min(MAX_MISSES)])?;
    if correct {
        writeln!(output, "Your guess was correct!")?;
    } else {
        writeln!(output, "Your guess was wrong!")?;
    }
    writeln!(output, "You have missed {misses} times so far.\n")
}

/// Read lines until one is not empty. `None` means the input is exhausted.
fn read_response<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    while let Some(line) = read_line(input)? {
        if !line.is_empty() {
            return Ok(Some(line));
        }
    }
    Ok(None)
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_owned()))
}
