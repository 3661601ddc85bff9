use rand::Rng;
use squirrel_rng::SquirrelRng;

/// Words every new source starts with, unless it is created with [`WordSource::empty`].
pub const DEFAULT_WORDS: [&str; 6] = ["koło", "drzwi", "drzewo", "powóz", "pole", "słońce"];

/// A pool of words that are drawn at random and never put back.
///
/// Besides the pool itself, the source remembers how many words were ever added to it. A game
/// is only won once that many words have been solved.
#[derive(Debug)]
pub struct WordSource<R = SquirrelRng> {
    words: Vec<String>,
    total_added: usize,
    rng: R,
}

impl WordSource {
    pub fn new() -> Self {
        Self::with_rng(SquirrelRng::new())
    }

    pub fn empty() -> Self {
        Self::empty_with_rng(SquirrelRng::new())
    }
}

impl Default for WordSource {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> WordSource<R> {
    /// Create a source holding the default words, drawing with `rng`.
    pub fn with_rng(rng: R) -> Self {
        let mut source = Self::empty_with_rng(rng);
        source.add_words(DEFAULT_WORDS);
        source
    }

    pub fn empty_with_rng(rng: R) -> Self {
        Self {
            words: Vec::new(),
            total_added: 0,
            rng,
        }
    }

    /// Remove a random word from the pool, or return `None` once the pool has run dry.
    pub fn draw(&mut self) -> Option<String> {
        if self.words.is_empty() {
            return None;
        }

        let idx = self.rng.gen_range(0..self.words.len());
        let word = self.words.swap_remove(idx);
        log::debug!("drew {word:?}, {} words left", self.words.len());
        Some(word)
    }

    /// Append `words` to the pool. Duplicates are kept and an empty iterator does nothing.
    pub fn add_words<I>(&mut self, words: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let before = self.words.len();
        self.words.extend(words.into_iter().map(Into::into));

        let added = self.words.len() - before;
        self.total_added += added;
        log::debug!("added {added} words, {} words total", self.total_added);
    }
}

impl<R> WordSource<R> {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of words still waiting to be drawn.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Number of words ever added, including the defaults.
    pub fn total_added(&self) -> usize {
        self.total_added
    }
}
