//! Paragraph chunking for summarization.
//!
//! Text is split on blank lines (`"\n\n"`) and paragraphs are packed greedily
//! into chunks bounded by a token budget. A paragraph larger than the budget
//! gets a chunk of its own and is never split further.

/// Default token budget per chunk.
pub const DEFAULT_MAX_TOKENS: usize = 500;
/// Paragraph boundary. Joining chunks with it restores the input.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Approximate token counting. Implementations must be deterministic and
/// never return less for a string than for any of its prefixes.
pub trait TokenCounter: Send + Sync {
    fn count(&self, text: &str) -> usize;
}

/// Whitespace-delimited word count.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCounter;

impl TokenCounter for WordCounter {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

/// Roughly four characters per token.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCounter;

impl TokenCounter for CharCounter {
    fn count(&self, text: &str) -> usize {
        text.chars().count().div_ceil(4)
    }
}

/// Greedy paragraph packer.
pub struct Chunker<C = WordCounter> {
    pub max_tokens: usize,
    counter: C,
}

impl Chunker<WordCounter> {
    pub fn new(max_tokens: usize) -> Self {
        Self::with_counter(max_tokens, WordCounter)
    }
}

impl Default for Chunker<WordCounter> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS)
    }
}

impl<C: TokenCounter> Chunker<C> {
    pub fn with_counter(max_tokens: usize, counter: C) -> Self {
        Self {
            max_tokens,
            counter,
        }
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut buffer: Vec<&str> = Vec::new();
        let mut buffered_tokens = 0usize;

        for paragraph in text.split(PARAGRAPH_SEPARATOR) {
            let tokens = self.counter.count(paragraph);

            // Token-less paragraphs ride along with the next one, so a flush
            // never emits a chunk with no content.
            if buffered_tokens > 0 && buffered_tokens + tokens > self.max_tokens {
                chunks.push(buffer.join(PARAGRAPH_SEPARATOR));
                buffer.clear();
                buffered_tokens = 0;
            }

            buffer.push(paragraph);
            buffered_tokens += tokens;
        }

        if !buffer.is_empty() {
            chunks.push(buffer.join(PARAGRAPH_SEPARATOR));
        }

        chunks
    }
}

/// Chunk with the default word counter.
pub fn chunk_text(text: &str, max_tokens: usize) -> Vec<String> {
    Chunker::new(max_tokens).chunk(text)
}
