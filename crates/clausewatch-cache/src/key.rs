//! Prompt key derivation.

use sha2::{Digest, Sha256};

/// Namespace for prompt entries.
pub const CACHE_PREFIX: &str = "llm:prompt:";

/// Stable key for a prompt: prefix + SHA-256 hex of its bytes.
pub fn prompt_key(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    format!("{}{}", CACHE_PREFIX, hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_deterministic() {
        assert_eq!(prompt_key("Summarize:\nHello"), prompt_key("Summarize:\nHello"));
    }

    #[test]
    fn test_key_is_byte_sensitive() {
        assert_ne!(prompt_key("Summarize:\nHello"), prompt_key("Summarize:\nHello "));
    }

    #[test]
    fn test_key_format() {
        let key = prompt_key("");
        assert_eq!(
            key,
            "llm:prompt:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
