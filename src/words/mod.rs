//! Word-supply implementations. The core only sees the [`WordSupply`] trait;
//! remote/API-backed sources plug in behind the same seam.

use anyhow::bail;
use async_trait::async_trait;

use crate::core::io::WordSupply;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    fn word_list(self) -> &'static [&'static str] {
        match self {
            Difficulty::Easy => &[
                "APPLE", "HOUSE", "RIVER", "CLOUD", "BREAD", "CHAIR", "TIGER", "PLANT",
            ],
            Difficulty::Medium => &[
                "TERMINAL", "KEYBOARD", "MOUNTAIN", "WHISPER", "LANTERN", "JOURNEY",
                "HARVEST", "COMPASS",
            ],
            Difficulty::Hard => &[
                "LABYRINTH", "XYLOPHONE", "QUICKSILVER", "MERRY-GO-ROUND", "JACKKNIFE",
                "ZEITGEIST", "ICE-CREAM",
            ],
        }
    }
}

/// In-process word list, picked at random per round.
pub struct LocalWordSupply {
    name: String,
    words: Vec<String>,
}

impl LocalWordSupply {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            name: format!("local ({})", difficulty.label()),
            words: difficulty.word_list().iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Custom list, e.g. loaded from a user file by the shell.
    pub fn from_words(name: impl Into<String>, words: Vec<String>) -> Self {
        Self { name: name.into(), words }
    }
}

#[async_trait]
impl WordSupply for LocalWordSupply {
    async fn fetch_word(&self) -> anyhow::Result<String> {
        if self.words.is_empty() {
            bail!("word list '{}' is empty", self.name);
        }
        let pick = rand::random_range(0..self.words.len());
        Ok(self.words[pick].clone())
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetches_from_the_configured_list() {
        let supply = LocalWordSupply::for_difficulty(Difficulty::Easy);
        let word = supply.fetch_word().await.unwrap();
        assert!(Difficulty::Easy.word_list().contains(&word.as_str()));
        assert_eq!(supply.source_name(), "local (easy)");
    }

    #[tokio::test]
    async fn empty_custom_list_fails() {
        let supply = LocalWordSupply::from_words("custom", Vec::new());
        assert!(supply.fetch_word().await.is_err());
    }
}
