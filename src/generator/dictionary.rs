use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::Embed;
use thiserror::Error;

use crate::engine::tier::{ALL_TIERS, DifficultyTier};
use crate::generator::pool::WordPool;

#[derive(Embed)]
#[folder = "assets/words/"]
struct WordAssets;

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("no bundled word list for {0}")]
    Missing(DifficultyTier),
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("word list for {tier} is not a JSON array of strings: {source}")]
    Parse {
        tier: DifficultyTier,
        #[source]
        source: serde_json::Error,
    },
}

fn file_name(tier: DifficultyTier) -> String {
    format!("{}.json", tier.as_str())
}

/// Load the word lists compiled into the binary.
pub fn bundled() -> Result<WordPool, WordListError> {
    load_with(|tier| {
        let file = WordAssets::get(&file_name(tier)).ok_or(WordListError::Missing(tier))?;
        parse_list(tier, file.data.as_ref())
    })
}

/// Load `easy.json`, `medium.json` and `hard.json` from `dir`.
pub fn from_dir(dir: &Path) -> Result<WordPool, WordListError> {
    load_with(|tier| {
        let path = dir.join(file_name(tier));
        let bytes = fs::read(&path).map_err(|source| WordListError::Io {
            path: path.clone(),
            source,
        })?;
        parse_list(tier, &bytes)
    })
}

fn load_with<F>(mut load: F) -> Result<WordPool, WordListError>
where
    F: FnMut(DifficultyTier) -> Result<Vec<String>, WordListError>,
{
    let mut lists = Vec::with_capacity(ALL_TIERS.len());
    for tier in ALL_TIERS {
        let words = load(tier)?;
        log::debug!("loaded {} {} words", words.len(), tier.as_str());
        lists.push(words);
    }
    let hard = lists.pop().unwrap_or_default();
    let medium = lists.pop().unwrap_or_default();
    let easy = lists.pop().unwrap_or_default();
    Ok(WordPool::new(easy, medium, hard))
}

pub fn parse_list(tier: DifficultyTier, bytes: &[u8]) -> Result<Vec<String>, WordListError> {
    let words: Vec<String> =
        serde_json::from_slice(bytes).map_err(|source| WordListError::Parse { tier, source })?;
    Ok(normalize(words))
}

/// Trim, drop anything that is not lowercase ASCII letters, dedupe keeping
/// first occurrence.
pub fn normalize(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase()))
        .filter(|w| seen.insert(w.clone()))
        .collect()
}
