//! Input evaluation shared by the keyboard and text-field surfaces.
//!
//! Every input change is expressed as "the field now holds `value`". Keystrokes
//! are turned into such a value by [`synthesize`] and then go through the same
//! [`evaluate`] call as composed text, so both surfaces score identically.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Shift,
    Tab,
    Enter,
    Space,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharStatus {
    Correct,
    Incorrect(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub position: usize,
    pub expected: char,
    pub actual: char,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// The accepted input: letters only, never longer than the word.
    pub input: String,
    /// Characters newly entered relative to the previous input.
    pub typed: u32,
    pub correct: u32,
    pub mismatches: Vec<Mismatch>,
    pub complete: bool,
}

/// Letters are the only characters that ever reach the input.
pub fn is_typable(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Resulting field value after `key`, or `None` when the key is inert.
pub fn synthesize(previous: &str, key: Key, word_len: usize) -> Option<String> {
    match key {
        Key::Backspace => {
            let mut value = previous.to_string();
            value.pop().map(|_| value)
        }
        Key::Char(ch) if is_typable(ch) => {
            if previous.chars().count() >= word_len {
                return None;
            }
            let mut value = previous.to_string();
            value.push(ch);
            Some(value)
        }
        Key::Char(_) | Key::Shift | Key::Tab | Key::Enter | Key::Space | Key::Other => None,
    }
}

/// Compare `value` position-by-position against `word`.
///
/// Only characters past the common prefix of `previous` and `value` count as
/// keystrokes, so deleting and retyping scores the retyped characters again,
/// while a value that merely shrinks scores nothing.
pub fn evaluate(word: &[char], previous: &str, value: &str) -> Evaluation {
    let accepted: Vec<char> = value
        .chars()
        .filter(|&c| is_typable(c))
        .take(word.len())
        .collect();
    let common = previous
        .chars()
        .zip(accepted.iter())
        .take_while(|(a, b)| a == *b)
        .count();

    let mut evaluation = Evaluation {
        input: accepted.iter().collect(),
        complete: accepted.as_slice() == word,
        ..Evaluation::default()
    };

    for (position, &actual) in accepted.iter().enumerate().skip(common) {
        evaluation.typed += 1;
        let expected = word[position];
        if actual == expected {
            evaluation.correct += 1;
        } else {
            evaluation.mismatches.push(Mismatch {
                position,
                expected,
                actual,
            });
        }
    }

    evaluation
}

/// Per-position status of `input` against `word`, for rendering.
pub fn statuses(word: &str, input: &str) -> Vec<CharStatus> {
    input
        .chars()
        .zip(word.chars())
        .map(|(actual, expected)| {
            if actual == expected {
                CharStatus::Correct
            } else {
                CharStatus::Incorrect(actual)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_control_keys_are_inert() {
        for key in [Key::Shift, Key::Tab, Key::Enter, Key::Space, Key::Other] {
            assert_eq!(synthesize("ap", key, 5), None);
        }
        assert_eq!(synthesize("ap", Key::Char('3'), 5), None);
        assert_eq!(synthesize("ap", Key::Char('-'), 5), None);
    }

    #[test]
    fn test_letter_rejected_when_input_full() {
        assert_eq!(synthesize("apple", Key::Char('s'), 5), None);
        assert_eq!(synthesize("appl", Key::Char('e'), 5), Some("apple".into()));
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        assert_eq!(synthesize("", Key::Backspace, 5), None);
        assert_eq!(synthesize("ax", Key::Backspace, 5), Some("a".into()));
    }

    #[test]
    fn test_wrong_letter_cascades_by_position() {
        let word = chars("apple");
        let eval = evaluate(&word, "", "aple");
        assert_eq!(eval.typed, 4);
        // a=a, p=p, l!=p, e!=l
        assert_eq!(eval.correct, 2);
        assert_eq!(eval.mismatches.len(), 2);
        assert_eq!(eval.mismatches[0].position, 2);
        assert_eq!(eval.mismatches[0].expected, 'p');
    }

    #[test]
    fn test_only_new_suffix_is_scored() {
        let word = chars("apple");
        let eval = evaluate(&word, "app", "appl");
        assert_eq!(eval.typed, 1);
        assert_eq!(eval.correct, 1);
        assert!(!eval.complete);
    }

    #[test]
    fn test_shrinking_value_scores_nothing() {
        let word = chars("apple");
        let eval = evaluate(&word, "apx", "ap");
        assert_eq!(eval.typed, 0);
        assert_eq!(eval.input, "ap");
    }

    #[test]
    fn test_overlong_and_non_letter_value_is_sanitized() {
        let word = chars("tree");
        let eval = evaluate(&word, "", "tr-ees!");
        assert_eq!(eval.input, "tree");
        assert!(eval.complete);
        assert_eq!(eval.typed, 4);
        assert_eq!(eval.correct, 4);
    }

    #[test]
    fn test_uppercase_letter_is_a_mismatch() {
        let word = chars("tree");
        let eval = evaluate(&word, "", "T");
        assert_eq!(eval.correct, 0);
        assert_eq!(eval.mismatches.len(), 1);
    }

    #[test]
    fn test_statuses_mark_incorrect_chars() {
        let st = statuses("apple", "ax");
        assert_eq!(st, vec![CharStatus::Correct, CharStatus::Incorrect('x')]);
    }
}
