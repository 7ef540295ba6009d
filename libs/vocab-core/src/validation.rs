//! Validation rules applied to entries before they are written to the store.

use crate::error::ValidationError;
use crate::types::{Difficulty, ParsedEntry, VocabularyRecord};

/// Maximum word length in characters.
pub const MAX_WORD_LENGTH: usize = 100;
/// Maximum meaning length in characters.
pub const MAX_MEANING_LENGTH: usize = 500;
/// Accepted values for the optional `category` attribute.
pub const CATEGORIES: &[&str] = &["noun", "verb", "adjective", "adverb", "phrase", "other"];

/// Validate a word/meaning pair.
pub fn validate_entry(entry: &ParsedEntry) -> Result<(), ValidationError> {
    validate_word(&entry.word)?;
    validate_meaning(&entry.meaning)
}

/// Validate a full record, including its optional attributes.
pub fn validate_record(record: &VocabularyRecord) -> Result<(), ValidationError> {
    validate_word(record.word())?;
    validate_meaning(record.meaning())?;

    if let Some(difficulty) = &record.difficulty {
        if Difficulty::from_str(difficulty).is_none() {
            return Err(ValidationError::InvalidDifficulty(difficulty.clone()));
        }
    }

    if let Some(category) = &record.category {
        if !CATEGORIES.contains(&category.trim().to_lowercase().as_str()) {
            return Err(ValidationError::InvalidCategory {
                value: category.clone(),
                allowed: CATEGORIES.join(", "),
            });
        }
    }

    Ok(())
}

/// Validate several entries, one result per entry in input order.
pub fn validate_batch(entries: &[ParsedEntry]) -> Vec<Result<(), ValidationError>> {
    entries.iter().map(validate_entry).collect()
}

fn validate_word(word: &str) -> Result<(), ValidationError> {
    let word = word.trim();
    if word.is_empty() {
        return Err(ValidationError::EmptyWord);
    }

    let len = word.chars().count();
    if len > MAX_WORD_LENGTH {
        return Err(ValidationError::WordTooLong {
            len,
            max: MAX_WORD_LENGTH,
        });
    }

    if word.contains(['\n', '\t']) {
        return Err(ValidationError::WordControlCharacter);
    }

    Ok(())
}

fn validate_meaning(meaning: &str) -> Result<(), ValidationError> {
    let meaning = meaning.trim();
    if meaning.is_empty() {
        return Err(ValidationError::EmptyMeaning);
    }

    let len = meaning.chars().count();
    if len > MAX_MEANING_LENGTH {
        return Err(ValidationError::MeaningTooLong {
            len,
            max: MAX_MEANING_LENGTH,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(word: &str, meaning: &str) -> ParsedEntry {
        ParsedEntry::new(word, meaning)
    }

    #[test]
    fn accepts_common_words() {
        for word in ["hello", "test-word", "test_word", "café", "naïve", "123test", "a"] {
            assert_eq!(validate_entry(&entry(word, "nghĩa")), Ok(()), "word {word:?}");
        }
    }

    #[test]
    fn accepts_unicode_meanings() {
        for meaning in ["xin chào", "meaning, with, commas", "số 123", "🎉 ăn mừng", "Bắc Kinh"] {
            assert_eq!(validate_entry(&entry("w", meaning)), Ok(()), "meaning {meaning:?}");
        }
    }

    #[test]
    fn rejects_blank_fields() {
        assert_eq!(validate_entry(&entry("   ", "x")), Err(ValidationError::EmptyWord));
        assert_eq!(validate_entry(&entry("x", "  ")), Err(ValidationError::EmptyMeaning));
    }

    #[test]
    fn enforces_length_limits_in_characters() {
        let at_limit = "ă".repeat(MAX_WORD_LENGTH);
        assert_eq!(validate_entry(&entry(&at_limit, "x")), Ok(()));

        let over = "a".repeat(MAX_WORD_LENGTH + 1);
        assert_eq!(
            validate_entry(&entry(&over, "x")),
            Err(ValidationError::WordTooLong { len: 101, max: 100 })
        );

        let long_meaning = "b".repeat(MAX_MEANING_LENGTH + 1);
        assert!(matches!(
            validate_entry(&entry("w", &long_meaning)),
            Err(ValidationError::MeaningTooLong { len: 501, .. })
        ));
    }

    #[test]
    fn rejects_control_characters_in_word() {
        assert_eq!(
            validate_entry(&entry("test\tword", "x")),
            Err(ValidationError::WordControlCharacter)
        );
        assert_eq!(
            validate_entry(&entry("test\nword", "x")),
            Err(ValidationError::WordControlCharacter)
        );
    }

    #[test]
    fn record_checks_optional_attributes() {
        let record = VocabularyRecord::new("test", "thử nghiệm")
            .unwrap()
            .with_difficulty("easy");
        assert_eq!(validate_record(&record), Ok(()));

        let record = record.with_difficulty("invalid");
        assert_eq!(
            validate_record(&record),
            Err(ValidationError::InvalidDifficulty("invalid".into()))
        );

        let mut record = VocabularyRecord::new("test", "thử nghiệm").unwrap();
        record.category = Some("noun".into());
        assert_eq!(validate_record(&record), Ok(()));

        record.category = Some(" Noun ".into());
        assert_eq!(validate_record(&record), Ok(()));

        record.category = Some("invalid_category".into());
        assert!(matches!(
            validate_record(&record),
            Err(ValidationError::InvalidCategory { .. })
        ));
    }

    #[test]
    fn batch_returns_one_result_per_entry() {
        let entries = vec![entry("cat", "mèo"), entry("", "empty word"), entry("dog", "chó")];
        let results = validate_batch(&entries);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(ValidationError::EmptyWord));
        assert!(results[2].is_ok());
    }
}
