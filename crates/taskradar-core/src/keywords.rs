//! Keyword score tables.
//!
//! Two independent tables map trigger phrases to weights (1-10), one for
//! urgency and one for importance. The reference tables are static data;
//! custom tables go through [`KeywordTable::new`] so every entry is checked.

use serde::Serialize;

use crate::error::ValidationError;

/// Lowest weight an entry may carry.
pub const MIN_WEIGHT: u8 = 1;
/// Highest weight an entry may carry.
pub const MAX_WEIGHT: u8 = 10;

/// A trigger phrase and the score it lifts its axis to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeywordWeight {
    pub phrase: &'static str,
    pub weight: u8,
}

impl KeywordWeight {
    pub const fn new(phrase: &'static str, weight: u8) -> Self {
        Self { phrase, weight }
    }
}

/// Urgency triggers.
pub const URGENCY_KEYWORDS: &[KeywordWeight] = &[
    KeywordWeight::new("緊急", 10),
    KeywordWeight::new("至急", 10),
    KeywordWeight::new("今すぐ", 10),
    KeywordWeight::new("asap", 10),
    KeywordWeight::new("urgent", 10),
    KeywordWeight::new("障害", 9),
    KeywordWeight::new("今日", 9),
    KeywordWeight::new("today", 9),
    KeywordWeight::new("すぐ", 8),
    KeywordWeight::new("急ぎ", 8),
    KeywordWeight::new("締切", 8),
    KeywordWeight::new("deadline", 8),
    KeywordWeight::new("期限", 7),
    KeywordWeight::new("明日", 7),
    KeywordWeight::new("tomorrow", 7),
];

/// Importance triggers.
pub const IMPORTANCE_KEYWORDS: &[KeywordWeight] = &[
    KeywordWeight::new("クリティカル", 10),
    KeywordWeight::new("critical", 10),
    KeywordWeight::new("重要", 9),
    KeywordWeight::new("本番", 9),
    KeywordWeight::new("important", 9),
    KeywordWeight::new("必須", 8),
    KeywordWeight::new("リリース", 8),
    KeywordWeight::new("release", 8),
    KeywordWeight::new("発表", 7),
    KeywordWeight::new("提出", 7),
    KeywordWeight::new("プロジェクト", 7),
    KeywordWeight::new("project", 7),
    KeywordWeight::new("報告", 6),
    KeywordWeight::new("会議", 6),
    KeywordWeight::new("meeting", 6),
];

/// An immutable, validated set of keyword weights for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordTable {
    entries: &'static [KeywordWeight],
}

impl KeywordTable {
    /// Build a table from static entries, rejecting any entry whose phrase
    /// is empty or not lowercase, or whose weight is outside 1..=10.
    pub fn new(entries: &'static [KeywordWeight]) -> Result<Self, ValidationError> {
        for entry in entries {
            if entry.phrase.trim().is_empty() {
                return Err(ValidationError::InvalidKeyword {
                    phrase: entry.phrase.to_string(),
                    message: "phrase must not be empty".into(),
                });
            }
            if entry.phrase.to_lowercase() != entry.phrase {
                return Err(ValidationError::InvalidKeyword {
                    phrase: entry.phrase.to_string(),
                    message: "phrase must be lowercase".into(),
                });
            }
            if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&entry.weight) {
                return Err(ValidationError::InvalidKeyword {
                    phrase: entry.phrase.to_string(),
                    message: format!("weight {} outside {MIN_WEIGHT}..={MAX_WEIGHT}", entry.weight),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Reference urgency table.
    pub const fn urgency() -> Self {
        Self {
            entries: URGENCY_KEYWORDS,
        }
    }

    /// Reference importance table.
    pub const fn importance() -> Self {
        Self {
            entries: IMPORTANCE_KEYWORDS,
        }
    }

    pub fn entries(&self) -> &'static [KeywordWeight] {
        self.entries
    }

    /// Entries whose phrase occurs in already-normalized text.
    pub fn matches<'a>(&self, normalized: &'a str) -> impl Iterator<Item = &'static KeywordWeight> + 'a {
        let entries: &'static [KeywordWeight] = self.entries;
        entries
            .iter()
            .filter(move |entry| normalized.contains(entry.phrase))
    }

    /// Highest weight among matching entries, if any matched.
    pub fn max_weight(&self, normalized: &str) -> Option<u8> {
        self.matches(normalized).map(|entry| entry.weight).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_tables_pass_validation() {
        assert!(KeywordTable::new(URGENCY_KEYWORDS).is_ok());
        assert!(KeywordTable::new(IMPORTANCE_KEYWORDS).is_ok());
    }

    #[test]
    fn rejects_uppercase_phrase() {
        static BAD: &[KeywordWeight] = &[KeywordWeight::new("ASAP", 5)];
        let err = KeywordTable::new(BAD).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidKeyword { .. }));
    }

    #[test]
    fn rejects_empty_phrase() {
        static BAD: &[KeywordWeight] = &[KeywordWeight::new("  ", 5)];
        assert!(KeywordTable::new(BAD).is_err());
    }

    #[test]
    fn rejects_weight_out_of_range() {
        static ZERO: &[KeywordWeight] = &[KeywordWeight::new("soon", 0)];
        static ELEVEN: &[KeywordWeight] = &[KeywordWeight::new("soon", 11)];
        assert!(KeywordTable::new(ZERO).is_err());
        assert!(KeywordTable::new(ELEVEN).is_err());
    }

    #[test]
    fn max_weight_takes_highest_match_not_sum() {
        let table = KeywordTable::urgency();
        // 明日 (7) and 締切 (8) both present
        assert_eq!(table.max_weight("明日が締切"), Some(8));
    }

    #[test]
    fn max_weight_none_without_match() {
        assert_eq!(KeywordTable::importance().max_weight("メールの整理"), None);
    }
}
