//! Quadrant classification.
//!
//! Crosses "urgent / not urgent" with "important / not important". Both axes
//! split at the midpoint of the 0-10 range, inclusive on the high side.
//!
//! | urgent | important | priority                   |
//! |--------|-----------|----------------------------|
//! | yes    | yes       | `urgent-important`         |
//! | no     | yes       | `not-urgent-important`     |
//! | yes    | no        | `urgent-not-important`     |
//! | no     | no        | `not-urgent-not-important` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Score at or above which an axis counts as "high".
pub const QUADRANT_THRESHOLD: i32 = 5;

/// One of the four priority quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    /// 緊急かつ重要
    UrgentImportant,
    /// 重要だが緊急でない
    NotUrgentImportant,
    /// 緊急だが重要でない
    UrgentNotImportant,
    /// 緊急でも重要でもない
    NotUrgentNotImportant,
}

/// Map a score pair to its quadrant. Total over all integers.
pub fn classify(urgency: i32, importance: i32) -> Priority {
    Priority::from_flags(urgency >= QUADRANT_THRESHOLD, importance >= QUADRANT_THRESHOLD)
}

impl Priority {
    /// Display order used by the matrix view.
    pub const ALL: [Priority; 4] = [
        Priority::UrgentImportant,
        Priority::NotUrgentImportant,
        Priority::UrgentNotImportant,
        Priority::NotUrgentNotImportant,
    ];

    pub fn from_flags(is_urgent: bool, is_important: bool) -> Self {
        match (is_urgent, is_important) {
            (true, true) => Priority::UrgentImportant,
            (false, true) => Priority::NotUrgentImportant,
            (true, false) => Priority::UrgentNotImportant,
            (false, false) => Priority::NotUrgentNotImportant,
        }
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, Priority::UrgentImportant | Priority::UrgentNotImportant)
    }

    pub fn is_important(&self) -> bool {
        matches!(self, Priority::UrgentImportant | Priority::NotUrgentImportant)
    }

    /// Kebab-case label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::UrgentImportant => "urgent-important",
            Priority::NotUrgentImportant => "not-urgent-important",
            Priority::UrgentNotImportant => "urgent-not-important",
            Priority::NotUrgentNotImportant => "not-urgent-not-important",
        }
    }

    /// Quadrant heading.
    pub fn title(&self) -> &'static str {
        match self {
            Priority::UrgentImportant => "緊急かつ重要",
            Priority::NotUrgentImportant => "重要だが緊急でない",
            Priority::UrgentNotImportant => "緊急だが重要でない",
            Priority::NotUrgentNotImportant => "緊急でも重要でもない",
        }
    }

    /// Recommended action for tasks in this quadrant.
    pub fn action(&self) -> &'static str {
        match self {
            Priority::UrgentImportant => "今すぐやる",
            Priority::NotUrgentImportant => "計画して実行",
            Priority::UrgentNotImportant => "委任を検討",
            Priority::NotUrgentNotImportant => "後回しまたは削除",
        }
    }

    /// Why a task lands in this quadrant.
    pub fn reasoning(&self) -> &'static str {
        match self {
            Priority::UrgentImportant => {
                "緊急性と重要性の高いキーワードが含まれているため、最優先タスクとして分類しました。"
            }
            Priority::NotUrgentImportant => {
                "重要なキーワードが含まれていますが緊急性は低いため、計画的に取り組むタスクとして分類しました。"
            }
            Priority::UrgentNotImportant => {
                "緊急性はありますが重要度は低いため、委任を検討できるタスクとして分類しました。"
            }
            Priority::NotUrgentNotImportant => {
                "緊急性・重要性ともに低いキーワードのため、後回しまたは削除を検討できるタスクとして分類しました。"
            }
        }
    }

    /// Marker colour on the plot.
    pub fn color(&self) -> &'static str {
        match self {
            Priority::UrgentImportant => "#ef4444",
            Priority::NotUrgentImportant => "#3b82f6",
            Priority::UrgentNotImportant => "#f59e0b",
            Priority::NotUrgentNotImportant => "#9ca3af",
        }
    }

    /// Quadrant background colour on the plot.
    pub fn background_color(&self) -> &'static str {
        match self {
            Priority::UrgentImportant => "#fee2e2",
            Priority::NotUrgentImportant => "#dbeafe",
            Priority::UrgentNotImportant => "#fef3c7",
            Priority::NotUrgentNotImportant => "#f3f4f6",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("unknown priority '{s}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_table() {
        assert_eq!(classify(10, 10), Priority::UrgentImportant);
        assert_eq!(classify(3, 9), Priority::NotUrgentImportant);
        assert_eq!(classify(10, 3), Priority::UrgentNotImportant);
        assert_eq!(classify(3, 3), Priority::NotUrgentNotImportant);
    }

    #[test]
    fn threshold_is_inclusive_on_high_side() {
        assert_eq!(classify(5, 5), Priority::UrgentImportant);
        assert_eq!(classify(4, 5), Priority::NotUrgentImportant);
        assert_eq!(classify(5, 4), Priority::UrgentNotImportant);
        assert_eq!(classify(4, 4), Priority::NotUrgentNotImportant);
    }

    #[test]
    fn flags_round_trip_through_priority() {
        for p in Priority::ALL {
            assert_eq!(Priority::from_flags(p.is_urgent(), p.is_important()), p);
        }
    }

    #[test]
    fn label_parse_and_display_agree() {
        for p in Priority::ALL {
            assert_eq!(p.to_string().parse::<Priority>().unwrap(), p);
            assert_eq!(
                serde_json::to_string(&p).unwrap(),
                format!("\"{}\"", p.as_str())
            );
        }
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn classify_total_over_full_range() {
        for u in 0..=10 {
            for i in 0..=10 {
                let p = classify(u, i);
                assert_eq!(p.is_urgent(), u >= 5);
                assert_eq!(p.is_important(), i >= 5);
            }
        }
    }
}
