//! Score presentation for the result screen.

use serde::{Deserialize, Serialize};

use crate::types::GameResult;

/// Message tier selected from the match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageTier {
    Perfect,
    Great,
    Good,
    KeepPracticing,
}

impl MessageTier {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            100.. => Self::Perfect,
            80..=99 => Self::Great,
            50..=79 => Self::Good,
            _ => Self::KeepPracticing,
        }
    }

    /// Player-facing message, as shown on the result screen.
    pub fn message(self) -> &'static str {
        match self {
            Self::Perfect => "สุดยอดมาก! จับคู่ได้ครบ!",
            Self::Great => "เก่งมาก! เกือบครบแล้ว!",
            Self::Good => "ดีเลย! ลองอีกครั้งนะ",
            Self::KeepPracticing => "พยายามอีกนิด สู้ๆ!",
        }
    }
}

/// Matched percentage, rounded to the nearest whole number. A zero-pair
/// session scores zero rather than dividing by zero.
pub fn percentage(matched_pairs: usize, total_pairs: usize) -> u32 {
    if total_pairs == 0 {
        return 0;
    }
    ((matched_pairs as f64 / total_pairs as f64) * 100.0).round() as u32
}

/// Format a second count as `M:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Everything the result screen displays, derived from one `GameResult`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSummary {
    pub percentage: u32,
    pub tier: MessageTier,
    pub message: &'static str,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub time_used: String,
    pub all_matched: bool,
}

impl ScoreSummary {
    pub fn from_result(result: &GameResult) -> Self {
        let percentage = percentage(result.matched_pairs, result.total_pairs);
        let tier = MessageTier::from_percentage(percentage);
        Self {
            percentage,
            tier,
            message: tier.message(),
            matched_pairs: result.matched_pairs,
            total_pairs: result.total_pairs,
            time_used: format_clock(result.time_used_secs),
            all_matched: result.matched_pairs >= result.total_pairs,
        }
    }
}
