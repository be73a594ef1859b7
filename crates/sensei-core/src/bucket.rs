//! Product buckets and goal classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category selected from the visitor's stated goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Kumite,
    Kata,
    #[serde(rename = "cond")]
    Conditioning,
    Mind,
}

/// Ordered goal rules: first rule with a matching keyword wins.
const GOAL_RULES: &[(&[&str], Bucket)] = &[
    (&["kumite"], Bucket::Kumite),
    (&["kata"], Bucket::Kata),
    (&["fit", "flex"], Bucket::Conditioning),
];

/// Catch-all when no rule matches.
const DEFAULT_BUCKET: Bucket = Bucket::Mind;

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Kumite,
        Bucket::Kata,
        Bucket::Conditioning,
        Bucket::Mind,
    ];

    /// Classify free-text goal input. Case-insensitive substring match
    /// against [`GOAL_RULES`]; total.
    pub fn classify(goal: &str) -> Self {
        let goal = goal.to_lowercase();
        GOAL_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| goal.contains(k)))
            .map(|(_, bucket)| *bucket)
            .unwrap_or(DEFAULT_BUCKET)
    }

    /// Wire name as stored in `data.bucket`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Kumite => "kumite",
            Bucket::Kata => "kata",
            Bucket::Conditioning => "cond",
            Bucket::Mind => "mind",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "kumite" => Some(Bucket::Kumite),
            "kata" => Some(Bucket::Kata),
            "cond" => Some(Bucket::Conditioning),
            "mind" => Some(Bucket::Mind),
            _ => None,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
