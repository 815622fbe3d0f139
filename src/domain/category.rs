//! Fixed set of bill categories and their display styling.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::CycleError;

/// Category a bill is filed under. Unknown labels fall back to [`BillCategory::Other`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BillCategory {
    Housing,
    Utilities,
    Insurance,
    Transportation,
    Subscriptions,
    Loan,
    #[default]
    Other,
}

/// Named colour token used by presentation layers to style a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleToken {
    Orange,
    Yellow,
    Blue,
    Green,
    Purple,
    Red,
    Emerald,
    Slate,
}

impl BillCategory {
    pub const ALL: [BillCategory; 7] = [
        BillCategory::Housing,
        BillCategory::Utilities,
        BillCategory::Insurance,
        BillCategory::Transportation,
        BillCategory::Subscriptions,
        BillCategory::Loan,
        BillCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BillCategory::Housing => "Housing",
            BillCategory::Utilities => "Utilities",
            BillCategory::Insurance => "Insurance",
            BillCategory::Transportation => "Transportation",
            BillCategory::Subscriptions => "Subscriptions",
            BillCategory::Loan => "Loan",
            BillCategory::Other => "Other",
        }
    }

    /// Maps the category to its colour token.
    pub fn style_token(self) -> StyleToken {
        match self {
            BillCategory::Housing => StyleToken::Orange,
            BillCategory::Utilities => StyleToken::Yellow,
            BillCategory::Insurance => StyleToken::Blue,
            BillCategory::Transportation => StyleToken::Green,
            BillCategory::Subscriptions => StyleToken::Purple,
            BillCategory::Loan => StyleToken::Red,
            BillCategory::Other => StyleToken::Slate,
        }
    }

    /// Parses a stored label, treating anything unrecognised as `Other`.
    pub fn from_label(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for BillCategory {
    type Err = CycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        BillCategory::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CycleError::Validation(format!("unknown bill category `{needle}`")))
    }
}

impl fmt::Display for BillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
