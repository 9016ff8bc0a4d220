//! Per-letter feedback for a scored guess
//!
//! A `Verdict` is the three-way answer for one position of a guess:
//! - Exact: right letter, right position (🟩)
//! - Present: letter elsewhere in the target (🟨)
//! - Absent: letter not in the target, or every occurrence already credited (⬜)
//!
//! `LetterStatus` adds `Unknown` for keyboard letters never guessed, and orders
//! the variants by how much they reveal: `Unknown < Absent < Present < Exact`.

use serde::{Deserialize, Serialize};

/// Feedback for a single letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Exact,
    Present,
    Absent,
}

impl Verdict {
    /// Map a remote evaluator status code onto a verdict
    ///
    /// Returns `None` for codes this client does not know.
    ///
    /// # Examples
    /// ```
    /// use sutom::core::Verdict;
    ///
    /// assert_eq!(Verdict::from_code("correct"), Some(Verdict::Exact));
    /// assert_eq!(Verdict::from_code("wrong-position"), Some(Verdict::Present));
    /// assert_eq!(Verdict::from_code("incorrect"), Some(Verdict::Absent));
    /// assert_eq!(Verdict::from_code("maybe"), None);
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "correct" => Some(Self::Exact),
            "wrong-position" => Some(Self::Present),
            "incorrect" | "not-found" | "absent" => Some(Self::Absent),
            _ => None,
        }
    }

    /// Status code as spoken by the remote evaluator
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Exact => "correct",
            Self::Present => "wrong-position",
            Self::Absent => "incorrect",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_exact(self) -> bool {
        matches!(self, Self::Exact)
    }

    /// Emoji square for share text and plain terminal output
    #[must_use]
    pub const fn to_emoji(self) -> char {
        match self {
            Self::Exact => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// Check whether a verdict row is a win
///
/// An empty row is never a win.
#[must_use]
pub fn all_exact(verdicts: &[Verdict]) -> bool {
    !verdicts.is_empty() && verdicts.iter().all(|v| v.is_exact())
}

/// Render a verdict row as emoji squares, e.g. "🟩🟨⬜⬜⬜"
#[must_use]
pub fn to_emoji_row(verdicts: &[Verdict]) -> String {
    verdicts.iter().map(|v| v.to_emoji()).collect()
}

/// Best-known status of a keyboard letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LetterStatus {
    #[default]
    Unknown,
    Absent,
    Present,
    Exact,
}

impl From<Verdict> for LetterStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Exact => Self::Exact,
            Verdict::Present => Self::Present,
            Verdict::Absent => Self::Absent,
        }
    }
}

impl LetterStatus {
    /// The verdict this status stands for, if the letter was ever scored
    #[must_use]
    pub const fn verdict(self) -> Option<Verdict> {
        match self {
            Self::Unknown => None,
            Self::Absent => Some(Verdict::Absent),
            Self::Present => Some(Verdict::Present),
            Self::Exact => Some(Verdict::Exact),
        }
    }
}
