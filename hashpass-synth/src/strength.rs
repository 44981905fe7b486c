use std::collections::HashSet;
use std::fmt;

use crate::charset::SYMBOLS;

/// Strength bucket derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Strength::VeryStrong,
            60..=79 => Strength::Strong,
            40..=59 => Strength::Medium,
            _ => Strength::Weak,
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strength::Weak => "Weak",
            Strength::Medium => "Medium",
            Strength::Strong => "Strong",
            Strength::VeryStrong => "Very Strong",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthReport {
    pub score: u8,
    pub strength: Strength,
}

impl fmt::Display for StrengthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Score: {}/100)", self.strength, self.score)
    }
}

/// Scores a password with a fixed rule table.
///
/// | rule                                   | points |
/// |----------------------------------------|--------|
/// | length >= 12 / >= 8 / shorter          | 25 / 15 / 5 |
/// | has uppercase, lowercase, digit        | 15 each |
/// | has a symbol from [`SYMBOLS`]          | 20     |
/// | distinct chars > 80% of length         | 10     |
///
/// Length is counted in characters. The total is clamped to 100.
pub fn evaluate(password: &str) -> StrengthReport {
    let length = password.chars().count();

    let mut score: u32 = match length {
        12.. => 25,
        8..=11 => 15,
        _ => 5,
    };

    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 15;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 15;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 15;
    }
    if password.chars().any(|c| SYMBOLS.contains(c)) {
        score += 20;
    }

    let distinct = password.chars().collect::<HashSet<_>>().len();
    if distinct as f64 > length as f64 * 0.8 {
        score += 10;
    }

    let score = score.min(100) as u8;
    StrengthReport {
        score,
        strength: Strength::from_score(score),
    }
}
