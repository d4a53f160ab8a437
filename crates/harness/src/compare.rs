// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Comparison strategies for judging captured output against expectations.
//!
//! Every strategy normalizes line endings on both sides before comparing,
//! so a fixture authored on a different platform than the program under
//! test still compares correctly.

use regex::Regex;
use thiserror::Error;

/// Why a comparison did not pass.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CompareError {
    /// The strategy judged the output wrong: the normal test-failure path.
    #[error("output mismatch: expected {expected:?}, got {actual:?}")]
    Mismatch { expected: String, actual: String },

    /// The output cannot be parsed as the strategy requires. Kept distinct
    /// from [`CompareError::Mismatch`] so malformed output is
    /// distinguishable from a wrong value.
    #[error("cannot parse {text:?} as a number")]
    Format { text: String },

    /// The expectation is not a valid regex pattern.
    #[error("invalid comparison pattern: {0}")]
    Pattern(String),
}

/// Policy for deciding pass/fail from captured output versus expectation.
///
/// Strategies are pure; the same `(actual, expected)` pair always yields the
/// same verdict.
#[derive(Clone, Debug, Default)]
pub enum Comparison {
    /// Line-ending-normalized equality, with the expectation terminated by
    /// exactly one canonical line break (programs under test end their
    /// output with a newline).
    #[default]
    Exact,

    /// Passes when the output exactly matches any of the accepted
    /// alternatives. The fixture expectation is not consulted; the accepted
    /// set is the strategy's options.
    AnyOf(Vec<String>),

    /// The expectation text is a regex pattern the whole output must match.
    Matches,

    /// The sole output token is parsed as a float and compared against the
    /// expectation's first token within `tolerance`.
    Approx { tolerance: f64 },

    /// Passes only when nothing was captured at all.
    Empty,
}

impl Comparison {
    /// Judge `actual` against `expected` under this strategy.
    pub fn compare(&self, actual: &str, expected: &str) -> Result<(), CompareError> {
        let actual = normalize_line_endings(actual);
        match self {
            Comparison::Exact => {
                let want = terminated(&normalize_line_endings(expected));
                if actual == want {
                    Ok(())
                } else {
                    Err(CompareError::Mismatch {
                        expected: want,
                        actual,
                    })
                }
            }
            Comparison::AnyOf(alternatives) => {
                let hit = alternatives
                    .iter()
                    .any(|alt| actual == terminated(&normalize_line_endings(alt)));
                if hit {
                    Ok(())
                } else {
                    Err(CompareError::Mismatch {
                        expected: alternatives.join(" | "),
                        actual,
                    })
                }
            }
            Comparison::Matches => {
                let pattern = terminated(&normalize_line_endings(expected));
                let re = Regex::new(&format!(r"\A(?:{pattern})\z"))
                    .map_err(|e| CompareError::Pattern(e.to_string()))?;
                if re.is_match(&actual) {
                    Ok(())
                } else {
                    Err(CompareError::Mismatch {
                        expected: pattern,
                        actual,
                    })
                }
            }
            Comparison::Approx { tolerance } => {
                let actual_value = parse_number(actual.trim())?;
                let expected_value = parse_number(expected.split_whitespace().next().unwrap_or(""))?;
                if (actual_value - expected_value).abs() < *tolerance {
                    Ok(())
                } else {
                    Err(CompareError::Mismatch {
                        expected: expected_value.to_string(),
                        actual: actual_value.to_string(),
                    })
                }
            }
            Comparison::Empty => {
                if actual.is_empty() {
                    Ok(())
                } else {
                    Err(CompareError::Mismatch {
                        expected: String::new(),
                        actual,
                    })
                }
            }
        }
    }
}

/// Map all recognized line-break sequences to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Terminate with exactly one `\n` unless already terminated.
fn terminated(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_owned()
    } else {
        format!("{text}\n")
    }
}

fn parse_number(token: &str) -> Result<f64, CompareError> {
    token.parse::<f64>().map_err(|_| CompareError::Format {
        text: token.to_owned(),
    })
}

#[cfg(test)]
#[path = "compare_tests.rs"]
mod tests;
