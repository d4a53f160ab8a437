// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dynamic case compilation: resolved fixtures become named, independently
//! executable test units.

use crate::capture::{CaptureChannel, ChannelIo, InvalidState};
use crate::compare::{CompareError, Comparison};
use crate::fixture::{Fixture, FixtureError};
use similar::TextDiff;
use std::io;
use thiserror::Error;

/// The program under test: reads all input from the installed channel,
/// writes all output to it. No return value is consulted; pass/fail is
/// judged solely from captured output.
pub trait Program {
    fn run(&self, io: &mut ChannelIo) -> io::Result<()>;
}

impl<F> Program for F
where
    F: Fn(&mut ChannelIo) -> io::Result<()>,
{
    fn run(&self, io: &mut ChannelIo) -> io::Result<()> {
        self(io)
    }
}

/// Harness-level case failures, distinct from comparison verdicts.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Channel(#[from] InvalidState),

    #[error("program under test failed: {0}")]
    Program(#[source] io::Error),
}

/// Pass/fail verdict for one executed case.
#[derive(Clone, Debug)]
pub enum CaseOutcome {
    Passed,
    Failed {
        reason: CompareError,
        /// Unified diff of expected versus actual, present for mismatches.
        diff: Option<String>,
    },
}

/// Result of one case execution.
#[derive(Clone, Debug)]
pub struct CaseReport {
    pub name: String,
    /// Captured output, retained for diagnostic display on failure.
    pub captured: String,
    pub outcome: CaseOutcome,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Passed)
    }
}

/// One independently runnable unit generated from a fixture.
///
/// Units may be executed in any order and any subset; none depends on
/// another having run first. Units compiled from one archive share its
/// handle and require it to still be open.
#[derive(Debug)]
pub struct TestCase {
    name: String,
    fixture: Fixture,
    comparison: Comparison,
}

/// Convert a resolved fixture set into named runnable units.
///
/// Unit names are the fixture names with any trailing input-extension
/// suffix stripped, stable and readable independent of backend.
pub fn compile(fixtures: Vec<Fixture>, comparison: Comparison) -> Vec<TestCase> {
    fixtures
        .into_iter()
        .map(|fixture| {
            let name = fixture
                .name()
                .strip_suffix(".in")
                .unwrap_or(fixture.name())
                .to_owned();
            TestCase {
                name,
                fixture,
                comparison: comparison.clone(),
            }
        })
        .collect()
}

impl TestCase {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    /// Execute this case: reset the channel, attach the fixture input,
    /// run the program, and judge the captured output.
    pub fn run(
        &self,
        channel: &CaptureChannel,
        program: &dyn Program,
    ) -> Result<CaseReport, CaseError> {
        channel.reset();
        // Container streams may not support re-reading; materialize fully.
        let input = self.fixture.input().read()?;
        channel.attach(input)?;

        let mut io = channel.io();
        program.run(&mut io).map_err(CaseError::Program)?;

        let captured = channel.captured_text();
        let expected_bytes = self.fixture.expected().read()?;
        let expected = String::from_utf8_lossy(&expected_bytes).into_owned();
        Ok(CaseReport {
            name: self.name.clone(),
            outcome: outcome_of(self.comparison.compare(&captured, &expected)),
            captured,
        })
    }
}

/// Fold a comparison result into a case outcome, rendering a diff for
/// mismatches.
pub(crate) fn outcome_of(result: Result<(), CompareError>) -> CaseOutcome {
    match result {
        Ok(()) => CaseOutcome::Passed,
        Err(reason) => {
            let diff = match &reason {
                CompareError::Mismatch { expected, actual } => Some(render_diff(expected, actual)),
                _ => None,
            };
            CaseOutcome::Failed { reason, diff }
        }
    }
}

fn render_diff(expected: &str, actual: &str) -> String {
    TextDiff::from_lines(expected, actual)
        .unified_diff()
        .header("expected", "actual")
        .to_string()
}

#[cfg(test)]
#[path = "case_tests.rs"]
mod tests;
