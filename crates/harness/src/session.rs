// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test session lifecycle: capture channel installation, fixture
//! resolution, case execution, and deterministic teardown.

use crate::capture::{CaptureChannel, InstallGuard};
use crate::case::{compile, outcome_of, CaseError, CaseOutcome, CaseReport, Program, TestCase};
use crate::compare::Comparison;
use crate::config::HarnessConfig;
use crate::fixture::Fixture;
use crate::resolve::Resolver;

/// One test session: owns the capture channel for the duration and
/// restores it exactly once at teardown, no matter how many cases ran or
/// failed. Archive handles opened during resolution stay open until
/// teardown because generated cases read from them lazily.
///
/// Case execution is single-threaded and synchronous; callers needing
/// concurrency must serialize case execution or use one session per
/// execution context.
pub struct Session {
    channel: CaptureChannel,
    resolver: Resolver,
    guard: Option<InstallGuard>,
}

impl Session {
    /// Start a session with the given configuration; installs the channel.
    pub fn new(config: HarnessConfig) -> Self {
        let channel = CaptureChannel::new();
        let guard = channel.install();
        Self {
            channel,
            resolver: Resolver::new(config),
            guard: Some(guard),
        }
    }

    /// Start a session configured from the environment.
    pub fn from_environment() -> Self {
        Self::new(HarnessConfig::resolve())
    }

    pub fn channel(&self) -> &CaptureChannel {
        &self.channel
    }

    pub fn config(&self) -> &HarnessConfig {
        self.resolver.config()
    }

    /// Resolve a logical path into fixtures. Empty is a normal outcome.
    pub fn resolve(&mut self, logical: &str) -> Vec<Fixture> {
        self.resolver.resolve(logical)
    }

    /// Resolve and compile with exact comparison.
    pub fn cases(&mut self, logical: &str) -> Vec<TestCase> {
        self.cases_with(logical, Comparison::Exact)
    }

    /// Resolve and compile with the given comparison strategy.
    pub fn cases_with(&mut self, logical: &str, comparison: Comparison) -> Vec<TestCase> {
        let fixtures = self.resolver.resolve(logical);
        compile(fixtures, comparison)
    }

    /// Resolve one named case and compile it with the given strategy.
    pub fn cases_for(
        &mut self,
        logical: &str,
        case: &str,
        comparison: Comparison,
    ) -> Vec<TestCase> {
        let fixtures = self.resolver.resolve_case(logical, case);
        compile(fixtures, comparison)
    }

    /// Execute one compiled case against the program under test.
    pub fn run_case(
        &self,
        case: &TestCase,
        program: &dyn Program,
    ) -> Result<CaseReport, CaseError> {
        case.run(&self.channel, program)
    }

    /// Resolve, compile, and execute every case for a logical path in
    /// sorted name order. Zero fixtures produce zero reports.
    pub fn run_all(
        &mut self,
        logical: &str,
        program: &dyn Program,
    ) -> Result<Vec<CaseReport>, CaseError> {
        let cases = self.cases(logical);
        let mut reports = Vec::with_capacity(cases.len());
        for case in &cases {
            reports.push(self.run_case(case, program)?);
        }
        Ok(reports)
    }

    /// Run the program against inline input and expect exact output.
    pub fn check(
        &self,
        program: &dyn Program,
        input: &str,
        expected: &str,
    ) -> Result<CaseOutcome, CaseError> {
        self.check_inline(program, input, &Comparison::Exact, expected)
    }

    /// Expect the output to match any of the accepted alternatives.
    pub fn check_any_of(
        &self,
        program: &dyn Program,
        input: &str,
        alternatives: &[&str],
    ) -> Result<CaseOutcome, CaseError> {
        let comparison =
            Comparison::AnyOf(alternatives.iter().map(|alt| (*alt).to_owned()).collect());
        self.check_inline(program, input, &comparison, "")
    }

    /// Expect the whole output to match a regex pattern.
    pub fn check_matches(
        &self,
        program: &dyn Program,
        input: &str,
        pattern: &str,
    ) -> Result<CaseOutcome, CaseError> {
        self.check_inline(program, input, &Comparison::Matches, pattern)
    }

    /// Expect a numeric output within `tolerance` of `expected`.
    pub fn check_about(
        &self,
        program: &dyn Program,
        input: &str,
        expected: f64,
        tolerance: f64,
    ) -> Result<CaseOutcome, CaseError> {
        self.check_inline(
            program,
            input,
            &Comparison::Approx { tolerance },
            &expected.to_string(),
        )
    }

    /// Expect no output at all.
    pub fn check_empty(&self, program: &dyn Program, input: &str) -> Result<CaseOutcome, CaseError> {
        self.check_inline(program, input, &Comparison::Empty, "")
    }

    fn check_inline(
        &self,
        program: &dyn Program,
        input: &str,
        comparison: &Comparison,
        expected: &str,
    ) -> Result<CaseOutcome, CaseError> {
        self.channel.reset();
        self.channel.feed(input)?;
        let mut io = self.channel.io();
        program.run(&mut io).map_err(CaseError::Program)?;
        let captured = self.channel.captured_text();
        Ok(outcome_of(comparison.compare(&captured, expected)))
    }

    /// Restore the channel and release archive registrations. Idempotent;
    /// also invoked from `Drop`, so the original channels are reinstated
    /// exactly once at session end.
    pub fn close(&mut self) {
        if let Some(guard) = self.guard.take() {
            guard.restore();
        }
        self.resolver.release_archives();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
