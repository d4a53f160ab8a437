// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Process I/O capture channel for test sessions.
//!
//! This crate provides [`CaptureChannel`], an explicitly owned replacement
//! for process-wide stdin/stdout redirection: a test session installs the
//! channel, feeds input to it, hands the program under test a [`ChannelIo`]
//! handle to read from and write to, and inspects the captured output
//! afterwards.

mod channel;

pub use channel::{CaptureChannel, ChannelIo, InstallGuard, InvalidState};
