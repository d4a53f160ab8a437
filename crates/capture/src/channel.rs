// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture channel implementation.

use parking_lot::Mutex;
use std::io::{self, Read, Write};
use std::sync::Arc;
use thiserror::Error;

/// State violations in the capture channel.
///
/// These indicate a harness bug rather than a fixture problem and should be
/// treated as fatal by callers.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidState {
    #[error("a byte stream is already attached as input for this case")]
    ByteInputAttached,

    #[error("text input is already pending for this case")]
    TextInputPending,

    #[error("capture channel is not installed")]
    NotInstalled,
}

#[derive(Default)]
struct ChannelInner {
    installed: bool,
    /// Text input accumulated by `feed`, one canonical newline per line.
    pending: Vec<u8>,
    /// Whole-stream input set by `attach`; takes precedence over `pending`.
    attached: Option<Vec<u8>>,
    /// Input frozen on first read; `feed`/`attach` no longer affect it.
    active: Option<Vec<u8>>,
    cursor: usize,
    /// Output accumulated while installed.
    captured: Vec<u8>,
}

impl ChannelInner {
    fn clear_input(&mut self) {
        self.pending.clear();
        self.attached = None;
        self.active = None;
        self.cursor = 0;
    }
}

/// In-memory replacement for the process-wide input and output channels.
///
/// One channel serves one sequence of case executions. Cloning shares the
/// underlying state, so a clone handed to another component observes the
/// same input and output buffers.
pub struct CaptureChannel {
    inner: Arc<Mutex<ChannelInner>>,
}

impl CaptureChannel {
    /// Create a new channel in the not-installed state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ChannelInner::default())),
        }
    }

    /// Install the channel, directing program I/O into its buffers.
    ///
    /// Returns a guard that restores the channel when dropped. Installing an
    /// already installed channel is a no-op apart from the fresh guard.
    pub fn install(&self) -> InstallGuard {
        self.inner.lock().installed = true;
        InstallGuard {
            channel: self.clone(),
        }
    }

    /// Reinstall the original channels.
    ///
    /// Idempotent, and safe to call even if `install` was never called.
    pub fn restore(&self) {
        self.inner.lock().installed = false;
    }

    /// Whether the channel is currently installed.
    pub fn is_installed(&self) -> bool {
        self.inner.lock().installed
    }

    /// Append one line of text to the pending input, terminated with `\n`.
    ///
    /// Fails when a byte stream has already been attached for this case:
    /// two sources of truth for one case are a contract violation. Input
    /// left half-consumed by a previous case is discarded first.
    pub fn feed(&self, text: &str) -> Result<(), InvalidState> {
        let mut inner = self.inner.lock();
        if inner.active.is_some() {
            inner.clear_input();
        }
        if inner.attached.is_some() {
            return Err(InvalidState::ByteInputAttached);
        }
        inner.pending.extend_from_slice(text.as_bytes());
        inner.pending.push(b'\n');
        Ok(())
    }

    /// Attach the complete input byte stream for one case.
    ///
    /// Fails when text input is already pending or another stream is already
    /// attached.
    pub fn attach(&self, bytes: Vec<u8>) -> Result<(), InvalidState> {
        let mut inner = self.inner.lock();
        if inner.active.is_some() {
            inner.clear_input();
        }
        if inner.attached.is_some() {
            return Err(InvalidState::ByteInputAttached);
        }
        if !inner.pending.is_empty() {
            return Err(InvalidState::TextInputPending);
        }
        inner.attached = Some(bytes);
        Ok(())
    }

    /// Clear all pending input, any half-consumed input stream, and the
    /// captured output. Must run immediately before each case.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.clear_input();
        inner.captured.clear();
    }

    /// Snapshot of the output captured since the last `reset`.
    pub fn captured(&self) -> Vec<u8> {
        self.inner.lock().captured.clone()
    }

    /// Captured output decoded as UTF-8, lossily.
    pub fn captured_text(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().captured).into_owned()
    }

    /// I/O handle for the program under test.
    pub fn io(&self) -> ChannelIo {
        ChannelIo {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for CaptureChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CaptureChannel {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for CaptureChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("CaptureChannel")
            .field("installed", &inner.installed)
            .field("pending_bytes", &inner.pending.len())
            .field("captured_bytes", &inner.captured.len())
            .finish()
    }
}

/// Guard returned by [`CaptureChannel::install`]; restores on drop.
pub struct InstallGuard {
    channel: CaptureChannel,
}

impl InstallGuard {
    /// Restore the original channels now instead of at drop.
    pub fn restore(self) {}
}

impl Drop for InstallGuard {
    fn drop(&mut self) {
        self.channel.restore();
    }
}

/// Read/write handle handed to the program under test.
///
/// Reading pulls from the attached byte stream if one was set, otherwise
/// from the fed text; the first read freezes the input for the case.
/// Writing appends to the captured output. Both fail with
/// [`io::ErrorKind::NotConnected`] while the channel is not installed.
#[derive(Clone)]
pub struct ChannelIo {
    inner: Arc<Mutex<ChannelInner>>,
}

fn not_installed() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, InvalidState::NotInstalled)
}

impl Read for ChannelIo {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock();
        if !inner.installed {
            return Err(not_installed());
        }
        if inner.active.is_none() {
            let frozen = match inner.attached.take() {
                Some(bytes) => bytes,
                None => std::mem::take(&mut inner.pending),
            };
            inner.active = Some(frozen);
            inner.cursor = 0;
        }
        let cursor = inner.cursor;
        let Some(active) = inner.active.as_ref() else {
            return Ok(0);
        };
        let remaining = &active[cursor.min(active.len())..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        inner.cursor += n;
        Ok(n)
    }
}

impl Write for ChannelIo {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock();
        if !inner.installed {
            return Err(not_installed());
        }
        inner.captured.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
