//! Test utilities
//! Shared testing helpers and mocks

use std::collections::VecDeque;

use crate::error::{ClikitError, ErrorType, Result};
use crate::term::{Size, TerminalBackend};

/// One scripted step of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScriptedInput {
    /// Bytes delivered by a single read, like one key press
    Chunk(Vec<u8>),
    /// Terminal resized before the next chunk arrives
    Resize(Size),
    /// The next read fails with this error
    Fail(ClikitError),
}

/// Mock terminal backend for testing
/// Replays scripted input and records all output for verification
pub struct MockTerminal {
    /// Output batches, one per flush
    pub batches: Vec<Vec<u8>>,
    /// Output written since the last flush
    pub queued: Vec<u8>,
    pub size: (u16, u16),
    pub init_calls: usize,
    pub deinit_calls: usize,
    script: VecDeque<ScriptedInput>,
    /// Flush number (0-based) that fails, dropping its batch
    flush_failure: Option<(usize, ClikitError)>,
    /// Bytes of the chunk currently being consumed
    current: VecDeque<u8>,
}

impl MockTerminal {
    /// Create a new mock terminal with specified dimensions
    pub fn new(rows: u16, cols: u16) -> Self {
        MockTerminal {
            batches: Vec::new(),
            queued: Vec::new(),
            size: (rows, cols),
            init_calls: 0,
            deinit_calls: 0,
            script: VecDeque::new(),
            flush_failure: None,
            current: VecDeque::new(),
        }
    }

    /// Queue bytes that arrive together in one read
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.script.push_back(ScriptedInput::Chunk(bytes.to_vec()));
    }

    /// Queue several single-key chunks
    pub fn push_keys(&mut self, keys: &[&[u8]]) {
        for key in keys {
            self.push_input(key);
        }
    }

    /// Resize the terminal once all previously queued input was consumed
    pub fn push_resize(&mut self, rows: u16, cols: u16) {
        self.script
            .push_back(ScriptedInput::Resize(Size { rows, cols }));
    }

    /// Make the next read fail once all previously queued input was consumed
    pub fn push_failure(&mut self, err: ClikitError) {
        self.script.push_back(ScriptedInput::Fail(err));
    }

    /// Make the flush that would record batch `nth` (0-based) fail once
    pub fn fail_flush(&mut self, nth: usize, err: ClikitError) {
        self.flush_failure = Some((nth, err));
    }

    /// Number of flushes performed
    pub fn flush_count(&self) -> usize {
        self.batches.len()
    }

    /// Get all written bytes as a single vector, flushed or not
    pub fn get_written_bytes(&self) -> Vec<u8> {
        self.batches
            .iter()
            .flatten()
            .chain(self.queued.iter())
            .copied()
            .collect()
    }

    /// Get all written bytes as a string (lossy UTF-8 conversion)
    pub fn get_written_string(&self) -> String {
        String::from_utf8_lossy(&self.get_written_bytes()).to_string()
    }

    /// Count non-overlapping occurrences of `needle` in the output
    pub fn count_written(&self, needle: &str) -> usize {
        self.get_written_string().matches(needle).count()
    }

    /// Clear all recorded output (useful for testing multiple renders)
    pub fn clear(&mut self) {
        self.batches.clear();
        self.queued.clear();
    }
}

impl TerminalBackend for MockTerminal {
    fn init(&mut self) -> Result<()> {
        self.init_calls += 1;
        Ok(())
    }

    fn deinit(&mut self) {
        self.deinit_calls += 1;
    }

    fn read_byte(&mut self) -> Result<u8> {
        loop {
            if let Some(byte) = self.current.pop_front() {
                return Ok(byte);
            }
            match self.script.pop_front() {
                Some(ScriptedInput::Chunk(bytes)) => self.current.extend(bytes),
                Some(ScriptedInput::Resize(size)) => self.size = (size.rows, size.cols),
                Some(ScriptedInput::Fail(err)) => return Err(err),
                None => {
                    return Err(ClikitError::new(
                        ErrorType::Interrupted,
                        "END_OF_INPUT",
                        "mock input exhausted",
                    ))
                }
            }
        }
    }

    fn has_pending_input(&self) -> bool {
        !self.current.is_empty()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.queued.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self
            .flush_failure
            .as_ref()
            .is_some_and(|(nth, _)| *nth == self.batches.len())
        {
            if let Some((_, err)) = self.flush_failure.take() {
                self.queued.clear();
                return Err(err);
            }
        }
        let batch = std::mem::take(&mut self.queued);
        self.batches.push(batch);
        Ok(())
    }

    fn get_size(&self) -> Result<Size> {
        Ok(Size {
            rows: self.size.0,
            cols: self.size.1,
        })
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
