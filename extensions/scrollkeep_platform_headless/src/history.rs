//! Scroll-restoration flag

use std::cell::Cell;

use scrollkeep_platform::{History, PlatformError, Result, ScrollRestoration};

/// In-memory session history flag
pub struct HeadlessHistory {
    restoration: Cell<ScrollRestoration>,
    supported: Cell<bool>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    writes: Cell<u32>,
}

impl HeadlessHistory {
    /// Create a history with the flag set to `auto`
    pub fn new() -> Self {
        Self {
            restoration: Cell::new(ScrollRestoration::Auto),
            supported: Cell::new(true),
            fail_reads: Cell::new(false),
            fail_writes: Cell::new(false),
            writes: Cell::new(0),
        }
    }

    /// Current flag value, bypassing failure injection
    pub fn current(&self) -> ScrollRestoration {
        self.restoration.get()
    }

    /// Preset the flag, e.g. to simulate a value left over from a previous page
    pub fn preset(&self, value: ScrollRestoration) {
        self.restoration.set(value);
    }

    /// Toggle whether manual restoration is allowed on this platform
    pub fn set_supported(&self, supported: bool) {
        self.supported.set(supported);
    }

    /// Make reads of the flag fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Make writes of the flag fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes
    pub fn write_count(&self) -> u32 {
        self.writes.get()
    }
}

impl Default for HeadlessHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl History for HeadlessHistory {
    fn supports_scroll_restoration(&self) -> bool {
        self.supported.get()
    }

    fn scroll_restoration(&self) -> Result<ScrollRestoration> {
        if self.fail_reads.get() {
            return Err(PlatformError::ScrollRestoration("read rejected".into()));
        }
        Ok(self.restoration.get())
    }

    fn set_scroll_restoration(&self, value: ScrollRestoration) -> Result<()> {
        if self.fail_writes.get() {
            return Err(PlatformError::ScrollRestoration("write rejected".into()));
        }
        self.restoration.set(value);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
