//! Runtime state representation for the simulator.

use sparc_asm::Word;

use std::sync::{Arc, Condvar, Mutex};

/// Resulting state of a single instruction execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecuteState {
    /// The core should proceed normally with the execution.
    Proceed,
    /// The guest requested termination with the given exit code.
    Exit(Word),
}

impl ExecuteState {
    /// Return true if the simulation should continue.
    pub const fn should_continue(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

impl Default for ExecuteState {
    fn default() -> Self {
        Self::Proceed
    }
}

/// Wake/sleep line for the optional idle discipline.
///
/// The line holds a single word: `0` means the core sleeps before its next
/// instruction, anything else means it runs. [`InterruptLine::raise`]
/// wakes every core blocked on the line.
#[derive(Debug, Clone)]
pub struct InterruptLine {
    inner: Arc<(Mutex<Word>, Condvar)>,
}

impl InterruptLine {
    /// A line that starts raised: attached cores run immediately.
    pub fn raised() -> Self {
        Self::with_level(1)
    }

    /// A line that starts cleared: attached cores sleep until
    /// [`InterruptLine::raise`] is called from another thread.
    pub fn cleared() -> Self {
        Self::with_level(0)
    }

    fn with_level(level: Word) -> Self {
        Self {
            inner: Arc::new((Mutex::new(level), Condvar::new())),
        }
    }

    /// Assert the line and wake all sleeping cores.
    pub fn raise(&self) {
        let (level, cvar) = &*self.inner;
        *self.guard(level) = 1;
        cvar.notify_all();
    }

    /// Clear the line; cores will sleep before their next instruction.
    pub fn clear(&self) {
        let (level, _) = &*self.inner;
        *self.guard(level) = 0;
    }

    /// Current level of the line.
    pub fn level(&self) -> Word {
        let (level, _) = &*self.inner;
        *self.guard(level)
    }

    /// Block the calling core until the line is raised.
    pub(crate) fn wait_raised(&self) {
        let (level, cvar) = &*self.inner;
        let mut guard = self.guard(level);

        while *guard == 0 {
            guard = cvar.wait(guard).unwrap_or_else(|e| e.into_inner());
        }
    }

    fn guard<'a>(&self, level: &'a Mutex<Word>) -> std::sync::MutexGuard<'a, Word> {
        level.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InterruptLine {
    fn default() -> Self {
        Self::raised()
    }
}
