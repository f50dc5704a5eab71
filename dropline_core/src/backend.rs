// Copyright 2026 the Dropline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input backend hooks.
//!
//! A backend is whatever turns real device gestures into manager calls. The
//! manager only needs two things from it: attach device listeners when the
//! first handler is registered, and detach them when the last one is
//! removed. Both hooks default to no-ops so a backend may implement either.

use core::cell::Cell;
use core::fmt;

/// Device-listener lifecycle hooks, driven by the handler ref-count.
pub trait Backend {
    /// Called when the registry goes from empty to non-empty (or when the
    /// backend is attached while handlers already exist).
    fn setup(&self) {}

    /// Called when the registry goes from non-empty to empty.
    fn teardown(&self) {}
}

/// A backend that records its lifecycle calls, for tests and harnesses.
#[derive(Default)]
pub struct TestBackend {
    setup_calls: Cell<u32>,
    teardown_calls: Cell<u32>,
}

impl TestBackend {
    /// Creates a backend with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `setup` calls so far.
    #[must_use]
    pub fn setup_calls(&self) -> u32 {
        self.setup_calls.get()
    }

    /// Number of `teardown` calls so far.
    #[must_use]
    pub fn teardown_calls(&self) -> u32 {
        self.teardown_calls.get()
    }

    /// Returns `true` while set up and not yet torn down.
    #[must_use]
    pub fn is_set_up(&self) -> bool {
        self.setup_calls.get() > self.teardown_calls.get()
    }
}

impl Backend for TestBackend {
    fn setup(&self) {
        self.setup_calls.set(self.setup_calls.get() + 1);
    }

    fn teardown(&self) {
        self.teardown_calls.set(self.teardown_calls.get() + 1);
    }
}

impl fmt::Debug for TestBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestBackend")
            .field("setup_calls", &self.setup_calls.get())
            .field("teardown_calls", &self.teardown_calls.get())
            .finish()
    }
}
