// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Input sources and output sinks for the [Interpreter](crate::Interpreter)

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// What happens to earlier outputs when a new one is emitted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputPolicy {
    /// Only the most recent output is kept
    Overwrite,
    /// Every output is kept, in order, until taken by the caller
    #[default]
    Accumulate,
}

type PromptFn = dyn FnMut() -> Option<i64> + Send;

/// An interactive input source, consulted whenever an `IN` instruction finds the input queue
/// empty. Returning [`None`] pauses the interpreter, the same as an exhausted queue.
///
/// Clones share the same callback.
///
/// # Example
///
/// ```
/// use intcode::prelude::*;
/// let mut counter = 0;
/// let mut interp = Interpreter::new([3, 0, 4, 0, 3, 0, 4, 0, 99]);
/// interp.set_prompt(Prompt::new(move || {
///     counter += 1;
///     (counter < 3).then_some(counter * 10)
/// }));
/// assert_eq!(interp.run_through_inputs([]), Ok((vec![10, 20], Status::Finished)));
/// ```
#[derive(Clone)]
pub struct Prompt(Arc<Mutex<PromptFn>>);

impl Prompt {
    /// Wrap a callback
    pub fn new(callback: impl FnMut() -> Option<i64> + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(callback)))
    }

    pub(crate) fn ask(&self) -> Option<i64> {
        let mut callback = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        callback()
    }
}

impl fmt::Debug for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Prompt")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Collects emitted outputs according to an [OutputPolicy]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct OutputSink {
    policy: OutputPolicy,
    values: Vec<i64>,
    last: Option<i64>,
}

impl OutputSink {
    pub(crate) fn new(policy: OutputPolicy) -> Self {
        Self {
            policy,
            values: Vec::new(),
            last: None,
        }
    }

    pub(crate) fn emit(&mut self, value: i64) {
        if self.policy == OutputPolicy::Overwrite {
            self.values.clear();
        }
        self.values.push(value);
        self.last = Some(value);
    }

    /// The most recent output, which survives [take](OutputSink::take)
    pub(crate) fn last(&self) -> Option<i64> {
        self.last
    }

    pub(crate) fn values(&self) -> &[i64] {
        &self.values
    }

    pub(crate) fn take(&mut self) -> Vec<i64> {
        std::mem::take(&mut self.values)
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
        self.last = None;
    }
}
