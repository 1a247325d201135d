//! The state machine driver.
//!
//! A [`Driver`] owns the cursor of one run and the state to execute next.
//! [`step()`](Driver::step) performs exactly one transition; [`run()`](Driver::run)
//! steps until the run halts. Both push tokens into a caller-chosen
//! [`TokenSink`], so the same driver serves the threaded scanner and the
//! single-step mode.
//!
//! After each transition the driver checks the engine contract (progress,
//! a clean `backward()` history, the step bound) and publishes the window
//! offsets for observers on other threads.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::channel::{CancelToken, TokenSink};
use crate::config::{ContractPolicy, ScanConfig};
use crate::cursor::Cursor;
use crate::error::ContractViolation;
use crate::rules::RuleTable;
use crate::state::{ScanContext, StateFn};
use crate::token::Token;

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Halt {
    /// A state returned `None`.
    Finished,
    /// The grammar broke the engine contract. An Error token describing the
    /// violation was emitted before halting.
    Violation(ContractViolation),
    /// The consumer hung up.
    Disconnected,
    /// The run was cancelled through its [`CancelToken`].
    Cancelled,
}

/// Outcome of one [`Driver::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Halted(Halt),
}

/// Window offsets at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanPosition {
    pub start: u32,
    pub pos: u32,
}

/// Window offsets published by a driver after every transition.
///
/// Observers on other threads read a recent value without locking. The two
/// offsets are stored independently, so a read racing a publish may pair a
/// fresh `pos` with a stale `start`.
#[derive(Debug, Default)]
pub struct ScanProgress {
    start: AtomicU32,
    pos: AtomicU32,
}

impl ScanProgress {
    pub fn load(&self) -> ScanPosition {
        ScanPosition {
            start: self.start.load(Ordering::Relaxed),
            pos: self.pos.load(Ordering::Relaxed),
        }
    }

    fn publish(&self, start: u32, pos: u32) {
        self.start.store(start, Ordering::Relaxed);
        self.pos.store(pos, Ordering::Relaxed);
    }
}

/// Runs a chain of state functions over one input.
#[derive(Debug)]
pub struct Driver {
    name: Arc<str>,
    cursor: Cursor,
    rules: Arc<RuleTable>,
    state: Option<StateFn>,
    check_progress: bool,
    policy: ContractPolicy,
    max_steps: Option<u64>,
    cancel: CancelToken,
    progress: Arc<ScanProgress>,
    steps: u64,
    emitted: u64,
    halt: Option<Halt>,
}

impl Driver {
    /// Create a driver with the default [`ScanConfig`].
    pub fn new(
        name: impl Into<Arc<str>>,
        cursor: Cursor,
        rules: Arc<RuleTable>,
        initial: StateFn,
    ) -> Self {
        let progress = Arc::new(ScanProgress::default());
        progress.publish(cursor.start(), cursor.pos());
        let config = ScanConfig::default();
        Self {
            name: name.into(),
            cursor,
            rules,
            state: Some(initial),
            check_progress: config.check_progress,
            policy: config.contract_policy,
            max_steps: config.max_steps,
            cancel: CancelToken::new(),
            progress,
            steps: 0,
            emitted: 0,
            halt: None,
        }
    }

    /// Apply the contract settings of `config`.
    ///
    /// Channel capacity and thread name belong to the scanner and are not
    /// read here.
    #[must_use]
    pub fn with_config(mut self, config: &ScanConfig) -> Self {
        self.check_progress = config.check_progress;
        self.policy = config.contract_policy;
        self.max_steps = config.max_steps;
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn rules(&self) -> &Arc<RuleTable> {
        &self.rules
    }

    /// The state the next step will run; `None` once terminal.
    pub fn state(&self) -> Option<StateFn> {
        self.state
    }

    /// Why the run stopped, once it has.
    pub fn halt(&self) -> Option<Halt> {
        self.halt
    }

    /// Transitions performed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Tokens emitted so far, including any violation Error token.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Shared handle to the published window offsets.
    pub fn progress(&self) -> Arc<ScanProgress> {
        Arc::clone(&self.progress)
    }

    /// Perform one transition.
    ///
    /// Once halted, every further call returns the same [`Step::Halted`].
    pub fn step(&mut self, sink: &mut dyn TokenSink) -> Step {
        if let Some(halt) = self.halt {
            return Step::Halted(halt);
        }
        if self.cancel.is_cancelled() {
            return self.stop(Halt::Cancelled);
        }
        let Some(state) = self.state else {
            return self.stop(Halt::Finished);
        };
        if let Some(limit) = self.max_steps {
            if self.steps >= limit {
                let pos = self.cursor.pos();
                return self.violate(ContractViolation::StepLimit { limit, pos }, sink);
            }
        }

        let before = (self.cursor.start(), self.cursor.pos());
        trace!(
            scanner = &*self.name,
            state = state.name(),
            start = before.0,
            pos = before.1,
            "transition"
        );
        let mut cx = ScanContext::new(&self.name, &mut self.cursor, sink, &self.rules);
        let next = state.call(&mut cx);
        let (emitted, violation, disconnected) = (cx.emitted(), cx.violation(), cx.disconnected());

        self.steps += 1;
        self.emitted += u64::from(emitted);
        let after = (self.cursor.start(), self.cursor.pos());
        self.progress.publish(after.0, after.1);

        if disconnected {
            if self.cancel.is_cancelled() {
                warn!(
                    scanner = &*self.name,
                    pos = after.1,
                    "scan cancelled while blocked on a full queue"
                );
                return self.stop(Halt::Cancelled);
            }
            return self.stop(Halt::Disconnected);
        }
        if let Some(violation) = violation {
            return self.violate(violation, sink);
        }
        match next {
            None => self.stop(Halt::Finished),
            // Empty tokens alone do not count: the window must have moved.
            Some(_) if self.check_progress && after == before => {
                let violation = ContractViolation::NoProgress {
                    state: state.name(),
                    pos: after.1,
                };
                self.violate(violation, sink)
            }
            Some(next) => {
                self.state = Some(next);
                Step::Continue
            }
        }
    }

    /// Step until the run halts.
    pub fn run(&mut self, sink: &mut dyn TokenSink) -> Halt {
        debug!(
            scanner = &*self.name,
            start = self.cursor.start(),
            len = self.cursor.len(),
            "scan started"
        );
        loop {
            if let Step::Halted(halt) = self.step(sink) {
                return halt;
            }
        }
    }

    /// Report a contract violation according to the configured policy.
    fn violate(&mut self, violation: ContractViolation, sink: &mut dyn TokenSink) -> Step {
        warn!(scanner = &*self.name, %violation, "grammar contract violation");
        match self.policy {
            ContractPolicy::Panic => panic!("scanner `{}`: {violation}", self.name),
            ContractPolicy::ErrorToken => {
                let token = Token::error("", self.cursor.pos(), violation.to_string());
                self.emitted += 1;
                if sink.push(token).is_err() {
                    return self.stop(Halt::Disconnected);
                }
                self.stop(Halt::Violation(violation))
            }
        }
    }

    fn stop(&mut self, halt: Halt) -> Step {
        self.state = None;
        self.halt = Some(halt);
        debug!(
            scanner = &*self.name,
            ?halt,
            steps = self.steps,
            emitted = self.emitted,
            "scan halted"
        );
        Step::Halted(halt)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
