//! Scanner handles: run-to-completion on a thread, or single-step in place.
//!
//! [`Scanner`] moves a [`Driver`] onto a dedicated named thread and hands
//! tokens to the consumer through a bounded channel; the scanner runs ahead
//! of the consumer by at most the channel capacity. [`Stepper`] keeps the
//! driver on the caller's thread and buffers emitted tokens locally until
//! they are popped.
//!
//! ```text
//! let mut scanner = Scanner::builder("http", input).rules(rules).spawn(TABLE)?;
//! while let Some(token) = scanner.next_token() { ... }
//! let halt = scanner.join();
//! ```

use std::collections::vec_deque::{self, VecDeque};
use std::panic;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::channel::{token_channel, CancelToken, TokenReceiver};
use crate::config::ScanConfig;
use crate::cursor::Cursor;
use crate::driver::{Driver, Halt, ScanPosition, ScanProgress, Step};
use crate::error::{PullError, ScanError};
use crate::rules::RuleTable;
use crate::state::StateFn;
use crate::token::Token;

/// Collects the settings of one scan.
#[derive(Debug)]
pub struct ScannerBuilder {
    name: Arc<str>,
    input: Arc<str>,
    rules: Arc<RuleTable>,
    config: ScanConfig,
    start_at: u32,
}

impl ScannerBuilder {
    /// Terminal table shared with the state functions. Empty by default.
    #[must_use]
    pub fn rules(mut self, rules: Arc<RuleTable>) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Begin scanning at byte `offset` instead of 0.
    #[must_use]
    pub fn start_at(mut self, offset: u32) -> Self {
        self.start_at = offset;
        self
    }

    /// Start the scan on its own thread.
    pub fn spawn(self, initial: StateFn) -> Result<Scanner, ScanError> {
        let capacity = self.config.channel_capacity;
        if capacity == 0 {
            return Err(ScanError::ZeroCapacity);
        }
        let name = Arc::clone(&self.name);
        let thread_name = self
            .config
            .thread_name
            .clone()
            .unwrap_or_else(|| format!("runelex-{name}"));
        if thread_name.contains('\0') {
            return Err(ScanError::InvalidThreadName { name: thread_name });
        }
        let cancel = CancelToken::new();
        let mut driver = self.into_driver(initial, cancel.clone())?;
        let progress = driver.progress();
        let (mut tx, rx) = token_channel(capacity, cancel.clone());

        debug!(scanner = &*name, thread = %thread_name, capacity, "spawning scanner");
        let worker = thread::Builder::new()
            .name(thread_name)
            .spawn(move || driver.run(&mut tx))?;

        Ok(Scanner {
            name,
            rx: Some(rx),
            worker: Some(worker),
            cancel,
            progress,
        })
    }

    /// Prepare a single-step scan on the calling thread.
    pub fn stepper(self, initial: StateFn) -> Result<Stepper, ScanError> {
        let driver = self.into_driver(initial, CancelToken::new())?;
        Ok(Stepper {
            driver,
            pending: VecDeque::new(),
        })
    }

    fn into_driver(self, initial: StateFn, cancel: CancelToken) -> Result<Driver, ScanError> {
        let cursor = Cursor::starting_at(self.input, self.start_at)?;
        Ok(Driver::new(self.name, cursor, self.rules, initial)
            .with_config(&self.config)
            .with_cancel(cancel))
    }
}

/// Handle to a scan running on its own thread.
///
/// Dropping the handle cancels the scan and waits for the thread to exit.
#[derive(Debug)]
pub struct Scanner {
    name: Arc<str>,
    rx: Option<TokenReceiver>,
    worker: Option<JoinHandle<Halt>>,
    cancel: CancelToken,
    progress: Arc<ScanProgress>,
}

impl Scanner {
    pub fn builder(name: impl Into<Arc<str>>, input: impl Into<Arc<str>>) -> ScannerBuilder {
        ScannerBuilder {
            name: name.into(),
            input: input.into(),
            rules: RuleTable::empty(),
            config: ScanConfig::default(),
            start_at: 0,
        }
    }

    /// Scan `input` from offset 0 with an empty rule table and the default
    /// configuration.
    pub fn spawn(
        name: impl Into<Arc<str>>,
        input: impl Into<Arc<str>>,
        initial: StateFn,
    ) -> Result<Self, ScanError> {
        Self::builder(name, input).spawn(initial)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Block until the next token. `None` once the scan has halted and every
    /// token has been pulled, or after [`cancel()`](Self::cancel).
    pub fn next_token(&mut self) -> Option<Token> {
        self.rx.as_ref()?.recv()
    }

    /// Like [`next_token()`](Self::next_token), but give up after `timeout`.
    ///
    /// A timeout cancels the scan; later pulls return `Ok(None)`.
    pub fn next_token_timeout(&mut self, timeout: Duration) -> Result<Option<Token>, PullError> {
        let Some(rx) = &self.rx else {
            return Ok(None);
        };
        match rx.recv_timeout(timeout) {
            Ok(token) => Ok(token),
            Err(()) => {
                debug!(scanner = &*self.name, ?timeout, "pull timed out");
                self.cancel();
                Err(PullError::Timeout(timeout))
            }
        }
    }

    /// Stop the scan. Undelivered tokens are discarded and a scanner blocked
    /// on a full queue wakes up.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.rx = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Flag that cancels this scan from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Window offsets as of the last completed transition.
    pub fn progress(&self) -> ScanPosition {
        self.progress.load()
    }

    /// Hang up and wait for the scanning thread; returns why it halted.
    ///
    /// Tokens not pulled yet are discarded, so a scan still producing halts
    /// as [`Halt::Disconnected`]. A panic on the scanning thread resumes on
    /// the caller.
    pub fn join(mut self) -> Halt {
        self.rx = None;
        match self.worker.take().map(JoinHandle::join) {
            Some(Ok(halt)) => halt,
            Some(Err(payload)) => panic::resume_unwind(payload),
            None => Halt::Cancelled,
        }
    }
}

impl Iterator for Scanner {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

impl Drop for Scanner {
    fn drop(&mut self) {
        self.cancel();
        if let Some(worker) = self.worker.take() {
            // A panic was already reported on the scanning thread.
            let _ = worker.join();
        }
    }
}

/// A scan advanced one transition at a time on the calling thread.
#[derive(Debug)]
pub struct Stepper {
    driver: Driver,
    pending: VecDeque<Token>,
}

impl Stepper {
    /// Perform exactly one transition. Emitted tokens are queued for
    /// [`pop_token()`](Self::pop_token).
    pub fn step(&mut self) -> Step {
        self.driver.step(&mut self.pending)
    }

    /// Step until the scan halts, queueing every token.
    pub fn run(&mut self) -> Halt {
        self.driver.run(&mut self.pending)
    }

    pub fn pop_token(&mut self) -> Option<Token> {
        self.pending.pop_front()
    }

    /// Take every queued token, oldest first.
    pub fn drain(&mut self) -> vec_deque::Drain<'_, Token> {
        self.pending.drain(..)
    }

    /// Number of queued tokens.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn start(&self) -> u32 {
        self.driver.cursor().start()
    }

    pub fn pos(&self) -> u32 {
        self.driver.cursor().pos()
    }

    /// The lexeme window the current state is building.
    pub fn window(&self) -> &str {
        self.driver.cursor().window()
    }

    /// The state the next step will run.
    pub fn state(&self) -> Option<StateFn> {
        self.driver.state()
    }

    pub fn halt(&self) -> Option<Halt> {
        self.driver.halt()
    }

    pub fn steps(&self) -> u64 {
        self.driver.steps()
    }

    pub fn cancel_token(&self) -> &CancelToken {
        self.driver.cancel_token()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
