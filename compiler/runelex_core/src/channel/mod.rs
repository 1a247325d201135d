//! Token hand-off between the scanning thread and the consumer.
//!
//! The scanning side pushes into a [`TokenSink`]. In run-to-completion mode
//! the sink is a [`TokenSender`]: the producer half of a bounded crossbeam
//! channel, so a full queue blocks the scanner until the consumer pulls
//! (backpressure). In single-step mode the sink is a plain `VecDeque` owned by
//! the caller. Either way tokens come out in emission order.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use thiserror::Error;

use crate::token::Token;

/// The consumer has gone away; nothing more will be delivered.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("token receiver disconnected")]
pub struct Disconnected;

/// Destination of emitted tokens.
pub trait TokenSink {
    /// Deliver one token, blocking if the sink is bounded and full.
    fn push(&mut self, token: Token) -> Result<(), Disconnected>;
}

impl TokenSink for VecDeque<Token> {
    fn push(&mut self, token: Token) -> Result<(), Disconnected> {
        self.push_back(token);
        Ok(())
    }
}

impl TokenSink for Vec<Token> {
    fn push(&mut self, token: Token) -> Result<(), Disconnected> {
        Vec::push(self, token);
        Ok(())
    }
}

/// Cooperative cancellation flag shared by a scanner and its consumer.
///
/// The driver checks it between transitions; the sender checks it before
/// every push.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Producer half of the token channel.
#[derive(Debug)]
pub struct TokenSender {
    tx: Sender<Token>,
    cancel: CancelToken,
}

impl TokenSink for TokenSender {
    fn push(&mut self, token: Token) -> Result<(), Disconnected> {
        if self.cancel.is_cancelled() {
            return Err(Disconnected);
        }
        self.tx.send(token).map_err(|_| Disconnected)
    }
}

/// Consumer half of the token channel.
///
/// The channel is closed when the sender is dropped, which happens when the
/// scanning thread halts.
#[derive(Debug)]
pub struct TokenReceiver {
    rx: Receiver<Token>,
}

impl TokenReceiver {
    /// Block until a token arrives. `None` once the channel is closed and
    /// drained.
    pub fn recv(&self) -> Option<Token> {
        self.rx.recv().ok()
    }

    /// Like [`recv()`](Self::recv), but give up after `timeout`.
    ///
    /// `Err(())` means the timeout elapsed while the channel was still open.
    #[allow(
        clippy::result_unit_err,
        reason = "the only failure is the elapsed timeout, which the caller already knows"
    )]
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<Token>, ()> {
        match self.rx.recv_timeout(timeout) {
            Ok(token) => Ok(Some(token)),
            Err(RecvTimeoutError::Disconnected) => Ok(None),
            Err(RecvTimeoutError::Timeout) => Err(()),
        }
    }

    /// Take a token if one is queued. `Ok(None)` means closed and drained;
    /// `Err(())` means open but empty.
    #[allow(
        clippy::result_unit_err,
        reason = "empty-but-open carries no information beyond itself"
    )]
    pub fn try_recv(&self) -> Result<Option<Token>, ()> {
        match self.rx.try_recv() {
            Ok(token) => Ok(Some(token)),
            Err(TryRecvError::Disconnected) => Ok(None),
            Err(TryRecvError::Empty) => Err(()),
        }
    }

    /// Number of tokens waiting in the queue.
    pub fn queued(&self) -> usize {
        self.rx.len()
    }
}

/// Build a bounded token channel.
///
/// `capacity` must be at least 1; crossbeam's zero-capacity rendezvous
/// channel is not used.
pub fn token_channel(capacity: usize, cancel: CancelToken) -> (TokenSender, TokenReceiver) {
    debug_assert!(capacity > 0, "token channel capacity must be at least 1");
    let (tx, rx) = channel::bounded(capacity.max(1));
    (TokenSender { tx, cancel }, TokenReceiver { rx })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
