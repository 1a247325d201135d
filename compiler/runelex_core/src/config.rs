//! Scan configuration.

/// Default capacity of the token hand-off queue.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 2;

/// What the driver does when a state function breaks the engine contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContractPolicy {
    /// Emit an Error token describing the violation and halt the run.
    #[default]
    ErrorToken,
    /// Panic on the scanning thread. For grammar development.
    Panic,
}

/// Knobs of one scan run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Capacity of the bounded hand-off queue (run-to-completion mode).
    pub channel_capacity: usize,
    /// Check the progress invariant after every transition.
    pub check_progress: bool,
    pub contract_policy: ContractPolicy,
    /// Halt with a violation after this many transitions.
    pub max_steps: Option<u64>,
    /// Name of the scanning thread; defaults to `runelex-<scanner name>`.
    pub thread_name: Option<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            check_progress: true,
            contract_policy: ContractPolicy::default(),
            max_steps: None,
            thread_name: None,
        }
    }
}

impl ScanConfig {
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_progress_check(mut self, enabled: bool) -> Self {
        self.check_progress = enabled;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ContractPolicy) -> Self {
        self.contract_policy = policy;
        self
    }

    #[must_use]
    pub fn with_max_steps(mut self, limit: u64) -> Self {
        self.max_steps = Some(limit);
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = Some(name.into());
        self
    }
}
