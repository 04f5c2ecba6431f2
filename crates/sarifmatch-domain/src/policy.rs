#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    #[default]
    Sequential,
    /// Resolve locations on the rayon pool; results keep traversal order.
    Parallel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Stop at the first bad location.
    #[default]
    FailFast,
    /// Resolve every location and report each outcome.
    CollectAll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorrelationPolicy {
    pub execution: Execution,
    pub failure_mode: FailureMode,
    /// Cap on findings written to a receipt; never affects the verdict.
    pub max_findings: usize,
}

impl Default for CorrelationPolicy {
    fn default() -> Self {
        Self {
            execution: Execution::Sequential,
            failure_mode: FailureMode::FailFast,
            max_findings: 200,
        }
    }
}
