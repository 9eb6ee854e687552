use serde::{Serialize, Deserialize};

/// Progress report emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop sends
/// one `StepStats` every `log_every` steps and after the final step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepStats {
    /// 1-based number of the `learn` call just completed.
    pub step: usize,
    /// Total steps requested for this run.
    pub total_steps: usize,
    /// Cost over the full dataset after this step.
    pub cost: f32,
    /// Wall-clock time since the run started, in milliseconds.
    pub elapsed_ms: u64,
}
