use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Serialize, Deserialize};

use crate::error::{NnError, NnResult};
use crate::train::step_stats::StepStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `steps`         — number of `learn` calls
/// - `epsilon`       — finite-difference perturbation; must be non-zero
/// - `learning_rate` — gradient-descent step size
/// - `init_low`, `init_high` — range for the initial uniform parameters
/// - `seed`          — fixed seed for reproducible initialisation; entropy if `None`
/// - `log_every`     — steps between progress reports; `0` reports only the last step
/// - `progress_tx`   — optional channel sender; one `StepStats` per report.
///                     If the receiver is dropped the loop stops early.
/// - `stop_flag`     — optional atomic flag; when set to `true` from another
///                     thread the loop stops before the next step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub steps: usize,
    pub epsilon: f32,
    pub learning_rate: f32,
    pub init_low: f32,
    pub init_high: f32,
    pub seed: Option<u64>,
    pub log_every: usize,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<StepStats>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            steps: 250_000,
            epsilon: 1e-3,
            learning_rate: 1e-2,
            init_low: 0.0,
            init_high: 1.0,
            seed: None,
            log_every: 10_000,
            progress_tx: None,
            stop_flag: None,
        }
    }
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(steps: usize, epsilon: f32, learning_rate: f32) -> Self {
        TrainConfig {
            steps,
            epsilon,
            learning_rate,
            ..TrainConfig::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generator for parameter initialisation.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Reads a config from JSON; missing fields take their defaults.
    pub fn load_json<P: AsRef<Path>>(path: P) -> NnResult<TrainConfig> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| NnError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: TrainConfig = serde_json::from_str(r#"{"steps": 10, "seed": 4}"#).unwrap();
        assert_eq!(cfg.steps, 10);
        assert_eq!(cfg.seed, Some(4));
        assert_eq!(cfg.epsilon, 1e-3);
        assert_eq!(cfg.learning_rate, 1e-2);
        assert!(cfg.progress_tx.is_none());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let cfg = TrainConfig::new(1, 1e-3, 1e-2).with_seed(99);
        let a: Vec<f32> = cfg.rng().sample_iter(rand::distributions::Standard).take(5).collect();
        let b: Vec<f32> = cfg.rng().sample_iter(rand::distributions::Standard).take(5).collect();
        assert_eq!(a, b);
    }
}
