use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{debug, info, warn};

use crate::data::dataset::Dataset;
use crate::error::NnResult;
use crate::network::network::Network;
use crate::train::step_stats::StepStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{cost, learn};

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Runs `config.steps` sequential `learn` calls on `network` and returns the
/// cost over `dataset` after the last completed step.
///
/// The network is not re-initialised; randomise it first if needed.
///
/// # Early termination
/// The loop stops before the next step if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// Fails before the first step if `dataset` does not fit the network.
pub fn train_loop(network: &mut Network, dataset: &Dataset, config: &TrainConfig) -> NnResult<f32> {
    let mut last_cost = cost(network, dataset)?;
    info!(
        "training {} parameters on {} examples for {} steps (epsilon={}, rate={}), initial cost {:.6}",
        network.parameter_count(),
        dataset.len(),
        config.steps,
        config.epsilon,
        config.learning_rate,
        last_cost,
    );

    let t_start = Instant::now();

    for step in 1..=config.steps {
        if stop_requested(config) {
            warn!("stop requested after {} of {} steps", step - 1, config.steps);
            break;
        }

        learn(network, dataset, config.epsilon, config.learning_rate)?;

        if !should_report(step, config) {
            continue;
        }

        // ── Report ────────────────────────────────────────────────────────
        last_cost = cost(network, dataset)?;
        let stats = StepStats {
            step,
            total_steps: config.steps,
            cost: last_cost,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!("step {}/{}: cost = {:.6}", stats.step, stats.total_steps, stats.cost);

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                debug!("progress receiver dropped at step {}", step);
                return Ok(last_cost);
            }
        }
    }

    last_cost = cost(network, dataset)?;
    info!("finished in {:?}, final cost {:.6}", t_start.elapsed(), last_cost);
    Ok(last_cost)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map_or(false, |flag| flag.load(Ordering::Relaxed))
}

fn should_report(step: usize, config: &TrainConfig) -> bool {
    step == config.steps || (config.log_every > 0 && step % config.log_every == 0)
}
