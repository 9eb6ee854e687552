use crate::{
    data::dataset::Dataset,
    error::{NnError, NnResult},
    loss::mse::MseLoss,
    network::network::Network,
};

/// Mean over all examples of the summed squared output error.
///
/// Runs a forward pass per example, so the network's activation buffers are
/// overwritten; weights and biases are only read. An empty dataset costs `0`.
pub fn cost(network: &mut Network, dataset: &Dataset) -> NnResult<f32> {
    check_compatible(network, dataset)?;
    if dataset.is_empty() {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for (input, target) in dataset.iter() {
        let output = network.forward(input)?;
        total += MseLoss::squared_error(output.data(), target);
    }
    Ok(total / dataset.len() as f32)
}

/// One finite-difference training step over every parameter.
///
/// For each parameter `p`, in [`Network::param_ids`] order: set `p + epsilon`,
/// measure the cost, estimate `(cost - base_cost) / epsilon` against the cost
/// taken once at the start of the step, then write
/// `p_original - learning_rate * gradient`. Parameters updated earlier in the
/// step are already in effect when later ones are perturbed.
///
/// `epsilon` must be non-zero.
///
/// The dataset is checked against the topology before anything is written, so
/// a returned error means no parameter changed.
pub fn learn(network: &mut Network, dataset: &Dataset, epsilon: f32, learning_rate: f32) -> NnResult<()> {
    debug_assert!(epsilon != 0.0, "finite-difference step must be non-zero");

    let base_cost = cost(network, dataset)?;

    for id in network.param_ids() {
        let original = network.param(id);
        *network.param_mut(id) = original + epsilon;
        let perturbed_cost = cost(network, dataset)?;
        let gradient = (perturbed_cost - base_cost) / epsilon;
        *network.param_mut(id) = original - learning_rate * gradient;
    }

    Ok(())
}

fn check_compatible(network: &Network, dataset: &Dataset) -> NnResult<()> {
    let expected = (network.input_size(), network.output_size());
    let found = (dataset.input_width(), dataset.target_width());
    if expected != found {
        return Err(NnError::mismatch("dataset", expected, found));
    }
    Ok(())
}
