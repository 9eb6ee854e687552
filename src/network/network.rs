use std::fmt;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NnError, NnResult};
use crate::math::matrix::{Matrix, MatrixMut};
use crate::math::ops::{add_in_place, apply_elementwise, multiply};
use crate::math::vector::Vector;

/// Address of one trainable scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Weight { layer: usize, row: usize, col: usize },
    Bias { layer: usize, index: usize },
}

/// Fully connected feedforward network.
///
/// For `L` layer sizes there are `L - 1` weight matrices of shape
/// `(sizes[i], sizes[i + 1])`, `L - 1` bias vectors of length `sizes[i + 1]`
/// and `L` activation buffers of length `sizes[i]`. The activation buffers are
/// scratch space rewritten by every [`forward`](Network::forward) call; they are
/// never serialized and never randomized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "NetworkParams")]
pub struct Network {
    layer_sizes: Vec<usize>,
    activation: ActivationFunction,
    weights: Vec<Matrix>,
    biases: Vec<Vector>,
    #[serde(skip_serializing)]
    activations: Vec<Vector>,
}

/// On-disk form of a network: everything except the scratch buffers.
#[derive(Deserialize)]
struct NetworkParams {
    layer_sizes: Vec<usize>,
    #[serde(default)]
    activation: ActivationFunction,
    weights: Vec<Matrix>,
    biases: Vec<Vector>,
}

impl TryFrom<NetworkParams> for Network {
    type Error = NnError;

    fn try_from(params: NetworkParams) -> NnResult<Network> {
        let mut network = Network::new(&params.layer_sizes)?.with_activation(params.activation);
        if params.weights.len() != network.weights.len() {
            return Err(NnError::mismatch(
                "load",
                (network.weights.len(), 0),
                (params.weights.len(), 0),
            ));
        }
        if params.biases.len() != network.biases.len() {
            return Err(NnError::mismatch(
                "load",
                (network.biases.len(), 0),
                (params.biases.len(), 0),
            ));
        }
        for (dst, src) in network.weights.iter_mut().zip(&params.weights) {
            dst.copy_from(src)?;
        }
        for (dst, src) in network.biases.iter_mut().zip(&params.biases) {
            dst.copy_from(src)?;
        }
        Ok(network)
    }
}

impl Network {
    /// Allocates a zero-valued network for `layer_sizes` (input layer first).
    ///
    /// The sizes are copied; the caller's slice need not outlive the network.
    pub fn new(layer_sizes: &[usize]) -> NnResult<Network> {
        if layer_sizes.len() < 2 {
            return Err(NnError::InvalidTopology(format!(
                "need at least an input and an output layer, got {} layer(s)",
                layer_sizes.len()
            )));
        }
        if let Some(i) = layer_sizes.iter().position(|&n| n == 0) {
            return Err(NnError::InvalidTopology(format!("layer {} has no neurons", i)));
        }

        let mut weights = Vec::with_capacity(layer_sizes.len() - 1);
        let mut biases = Vec::with_capacity(layer_sizes.len() - 1);
        let mut activations = Vec::with_capacity(layer_sizes.len());

        activations.push(Vector::zeros(layer_sizes[0])?);
        for pair in layer_sizes.windows(2) {
            weights.push(Matrix::zeros(pair[0], pair[1])?);
            biases.push(Vector::zeros(pair[1])?);
            activations.push(Vector::zeros(pair[1])?);
        }

        Ok(Network {
            layer_sizes: layer_sizes.to_vec(),
            activation: ActivationFunction::default(),
            weights,
            biases,
            activations,
        })
    }

    pub fn with_activation(mut self, activation: ActivationFunction) -> Network {
        self.activation = activation;
        self
    }

    /// Fills every weight and bias with uniform samples from `[low, high)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, low: f32, high: f32) {
        for (w, b) in self.weights.iter_mut().zip(self.biases.iter_mut()) {
            w.fill_random_uniform(rng, low, high);
            b.fill_random_uniform(rng, low, high);
        }
    }

    /// Propagates `input` through every layer and returns the output activations.
    ///
    /// Each transition computes `a[i + 1] = f(a[i] * W[i] + b[i])` in place, in the
    /// activation buffer of layer `i + 1`. The returned reference points at
    /// scratch storage that the next call overwrites.
    pub fn forward(&mut self, input: &[f32]) -> NnResult<&Vector> {
        self.activations[0].copy_from_slice(input)?;

        let activation = self.activation;
        for i in 0..self.weights.len() {
            let (done, rest) = self.activations.split_at_mut(i + 1);
            let mut out = rest[0].as_row_mut();
            multiply(&mut out, done[i].as_row(), self.weights[i].view())?;
            add_in_place(&mut out, self.biases[i].as_row())?;
            apply_elementwise(&mut out, |x| activation.function(x));
        }

        Ok(self.output())
    }

    /// Output of the most recent forward pass.
    pub fn output(&self) -> &Vector {
        &self.activations[self.activations.len() - 1]
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn input_size(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Vector] {
        &self.biases
    }

    pub fn activations(&self) -> &[Vector] {
        &self.activations
    }

    /// Shape-preserving mutable access to the weights of transition `layer`.
    pub fn weight_mut(&mut self, layer: usize) -> MatrixMut<'_> {
        self.weights[layer].view_mut()
    }

    /// Shape-preserving mutable access to the biases of transition `layer`, as a row.
    pub fn bias_mut(&mut self, layer: usize) -> MatrixMut<'_> {
        self.biases[layer].as_row_mut()
    }

    pub fn parameter_count(&self) -> usize {
        self.weights.iter().map(|w| w.data().len()).sum::<usize>()
            + self.biases.iter().map(Vector::len).sum::<usize>()
    }

    /// Every parameter address in training order: all weights by layer, row and
    /// column, then all biases by layer and index.
    ///
    /// The iterator does not borrow the network.
    pub fn param_ids(&self) -> impl Iterator<Item = ParamId> {
        let shapes: Vec<(usize, usize)> = self.weights.iter().map(Matrix::shape).collect();
        let bias_lens: Vec<usize> = self.biases.iter().map(Vector::len).collect();

        let weights = shapes.into_iter().enumerate().flat_map(|(layer, (rows, cols))| {
            (0..rows).flat_map(move |row| (0..cols).map(move |col| ParamId::Weight { layer, row, col }))
        });
        let biases = bias_lens
            .into_iter()
            .enumerate()
            .flat_map(|(layer, len)| (0..len).map(move |index| ParamId::Bias { layer, index }));

        weights.chain(biases)
    }

    pub fn param(&self, id: ParamId) -> f32 {
        match id {
            ParamId::Weight { layer, row, col } => self.weights[layer].at(row, col),
            ParamId::Bias { layer, index } => self.biases[layer].data()[index],
        }
    }

    pub fn param_mut(&mut self, id: ParamId) -> &mut f32 {
        match id {
            ParamId::Weight { layer, row, col } => {
                let cols = self.weights[layer].cols();
                &mut self.weights[layer].data_mut()[row * cols + col]
            }
            ParamId::Bias { layer, index } => &mut self.biases[layer].data_mut()[index],
        }
    }

    /// Flattened copy of all parameters in [`param_ids`](Network::param_ids) order.
    pub fn parameters(&self) -> Vec<f32> {
        self.param_ids().map(|id| self.param(id)).collect()
    }

    /// Overwrites all parameters from a slice in [`param_ids`](Network::param_ids) order.
    pub fn set_parameters(&mut self, values: &[f32]) -> NnResult<()> {
        let count = self.parameter_count();
        if values.len() != count {
            return Err(NnError::mismatch("set_parameters", (1, count), (1, values.len())));
        }
        for (id, &value) in self.param_ids().zip(values) {
            *self.param_mut(id) = value;
        }
        Ok(())
    }

    /// Serializes the parameters to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> NnResult<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| NnError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Loads a network previously written by `save_json`, re-checking every shape.
    pub fn load_json<P: AsRef<Path>>(path: P) -> NnResult<Network> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| NnError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (w, b)) in self.weights.iter().zip(&self.biases).enumerate() {
            writeln!(f, "Layer n. {}\n", i + 1)?;
            writeln!(f, "  Weight matrix:")?;
            writeln!(f, "{}\n", w)?;
            writeln!(f, "  Bias vector:")?;
            writeln!(f, "{}\n", b)?;
        }
        Ok(())
    }
}
