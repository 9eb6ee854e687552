pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{NnError, NnResult};
pub use math::{Matrix, MatrixMut, MatrixRef, Vector};
pub use activation::activation::ActivationFunction;
pub use network::network::{Network, ParamId};
pub use data::dataset::Dataset;
pub use loss::mse::MseLoss;
pub use train::{cost, learn, train_loop, StepStats, TrainConfig};
