pub mod dataset;

pub use dataset::{parse_table, Dataset};
