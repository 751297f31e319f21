pub mod classify;
pub mod error;
pub mod keywords;
pub mod normalize;
pub mod pipeline;

pub use classify::Classifier;
pub use error::ClassifyError;
pub use normalize::fold_ascii;
pub use pipeline::{ClassifyResult, run_classify};
