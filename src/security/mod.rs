pub mod danger;

pub use danger::{DangerClassifier, DangerousOp, is_dangerous};
