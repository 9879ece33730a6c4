pub mod classifier;
pub mod features;

pub use classifier::{Gesture, GestureClassifier};
pub use features::FeatureSet;
