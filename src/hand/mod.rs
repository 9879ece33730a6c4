pub mod detector;
pub mod landmark;
pub mod preprocess;

pub use detector::HandDetector;
pub use landmark::{Hand, HandFrame, LandmarkIndex, Point3};
pub use preprocess::{preprocess_for_landmarker, LANDMARKER_INPUT_SIZE};
