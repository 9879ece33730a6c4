pub mod skeleton;
pub mod window;

pub use window::MinifbRenderer;
