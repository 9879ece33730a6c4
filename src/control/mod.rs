pub mod mapper;
pub mod pipeline;

pub use mapper::{ControlEvent, ControlMapper};
pub use pipeline::Pipeline;
