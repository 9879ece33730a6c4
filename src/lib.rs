pub mod camera;
pub mod config;
pub mod control;
pub mod gesture;
pub mod hand;
pub mod render;
pub mod session;
