pub mod logging;
pub mod tensor;
pub mod vec2;
pub mod vec3;

pub use logging::{init_file_logger, init_stdout_logger, FileLogger, StdoutLogger};
pub use tensor::{Tensor, TensorError};
pub use vec2::Vec2;
pub use vec3::Vec3;

// Re-export log crate so downstream crates can use gloss_base::log::*
pub use log;
