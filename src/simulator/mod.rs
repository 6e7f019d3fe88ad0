//! Turn controller, endings, and autoplay

mod ending;
mod engine;
mod log;
mod session;
mod sink;


pub use ending::*;
pub use engine::*;
pub use log::*;
pub use session::*;
pub use sink::*;
