//! Engine-agnostic building blocks: math, guard macros, logging, buffers.

#[macro_use]
pub mod utils;
pub mod math;
pub mod trail_buffer;
