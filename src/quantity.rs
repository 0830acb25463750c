#[macro_use]
mod macros;

pub mod capacity;
pub mod count;
pub mod percent;
pub mod rotation;
pub mod storage;
pub mod temperature;
pub mod time;
