mod channel;
mod stdout;

pub use channel::*;
pub use stdout::*;
