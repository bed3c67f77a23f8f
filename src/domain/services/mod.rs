mod channel;
pub mod identity;
mod overlay;
mod router;
mod session;
mod store;

pub use channel::*;
pub use overlay::*;
pub use router::*;
pub use session::*;
pub use store::*;
