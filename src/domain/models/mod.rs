mod click;
mod message;
mod options;
mod presentation;
mod session;
mod transport;
mod view_state;

pub use click::*;
pub use message::*;
pub use options::*;
pub use presentation::*;
pub use session::*;
pub use transport::*;
pub use view_state::*;
