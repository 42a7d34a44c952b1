pub mod clock;
pub mod error;
pub mod flow;
pub mod observer;

pub use clock::*;
pub use error::*;
pub use flow::*;
pub use observer::*;
