pub mod error;
pub mod period;
pub mod portfolio;
pub mod stage;
pub mod tenant;

pub use error::*;
pub use period::*;
pub use portfolio::*;
pub use stage::*;
pub use tenant::*;
