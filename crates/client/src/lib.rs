pub mod error;
pub mod gateway;
pub mod mock;
pub mod resources;

pub use error::*;
pub use gateway::*;
pub use mock::*;
pub use resources::*;
