pub mod ids;
pub mod intent;
pub mod money;
pub mod phone;
pub mod records;

pub use ids::*;
pub use intent::*;
pub use money::*;
pub use phone::*;
pub use records::*;

/// Currency code the remote gateway settles in.
pub const CURRENCY: &str = "KES";
