pub mod benchmark;
pub mod error;
pub mod indicators;
pub mod stats;
pub mod traits;
pub mod types;

pub use benchmark::*;
pub use error::*;
pub use indicators::*;
pub use traits::*;
pub use types::*;
