// HTTP routes
pub mod batches;
pub mod generate;
pub mod health;

pub use batches::*;
pub use generate::*;
pub use health::*;
