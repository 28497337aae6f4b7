pub mod health;
pub mod sessions;
pub mod transactions;

pub use health::*;
pub use sessions::*;
pub use transactions::*;
