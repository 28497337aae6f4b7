pub mod amount;
pub mod response;
pub mod session;
pub mod transaction;
pub mod widget;

pub use amount::*;
pub use response::*;
pub use session::*;
pub use transaction::*;
pub use widget::*;
