pub mod dispatch;
pub mod order;
mod pending;
mod requirement;

pub use dispatch::{DISPATCH_HEADER, DispatchRow};
pub use order::{OrderRow, OrderSnapshot, RecentOrder};
pub use pending::*;
pub use requirement::*;
