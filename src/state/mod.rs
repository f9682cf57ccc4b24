//! Application state module

mod forms;
pub mod notifications;

pub use forms::*;
pub use notifications::{Notification, Notifications};
