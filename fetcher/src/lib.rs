pub mod clock;
pub mod config;
mod error;
mod logging;
pub mod poller;
pub mod state;
pub mod widget;

pub use error::FetchError;
pub use poller::{TaskHandle, spawn};
pub use state::{Phase, WidgetState};
pub use widget::Widget;
pub use widget::river::River;
pub use widget::transit::{Transit, TransitBoard};
