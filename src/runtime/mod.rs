pub mod controller;
pub mod lifecycle;

pub use controller::AirdropController;
pub use lifecycle::{LifecycleState, StatusEvent, SubmitOutcome};
