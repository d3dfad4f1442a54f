//! Setup status and badge state

pub mod badge;
pub mod setup;

pub use badge::BadgeState;
pub use setup::{check_setup_status, SetupStatus, STALE_DATA_HOURS};
