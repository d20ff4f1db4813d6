pub mod change;
pub mod config;
pub mod error;
pub mod notice;
pub mod roster;

pub use change::{RosterChange, SubscriptionId};
pub use config::PickConfig;
pub use error::{ConfigError, RosterError};
pub use notice::{Notice, NoticeCode, NoticeKind};
pub use roster::{seeded_rng, NameRoster, RosterView, PICK_PLACEHOLDER, SAMPLE_NAMES};
