pub mod audio;
pub mod context;
pub mod errors;
pub mod filters;
pub mod leaderboard;
pub mod models;
pub mod points;
pub mod reminders;
pub mod repo;
pub mod session;
pub mod spin;
pub mod stats;

pub use audio::*;
pub use context::*;
pub use errors::*;
pub use filters::*;
pub use leaderboard::*;
pub use models::*;
pub use reminders::*;
pub use repo::*;
pub use session::*;
pub use spin::*;
pub use stats::*;
