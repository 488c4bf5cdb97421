pub mod controller;
pub mod events;
pub mod mode;
pub mod state;
pub mod timers;

pub use controller::{SessionController, SessionOptions};
pub use events::{Command, EndReason, GameEvent, SessionSummary};
pub use mode::GameMode;
pub use state::{SessionPhase, SessionState, Settings, Snapshot};
pub use timers::{TimerKind, TimerToken, Timers};
