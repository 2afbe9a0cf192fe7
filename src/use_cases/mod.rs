// Use cases layer: application workflows for the simulation core.

pub mod game;
pub mod session;
pub mod types;

pub use game::GameLoop;
pub use session::{Session, SessionError, SessionHandle, SessionRegistry, SessionSettings};
pub use types::{GameEvent, TickReport, WorldUpdate};
