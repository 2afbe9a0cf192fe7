// Per-tick systems operating on the entity store.

pub mod collision;
pub mod movement;
pub mod spawn;
