// Interface adapters: render protocol, input entry points and scripted collaborators.

pub mod autopilot;
pub mod input;
pub mod protocol;
pub mod render;
