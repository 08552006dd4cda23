//! Terminal rendering.

pub mod enduro_scene;
mod game_common;
