pub mod animation;
pub mod assets;
pub mod clock;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod mascot;
pub mod motion;
pub mod surface;
pub mod watcher;
