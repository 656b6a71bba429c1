//! Side-scrolling platformer simulation core.
//!
//! The library owns every gameplay rule; the `sidescroller` binary only
//! samples input, calls [`compute::tick`] once per frame and draws the result.

pub mod assets;
pub mod camera;
pub mod celebration;
pub mod collisions;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod level;
pub mod patrol;
pub mod physics;
pub mod player;
