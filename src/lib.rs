//! Sector/portal 2.5D software renderer.
//!
//! A level is a set of convex sectors joined by portal walls. The
//! [`renderer::Software`] backend draws it column by column, walking from
//! the camera's sector through every visible portal.

pub mod config;
pub mod engine;
pub mod mapfile;
pub mod math;
pub mod renderer;
pub mod world;
