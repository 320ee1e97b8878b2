//! UI components.

pub mod seasonal_scene;
