//! Grid Snake - a deterministic snake simulation with a terminal front end
//!
//! This library provides:
//! - Core simulation (game module): grid, timer, snake, food, game loop
//! - Error types (error module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive play mode (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
