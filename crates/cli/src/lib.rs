//! Nora CLI library
//!
//! Command implementations and the working-tree helpers they share:
//! repository discovery, ignore rules, traversal, settings, locking and
//! terminal rendering.

pub mod cmd;
pub mod ignore;
pub mod locks;
pub mod render;
pub mod settings;
pub mod util;
pub mod worktree;
