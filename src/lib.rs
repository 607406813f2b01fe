//! treemaze: procedurally generated binary-tree mazes.
//!
//! A maze is a binary tree of rooms grown at random from the entrance. One
//! leaf becomes the exit, a key is hidden on the leftmost spine with a locked
//! door somewhere deeper, and hazards are scattered over the remaining rooms.
//!
//! Layers:
//! - [`domain`]: arena tree, builder, traversals and event placement
//! - [`application`]: game session, rendering, play loop
//! - [`infrastructure`]: terminal I/O boundary and service container
//! - [`cli`]: clap front-end

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
