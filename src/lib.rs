//! Pixel Arena Server Core
//!
//! A tick-driven 2D spatial simulation: players move on a bounded
//! playfield whose boundary is traced from a bitmap-derived occupancy
//! grid, and each player's visible peer set is recomputed by distance
//! every tick.
//!
//! Transport, session lifecycle, and state replication live outside this
//! crate; the seam is [`room::ArenaRoom`] (synchronous) and
//! [`room::runner`] (the same surface serialized onto a tokio task).

pub mod config;
pub mod game;
pub mod map;
pub mod room;
pub mod util;
