//! # Arena Client Library
//!
//! A headless client for the snake arena server. It has no renderer: it
//! connects over UDP, keeps a local mirror of the broadcast world and can
//! steer its own snake toward food, which makes it handy for load testing
//! and for watching a server from the terminal.
//!
//! ## Module Organization
//!
//! ### View Module (`view`)
//! Folds server packets (assignment, snapshots, score and death notices)
//! into a [`view::ClientView`].
//!
//! ### Steering Module (`steering`)
//! Wrap-aware autopilot that chases the nearest food.
//!
//! ### Network Module (`network`)
//! Socket handling, heartbeats and the client event loop.

pub mod network;
pub mod steering;
pub mod view;
