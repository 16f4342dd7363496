//! deckhand: card search and deck export backend for a trading card game.
//!
//! Card lists are read from CSV files on every request, filtered in memory
//! and served as JSON over HTTP.

pub mod config;
pub mod data;
pub mod deck;
pub mod server;
pub mod state;
