//! pokegrid: a PokeAPI catalog browser built on tui-dispatch.
//!
//! The library exposes every module so the reducer, filter engine and views
//! can be driven from integration tests.

pub mod action;
pub mod api;
pub mod config;
pub mod detail;
pub mod effect;
pub mod favorites;
pub mod filter;
pub mod grid;
pub mod reducer;
pub mod state;
pub mod storage;
pub mod theme;
pub mod ui;
