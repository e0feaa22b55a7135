//! The four message families.
//!
//! Each family exposes the same surface: a kind enumeration, the sum type of
//! its validated messages, `create` / `create_with_clock` entry points and
//! the shared dispatcher instance behind them.

pub mod data;
pub mod execution;
pub mod status;
pub mod task;
