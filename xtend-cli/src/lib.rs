//! # xtend-cli
//!
//! Command-line tool generating application-level extensions of vendor modules.
//!
//! This crate provides the `xtend` binary with the following commands:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `xtend generate [MODULE]...` | Generate the mirror package of each module |
//! | `xtend list` | List installed modules and their state |
//! | `xtend inspect <MODULE>` | Show the folders and files a generation would use |
//!
//! ## Architecture
//!
//! - [`commands::generate`] — extension generation (`xtend generate`)
//! - [`commands::list`] — module listing (`xtend list`)
//! - [`commands::inspect`] — per-technology discovery report (`xtend inspect`)

pub mod commands;
