//! # Progman Architecture
//!
//! Progman ends catalogued programs from a terminal menu. A JSON catalog maps
//! categories to programs and programs to the executables they run as; the
//! menu lists them with their running state, ends them one by one or a
//! category at a time, and rescans the disk to find where they are installed.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Menu loop, prompts, tables, log file setup               │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses menu answers into selections                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - list, end, scan                                          │
//! │  - Returns CmdResult values, never prints                   │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                            │
//!                  ▼                            ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Storage (store/) + scan.rs   │ │  Process probe (probe/)   │
//! │  - CatalogStore trait         │ │  - ProcessProbe trait     │
//! │  - FileStore, InMemoryStore   │ │  - SystemProbe, FakeProbe │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## No Shared State
//!
//! The working [`model::Catalog`] is an ordinary value owned by the shell. It
//! is passed into the API and a scan hands back a new one; no module keeps a
//! global copy.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each menu action
//! - [`store`]: Catalog persistence
//! - [`scan`]: Filesystem scanner
//! - [`probe`]: Process status and termination
//! - [`index`]: Numbered selection tables
//! - [`model`]: `Catalog`, `Program`, `ScanPathTemplate`
//! - [`config`]: Configuration and file layout
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod probe;
pub mod scan;
pub mod store;
