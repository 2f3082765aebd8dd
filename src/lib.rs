//! # Loopbook
//!
//! A local-first journal engine for documenting a design/innovation process:
//! projects move through phases (Framing, Exploration, Pilot, Delivery,
//! Finish), accumulate exploration loops (Explore/Build/Check/Adapt),
//! artifacts, timestamped decisions, and time/cost records, and can be
//! projected into formatted report documents.
//!
//! ## Architecture
//!
//! ```text
//! CLI / caller → Project aggregate (in memory)
//!                      ↓ whole-record write
//!                ProjectStore → KeyValueStore (SQLite)
//!                      ↓ read-back
//!                listing projection / report exporter → HTML document
//! ```
//!
//! The whole project collection persists under one key-value entry and is
//! read and written wholesale; the store serializes writers and rejects
//! stale updates by version.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use loopbook::config::Config;
//! use loopbook::model::Project;
//! use loopbook::storage::{ProjectStore, SqliteKv};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let kv = SqliteKv::new(&config.database).await?;
//!     let store = ProjectStore::new(Arc::new(kv));
//!     let project = store.save(Project::new("Mobile App Redesign")).await?;
//!     println!("{}", project.id);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Configuration management.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Report document export.
pub mod export;
/// Pure filter/sort projection for listing screens.
pub mod listing;
/// Domain model: projects, loops, artifacts, decisions.
pub mod model;
/// Key-value storage layer for persistence.
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use model::{Phase, Project};
pub use storage::ProjectStore;
