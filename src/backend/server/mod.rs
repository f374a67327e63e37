//! Server Module
//!
//! This module contains the server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Configuration loading and database setup
//! - **`init`** - Server initialization and app creation
//! - **`shutdown`** - Signal that ends long-lived responses on shutdown
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - ServerConfig and load_database
//! ├── init.rs         - Server initialization and app creation
//! └── shutdown.rs     - Shutdown signal
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **Store**: open SQLite, run migrations, optionally seed
//! 3. **State Creation**: room registry, membership feed, GraphQL schema
//! 4. **Router Creation**: routes, CORS and request tracing

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

/// Shutdown signal for long-lived responses
pub mod shutdown;

// Re-export commonly used types
pub use config::ServerConfig;
pub use init::{create_app, create_state};
pub use shutdown::Shutdown;
pub use state::AppState;
