//! Content loaders for reading combat data from files.
//!
//! Every loader parses its file format, then builds the validated catalog
//! from combat-core so malformed data never reaches a running simulation.

pub mod actors;
pub mod attacks;
pub mod config;
pub mod factory;
pub mod loot;
pub mod scenario;

pub use actors::ActorLoader;
pub use attacks::AttackLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use loot::LootLoader;
pub use scenario::ScenarioLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
