mod catalog;
mod simulate;

pub use catalog::Catalog;
pub use simulate::Simulate;

use std::path::PathBuf;

use combat_content::ContentFactory;

/// Data directory from `--data`, or the content shipped with the workspace.
pub(crate) fn content_factory(data: Option<PathBuf>) -> ContentFactory {
    ContentFactory::new(data.unwrap_or_else(ContentFactory::bundled_data_dir))
}
