pub mod asset;
pub mod cli;
pub mod prisma;
pub mod utils;

// Re-export specific items to avoid conflicts
pub use asset::{normalize_search_results, AssetRow, SearchData};
pub use cli::{args, commands};
pub use prisma::{auth, client};
pub use utils::errors;
