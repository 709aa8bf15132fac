// Asset system
//
// Locates files under the asset directory and slices spritesheets into frames.

mod loader;
mod spritesheet;

pub use loader::{AssetLoader, AssetType};
pub use spritesheet::{SheetRegion, SpriteSheet};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Unsupported asset format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
