// Asset lookup and loading from the asset directory

use super::spritesheet::SpriteSheet;
use super::AssetError;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Texture,
    Map,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Texture => "textures",
            AssetType::Map => "maps",
        }
    }

    /// Get supported file extensions for this asset type
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetType::Texture => &["png", "jpg", "jpeg"],
            AssetType::Map => &["json"],
        }
    }
}

/// Asset loader responsible for finding and loading asset files
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Load a text asset (maps) from disk
    pub fn load_string(&self, asset_type: AssetType, name: &str) -> Result<String> {
        let path = self.existing_path(asset_type, name)?;

        Ok(std::fs::read_to_string(&path).map_err(AssetError::Io)?)
    }

    /// Read the pixel dimensions of a texture without decoding it
    pub fn sheet(&self, name: &str) -> Result<SpriteSheet> {
        let path = self.existing_path(AssetType::Texture, name)?;
        let (width, height) = image::image_dimensions(&path)
            .map_err(|e| AssetError::LoadError(format!("Failed to read dimensions of {}: {}", name, e)))?;
        Ok(SpriteSheet::new(width, height))
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn existing_path(&self, asset_type: AssetType, name: &str) -> Result<PathBuf> {
        let path = self.resolve_path(asset_type, name);
        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()).into());
        }
        let supported = path
            .extension()
            .map(|ext| asset_type.extensions().contains(&ext.to_string_lossy().as_ref()))
            .unwrap_or(false);
        if !supported {
            return Err(AssetError::UnsupportedFormat(name.to_string()).into());
        }
        Ok(path)
    }
}
