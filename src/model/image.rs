use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{consts::CDN_BASE, error::SchemaError, model::Snowflake};

/// Content hash of an uploaded image. Not a URL: see [`ImageKind::url`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHash(String);

impl ImageHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// Animated images are stored under hashes prefixed with `a_`.
    pub fn is_animated(&self) -> bool {
        self.0.starts_with("a_")
    }
}

impl Display for ImageHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    Gif,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::WebP => "webp",
            ImageFormat::Gif => "gif",
        }
    }
}

/// Requested edge length, a power of two between 16 and 4096.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageSize(u32);

impl ImageSize {
    pub const MIN: ImageSize = ImageSize(16);
    pub const MAX: ImageSize = ImageSize(4096);

    pub fn new(size: u32) -> Result<Self, SchemaError> {
        if size.is_power_of_two() && (Self::MIN.0..=Self::MAX.0).contains(&size) {
            Ok(Self(size))
        } else {
            Err(SchemaError::ImageSize(size))
        }
    }
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ImageSize {
    type Error = SchemaError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

/// CDN endpoints for the image hashes a guild snapshot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    GuildIcon,
    GuildSplash,
    GuildDiscoverySplash,
    GuildBanner,
    RoleIcon,
}

impl ImageKind {
    pub fn path(self) -> &'static str {
        match self {
            ImageKind::GuildIcon => "icons",
            ImageKind::GuildSplash => "splashes",
            ImageKind::GuildDiscoverySplash => "discovery-splashes",
            ImageKind::GuildBanner => "banners",
            ImageKind::RoleIcon => "role-icons",
        }
    }

    fn allows(self, format: ImageFormat, hash: &ImageHash) -> bool {
        match format {
            ImageFormat::Gif => {
                matches!(self, ImageKind::GuildIcon | ImageKind::GuildBanner) && hash.is_animated()
            }
            _ => true,
        }
    }

    /// `https://cdn.discordapp.com/{kind}/{owner}/{hash}.{ext}?size={size}`
    ///
    /// `owner` is the guild id for guild images and the role id for role icons.
    pub fn url(
        self,
        owner: Snowflake,
        hash: &ImageHash,
        format: ImageFormat,
        size: Option<ImageSize>,
    ) -> Result<String, SchemaError> {
        if !self.allows(format, hash) {
            return Err(SchemaError::ImageFormat {
                kind: self.path(),
                format: format.extension(),
            });
        }
        let mut url = format!(
            "{CDN_BASE}/{}/{owner}/{hash}.{}",
            self.path(),
            format.extension()
        );
        if let Some(size) = size {
            url.push_str(&format!("?size={}", size.get()));
        }
        Ok(url)
    }
}
