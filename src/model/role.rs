use std::cmp::Ordering;

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

use crate::{
    error::SchemaError,
    model::{ImageFormat, ImageHash, ImageKind, ImageSize, Snowflake},
    utils::null_flag,
};

/// Roles carry a set of permissions for a group of members. The `@everyone`
/// role shares its id with the guild.
#[derive(Serialize, Deserialize, Validate, Clone, Debug, PartialEq, Eq)]
pub struct Role {
    pub id: Snowflake,
    #[validate(length(max = 100, message = "role name must be at most 100 characters"))]
    pub name: String,
    /// RGB color, 0 means no color
    pub color: u32,
    /// shown separately in the member list
    pub hoist: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub icon: Option<Option<ImageHash>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub unicode_emoji: Option<Option<String>>,
    /// roles sharing a position are ordered by id
    pub position: i32,
    pub permissions: Permissions,
    pub managed: bool,
    pub mentionable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<RoleTags>,
    #[serde(default)]
    pub flags: RoleFlags,
}

impl Role {
    /// Display order: position, then id.
    pub fn cmp_position(&self, other: &Role) -> Ordering {
        self.position
            .cmp(&other.position)
            .then_with(|| self.id.cmp(&other.id))
    }

    pub fn icon_url(
        &self,
        format: ImageFormat,
        size: Option<ImageSize>,
    ) -> Result<Option<String>, SchemaError> {
        match &self.icon {
            Some(Some(hash)) => ImageKind::RoleIcon.url(self.id, hash, format, size).map(Some),
            _ => Ok(None),
        }
    }

    pub fn tags(&self) -> RoleTags {
        self.tags.clone().unwrap_or_default()
    }
}

/// Ownership metadata of special roles.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleTags {
    /// bot this role belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<Snowflake>,
    /// integration this role belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<Snowflake>,
    /// the guild's booster role
    #[serde(default, with = "null_flag", skip_serializing_if = "null_flag::is_unset")]
    pub premium_subscriber: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_listing_id: Option<Snowflake>,
    #[serde(default, with = "null_flag", skip_serializing_if = "null_flag::is_unset")]
    pub available_for_purchase: bool,
    /// linked role
    #[serde(default, with = "null_flag", skip_serializing_if = "null_flag::is_unset")]
    pub guild_connections: bool,
}

impl RoleTags {
    pub fn is_bot_role(&self) -> bool {
        self.bot_id.is_some()
    }
    pub fn is_integration_role(&self) -> bool {
        self.integration_id.is_some()
    }
    pub fn is_subscription_role(&self) -> bool {
        self.subscription_listing_id.is_some()
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RoleFlags: u32 {
        /// selectable in an onboarding prompt
        const IN_PROMPT = 1 << 0;
    }
}

impl Default for RoleFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for RoleFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for RoleFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u32::deserialize(deserializer)?;
        Ok(RoleFlags::from_bits_retain(bits))
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        const CREATE_INSTANT_INVITE = 1 << 0;
        const KICK_MEMBERS = 1 << 1;
        const BAN_MEMBERS = 1 << 2;
        const ADMINISTRATOR = 1 << 3;
        const MANAGE_CHANNELS = 1 << 4;
        const MANAGE_GUILD = 1 << 5;
        const ADD_REACTIONS = 1 << 6;
        const VIEW_AUDIT_LOG = 1 << 7;
        const PRIORITY_SPEAKER = 1 << 8;
        const STREAM = 1 << 9;
        const VIEW_CHANNEL = 1 << 10;
        const SEND_MESSAGES = 1 << 11;
        const SEND_TTS_MESSAGES = 1 << 12;
        const MANAGE_MESSAGES = 1 << 13;
        const EMBED_LINKS = 1 << 14;
        const ATTACH_FILES = 1 << 15;
        const READ_MESSAGE_HISTORY = 1 << 16;
        const MENTION_EVERYONE = 1 << 17;
        const USE_EXTERNAL_EMOJIS = 1 << 18;
        const VIEW_GUILD_INSIGHTS = 1 << 19;
        const CONNECT = 1 << 20;
        const SPEAK = 1 << 21;
        const MUTE_MEMBERS = 1 << 22;
        const DEAFEN_MEMBERS = 1 << 23;
        const MOVE_MEMBERS = 1 << 24;
        const USE_VAD = 1 << 25;
        const CHANGE_NICKNAME = 1 << 26;
        const MANAGE_NICKNAMES = 1 << 27;
        const MANAGE_ROLES = 1 << 28;
        const MANAGE_WEBHOOKS = 1 << 29;
        const MANAGE_GUILD_EXPRESSIONS = 1 << 30;
        const USE_APPLICATION_COMMANDS = 1 << 31;
        const REQUEST_TO_SPEAK = 1 << 32;
        const MANAGE_EVENTS = 1 << 33;
        const MANAGE_THREADS = 1 << 34;
        const CREATE_PUBLIC_THREADS = 1 << 35;
        const CREATE_PRIVATE_THREADS = 1 << 36;
        const USE_EXTERNAL_STICKERS = 1 << 37;
        const SEND_MESSAGES_IN_THREADS = 1 << 38;
        const USE_EMBEDDED_ACTIVITIES = 1 << 39;
        const MODERATE_MEMBERS = 1 << 40;
        const VIEW_CREATOR_MONETIZATION_ANALYTICS = 1 << 41;
        const USE_SOUNDBOARD = 1 << 42;
        const CREATE_GUILD_EXPRESSIONS = 1 << 43;
        const CREATE_EVENTS = 1 << 44;
        const USE_EXTERNAL_SOUNDS = 1 << 45;
        const SEND_VOICE_MESSAGES = 1 << 46;
        const SEND_POLLS = 1 << 49;
        const USE_EXTERNAL_APPS = 1 << 50;
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::empty()
    }
}

// serialized as a decimal string, bits Discord adds later are kept as-is
impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.bits())
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bits = s
            .parse::<u64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid permission bits <{s}>: {e}")))?;
        Ok(Permissions::from_bits_retain(bits))
    }
}
