use std::borrow::Cow;

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_repr::{Deserialize_repr, Serialize_repr};
use validator::{Validate, ValidationError};

use crate::{
    error::SchemaError,
    model::{GuildEmoji, ImageFormat, ImageHash, ImageKind, ImageSize, Role, Snowflake},
    utils::required_nullable,
};

pub type GuildId = Snowflake;

/// Snapshot of a guild as returned by `GET /guilds/{guild.id}`.
///
/// Fields typed `Option<Option<T>>` may be missing from the payload (outer
/// `None`) or sent as `null` (`Some(None)`); which one depends on the route
/// and on the token type used, so both are kept.
#[derive(Serialize, Deserialize, Validate, Clone, Debug, PartialEq, Eq)]
pub struct Guild {
    pub id: GuildId,
    /// 2-100 characters, surrounding whitespace not counted
    #[validate(custom(function = "validate_guild_name"))]
    pub name: String,
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
    pub description: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub splash: Option<Option<ImageHash>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub discovery_splash: Option<Option<ImageHash>>,
    /// only with `with_counts=true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_member_count: Option<u64>,
    /// only with `with_counts=true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_presence_count: Option<u64>,
    pub features: Vec<GuildFeature>,
    pub emojis: Vec<GuildEmoji>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub banner: Option<Option<ImageHash>>,
    pub owner_id: Snowflake,
    /// set when the guild was created by a bot
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub application_id: Option<Option<Snowflake>>,
    /// deprecated, voice regions are set per channel
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub region: Option<Option<String>>,
    #[serde(deserialize_with = "required_nullable")]
    pub afk_channel_id: Option<Snowflake>,
    pub afk_timeout: AfkTimeout,
    #[serde(deserialize_with = "required_nullable")]
    pub system_channel_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_enabled: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub widget_channel_id: Option<Option<Snowflake>>,
    pub verification_level: VerificationLevel,
    #[validate(nested)]
    pub roles: Vec<Role>,
    pub default_message_notifications: DefaultMessageNotificationLevel,
    pub mfa_level: MfaLevel,
    pub explicit_content_filter: ExplicitContentFilterLevel,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub max_presences: Option<Option<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_members: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_video_channel_users: Option<u64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub vanity_url_code: Option<Option<String>>,
    pub premium_tier: PremiumTier,
    /// number of boosts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_subscription_count: Option<u64>,
    pub system_channel_flags: SystemChannelFlags,
    pub preferred_locale: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub rules_channel_id: Option<Option<Snowflake>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub public_updates_channel_id: Option<Option<Snowflake>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub safety_alerts_channel_id: Option<Option<Snowflake>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsfw_level: Option<NsfwLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_progress_bar_enabled: Option<bool>,
}

pub(crate) fn validate_guild_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if (2..=100).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new("length").with_message(Cow::Borrowed(
            "guild name must be 2-100 characters, excluding surrounding whitespace",
        )))
    }
}

fn image_url(
    kind: ImageKind,
    guild_id: GuildId,
    hash: &Option<Option<ImageHash>>,
    format: ImageFormat,
    size: Option<ImageSize>,
) -> Result<Option<String>, SchemaError> {
    match hash {
        Some(Some(hash)) => kind.url(guild_id, hash, format, size).map(Some),
        _ => Ok(None),
    }
}

impl Guild {
    /// Roles in display order, ties on position broken by id.
    pub fn sorted_roles(&self) -> Vec<&Role> {
        let mut roles = self.roles.iter().collect::<Vec<_>>();
        roles.sort_by(|a, b| a.cmp_position(b));
        roles
    }

    pub fn everyone_role(&self) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == self.id)
    }

    pub fn has_feature(&self, feature: GuildFeature) -> bool {
        self.features.contains(&feature)
    }

    pub fn icon_url(
        &self,
        format: ImageFormat,
        size: Option<ImageSize>,
    ) -> Result<Option<String>, SchemaError> {
        image_url(ImageKind::GuildIcon, self.id, &self.icon, format, size)
    }

    pub fn splash_url(
        &self,
        format: ImageFormat,
        size: Option<ImageSize>,
    ) -> Result<Option<String>, SchemaError> {
        image_url(ImageKind::GuildSplash, self.id, &self.splash, format, size)
    }

    pub fn discovery_splash_url(
        &self,
        format: ImageFormat,
        size: Option<ImageSize>,
    ) -> Result<Option<String>, SchemaError> {
        image_url(
            ImageKind::GuildDiscoverySplash,
            self.id,
            &self.discovery_splash,
            format,
            size,
        )
    }

    pub fn banner_url(
        &self,
        format: ImageFormat,
        size: Option<ImageSize>,
    ) -> Result<Option<String>, SchemaError> {
        image_url(ImageKind::GuildBanner, self.id, &self.banner, format, size)
    }
}

#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VerificationLevel {
    /// unrestricted
    None = 0,
    /// verified email
    Low = 1,
    /// registered for longer than 5 minutes
    Medium = 2,
    /// member of the guild for longer than 10 minutes
    High = 3,
    /// verified phone number
    VeryHigh = 4,
}

#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DefaultMessageNotificationLevel {
    AllMessages = 0,
    OnlyMentions = 1,
}

#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MfaLevel {
    None = 0,
    /// 2FA required for moderation actions
    Elevated = 1,
}

#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExplicitContentFilterLevel {
    Disabled = 0,
    MembersWithoutRoles = 1,
    AllMembers = 2,
}

#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PremiumTier {
    None = 0,
    Tier1 = 1,
    Tier2 = 2,
    Tier3 = 3,
}

#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NsfwLevel {
    Default = 0,
    Explicit = 1,
    Safe = 2,
    AgeRestricted = 3,
}

/// AFK timeout in seconds; Discord only accepts these values.
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AfkTimeout {
    OneMinute = 60,
    FiveMinutes = 300,
    FifteenMinutes = 900,
    ThirtyMinutes = 1800,
    OneHour = 3600,
}

impl AfkTimeout {
    pub fn as_secs(self) -> u32 {
        self as u32
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuildFeature {
    AnimatedBanner,
    AnimatedIcon,
    #[serde(rename = "APPLICATION_COMMAND_PERMISSIONS_V2")]
    ApplicationCommandPermissionsV2,
    AutoModeration,
    Banner,
    Community,
    CreatorMonetizableProvisional,
    CreatorStorePage,
    DeveloperSupportServer,
    Discoverable,
    EnhancedRoleColors,
    Featurable,
    GuestsEnabled,
    InvitesDisabled,
    InviteSplash,
    MemberVerificationGateEnabled,
    MoreSoundboard,
    MoreStickers,
    News,
    Partnered,
    PreviewEnabled,
    RaidAlertsDisabled,
    RoleIcons,
    RoleSubscriptionsAvailableForPurchase,
    RoleSubscriptionsEnabled,
    Soundboard,
    TicketedEventsEnabled,
    VanityUrl,
    Verified,
    VipRegions,
    WelcomeScreenEnabled,
}

impl GuildFeature {
    /// Features a bot may toggle through a guild update.
    pub fn is_mutable(self) -> bool {
        matches!(
            self,
            GuildFeature::Community
                | GuildFeature::Discoverable
                | GuildFeature::InvitesDisabled
                | GuildFeature::RaidAlertsDisabled
        )
    }
}

bitflags! {
    /// System messages suppressed in the system channel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SystemChannelFlags: u32 {
        const SUPPRESS_JOIN_NOTIFICATIONS = 1 << 0;
        const SUPPRESS_PREMIUM_SUBSCRIPTIONS = 1 << 1;
        const SUPPRESS_GUILD_REMINDER_NOTIFICATIONS = 1 << 2;
        const SUPPRESS_JOIN_NOTIFICATION_REPLIES = 1 << 3;
        const SUPPRESS_ROLE_SUBSCRIPTION_PURCHASE_NOTIFICATIONS = 1 << 4;
        const SUPPRESS_ROLE_SUBSCRIPTION_PURCHASE_NOTIFICATION_REPLIES = 1 << 5;
    }
}

impl Default for SystemChannelFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for SystemChannelFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for SystemChannelFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u32::deserialize(deserializer)?;
        Ok(SystemChannelFlags::from_bits_retain(bits))
    }
}
