use http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::{
    consts::AUDIT_LOG_REASON,
    model::{
        AfkTimeout, DefaultMessageNotificationLevel, ExplicitContentFilterLevel, Guild, GuildFeature,
        GuildId, Snowflake, SystemChannelFlags, VerificationLevel, validate_guild_name,
    },
};

use super::{Api, json_body};

/// `GET /guilds/{guild.id}`
pub struct GetGuild;

#[derive(Debug, Clone, Copy, Validate)]
pub struct GetGuildRequest {
    pub guild_id: GuildId,
    /// also return `approximate_member_count` and `approximate_presence_count`
    pub with_counts: bool,
}

impl GetGuildRequest {
    pub fn new(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            with_counts: false,
        }
    }
    pub fn with_counts(mut self, with_counts: bool) -> Self {
        self.with_counts = with_counts;
        self
    }
}

impl Api for GetGuild {
    type Request = GetGuildRequest;

    type Response = Guild;

    const METHOD: http::Method = http::Method::GET;

    fn path(request: &Self::Request) -> String {
        format!("/guilds/{}", request.guild_id)
    }

    fn query(request: &Self::Request) -> Vec<(&'static str, String)> {
        vec![("with_counts", request.with_counts.to_string())]
    }
}

/// `PATCH /guilds/{guild.id}`, requires `MANAGE_GUILD`.
pub struct ModifyGuild;

#[derive(Debug, Validate)]
pub struct ModifyGuildRequest {
    pub guild_id: GuildId,
    #[validate(nested)]
    pub changes: GuildUpdate,
    /// sent as `X-Audit-Log-Reason`, dropped when empty
    #[validate(length(max = 512, message = "audit log reason must be at most 512 characters"))]
    pub audit_log_reason: Option<String>,
}

impl ModifyGuildRequest {
    pub fn new(guild_id: GuildId, changes: GuildUpdate) -> Self {
        Self {
            guild_id,
            changes,
            audit_log_reason: None,
        }
    }
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.audit_log_reason = Some(reason.into());
        self
    }
}

impl Api for ModifyGuild {
    type Request = ModifyGuildRequest;

    type Response = Guild;

    const METHOD: http::Method = http::Method::PATCH;

    fn path(request: &Self::Request) -> String {
        format!("/guilds/{}", request.guild_id)
    }

    fn headers(request: &Self::Request) -> crate::Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(reason) = request.audit_log_reason.as_deref().filter(|r| !r.is_empty()) {
            let value = HeaderValue::from_bytes(reason.as_bytes()).map_err(|_| {
                crate::Error::invalid_request("audit log reason is not a valid header value")
            })?;
            headers.insert(HeaderName::from_static(AUDIT_LOG_REASON), value);
        }
        Ok(headers)
    }

    fn body(request: &Self::Request) -> crate::Result<Option<Vec<u8>>> {
        json_body(&request.changes)
    }
}

macro_rules! setters {
    (
        values { $($field:ident: $ty:ty),* $(,)? }
        nullable { $($nullable:ident: $nty:ty),* $(,)? }
    ) => {
        impl GuildUpdate {
            $(
                pub fn $field(mut self, $field: impl Into<$ty>) -> Self {
                    self.$field = Some($field.into());
                    self
                }
            )*
            $(
                /// `None` clears the attribute
                pub fn $nullable(mut self, $nullable: Option<$nty>) -> Self {
                    self.$nullable = Some($nullable);
                    self
                }
            )*
        }
    };
}

/// Partial guild for `PATCH /guilds/{guild.id}`.
///
/// Only set fields are sent. For nullable attributes `Some(None)` is sent as
/// `null` and clears the value on Discord's side, `None` leaves it untouched.
#[derive(Serialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct GuildUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub region: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub verification_level: Option<Option<VerificationLevel>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub default_message_notifications: Option<Option<DefaultMessageNotificationLevel>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub explicit_content_filter: Option<Option<ExplicitContentFilterLevel>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub afk_channel_id: Option<Option<Snowflake>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afk_timeout: Option<AfkTimeout>,
    /// base64 data URI of the new image
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub icon: Option<Option<String>>,
    /// transfers ownership, the bot must own the guild
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Snowflake>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub splash: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub discovery_splash: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub banner: Option<Option<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub system_channel_id: Option<Option<Snowflake>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_channel_flags: Option<SystemChannelFlags>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub rules_channel_id: Option<Option<Snowflake>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub public_updates_channel_id: Option<Option<Snowflake>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub preferred_locale: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<GuildFeature>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_progress_bar_enabled: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub safety_alerts_channel_id: Option<Option<Snowflake>>,
}

setters! {
    values {
        name: String,
        afk_timeout: AfkTimeout,
        owner_id: Snowflake,
        system_channel_flags: SystemChannelFlags,
        features: Vec<GuildFeature>,
        premium_progress_bar_enabled: bool,
    }
    nullable {
        region: String,
        verification_level: VerificationLevel,
        default_message_notifications: DefaultMessageNotificationLevel,
        explicit_content_filter: ExplicitContentFilterLevel,
        afk_channel_id: Snowflake,
        icon: String,
        splash: String,
        discovery_splash: String,
        banner: String,
        system_channel_id: Snowflake,
        rules_channel_id: Snowflake,
        public_updates_channel_id: Snowflake,
        preferred_locale: String,
        description: String,
        safety_alerts_channel_id: Snowflake,
    }
}

impl GuildUpdate {
    pub fn is_empty(&self) -> bool {
        self == &GuildUpdate::default()
    }
}

impl Validate for GuildUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            if let Err(e) = validate_guild_name(name) {
                errors.add("name", e);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
