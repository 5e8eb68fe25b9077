use serde::{Deserialize, Serialize};

use crate::model::Snowflake;

/// Custom emoji uploaded to a guild.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct GuildEmoji {
    pub id: Snowflake,
    /// `null` only shows up in reaction payloads
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub name: Option<Option<String>>,
    /// roles allowed to use this emoji, empty means everyone
    pub roles: Vec<Snowflake>,
    pub require_colons: bool,
    pub managed: bool,
    pub animated: bool,
    pub available: bool,
}

impl GuildEmoji {
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Option::as_deref)
    }

    /// `<:name:id>`, or `<a:name:id>` for animated emojis.
    pub fn mention(&self) -> String {
        let prefix = if self.animated { "a" } else { "" };
        format!("<{prefix}:{}:{}>", self.name().unwrap_or("_"), self.id)
    }
}
