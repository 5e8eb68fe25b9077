use std::{sync::Arc, time::Duration};

use crate::{consts, http::api::Authority, model::GuildId};

/// Everything one [`GuildClient`](crate::guild::GuildClient) is bound to.
///
/// Each client owns its own config, so several guild/credential pairs can be
/// used side by side.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub authority: Authority,
    pub guild_id: GuildId,
    pub api_base: Arc<str>,
    /// whole-request timeout handed to the transport, none by default
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(authority: Authority, guild_id: GuildId) -> Self {
        Self {
            authority,
            guild_id,
            api_base: consts::API_BASE.into(),
            timeout: None,
        }
    }
    pub fn api_base(mut self, api_base: impl Into<Arc<str>>) -> Self {
        self.api_base = api_base.into();
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads `BOT_TOKEN` and `GUILD_ID`, plus the optional
    /// `DISCORD_API_BASE` and `DISCORD_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| crate::Error::config(format!("{key} is not set")))
        };
        let token = required(consts::env::BOT_TOKEN)?;
        let guild_id = required(consts::env::GUILD_ID)?
            .trim()
            .parse::<GuildId>()
            .map_err(|e| crate::Error::config(format!("{} is not a snowflake: {e}", consts::env::GUILD_ID)))?;
        let mut config = Self::new(Authority::new_bot(token.trim()), guild_id);
        if let Some(base) = lookup(consts::env::API_BASE).filter(|v| !v.trim().is_empty()) {
            config = config.api_base(base.trim());
        }
        if let Some(secs) = lookup(consts::env::HTTP_TIMEOUT_SECS) {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                crate::Error::config(format!("{} is not a number of seconds: {e}", consts::env::HTTP_TIMEOUT_SECS))
            })?;
            config = config.timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}
