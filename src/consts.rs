/// REST API root, version 10
pub static API_BASE: &str = "https://discord.com/api/v10";
/// image CDN root
pub static CDN_BASE: &str = "https://cdn.discordapp.com";

/// header carrying the audit-log reason of a mutating call
pub static AUDIT_LOG_REASON: &str = "x-audit-log-reason";

pub static USER_AGENT: &str = concat!(
    "DiscordBot (",
    env!("CARGO_PKG_NAME"),
    ", ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// 2015-01-01T00:00:00Z in milliseconds
pub const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

pub mod env {
    pub static BOT_TOKEN: &str = "BOT_TOKEN";
    pub static GUILD_ID: &str = "GUILD_ID";
    pub static API_BASE: &str = "DISCORD_API_BASE";
    pub static HTTP_TIMEOUT_SECS: &str = "DISCORD_HTTP_TIMEOUT_SECS";
}
