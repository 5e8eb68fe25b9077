//! Fetch the configured guild, and optionally rename it.
//!
//! ```text
//! BOT_TOKEN=... GUILD_ID=... cargo run --example fetch-guild -- "New name"
//! ```
use discord_guild::{
    ClientConfig, GuildClient,
    http::api::guild::GuildUpdate,
    model::{ImageFormat, ImageSize},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(err) = async_main().await {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

async fn async_main() -> discord_guild::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,discord_guild=debug")),
        )
        .init();

    let config = ClientConfig::from_env()?;
    let client = GuildClient::new(config)?;

    let guild = client.fetch_guild_with_counts(true).await?;
    tracing::info!(
        id = %guild.id,
        name = %guild.name,
        members = ?guild.approximate_member_count,
        created_at = ?guild.id.created_at(),
        "fetched guild"
    );
    for role in guild.sorted_roles() {
        tracing::info!(position = role.position, "role {}", role.name);
    }
    let icon = guild
        .icon_url(ImageFormat::Png, Some(ImageSize::MAX))
        .map_err(discord_guild::Error::context("icon url"))?;
    if let Some(url) = icon {
        tracing::info!("icon: {url}");
    }

    if let Some(name) = std::env::args().nth(1) {
        let updated = client
            .update_guild(GuildUpdate::default().name(name), Some("renamed from fetch-guild"))
            .await?;
        tracing::info!(name = %updated.name, "renamed guild");
    }
    Ok(())
}
