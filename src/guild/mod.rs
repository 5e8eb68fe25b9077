use crate::{
    config::ClientConfig,
    http::{
        api::guild::{GetGuild, GetGuildRequest, GuildUpdate, ModifyGuild, ModifyGuildRequest},
        client::{ApiClient, ReqwestTransport, Transport},
    },
    model::{Guild, GuildId},
};

/// Read and update one guild.
///
/// Holds no state between calls beyond its configuration; clones share the
/// underlying connection pool.
#[derive(Debug)]
pub struct GuildClient<T = ReqwestTransport> {
    api_client: ApiClient<T>,
    guild_id: GuildId,
}

impl<T> Clone for GuildClient<T> {
    fn clone(&self) -> Self {
        Self {
            api_client: self.api_client.clone(),
            guild_id: self.guild_id,
        }
    }
}

impl GuildClient<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> crate::Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> GuildClient<T> {
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self {
            api_client: ApiClient::new(transport, &config.api_base, config.authority),
            guild_id: config.guild_id,
        }
    }

    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    /// `GET /guilds/{guild.id}?with_counts=false`
    pub async fn fetch_guild(&self) -> crate::Result<Guild> {
        self.fetch_guild_with_counts(false).await
    }

    /// With `with_counts` the snapshot also carries the approximate member
    /// and presence counts.
    pub async fn fetch_guild_with_counts(&self, with_counts: bool) -> crate::Result<Guild> {
        let request = GetGuildRequest::new(self.guild_id).with_counts(with_counts);
        let guild = self.api_client.send::<GetGuild>(&request).await?;
        tracing::debug!(guild_id = %guild.id, name = %guild.name, "guild fetched");
        Ok(guild)
    }

    /// `PATCH /guilds/{guild.id}` with the set fields of `changes`.
    ///
    /// A non-empty `audit_log_reason` goes out as `X-Audit-Log-Reason`,
    /// otherwise the header is left off. Returns the guild as it is after
    /// the update.
    pub async fn update_guild(
        &self,
        changes: GuildUpdate,
        audit_log_reason: Option<&str>,
    ) -> crate::Result<Guild> {
        let mut request = ModifyGuildRequest::new(self.guild_id, changes);
        if let Some(reason) = audit_log_reason {
            request = request.reason(reason);
        }
        let guild = self.api_client.send::<ModifyGuild>(&request).await?;
        tracing::info!(guild_id = %guild.id, reason = ?audit_log_reason, "guild updated");
        Ok(guild)
    }
}
