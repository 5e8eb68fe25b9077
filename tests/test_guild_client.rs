#[path = "test_guild_client/fake_discord.rs"]
mod fake_discord;

use axum::http::{Method, StatusCode};
use discord_guild::{
    ClientConfig, ErrorKind, GuildClient, SchemaError,
    http::api::{Authority, guild::GuildUpdate},
    model::{GuildFeature, Snowflake, SystemChannelFlags, VerificationLevel},
};
use fake_discord::{FakeDiscord, GUILD_ID, TOKEN};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn client_for(fake: &FakeDiscord, token: &str, guild_id: u64) -> GuildClient {
    init_tracing();
    let addr = fake.spawn().await;
    let config = ClientConfig::new(Authority::new_bot(token), Snowflake::new(guild_id))
        .api_base(format!("http://{addr}/api/v10"));
    GuildClient::new(config).unwrap()
}

async fn client(fake: &FakeDiscord) -> GuildClient {
    client_for(fake, TOKEN, GUILD_ID).await
}

#[tokio::test]
async fn fetch_guild_defaults_to_without_counts() {
    let fake = FakeDiscord::default();
    let client = client(&fake).await;

    let guild = client.fetch_guild().await.unwrap();
    assert_eq!(guild.id, Snowflake::new(GUILD_ID));
    assert_eq!(guild.name, "Discord Testers");
    assert_eq!(guild.verification_level, VerificationLevel::High);
    assert!(guild.has_feature(GuildFeature::Community));
    assert_eq!(guild.approximate_member_count, None);

    let seen = fake.last_request().await;
    assert_eq!(seen.method, Method::GET);
    assert_eq!(seen.path, format!("/api/v10/guilds/{GUILD_ID}"));
    assert_eq!(seen.query.as_deref(), Some("with_counts=false"));
    assert_eq!(seen.header("authorization"), Some("Bot test-token"));
    assert!(seen.header("user-agent").is_some_and(|ua| ua.starts_with("DiscordBot (")));
    assert!(seen.header("x-audit-log-reason").is_none());
    assert!(seen.body.is_empty());
}

#[tokio::test]
async fn fetch_guild_forwards_with_counts() {
    let fake = FakeDiscord::default();
    let client = client(&fake).await;

    let guild = client.fetch_guild_with_counts(true).await.unwrap();
    assert_eq!(fake.last_request().await.query.as_deref(), Some("with_counts=true"));
    assert_eq!(guild.approximate_member_count, Some(1200));
    assert_eq!(guild.approximate_presence_count, Some(340));
}

#[tokio::test]
async fn update_guild_sends_only_set_fields() {
    let fake = FakeDiscord::default();
    let client = client(&fake).await;

    let changes = GuildUpdate::default()
        .name("Discord Testers II")
        .description(None)
        .system_channel_flags(
            SystemChannelFlags::SUPPRESS_JOIN_NOTIFICATIONS
                | SystemChannelFlags::SUPPRESS_PREMIUM_SUBSCRIPTIONS,
        );
    let guild = client
        .update_guild(changes, Some("Tidy up: renamed for the spring event"))
        .await
        .unwrap();
    assert_eq!(guild.name, "Discord Testers II");
    assert_eq!(guild.description, Some(None));
    assert_eq!(guild.system_channel_flags.bits(), 3);

    let seen = fake.last_request().await;
    assert_eq!(seen.method, Method::PATCH);
    assert_eq!(seen.query, None);
    assert_eq!(seen.header("content-type"), Some("application/json"));
    assert_eq!(
        seen.header("x-audit-log-reason"),
        Some("Tidy up: renamed for the spring event")
    );
    assert_eq!(
        seen.json(),
        json!({
            "name": "Discord Testers II",
            "description": null,
            "system_channel_flags": 3,
        })
    );
}

#[tokio::test]
async fn audit_log_reason_left_off_unless_given() {
    let fake = FakeDiscord::default();
    let client = client(&fake).await;

    client
        .update_guild(GuildUpdate::default().premium_progress_bar_enabled(true), None)
        .await
        .unwrap();
    assert!(fake.last_request().await.header("x-audit-log-reason").is_none());

    client
        .update_guild(GuildUpdate::default(), Some(""))
        .await
        .unwrap();
    assert!(fake.last_request().await.header("x-audit-log-reason").is_none());
}

#[tokio::test]
async fn empty_update_returns_current_snapshot() {
    let fake = FakeDiscord::default();
    let client = client(&fake).await;

    let before = client.fetch_guild().await.unwrap();
    let after = client.update_guild(GuildUpdate::default(), None).await.unwrap();
    assert_eq!(before, after);

    let requests = fake.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, Method::PATCH);
    assert_eq!(requests[1].body, b"{}");
}

#[tokio::test]
async fn features_round_trip_through_update() {
    let fake = FakeDiscord::default();
    let client = client(&fake).await;

    let guild = client
        .update_guild(
            GuildUpdate::default().features(vec![GuildFeature::Community, GuildFeature::InvitesDisabled]),
            Some("pause invites"),
        )
        .await
        .unwrap();
    assert_eq!(
        fake.last_request().await.json(),
        json!({ "features": ["COMMUNITY", "INVITES_DISABLED"] })
    );
    assert!(guild.has_feature(GuildFeature::InvitesDisabled));
    assert!(!guild.has_feature(GuildFeature::News));
}

#[tokio::test]
async fn rejected_token_is_auth_error() {
    let fake = FakeDiscord::default();
    let client = client_for(&fake, "stale-token", GUILD_ID).await;

    let err = client.fetch_guild().await.unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Auth(_)), "{err}");
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn unknown_guild_is_not_found() {
    let fake = FakeDiscord::default();
    let client = client_for(&fake, TOKEN, 1).await;

    let err = client.fetch_guild().await.unwrap_err();
    match err.kind() {
        ErrorKind::NotFound(fail) => assert_eq!(fail.code, 10004),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn forbidden_update_is_permission_error() {
    let fake = FakeDiscord::default();
    *fake.read_only.lock().await = true;
    let client = client(&fake).await;

    let err = client
        .update_guild(GuildUpdate::default().name("Nope"), Some("try anyway"))
        .await
        .unwrap_err();
    match err.kind() {
        ErrorKind::Permission(fail) => {
            assert_eq!(fail.code, 50013);
            assert_eq!(fail.message, "Missing Permissions");
        }
        other => panic!("unexpected error: {other}"),
    }
    // the guild is untouched
    assert_eq!(client.fetch_guild().await.unwrap().name, "Discord Testers");
}

#[tokio::test]
async fn other_statuses_keep_their_code() {
    let fake = FakeDiscord::default();
    *fake.outage.lock().await = Some(StatusCode::SERVICE_UNAVAILABLE);
    let client = client(&fake).await;

    let err = client.fetch_guild().await.unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::Status { status, .. } if *status == StatusCode::SERVICE_UNAVAILABLE
    ));
    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn out_of_range_response_is_schema_error() {
    let fake = FakeDiscord::default();
    fake.set_guild_field("verification_level", json!(9)).await;
    let client = client(&fake).await;

    let err = client.fetch_guild().await.unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Schema(SchemaError::Decode(_))), "{err}");
}

#[tokio::test]
async fn short_name_in_response_is_schema_error() {
    let fake = FakeDiscord::default();
    fake.set_guild_field("name", json!("  x ")).await;
    let client = client(&fake).await;

    let err = client.fetch_guild().await.unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Schema(SchemaError::Constraint(_))), "{err}");
}

#[tokio::test]
async fn invalid_update_never_leaves() {
    let fake = FakeDiscord::default();
    let client = client(&fake).await;

    let err = client
        .update_guild(GuildUpdate::default().name("x"), None)
        .await
        .unwrap_err();
    assert!(err.is_schema());

    let err = client
        .update_guild(GuildUpdate::default(), Some("r".repeat(513).as_str()))
        .await
        .unwrap_err();
    assert!(err.is_schema());
    assert!(fake.requests().await.is_empty());
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    init_tracing();
    // grab a free port, then close it again
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(Authority::new_bot(TOKEN), Snowflake::new(GUILD_ID))
        .api_base(format!("http://{addr}/api/v10"));
    let client = GuildClient::new(config).unwrap();

    let err = client.fetch_guild().await.unwrap_err();
    assert!(err.is_transport(), "{err}");
    assert_eq!(err.status(), None);
    let err = client
        .update_guild(GuildUpdate::default().name("Renamed"), None)
        .await
        .unwrap_err();
    assert!(err.is_transport(), "{err}");
}

#[tokio::test]
async fn clients_for_different_guilds_coexist() {
    let fake = FakeDiscord::default();
    let good = client(&fake).await;
    let other = client_for(&fake, TOKEN, 2).await;

    assert!(good.fetch_guild().await.is_ok());
    assert!(matches!(
        other.fetch_guild().await.unwrap_err().kind(),
        ErrorKind::NotFound(_)
    ));
    assert_eq!(good.guild_id(), Snowflake::new(GUILD_ID));
    assert_eq!(other.guild_id(), Snowflake::new(2));
}
