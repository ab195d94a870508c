use eyre::Context;
use serde::Serialize;
use serde_json::Value;
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use twitch_helix_models::helix_api::*;

const USAGE: &str = "usage: helix-inspect <record> <file.json>";

/// Record names accepted on the command line.
const RECORDS: &[&str] = &[
    "active-extension",
    "active-extensions",
    "automod-check",
    "automod-response",
    "available-extension",
    "ban-event",
    "banned-user",
    "bits-leaderboard",
    "channel-info",
    "channel-team",
    "cheermote",
    "clip",
    "follow",
    "game",
    "hype-train-event",
    "marker",
    "mod-event",
    "prediction",
    "schedule",
    "search-user",
    "stream",
    "subscription",
    "tag",
    "team",
    "user",
    "video",
    "video-markers",
    "webhook-subscription",
];

fn json(record: impl Serialize) -> eyre::Result<Value> {
    serde_json::to_value(record).context("serialize record")
}

/// Decodes one record of the given kind.
fn decode(kind: &str, http: &HelixHttp, payload: &Value) -> eyre::Result<Value> {
    match kind {
        "active-extension" => json(ActiveExtension::from_payload(payload)?),
        "active-extensions" => json(ActiveExtensions::from_payload(payload)?),
        "automod-check" => json(AutomodCheckMessage::from_payload(payload)?),
        "automod-response" => json(AutomodCheckResponse::from_payload(payload)?),
        "available-extension" => json(AvailableExtension::from_payload(payload)?),
        "ban-event" => json(BanEvent::from_payload(http, payload, None)?),
        "banned-user" => json(UserBan::from_payload(http, payload)?),
        "bits-leaderboard" => json(BitsLeaderboard::from_payload(http, payload)?),
        "channel-info" => json(ChannelInfo::from_payload(http, payload)?),
        "channel-team" => json(ChannelTeam::from_payload(http, payload)?),
        "cheermote" => json(CheerEmote::from_payload(payload)?),
        "clip" => json(Clip::from_payload(http, payload)?),
        "follow" => json(FollowEvent::from_payload(http, payload, None, None)?),
        "game" => json(Game::from_payload(payload)?),
        "hype-train-event" => json(HypeTrainEvent::from_payload(http, payload)?),
        "marker" => json(Marker::from_payload(payload)?),
        "mod-event" => json(ModEvent::from_payload(http, payload, None)?),
        "prediction" => json(Prediction::from_payload(http, payload)?),
        "schedule" => json(Schedule::from_payload(http, payload)?),
        "search-user" => json(SearchUser::from_payload(http, payload)?),
        "stream" => json(Stream::from_payload(http, payload)?),
        "subscription" => json(SubscriptionEvent::from_payload(http, payload, None, None)?),
        "tag" => json(Tag::from_payload(payload)?),
        "team" => json(Team::from_payload(http, payload)?),
        "user" => json(User::from_payload(http, payload)?),
        "video" => json(Video::from_payload(http, payload, None)?),
        "video-markers" => json(VideoMarkers::from_payload(payload)?),
        "webhook-subscription" => json(WebhookSubscription::from_payload(payload)?),
        _ => eyre::bail!("unknown record {kind:?}; expected one of: {}", RECORDS.join(", ")),
    }
}

/// Records built from the whole response body rather than from entries of its `data` array.
fn takes_whole_body(kind: &str) -> bool {
    matches!(kind, "bits-leaderboard" | "schedule")
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(kind), Some(path)) = (args.next(), args.next()) else {
        eyre::bail!("{USAGE}");
    };

    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("read {path}"))?;
    let body: Value = serde_json::from_str(&raw).with_context(|| format!("parse {path} as JSON"))?;

    let http = HelixHttp::detached();
    let decoded = match &body {
        _ if takes_whole_body(&kind) => decode(&kind, &http, &body)?,
        Value::Object(envelope) => match envelope.get("data") {
            Some(Value::Array(entries)) => entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    decode(&kind, &http, entry).with_context(|| format!("decode entry {i}"))
                })
                .collect::<eyre::Result<Vec<_>>>()
                .map(Value::Array)?,
            Some(data @ Value::Object(_)) => decode(&kind, &http, data)?,
            _ => decode(&kind, &http, &body)?,
        },
        Value::Array(entries) => entries
            .iter()
            .map(|entry| decode(&kind, &http, entry))
            .collect::<eyre::Result<Vec<_>>>()
            .map(Value::Array)?,
        other => decode(&kind, &http, other)?,
    };
    tracing::debug!(%kind, %path, "decoded payload");

    println!(
        "{}",
        serde_json::to_string_pretty(&decoded).context("format output")?
    );
    Ok(())
}
