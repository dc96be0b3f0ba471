//! Integration tests for [`relay_bot::Relay`]: config → pipeline → dispatcher with a mock bot.
//!
//! Pacing delays are set to zero so tests run without waiting.

use std::time::Duration;

use relay_bot::{
    build_relay, BaseConfig, Handler, PipelineConfig, RawMessage, Relay, RelayConfig, RelayOutcome,
};
use relay_core::{DispatchReport, MediaField, MediaHandle, MediaItem, MediaKind};
use relay_telegram::TelegramConfig;

mod common;
use common::mock_bot::{MockBot, SentRecord};

const SAM: i64 = -1001;
const JOYCE: i64 = -1002;
const TARGET: i64 = -2002;

fn relay_config() -> RelayConfig {
    let mut pipeline = PipelineConfig {
        default_delay: Duration::ZERO,
        ..PipelineConfig::default()
    };
    let sam = pipeline.profile_with_defaults(SAM, 1, "Sam", Some("S".to_string()));
    let mut joyce = pipeline.profile_with_defaults(JOYCE, 2, "Joyce", Some("J".to_string()));
    joyce.delivery_notice = "2/4 weeks delivery".to_string();
    pipeline.profiles = vec![sam, joyce];

    RelayConfig {
        base: BaseConfig {
            telegram: TelegramConfig::with_token("test_bot_token_12345".to_string()),
            log_file: "logs/test.log".to_string(),
            album_window: Duration::from_millis(800),
        },
        target_chat: TARGET,
        pipeline,
    }
}

fn relay_with(bot: std::sync::Arc<MockBot>, config: &RelayConfig) -> Relay {
    build_relay(config, bot).unwrap()
}

/// **Test: text message is re-priced, tagged, footed and sent to the target chat.**
#[tokio::test]
async fn test_text_message_relayed() {
    let bot = MockBot::new();
    let relay = relay_with(bot.clone(), &relay_config());

    let outcome = relay
        .relay(RawMessage::new("1", SAM).with_text("Gucci wallet for £35 - Boxed"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RelayOutcome::Dispatched {
            report: DispatchReport::Text,
            failed_steps: Vec::new(),
        }
    );
    assert_eq!(
        bot.sent(),
        vec![SentRecord::Text {
            chat_id: TARGET,
            text: "[S] Gucci wallet for £63 - Boxed\n\nQuick Free delivery 3/4 days\n\nFor orders message here\nhttps://t.me/BFSshopuk".to_string(),
        }]
    );
}

/// **Test: per-origin delivery notice is used for that origin only.**
#[tokio::test]
async fn test_origin_specific_delivery_notice() {
    let bot = MockBot::new();
    let relay = relay_with(bot.clone(), &relay_config());

    relay
        .relay(RawMessage::new("2", JOYCE).with_text("Casio Watch - £150"))
        .await
        .unwrap();

    match &bot.sent()[0] {
        SentRecord::Text { text, .. } => {
            assert!(text.starts_with("[J] Casio Watch - £255\n\n2/4 weeks delivery"));
        }
        other => panic!("expected text, got {:?}", other),
    }
}

/// **Test: album is sent once with the transformed caption on every item.**
#[tokio::test]
async fn test_album_relayed_with_caption() {
    let bot = MockBot::new();
    let relay = relay_with(bot.clone(), &relay_config());
    let raw = RawMessage::new("3", SAM)
        .with_caption("Bags £35")
        .with_media(MediaField::Album(vec![
            MediaItem::new(MediaKind::Photo, MediaHandle::new("p1")),
            MediaItem::new(MediaKind::Photo, MediaHandle::new("p2")),
        ]));

    relay.relay(raw).await.unwrap();

    match &bot.sent()[0] {
        SentRecord::Album {
            chat_id,
            handles,
            caption,
            ..
        } => {
            assert_eq!(*chat_id, TARGET);
            assert_eq!(handles, &vec!["p1".to_string(), "p2".to_string()]);
            assert!(caption.as_deref().unwrap().starts_with("[S] Bags £63"));
        }
        other => panic!("expected album, got {:?}", other),
    }
}

/// **Test: disabled origin is dropped without sending.**
#[tokio::test]
async fn test_disabled_origin_dropped() {
    let bot = MockBot::new();
    let mut config = relay_config();
    config.pipeline.profiles[1].enabled = false;
    let relay = relay_with(bot.clone(), &config);

    let outcome = relay
        .relay(RawMessage::new("4", JOYCE).with_text("Bag £35"))
        .await
        .unwrap();

    assert_eq!(outcome, RelayOutcome::Disabled);
    assert!(bot.sent().is_empty());
}

/// **Test: a failing step is reported and the partially transformed message is still sent.**
#[tokio::test]
async fn test_failed_step_reported() {
    let bot = MockBot::new();
    let mut config = relay_config();
    config.pipeline.profiles[0].tag = "A]B".to_string();
    let relay = relay_with(bot.clone(), &config);

    let outcome = relay
        .relay(RawMessage::new("5", SAM).with_text("Bag £35"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RelayOutcome::Dispatched {
            report: DispatchReport::Text,
            failed_steps: vec!["source_tagger"],
        }
    );
    match &bot.sent()[0] {
        SentRecord::Text { text, .. } => assert!(text.starts_with("Bag £63")),
        other => panic!("expected text, got {:?}", other),
    }
}

/// **Test: send failure surfaces as an error from the handler; the relay stays usable.**
#[tokio::test]
async fn test_send_failure_is_error() {
    let relay = relay_with(MockBot::failing(), &relay_config());

    let result = relay
        .handle(RawMessage::new("6", SAM).with_text("Bag £35"))
        .await;
    assert!(result.is_err());

    let again = relay
        .handle(RawMessage::new("7", SAM).with_text("Bag £40"))
        .await;
    assert!(again.is_err());
}

/// **Test: empty message is skipped by the dispatcher.**
#[tokio::test]
async fn test_empty_message_skipped() {
    let bot = MockBot::new();
    let relay = relay_with(bot.clone(), &relay_config());

    let outcome = relay.relay(RawMessage::new("8", SAM)).await.unwrap();

    assert_eq!(
        outcome,
        RelayOutcome::Dispatched {
            report: DispatchReport::Skipped,
            failed_steps: Vec::new(),
        }
    );
    assert!(bot.sent().is_empty());
}

/// **Test: the configured origin delay is applied before sending.**
#[tokio::test(start_paused = true)]
async fn test_origin_delay_applied() {
    let bot = MockBot::new();
    let mut config = relay_config();
    config.pipeline.profiles[0].send_delay = Duration::from_secs(2);
    let relay = relay_with(bot.clone(), &config);

    let started = tokio::time::Instant::now();
    relay
        .relay(RawMessage::new("9", SAM).with_text("Bag"))
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_secs(2));
    assert_eq!(bot.sent().len(), 1);
}
