//! Cross-crate checks of the content, analytics and playback rules.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use serde_json::json;

use linkbio_admin::services::{StoreService, SyncStatus};
use linkbio_core::video::{PlaybackCommand, PlaybackController, PlaybackEvent};
use linkbio_core::{
    AnalyticsSummary, PlaybackPolicy, StoreData, StorePatch, resolve_action_href,
};
use linkbio_integration_tests::{scratch_dir, unreachable_pool};

#[test]
fn test_whatsapp_link_carries_encoded_message() {
    let data = StoreData::default();
    let whatsapp = &data.main_actions[2];

    let url = resolve_action_href(whatsapp, "Quero um kit & frete");

    assert_eq!(
        url,
        "https://wa.me/5511999999999?text=Quero%20um%20kit%20%26%20frete"
    );
    // Other buttons are untouched.
    assert_eq!(
        resolve_action_href(&data.main_actions[0], "ignored"),
        "https://catalogo.com"
    );
}

#[test]
fn test_button_stats_sorted_by_count_then_title() {
    let clicks = [
        json!({"button_title": "FRETE"}),
        json!({"button_title": "DELIVERY"}),
        json!({"button_title": "FRETE"}),
        json!({"button_title": "CATÁLOGO"}),
        json!({"button_title": "DELIVERY"}),
    ];

    let summary = AnalyticsSummary::build(10, 5, clicks.iter(), Vec::new());
    let stats: Vec<_> = summary
        .button_stats
        .iter()
        .map(|s| (s.button_title.as_str(), s.click_count))
        .collect();

    assert_eq!(stats, [("DELIVERY", 2), ("FRETE", 2), ("CATÁLOGO", 1)]);
    assert_eq!(summary.total_views, 10);
}

#[test]
fn test_ended_always_loops() {
    for policy in [
        PlaybackPolicy::default(),
        PlaybackPolicy {
            start_with_audio: true,
            allow_audio_toggle: true,
            resist_pause: true,
        },
    ] {
        let mut controller = PlaybackController::new(policy);
        controller.handle(PlaybackEvent::Mounted);

        assert_eq!(
            controller.handle(PlaybackEvent::Ended),
            [PlaybackCommand::SeekToStart, PlaybackCommand::Play]
        );
    }
}

#[tokio::test]
async fn test_update_survives_database_outage_and_restart() {
    let snapshot = scratch_dir("linkbio-content").join("store-data.json");

    let service = StoreService::load(unreachable_pool(), snapshot.clone()).await;
    let (data, status) = service
        .update(StorePatch {
            name: Some("X".to_string()),
            ..StorePatch::default()
        })
        .await;
    assert_eq!(status, SyncStatus::Failed);
    assert_eq!(data.name, "X");

    // A restarted process with the database still down picks up the snapshot.
    let restarted = StoreService::load(unreachable_pool(), snapshot).await;
    assert_eq!(restarted.current().await.name, "X");
}

#[tokio::test]
async fn test_reset_restores_every_field() {
    let snapshot = scratch_dir("linkbio-content").join("store-data.json");
    let service = StoreService::load(unreachable_pool(), snapshot).await;

    service
        .update(StorePatch {
            name: Some("X".to_string()),
            logo_image: Some(String::new()),
            whatsapp_message: Some("Oi".to_string()),
            secondary_actions: Some(Vec::new()),
            ..StorePatch::default()
        })
        .await;

    let (data, _) = service.reset().await;
    assert_eq!(data, StoreData::default());
    assert_eq!(service.current().await, StoreData::default());
}
