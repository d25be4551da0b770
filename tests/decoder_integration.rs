// SPDX-License-Identifier: MPL-2.0
use iced_tube::error::MediaError;
use iced_tube::media::{AsyncDecoder, DecoderCommand, DecoderEvent};
use std::time::Duration;

/// Opening a missing source reports an error event instead of panicking.
#[tokio::test]
async fn missing_source_reports_error() {
    let mut decoder = AsyncDecoder::new("tests/data/does-not-exist.mp4");

    let event = tokio::time::timeout(Duration::from_secs(10), decoder.recv_event())
        .await
        .expect("decoder answered in time");

    match event {
        Some(DecoderEvent::Error(message)) => {
            assert!(matches!(
                MediaError::from_message(&message),
                MediaError::SourceUnavailable(_)
            ));
        }
        other => panic!("expected an error event, got {:?}", other),
    }
}

/// Commands sent after the decoder gave up are rejected, not lost silently.
#[tokio::test]
async fn commands_fail_once_decoder_exits() {
    let mut decoder = AsyncDecoder::new("tests/data/does-not-exist.mp4");

    // Drain until the task hangs up
    let drained = tokio::time::timeout(Duration::from_secs(10), async {
        while decoder.recv_event().await.is_some() {}
    })
    .await;
    assert!(drained.is_ok());

    assert!(decoder.send_command(DecoderCommand::Play).is_err());
}
