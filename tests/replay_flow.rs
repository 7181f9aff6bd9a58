//! End-to-end flow: action-log file -> loader -> reducer -> driver over the
//! mock surface.

use std::collections::HashMap;
use std::io::Write;

use avatar_replay::action_log::{load_action_log, reduce_latest_choices};
use avatar_replay::config::{Pacing, Settings};
use avatar_replay::replay::ReplayDriver;
use avatar_replay::surface::{MockPage, MockSurface, SurfaceCall};
use avatar_replay::taxonomy::Taxonomy;

fn test_settings() -> Settings {
    Settings {
        pacing: Pacing::immediate(),
        ..Settings::default()
    }
}

fn write_log(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn recorded_session_is_replayed_with_placeholder_correction() {
    let file = write_log(
        r#"{"action_log": [
            {"Action_type": "select_customization_option", "Parameter": "Gender", "New_Value": "Feminine"},
            {"Action_type": "camera_rotate", "Angle": 45},
            {"Action_type": "select_customization_option", "Parameter": "Hair", "New_Value": "hair-asset-41"},
            {"Action_type": "select_customization_option", "Parameter": "Empty_Icon", "New_Value": "hair-asset-7"}
        ]}"#,
    );

    let events = load_action_log(file.path()).unwrap();
    let choices = reduce_latest_choices(events);
    assert_eq!(choices.len(), 2);
    assert_eq!(choices["Hair"].new_value, "hair-asset-7");

    let surface = MockSurface::new(
        MockPage::default()
            .with_assets(["top-asset-1.png", "hair-asset-7.png"])
            .with_labels(["Feminine", "Masculine"]),
    );
    let driver = ReplayDriver::new(surface, Taxonomy::editor_default().unwrap(), test_settings());
    driver.run(&choices).await.unwrap();

    let calls = driver.surface().calls();

    // Gender is replayed before Hair, by exact label.
    let gender_at = calls
        .iter()
        .position(|c| {
            matches!(c, SurfaceCall::SelectLabel { label } if label == "Feminine")
        })
        .expect("gender toggle clicked");
    let hair_at = calls
        .iter()
        .position(|c| {
            matches!(c, SurfaceCall::SelectAsset { needle } if needle == "hair-asset-7")
        })
        .expect("corrected hair choice selected");
    assert!(gender_at < hair_at);

    // The first, overwritten hair choice never reaches the surface.
    assert!(!calls
        .iter()
        .any(|c| matches!(c, SurfaceCall::SelectAsset { needle } if needle == "hair-asset-41")));
}

#[tokio::test]
async fn empty_log_still_opens_the_editor() {
    let file = write_log(r#"{"action_log": []}"#);
    let choices = reduce_latest_choices(load_action_log(file.path()).unwrap());
    assert!(choices.is_empty());

    let driver = ReplayDriver::new(
        MockSurface::new(MockPage::default()),
        Taxonomy::editor_default().unwrap(),
        test_settings(),
    );
    driver.run(&choices).await.unwrap();

    let calls = driver.surface().calls();
    assert!(matches!(calls[0], SurfaceCall::OpenPage { .. }));
    assert_eq!(
        calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::WaitAndClick { .. }))
            .count(),
        2
    );
    assert_eq!(calls.len(), 3);
}

#[tokio::test]
async fn a_missing_asset_does_not_stop_later_attributes() {
    let choices = HashMap::from([
        (
            "Hair".to_string(),
            avatar_replay::ActionEvent {
                action_type: "select_customization_option".to_string(),
                parameter: "Hair".to_string(),
                new_value: "no-such-asset".to_string(),
                extra: serde_json::Map::new(),
            },
        ),
        (
            "Glasses".to_string(),
            avatar_replay::ActionEvent {
                action_type: "select_customization_option".to_string(),
                parameter: "Glasses".to_string(),
                new_value: "glasses-asset-3".to_string(),
                extra: serde_json::Map::new(),
            },
        ),
    ]);

    let surface = MockSurface::new(MockPage::default().with_assets(["glasses-asset-3.png"]));
    let driver = ReplayDriver::new(surface, Taxonomy::editor_default().unwrap(), test_settings());
    driver.run(&choices).await.unwrap();

    let calls = driver.surface().calls();
    assert!(calls.contains(&SurfaceCall::SelectAsset {
        needle: "no-such-asset".to_string()
    }));
    assert!(calls.contains(&SurfaceCall::SelectAsset {
        needle: "glasses-asset-3".to_string()
    }));
}
