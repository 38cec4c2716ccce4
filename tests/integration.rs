// SPDX-License-Identifier: MPL-2.0
//! End-to-end tests across config, localization and the gallery core.

use iced_gallery::config::{self, Config, GeneralConfig, GesturesConfig};
use iced_gallery::gallery::manifest::GalleryManifest;
use iced_gallery::gallery::swipe::{DragRelease, GestureThresholds, SwipeVerdict};
use iced_gallery::i18n::fluent::I18n;
use iced::Vector;
use std::io::Write;
use tempfile::tempdir;

#[test]
fn language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let russian = Config {
        general: GeneralConfig {
            language: Some("ru".to_string()),
        },
        gestures: GesturesConfig::default(),
    };
    config::save_to_path(&russian, &path).expect("Failed to write config");
    let loaded = config::load_from_path(&path).expect("Failed to load config");
    let i18n_ru = I18n::new(None, &loaded);
    assert_eq!(i18n_ru.current_locale().to_string(), "ru");

    let uzbek = Config {
        general: GeneralConfig {
            language: Some("uz".to_string()),
        },
        gestures: GesturesConfig::default(),
    };
    config::save_to_path(&uzbek, &path).expect("Failed to write config");
    let loaded = config::load_from_path(&path).expect("Failed to load config");
    let i18n_uz = I18n::new(None, &loaded);
    assert_eq!(i18n_uz.current_locale().to_string(), "uz");

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn cli_language_overrides_config() {
    let config = Config {
        general: GeneralConfig {
            language: Some("uz".to_string()),
        },
        gestures: GesturesConfig::default(),
    };
    let i18n = I18n::new(Some("ru".to_string()), &config);
    assert_eq!(i18n.current_locale().to_string(), "ru");
}

#[test]
fn both_locales_translate_gallery_strings() {
    let ru = I18n::new(Some("ru".to_string()), &Config::default());
    let uz = I18n::new(Some("uz".to_string()), &Config::default());

    for key in ["window-title", "gallery-download-current", "empty-title"] {
        let ru_text = ru.tr(key);
        let uz_text = uz.tr(key);
        assert!(!ru_text.contains("MISSING"), "missing ru key {key}");
        assert!(!uz_text.contains("MISSING"), "missing uz key {key}");
        assert_ne!(ru_text, uz_text, "locales agree on {key}");
    }
}

#[test]
fn manifest_file_opens_as_circular_session() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("gallery.toml");
    let mut file = std::fs::File::create(&path).expect("Failed to create manifest");
    writeln!(
        file,
        "title = \"Boiler X\"\nimages = [\n  \"https://img.example/a.jpg\",\n  \"https://img.example/b.jpg\",\n  \"photos/c.png\",\n]"
    )
    .expect("Failed to write manifest");

    let manifest = GalleryManifest::load(&path).expect("Failed to load manifest");
    let mut session = manifest.into_session().expect("Failed to open session");

    assert_eq!(session.title(), Some("Boiler X"));
    assert_eq!(session.page_label(), "1 / 3");

    session.next();
    session.next();
    session.next();
    assert_eq!(session.page_label(), "1 / 3");

    session.previous();
    assert_eq!(session.page_label(), "3 / 3");
}

#[test]
fn configured_thresholds_change_gesture_outcomes() {
    let strict = GestureThresholds::from_config(&GesturesConfig {
        swipe_confidence: Some(50_000.0),
        dismiss_distance: None,
        dismiss_velocity: None,
    });
    let default = GestureThresholds::default();

    let release = DragRelease {
        offset: Vector::new(-60.0, 0.0),
        velocity: Vector::new(-400.0, 0.0),
    };

    // 60 px at 400 px/s is 24,000: past the default 10,000 but not 50,000.
    assert_eq!(default.evaluate(release), SwipeVerdict::PageForward);
    assert_eq!(strict.evaluate(release), SwipeVerdict::None);
}

#[test]
fn empty_manifest_refuses_to_open() {
    let manifest = GalleryManifest::from_raw_images(Vec::new());
    assert!(manifest.into_session().is_err());
}
