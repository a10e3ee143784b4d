//! Configuration unit tests.

use log::LevelFilter;

use super::*;

#[test]
fn default_config_roundtrip() {
    let cfg = Config::default();
    let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
    let parsed = Config::parse(&toml_str).expect("deserialize");
    assert_eq!(parsed, cfg);
    assert_eq!(parsed.font.size, 16);
    assert!((parsed.font.letter_spacing - 1.0).abs() < f32::EPSILON);
    assert_eq!(parsed.font.path, None);
    assert_eq!(parsed.atlas.size, None);
    assert_eq!(parsed.log.level, "warn");
}

#[test]
fn empty_toml_gives_defaults() {
    let parsed = Config::parse("").expect("deserialize");
    assert_eq!(parsed, Config::default());
}

#[test]
fn partial_toml_uses_defaults() {
    let toml_str = r#"
[font]
size = 24
"#;
    let parsed = Config::parse(toml_str).expect("deserialize");
    assert_eq!(parsed.font.size, 24);
    // Other fields should be defaults
    assert!((parsed.font.letter_spacing - 1.0).abs() < f32::EPSILON);
    assert_eq!(parsed.atlas, AtlasConfig::default());
    assert_eq!(parsed.log.level, "warn");
}

#[test]
fn full_config_from_toml() {
    let toml_str = r#"
[font]
path = "/usr/share/fonts/TTF/DejaVuSans.ttf"
size = 12
letter_spacing = 1.25

[atlas]
size = 512

[log]
level = "debug"
"#;
    let parsed = Config::parse(toml_str).expect("deserialize");
    assert_eq!(
        parsed.font.path.as_deref(),
        Some(Path::new("/usr/share/fonts/TTF/DejaVuSans.ttf"))
    );
    assert_eq!(parsed.atlas.size, Some(512));
    assert_eq!(parsed.log.level_filter(), LevelFilter::Debug);

    let options = parsed.font_options();
    assert_eq!(options.pixel_size, 12);
    assert!((options.letter_spacing - 1.25).abs() < f32::EPSILON);
    assert_eq!(options.atlas_size, Some(512));
}

#[test]
fn unknown_log_level_falls_back_to_warn() {
    let parsed = Config::parse("[log]\nlevel = \"chatty\"\n").expect("deserialize");
    assert_eq!(parsed.log.level_filter(), LevelFilter::Warn);
}

#[test]
fn wrong_type_is_a_parse_error() {
    assert!(Config::parse("[font]\nsize = \"large\"\n").is_err());
}

#[test]
fn default_font_options_match_core_defaults() {
    assert_eq!(Config::default().font_options(), FontOptions::default());
}

#[test]
fn load_from_missing_and_malformed_files() {
    let dir = std::env::temp_dir().join(format!("typecase_config_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");

    let missing = dir.join("absent.toml");
    assert!(matches!(
        Config::try_load_from(&missing),
        Err(ConfigLoadError::Missing)
    ));

    let bad = dir.join("bad.toml");
    std::fs::write(&bad, "[font\nsize = 3").expect("write");
    match Config::try_load_from(&bad) {
        Err(ConfigLoadError::Invalid(msg)) => assert!(msg.contains("parse error")),
        _ => panic!("expected a parse error"),
    }

    let good = dir.join("good.toml");
    std::fs::write(&good, "[atlas]\nsize = 128\n").expect("write");
    let cfg = Config::try_load_from(&good).ok().expect("loads");
    assert_eq!(cfg.atlas.size, Some(128));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn config_dir_is_not_empty() {
    assert!(config_dir().ends_with("typecase"));
}

#[test]
fn config_path_ends_with_toml() {
    assert!(config_path().ends_with("config.toml"));
}
