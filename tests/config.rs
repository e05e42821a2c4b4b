use std::fs;

use easytask::config::Config;
use easytask::error::Error;
use tempfile::TempDir;

#[test]
fn missing_file_uses_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let cfg = Config::load_or_default(Some(dir.path().join("absent.toml").as_path()));
    assert_eq!(cfg.celebration.threshold, 3);
    assert_eq!(cfg.celebration.banner_ms, 2000);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[celebration]\nthreshold = 5\n\n[display]\nbanner_text = \"Nice!\"\n",
    )
    .expect("write config");

    let cfg = Config::load(&path).expect("load");
    assert_eq!(cfg.celebration.threshold, 5);
    assert_eq!(cfg.celebration.banner_ms, 2000);
    assert_eq!(cfg.display.banner_text, "Nice!");
    assert_eq!(cfg.display.placeholder, "Enter your tasks");
    assert_eq!(cfg.tasks.delimiter, ',');
}

#[test]
fn invalid_values_are_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let cases = [
        "[celebration]\nbanner_ms = 0\n",
        "[ui]\npoll_ms = 0\n",
        "[display]\ndate_format = \"\"\n",
        "[tasks]\ndelimiter = \"\\t\"\n",
    ];
    for (idx, body) in cases.iter().enumerate() {
        let path = dir.path().join(format!("case-{idx}.toml"));
        fs::write(&path, body).expect("write config");
        let err = Config::load(&path).expect_err(body);
        assert!(matches!(err, Error::InvalidConfig(_)), "{body}: {err}");
    }
}

#[test]
fn malformed_toml_is_parse_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[celebration\nthreshold = ").expect("write config");

    assert!(matches!(Config::load(&path), Err(Error::TomlParse(_))));
    assert_eq!(Config::load_or_default(Some(path.as_path())).celebration.threshold, 3);
}
