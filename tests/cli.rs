use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn doodlepad_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("doodlepad").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("XDG_CACHE_HOME", temp.path().join("cache"));
    cmd
}

fn write_script(temp: &TempDir, json: &str) -> PathBuf {
    let path = temp.path().join("script.json");
    std::fs::write(&path, json).unwrap();
    path
}

fn exported_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .map(|entries| entries.map(|e| e.unwrap().path()).collect())
        .unwrap_or_default()
}

const DIAGONAL: &str = r#"[
    {"action": "color", "color": "red"},
    {"action": "stroke", "points": [[0, 0], [40, 40], [80, 80]]}
]"#;

#[test]
fn doodlepad_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    doodlepad_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Freehand drawing canvas with undo, background import and PNG export",
        ));
}

#[test]
fn no_subcommand_prints_short_usage() {
    let temp = TempDir::new().unwrap();
    doodlepad_cmd(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("doodlepad render --script"));
}

#[test]
fn render_writes_png_to_output_dir() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, DIAGONAL);
    let out = temp.path().join("out");

    doodlepad_cmd(&temp)
        .args(["render", "--width", "80", "--height", "80", "--script"])
        .arg(&script)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("DrawingApp_").and(predicate::str::contains(".png")));

    let files = exported_files(&out);
    assert_eq!(files.len(), 1);
    let image = image::open(&files[0]).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (80, 80));
    assert_eq!(image.get_pixel(40, 40).0, [255, 0, 0, 255]);
    assert_eq!(image.get_pixel(70, 10).0, [255, 255, 255, 255]);
}

#[test]
fn render_defaults_to_cache_directory() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, DIAGONAL);

    doodlepad_cmd(&temp)
        .args(["render", "--width", "32", "--height", "32", "--script"])
        .arg(&script)
        .assert()
        .success();

    assert_eq!(exported_files(&temp.path().join("cache/doodlepad")).len(), 1);
}

#[test]
fn render_uses_config_file_prefix() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, DIAGONAL);
    let config = temp.path().join("custom.toml");
    std::fs::write(
        &config,
        "[export]\nfilename_prefix = \"sketch_\"\n\n[canvas]\nwidth = 24\nheight = 12\n",
    )
    .unwrap();
    let out = temp.path().join("out");

    doodlepad_cmd(&temp)
        .arg("--config")
        .arg(&config)
        .args(["render", "--no-share", "--script"])
        .arg(&script)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("sketch_"));

    let files = exported_files(&out);
    assert_eq!(image::open(&files[0]).unwrap().to_rgba8().dimensions(), (24, 12));
}

#[test]
fn render_with_background_image() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "[]");
    let background = temp.path().join("bg.png");
    image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 255, 255]))
        .save(&background)
        .unwrap();
    let out = temp.path().join("out");

    doodlepad_cmd(&temp)
        .args(["render", "--width", "16", "--height", "16", "--script"])
        .arg(&script)
        .arg("--background")
        .arg(&background)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    let image = image::open(&exported_files(&out)[0]).unwrap().to_rgba8();
    assert_eq!(image.get_pixel(8, 8).0, [0, 0, 255, 255]);
}

#[test]
fn render_rejects_corrupt_background() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "[]");
    let background = temp.path().join("bg.png");
    std::fs::write(&background, b"not a png").unwrap();
    let out = temp.path().join("out");

    doodlepad_cmd(&temp)
        .args(["render", "--script"])
        .arg(&script)
        .arg("--background")
        .arg(&background)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to import background"));

    assert!(exported_files(&out).is_empty());
}

#[test]
fn render_reports_invalid_script() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, r#"[{"action": "teleport"}]"#);

    doodlepad_cmd(&temp)
        .args(["render", "--script"])
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid script"));
}

#[test]
fn render_requires_script_argument() {
    let temp = TempDir::new().unwrap();
    doodlepad_cmd(&temp)
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn init_config_writes_example_once() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config/doodlepad/config.toml");

    doodlepad_cmd(&temp)
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
    assert!(
        std::fs::read_to_string(&config_path)
            .unwrap()
            .contains("filename_prefix")
    );

    doodlepad_cmd(&temp)
        .arg("init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn dump_config_schema_prints_json() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"properties\"").and(predicate::str::contains("density")));
}
