use std::path::PathBuf;

#[test]
fn cli_run_writes_pngs_and_snapshot() {
    let dir = PathBuf::from("target").join("cli_smoke");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let config_path = dir.join("image-generator.json");
    std::fs::write(
        &config_path,
        r#"{ "images": [
            { "file": "button", "class": "Button",
              "width": 60, "height": 24,
              "arguments": [ { "type": "String", "value": "Go" } ] } ] }"#,
    )
    .unwrap();

    let out_dir = dir.join("images");
    let saved_path = dir.join("image-generator.saved.json");

    let exe = std::env::var_os("CARGO_BIN_EXE_uishot")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "uishot.exe"
            } else {
                "uishot"
            });
            p
        });

    let status = std::process::Command::new(&exe)
        .arg("--config-file")
        .arg(&config_path)
        .arg("--look-and-feel")
        .arg("dark")
        .arg("--output-directory")
        .arg(&out_dir)
        .arg("--saved-config-file")
        .arg(&saved_path)
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out_dir.join("button.png").is_file());
    assert!(saved_path.is_file());

    // A second invocation succeeds and leaves everything in place.
    let status = std::process::Command::new(&exe)
        .arg("--config-file")
        .arg(&config_path)
        .arg("--look-and-feel")
        .arg("dark")
        .arg("--output-directory")
        .arg(&out_dir)
        .arg("--saved-config-file")
        .arg(&saved_path)
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn cli_fails_on_missing_config() {
    let exe = std::env::var_os("CARGO_BIN_EXE_uishot")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/debug/uishot"));

    let status = std::process::Command::new(exe)
        .args([
            "--config-file",
            "target/cli_smoke/definitely-missing.json",
            "--look-and-feel",
            "light",
        ])
        .status()
        .unwrap();
    assert!(!status.success());
}
