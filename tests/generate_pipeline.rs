use std::{fs, path::PathBuf};

use uishot::{GeneratorOpts, UishotError, manifest, run};

const MANIFEST: &str = r#"{ "images": [
    { "file": "button-default", "class": "Button",
      "width": 90, "height": 28, "panelWidth": 120, "panelHeight": 40,
      "arguments": [ { "type": "String", "value": "OK" } ],
      "clientProperties": [ { "name": "uishot.default",
                              "type": "Integer", "value": "1" } ] },
    { "file": "check-on", "class": "CheckBox",
      "width": 20, "height": 20,
      "clientProperties": [ { "name": "uishot.selected",
                              "type": "Integer", "value": "1" } ] },
    { "file": "progress", "class": "ProgressBar",
      "width": 120, "height": 12,
      "arguments": [ { "type": "Float", "value": "0.6" } ] },
    { "file": "swatch-accent", "class": "Swatch",
      "width": 16, "height": 16,
      "arguments": [ { "type": "Integer", "value": "68" },
                     { "type": "Integer", "value": "102" },
                     { "type": "Integer", "value": "221" } ] } ] }"#;

fn scratch(name: &str) -> GeneratorOpts {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let dir = PathBuf::from("target").join("pipeline").join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    let config_file = dir.join("image-generator.json");
    fs::write(&config_file, MANIFEST).unwrap();

    GeneratorOpts {
        config_file,
        look_and_feel: "light".into(),
        output_directory: dir.join("images"),
        saved_config_file: dir.join("saved").join("image-generator.json"),
        opaque: false,
    }
}

#[test]
fn first_run_renders_everything() {
    let opts = scratch("first_run");
    let stats = run(&opts).unwrap();

    assert_eq!(stats.rendered.len(), 4);
    assert_eq!(stats.skipped, 0);
    for file in ["button-default", "check-on", "progress", "swatch-accent"] {
        assert!(
            opts.output_directory.join(format!("{file}.png")).is_file(),
            "missing output for '{file}'"
        );
    }
}

#[test]
fn second_run_is_idempotent() {
    let opts = scratch("idempotent");
    run(&opts).unwrap();

    let stats = run(&opts).unwrap();
    assert!(stats.rendered.is_empty());
    assert_eq!(stats.skipped, 4);
}

#[test]
fn snapshot_matches_current_config_after_success() {
    let opts = scratch("snapshot_fidelity");
    run(&opts).unwrap();

    assert_eq!(
        fs::read(&opts.saved_config_file).unwrap(),
        fs::read(&opts.config_file).unwrap()
    );
    let current = manifest::parse_file(&opts.config_file, true).unwrap();
    let saved = manifest::parse_file(&opts.saved_config_file, true).unwrap();
    assert_eq!(current, saved);
}

#[test]
fn editing_one_record_regenerates_only_that_image() {
    let opts = scratch("one_change");
    run(&opts).unwrap();

    let edited = MANIFEST.replace(r#"{ "type": "Float", "value": "0.6" }"#,
                                  r#"{ "type": "Float", "value": "0.9" }"#);
    assert_ne!(edited, MANIFEST);
    fs::write(&opts.config_file, edited).unwrap();

    let stats = run(&opts).unwrap();
    assert_eq!(stats.rendered, vec!["progress".to_string()]);
    assert_eq!(stats.skipped, 3);
}

#[test]
fn changing_only_a_value_kind_regenerates() {
    let opts = scratch("kind_change");
    run(&opts).unwrap();

    // Numerically identical fraction, declared as Double instead of Float.
    let edited = MANIFEST.replace(r#"{ "type": "Float", "value": "0.6" }"#,
                                  r#"{ "type": "Double", "value": "0.6" }"#);
    fs::write(&opts.config_file, edited).unwrap();

    let stats = run(&opts).unwrap();
    assert_eq!(stats.rendered, vec!["progress".to_string()]);
}

#[test]
fn failed_construction_aborts_without_snapshot() {
    let opts = scratch("all_or_nothing");

    let broken = MANIFEST.replace("\"class\": \"ProgressBar\"", "\"class\": \"Spinner\"");
    fs::write(&opts.config_file, broken).unwrap();

    let err = run(&opts).unwrap_err();
    assert!(matches!(err, UishotError::UnresolvedType(name) if name == "Spinner"));
    assert!(
        !opts.saved_config_file.exists(),
        "snapshot must not be written on a failed run"
    );

    // The next run still treats everything as new.
    fs::write(&opts.config_file, MANIFEST).unwrap();
    let stats = run(&opts).unwrap();
    assert_eq!(stats.rendered.len(), 4);
}

#[test]
fn unknown_look_and_feel_is_fatal() {
    let mut opts = scratch("bad_theme");
    opts.look_and_feel = "metal".into();
    assert!(run(&opts).is_err());
}

#[test]
fn output_directory_colliding_with_a_file_is_fatal() {
    let mut opts = scratch("outdir_collision");
    fs::write(opts.config_file.parent().unwrap().join("blocker"), b"x").unwrap();
    opts.output_directory = opts.config_file.parent().unwrap().join("blocker");

    assert!(matches!(
        run(&opts).unwrap_err(),
        UishotError::OutputDirectory(_)
    ));
}

#[test]
fn rendered_png_has_transparent_border_and_opaque_center() {
    let opts = scratch("alpha_check");
    run(&opts).unwrap();

    // button-default: 90x28 widget centered in a 120x40 panel.
    let img = image::open(opts.output_directory.join("button-default.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!((img.width(), img.height()), (120, 40));
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
    assert_ne!(img.get_pixel(60, 20).0[3], 0);
}
