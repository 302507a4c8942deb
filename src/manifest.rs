//! Manifest model and parser.
//!
//! The manifest is a JSON document with one record per output image:
//!
//! ```json
//! { "images": [ { "file": "button-ok", "class": "Button",
//!                 "width": 90, "height": 28,
//!                 "panelWidth": 120, "panelHeight": 40,
//!                 "arguments":        [ { "type": "String", "value": "OK" } ],
//!                 "clientProperties": [ { "name": "uishot.accent",
//!                                         "type": "String", "value": "#4466dd" } ] } ] }
//! ```
//!
//! `panelWidth`/`panelHeight` default from `width`/`height` when absent.
//! Literal values stay strings in the document and are parsed through
//! [`TypedValue::parse`], so the declared kind is part of the descriptor.

use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::Path,
};

use crate::{
    error::{UishotError, UishotResult},
    value::TypedValue,
};

/// Mapping from output filename (without extension) to its descriptor.
pub type ImageMap = BTreeMap<String, ImageSpec>;

/// One widget-to-image rendering task. Immutable once parsed; equality over
/// all fields is the change-detection signal. The output filename is the
/// [`ImageMap`] key and deliberately not part of the value.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSpec {
    pub class: String,
    pub width: u32,
    pub height: u32,
    pub panel_width: u32,
    pub panel_height: u32,
    pub args: Vec<TypedValue>,
    pub properties: BTreeMap<String, TypedValue>,
}

#[derive(Debug, serde::Deserialize)]
struct ManifestDoc {
    #[serde(default)]
    images: Vec<ImageRecord>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageRecord {
    file: String,
    class: String,
    width: u32,
    height: u32,
    #[serde(default)]
    panel_width: Option<u32>,
    #[serde(default)]
    panel_height: Option<u32>,
    #[serde(default)]
    arguments: Vec<ArgumentRecord>,
    #[serde(default)]
    client_properties: Vec<PropertyRecord>,
}

#[derive(Debug, serde::Deserialize)]
struct ArgumentRecord {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

#[derive(Debug, serde::Deserialize)]
struct PropertyRecord {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

/// Parse a manifest file.
///
/// Strict mode turns every failure into a fatal [`UishotError`]. Non-strict
/// mode is used for the previous-run snapshot, where an absent file simply
/// means "first run": any failure degrades to an empty mapping.
pub fn parse_file(path: &Path, strict: bool) -> UishotResult<ImageMap> {
    let result = open_and_parse(path);
    match result {
        Ok(map) => Ok(map),
        Err(err) if strict => Err(err),
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "snapshot unavailable, treating as empty");
            Ok(ImageMap::new())
        }
    }
}

fn open_and_parse(path: &Path) -> UishotResult<ImageMap> {
    let file = File::open(path)
        .map_err(|e| UishotError::config(format!("unable to open '{}': {e}", path.display())))?;
    let doc: ManifestDoc = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| UishotError::config(format!("unable to parse '{}': {e}", path.display())))?;
    build_map(doc)
}

/// Parse a manifest from an in-memory document. Always strict.
pub fn parse_str(source: &str) -> UishotResult<ImageMap> {
    let doc: ManifestDoc = serde_json::from_str(source)
        .map_err(|e| UishotError::config(format!("unable to parse manifest: {e}")))?;
    build_map(doc)
}

fn build_map(doc: ManifestDoc) -> UishotResult<ImageMap> {
    let mut map = ImageMap::new();
    for record in doc.images {
        let spec = build_spec(&record)?;
        // Duplicate filenames: the later record silently replaces the
        // earlier one, matching the reference behavior.
        map.insert(record.file, spec);
    }
    Ok(map)
}

fn build_spec(record: &ImageRecord) -> UishotResult<ImageSpec> {
    let panel_width = record.panel_width.unwrap_or(record.width);
    let panel_height = record.panel_height.unwrap_or(record.height);

    let mut args = Vec::with_capacity(record.arguments.len());
    for arg in &record.arguments {
        args.push(TypedValue::parse(&arg.kind, &arg.value)?);
    }

    let mut properties = BTreeMap::new();
    for prop in &record.client_properties {
        let value = TypedValue::parse(&prop.kind, &prop.value)?;
        properties.insert(prop.name.clone(), value);
    }

    let spec = ImageSpec {
        class: record.class.clone(),
        width: record.width,
        height: record.height,
        panel_width,
        panel_height,
        args,
        properties,
    };
    spec.validate(&record.file)?;
    Ok(spec)
}

impl ImageSpec {
    pub fn validate(&self, file: &str) -> UishotResult<()> {
        if self.class.trim().is_empty() {
            return Err(UishotError::config(format!(
                "image '{file}': class must be non-empty"
            )));
        }
        for (label, dim) in [
            ("width", self.width),
            ("height", self.height),
            ("panelWidth", self.panel_width),
            ("panelHeight", self.panel_height),
        ] {
            if dim == 0 {
                return Err(UishotError::config(format!(
                    "image '{file}': {label} must be > 0"
                )));
            }
            if dim > u32::from(u16::MAX) {
                return Err(UishotError::config(format!(
                    "image '{file}': {label} {dim} exceeds the maximum surface size"
                )));
            }
        }
        Ok(())
    }
}
