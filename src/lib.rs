#![forbid(unsafe_code)]

//! uishot renders declaratively described UI widgets to PNG assets at build
//! time. A JSON manifest maps output filenames to widget descriptors; each
//! run regenerates only the images whose descriptors changed since the last
//! successful run, then snapshots the manifest for the next comparison.

pub mod diff;
pub mod encode;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod registry;
pub mod render;
pub mod value;
pub mod widgets;

pub use diff::stale_files;
pub use error::{UishotError, UishotResult};
pub use generate::{GeneratorOpts, RunStats, run};
pub use manifest::{ImageMap, ImageSpec};
pub use registry::{Widget, WidgetRegistry};
pub use render::{Panel, PanelSettings, PixelBuffer, centered_origin};
pub use value::{TypedValue, ValueKind};
pub use widgets::{Theme, builtin_registry};
