//! Open-ended widget construction.
//!
//! The set of constructible widget types is not fixed by this crate: a
//! [`WidgetRegistry`] maps type names to constructors provided by whatever
//! widget bindings are linked in, and construction resolves by name plus an
//! exact argument signature. The built-in bindings live in [`crate::widgets`].

use std::collections::BTreeMap;

use crate::{
    error::{UishotError, UishotResult},
    value::{TypedValue, ValueKind},
};

/// A constructed widget, ready to receive client properties and be painted.
///
/// Client properties are opaque named attributes: a binding interprets the
/// names it knows and silently accepts the rest.
pub trait Widget {
    fn put_client_property(&mut self, name: &str, value: TypedValue);

    /// Paint the widget at origin into a `width` x `height` box. The caller
    /// owns placement (transform) and the surrounding canvas.
    fn paint(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        width: u32,
        height: u32,
    ) -> UishotResult<()>;
}

type BuildFn = Box<dyn Fn(&[TypedValue]) -> UishotResult<Box<dyn Widget>>>;

struct Constructor {
    signature: Vec<ValueKind>,
    build: BuildFn,
}

/// Registry of widget constructors, keyed by type name. One type may expose
/// several constructors distinguished by arity and argument kinds; matching
/// is exact, with no widening between numeric kinds.
#[derive(Default)]
pub struct WidgetRegistry {
    types: BTreeMap<String, Vec<Constructor>>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        signature: Vec<ValueKind>,
        build: impl Fn(&[TypedValue]) -> UishotResult<Box<dyn Widget>> + 'static,
    ) {
        self.types
            .entry(type_name.into())
            .or_default()
            .push(Constructor {
                signature,
                build: Box::new(build),
            });
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn construct(
        &self,
        type_name: &str,
        args: &[TypedValue],
    ) -> UishotResult<Box<dyn Widget>> {
        let constructors = self
            .types
            .get(type_name)
            .ok_or_else(|| UishotError::UnresolvedType(type_name.to_string()))?;

        let kinds: Vec<ValueKind> = args.iter().map(TypedValue::kind).collect();
        let ctor = constructors
            .iter()
            .find(|c| c.signature == kinds)
            .ok_or_else(|| UishotError::NoMatchingConstructor {
                type_name: type_name.to_string(),
                signature: describe_signature(&kinds),
            })?;

        (ctor.build)(args).map_err(|err| UishotError::Construction {
            type_name: type_name.to_string(),
            cause: err.to_string(),
        })
    }
}

fn describe_signature(kinds: &[ValueKind]) -> String {
    let parts: Vec<&str> = kinds.iter().map(|k| k.as_str()).collect();
    parts.join(", ")
}
