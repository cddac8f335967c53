//! Turns raw compiler output into typed trees.
//!
//! Compiler JSON comes in two schema families: the modern one (0.4.12 and
//! later, `nodeType`-tagged objects with named child fields) and the
//! legacy one (older, `name`-tagged objects with a positional `children`
//! array). [`read_compiler_output`] detects the schema per source
//! section, dispatches to the matching reader, and then runs the link
//! pass that validates numeric cross-references against the populated
//! context.
//!
//! Both readers work in two passes. Pass 1 builds every node, wiring
//! structural children as it goes; reference attributes are stored as the
//! raw ids found in the JSON. Pass 2 resolves those ids through the
//! context once all sources are in, so references across source units are
//! fine. Unknown schema tags fail [`AstError::UnknownNodeKind`]; builders
//! for custom tags can be registered on [`ReadOptions`].

pub mod legacy;
pub mod modern;

pub use legacy::{LegacyBuilder, LegacyReader, LegacyRegistry};
pub use modern::{ModernBuilder, ModernReader, ModernRegistry};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AstError, Result};
use crate::loc::SourceLocation;
use crate::sanity;
use crate::{AstContext, NodeId};

/// A JSON object, as both schema families represent nodes.
pub type JsonObject = serde_json::Map<String, Value>;

/// A hook invoked after the link pass on every newly constructed node.
pub type PostProcess = fn(&mut AstContext, NodeId) -> Result<()>;

/// Knobs for [`read_compiler_output`].
pub struct ReadOptions {
    /// Run the sanity checker over every source unit after the link pass.
    /// On by default.
    pub check_sanity: bool,

    /// The tag table driving the modern reader. Extend it to teach the
    /// reader new `nodeType`s.
    pub modern: ModernRegistry,

    /// The tag table driving the legacy reader.
    pub legacy: LegacyRegistry,

    /// Callbacks run after the link pass, once per newly built node.
    pub post_process: Vec<PostProcess>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            check_sanity: true,
            modern: ModernRegistry::default(),
            legacy: LegacyRegistry::default(),
            post_process: Vec::new(),
        }
    }
}

/// Reads every AST-carrying source section of `data` (standard solc
/// output: a `sources` map, optionally an `errors` array) into `ctx`.
///
/// Returns the source-unit ids in input order. Sections holding only raw
/// `source` text are skipped; schema selection is per section, so mixed
/// outputs are fine. Fatal entries in `errors` abort with
/// [`AstError::CompileErrorsPresent`] before anything is built. On any
/// error the context is left with whatever the partial build produced
/// and should normally be discarded.
pub fn read_compiler_output(
    data: &Value,
    ctx: &mut AstContext,
    opts: &ReadOptions,
) -> Result<Vec<NodeId>> {
    let top = SourceLocation::default();
    let data = object(data, top)?;

    check_compile_errors(data)?;

    let sources = data
        .get("sources")
        .and_then(Value::as_object)
        .ok_or_else(|| AstError::SchemaMismatch {
            src: top,
            reason: "compiler output has no `sources` object".into(),
        })?;

    let mut units = Vec::new();
    let mut built = Vec::new();

    for (path, section) in sources {
        let section = object(section, top)?;

        let Some(root) = section_ast(section) else {
            if section.contains_key("source") {
                tracing::debug!(path = %path, "section carries raw source only, skipping");
                continue;
            }

            return Err(AstError::SchemaMismatch {
                src: top,
                reason: format!("source section `{path}` has neither an AST nor raw source"),
            });
        };

        let unit = if is_modern(root) {
            tracing::debug!(path = %path, schema = "modern", "reading source section");

            let mut reader = ModernReader::new(ctx, &opts.modern, path);
            let unit = reader.read_node(root)?;
            built.extend(reader.into_built());

            unit
        } else {
            tracing::debug!(path = %path, schema = "legacy", "reading source section");

            let mut reader = LegacyReader::new(ctx, &opts.legacy, path);
            let unit = reader.read_node(root)?;
            built.extend(reader.into_built());

            unit
        };

        units.push(unit);
    }

    link(ctx, &built)?;

    for hook in &opts.post_process {
        for id in &built {
            hook(ctx, *id)?;
        }
    }

    if opts.check_sanity {
        for unit in &units {
            sanity::check_sanity(*unit, ctx)?;
        }
    }

    tracing::debug!(
        units = units.len(),
        nodes = built.len(),
        "read compiler output"
    );

    Ok(units)
}

impl AstContext {
    /// [`read_compiler_output`] with default options.
    pub fn read_compiler_output(&mut self, data: &Value) -> Result<Vec<NodeId>> {
        read_compiler_output(data, self, &ReadOptions::default())
    }
}

/// Pass 2: every reference slot of every newly built node must either
/// resolve in the context or be tolerably dangling (nullable view).
fn link(ctx: &AstContext, built: &[NodeId]) -> Result<()> {
    for id in built {
        let node = ctx.require(*id)?;

        for reference in node.references() {
            if reference.required && !ctx.contains(reference.target) {
                return Err(AstError::DanglingReference {
                    owner: node.id,
                    attribute: reference.attribute,
                    target: reference.target,
                });
            }
        }
    }

    Ok(())
}

/// Picks the AST payload of a source section. The field name has drifted
/// across compiler versions.
fn section_ast(section: &JsonObject) -> Option<&Value> {
    ["ast", "legacyAST", "AST"]
        .iter()
        .find_map(|key| section.get(*key))
        .filter(|v| !v.is_null())
}

/// A typed AST root with a `nodeType` key is modern; everything else goes
/// through the legacy reader.
fn is_modern(root: &Value) -> bool {
    root.as_object()
        .is_some_and(|obj| obj.contains_key("nodeType"))
}

/// Surfaces fatal compiler diagnostics. Modern entries are objects with a
/// `severity`; legacy entries are plain strings where anything but a
/// warning is fatal.
fn check_compile_errors(data: &JsonObject) -> Result<()> {
    let Some(errors) = data.get("errors").and_then(Value::as_array) else {
        return Ok(());
    };

    let mut fatal = Vec::new();

    for entry in errors {
        match entry {
            Value::String(message) => {
                if !message.contains("Warning") {
                    fatal.push(message.clone());
                }
            }

            Value::Object(diagnostic) => {
                if diagnostic.get("severity").and_then(Value::as_str) == Some("error") {
                    let message = diagnostic
                        .get("formattedMessage")
                        .or_else(|| diagnostic.get("message"))
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error");

                    fatal.push(message.to_owned());
                }
            }

            _ => {}
        }
    }

    if fatal.is_empty() {
        Ok(())
    } else {
        Err(AstError::CompileErrorsPresent { messages: fatal })
    }
}

pub(crate) fn object<'v>(v: &'v Value, src: SourceLocation) -> Result<&'v JsonObject> {
    v.as_object().ok_or_else(|| AstError::SchemaMismatch {
        src,
        reason: format!("expected a node object, found {v}"),
    })
}

pub(crate) fn parse_src(obj: &JsonObject) -> Result<SourceLocation> {
    match obj.get("src").and_then(Value::as_str) {
        Some(raw) => raw.parse(),
        None => Ok(SourceLocation::default()),
    }
}

pub(crate) fn require_str<'v>(
    obj: &'v JsonObject,
    key: &str,
    src: SourceLocation,
) -> Result<&'v str> {
    obj.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| AstError::SchemaMismatch {
            src,
            reason: format!("missing or non-string `{key}`"),
        })
}

pub(crate) fn opt_str(obj: &JsonObject, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// A boolean field that old compilers may simply omit.
pub(crate) fn flag(obj: &JsonObject, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

pub(crate) fn opt_flag(obj: &JsonObject, key: &str) -> Option<bool> {
    obj.get(key).and_then(Value::as_bool)
}

/// A node id out of a JSON value. Old compilers use negative ids for
/// compiler-defined globals; those cannot be resolved and read as absent.
pub(crate) fn id_value(v: &Value) -> Option<NodeId> {
    let raw = v.as_i64()?;

    u32::try_from(raw).ok().map(NodeId::new)
}

pub(crate) fn require_id(obj: &JsonObject, key: &str, src: SourceLocation) -> Result<NodeId> {
    obj.get(key)
        .and_then(id_value)
        .ok_or_else(|| AstError::SchemaMismatch {
            src,
            reason: format!("missing or non-integral `{key}`"),
        })
}

pub(crate) fn opt_id(obj: &JsonObject, key: &str) -> Option<NodeId> {
    obj.get(key).and_then(id_value)
}

/// Deserializes a closed value enum (visibility, mutability, ...) out of
/// a field.
pub(crate) fn enum_field<T: DeserializeOwned>(
    obj: &JsonObject,
    key: &str,
    src: SourceLocation,
) -> Result<T> {
    opt_enum_field(obj, key, src)?.ok_or_else(|| AstError::SchemaMismatch {
        src,
        reason: format!("missing `{key}`"),
    })
}

pub(crate) fn opt_enum_field<T: DeserializeOwned>(
    obj: &JsonObject,
    key: &str,
    src: SourceLocation,
) -> Result<Option<T>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),

        Some(v) => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|e| AstError::SchemaMismatch {
                src,
                reason: format!("bad `{key}`: {e}"),
            }),
    }
}

/// An array-of-strings field, empty when missing.
pub(crate) fn string_list(obj: &JsonObject, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
