//! Versioned behavior documents.
//!
//! ```json
//! { "version": 1, "kind": "Enemy", "data": { "IdleAnim": { "name": "stand", "file": "enemy.json" } } }
//! ```
//!
//! Reading is best-effort: a malformed field is logged and keeps its
//! default, unknown fields are ignored. Documents without a version are
//! treated as a bare `data` object.

use crate::behavior::Behavior;
use crate::error::{PersistError, Result};
use crate::kind::KindRegistry;
use quarrel_anim::{AnimationId, AnimationLibrary, AnimationSourceInfo};
use quarrel_core::DocumentVersion;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

const VERSION_KEY: &str = "version";
const KIND_KEY: &str = "kind";
const DATA_KEY: &str = "data";

/// Wrap a behavior's fields in a versioned document
pub fn save_document(
    behavior: &dyn Behavior,
    kinds: &KindRegistry,
    animations: &AnimationLibrary,
) -> Result<Value> {
    let kind = behavior.kind();
    let name = kinds
        .name_of(kind)
        .ok_or_else(|| PersistError::UnknownKind(kind.to_string()))?;

    Ok(json!({
        VERSION_KEY: DocumentVersion::CURRENT.0,
        KIND_KEY: name,
        DATA_KEY: behavior.save(animations),
    }))
}

/// Load a document into an existing behavior of the same kind
pub fn load_document(
    behavior: &mut dyn Behavior,
    doc: &Value,
    kinds: &KindRegistry,
    animations: &AnimationLibrary,
) -> Result<()> {
    let object = doc
        .as_object()
        .ok_or_else(|| PersistError::Malformed("document is not an object".to_string()))?;

    let version = match object.get(VERSION_KEY) {
        None => DocumentVersion::UNVERSIONED,
        Some(value) => value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(DocumentVersion)
            .ok_or_else(|| PersistError::Malformed(format!("bad version {}", value)))?,
    };

    if !version.is_readable() {
        return Err(PersistError::UnsupportedVersion {
            found: version.0,
            supported: DocumentVersion::CURRENT.0,
        });
    }

    if version == DocumentVersion::UNVERSIONED && !object.contains_key(DATA_KEY) {
        log::debug!("load_document: Reading unversioned {} document", behavior.kind());
        behavior.load(doc, animations);
        return Ok(());
    }

    let name = object
        .get(KIND_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| PersistError::Malformed("missing kind".to_string()))?;
    let kind = kinds
        .lookup(name)
        .ok_or_else(|| PersistError::UnknownKind(name.to_string()))?;

    if kind != behavior.kind() {
        return Err(PersistError::KindMismatch {
            expected: kinds
                .name_of(behavior.kind())
                .map(str::to_string)
                .unwrap_or_else(|| behavior.kind().to_string()),
            found: name.to_string(),
        });
    }

    let empty = Value::Object(Default::default());
    behavior.load(object.get(DATA_KEY).unwrap_or(&empty), animations);
    Ok(())
}

/// Read an optional field.
///
/// Absent or null gives `None` silently; a field of the wrong shape is
/// logged and also gives `None`.
pub fn read_field<T: DeserializeOwned>(data: &Value, key: &str) -> Option<T> {
    let value = data.get(key)?;
    if value.is_null() {
        return None;
    }
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            log::warn!("read_field: Ignoring malformed field '{}': {}", key, err);
            None
        }
    }
}

/// Animation binding as its source info, or null
pub fn animation_to_json(animations: &AnimationLibrary, id: AnimationId) -> Value {
    if !id.is_valid() {
        return Value::Null;
    }
    match animations.source_info(id) {
        Some(source) => json!(source),
        None => {
            log::error!("animation_to_json({}): Animation does not exist", id);
            Value::Null
        }
    }
}

/// Animation binding from a document field, or [`AnimationId::INVALID`]
pub fn animation_from_json(animations: &AnimationLibrary, data: &Value, key: &str) -> AnimationId {
    read_field::<AnimationSourceInfo>(data, key)
        .map(|source| animations.find(&source))
        .unwrap_or_default()
}
