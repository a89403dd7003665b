use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;

use super::native::{Include, NATIVE_DIALECT, NativeType};
use crate::generic::{GenericType, TypeCategory};

/// Arena index of a node inside its [`Schema`](super::Schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---- Error taxonomy ----

/// Per-node derivation error. Recorded on the node, never propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error, Serialize)]
#[serde(into = "String")]
pub enum ElementError {
    #[error("kind not supported")]
    KindNotSupported,
    #[error("root type must be a struct")]
    RootKind,
    #[error("cyclical reference")]
    CyclicalReference,
    #[error("interface element is nil")]
    NilInterface,
    #[error("empty struct not supported")]
    EmptyStruct,
    #[error("struct has no exported fields")]
    NoExportedFields,
    #[error("empty map not supported")]
    EmptyMap,
    #[error("map key type must be string")]
    MapKeyType,
    #[error("slice contains multiple kinds")]
    SliceMultiType,
    #[error("duplicate map key")]
    DuplicateMapKey,
}

impl From<ElementError> for String {
    fn from(e: ElementError) -> Self {
        e.to_string()
    }
}

// ---- TypeElement ----

static EMPTY_NATIVE: Lazy<NativeType> = Lazy::new(|| NativeType::new(NATIVE_DIALECT));

/// One node of a schema tree.
#[derive(Debug, Clone)]
pub struct TypeElement {
    pub id: ElementId,
    /// Field or key name; empty for list elements.
    pub name: String,
    pub nullable: bool,
    pub generic: GenericType,
    /// Concrete kind name for unsupported kinds, rendered as `invalid:<kind>`.
    pub invalid_kind: Option<String>,
    pub type_ref: String,
    pub native: IndexMap<String, NativeType>,
    pub error: Option<ElementError>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

impl TypeElement {
    pub(crate) fn new(id: ElementId, name: impl Into<String>) -> Self {
        let mut native = IndexMap::new();
        native.insert(NATIVE_DIALECT.to_string(), NativeType::new(NATIVE_DIALECT));
        Self {
            id,
            name: name.into(),
            nullable: false,
            generic: GenericType::Invalid,
            invalid_kind: None,
            type_ref: String::new(),
            native,
            error: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn category(&self) -> TypeCategory {
        self.generic.category()
    }

    pub fn is_root(&self) -> bool {
        self.generic == GenericType::Root
    }

    pub fn is_cyclical(&self) -> bool {
        self.error == Some(ElementError::CyclicalReference)
    }

    /// Generic type slug, or `invalid:<kind>` for unsupported kinds.
    pub fn type_label(&self) -> String {
        match (&self.invalid_kind, self.generic) {
            (Some(kind), GenericType::Invalid) => format!("invalid:{kind}"),
            (_, generic) => generic.slug().to_string(),
        }
    }

    /// Type segment used in path strings.
    pub fn path_type(&self) -> String {
        if self.category() == TypeCategory::Invalid {
            self.type_label()
        } else {
            self.generic.path_token().to_string()
        }
    }

    pub fn native_default(&self) -> &NativeType {
        self.native.get(NATIVE_DIALECT).unwrap_or(&EMPTY_NATIVE)
    }

    pub fn native_default_mut(&mut self) -> &mut NativeType {
        self.native_mut(NATIVE_DIALECT)
    }

    pub fn native_mut(&mut self, dialect: &str) -> &mut NativeType {
        self.native
            .entry(dialect.to_string())
            .or_insert_with(|| NativeType::new(dialect))
    }

    /// Name override for `dialect`, falling back to the generic name.
    pub fn name_for(&self, dialect: &str) -> &str {
        match self.native.get(dialect) {
            Some(native) if !native.name.is_empty() => &native.name,
            _ => &self.name,
        }
    }

    /// Generic attributes overlaid with the `dialect` override block.
    pub fn dialect_view(&self, dialect: &str) -> DialectView {
        let base = self.native_default();
        let mut view = DialectView {
            name: self.name.clone(),
            type_: self.generic.slug().to_string(),
            type_ref: base.type_ref.clone(),
            include: Include::Undefined,
            error: base.error.clone(),
        };
        if let Some(native) = self.native.get(dialect) {
            if !native.name.is_empty() {
                view.name = native.name.clone();
            }
            if !native.type_.is_empty() && dialect != NATIVE_DIALECT {
                view.type_ = native.type_.clone();
            }
            if !native.type_ref.is_empty() {
                view.type_ref = native.type_ref.clone();
            }
            if !native.error.is_empty() {
                view.error = native.error.clone();
            }
            view.include = native.include;
        }
        view
    }
}

/// Merged per-dialect attributes of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectView {
    pub name: String,
    pub type_: String,
    pub type_ref: String,
    pub include: Include,
    pub error: String,
}
