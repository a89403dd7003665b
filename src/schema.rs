//! Schema tree model.
//!
//! A [`Schema`] owns two disjoint trees stored in one arena:
//! - `Root`: the derived value's own structure, named types collapsed to references
//! - `TypeRefs`: one definition per distinct named type, keyed by name
//!
//! Nodes are addressed by [`ElementId`]. Parent links are plain ids, and a node
//! is owned by exactly one parent's child list at a time. Detached nodes stay
//! in the arena but are unreachable from either tree.

use std::ops::{Index, IndexMut};

use indexmap::IndexMap;
use serde::Serialize;

use crate::generic::{GenericType, TypeCategory};

mod element;
mod native;

pub use element::{DialectView, ElementError, ElementId, TypeElement};
pub use native::{Include, JSON_DIALECT, NATIVE_DIALECT, NativeOptions, NativeType};

pub const ROOT_NAME: &str = "Root";
pub const TYPE_REFS_NAME: &str = "TypeRefs";

#[derive(Debug, Clone)]
pub struct Schema {
    elements: Vec<TypeElement>,
    root: ElementId,
    type_refs: ElementId,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    pub fn new() -> Self {
        let mut schema = Self {
            elements: Vec::new(),
            root: ElementId(0),
            type_refs: ElementId(0),
        };
        schema.root = schema.new_top_level(ROOT_NAME);
        schema.type_refs = schema.new_top_level(TYPE_REFS_NAME);
        schema
    }

    fn new_top_level(&mut self, name: &str) -> ElementId {
        let id = self.alloc(name);
        self[id].generic = GenericType::Root;
        id
    }

    fn alloc(&mut self, name: &str) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(TypeElement::new(id, name));
        id
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn type_refs(&self) -> ElementId {
        self.type_refs
    }

    pub fn get(&self, id: ElementId) -> Option<&TypeElement> {
        self.elements.get(id.0)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self[id].parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self[id].children
    }

    /// Create a node named `name` and append it to `parent`.
    pub fn new_child(&mut self, parent: ElementId, name: &str) -> ElementId {
        let id = self.alloc(name);
        self.add_child(parent, id);
        id
    }

    /// Append `child` to `parent`, detaching it from any previous parent first.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) {
        if let Some(old) = self[child].parent {
            self.remove_child(old, child);
        }
        self[child].parent = Some(parent);
        self[parent].children.push(child);
    }

    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) {
        let children = &mut self[parent].children;
        if let Some(pos) = children.iter().position(|c| *c == child) {
            children.remove(pos);
            self[child].parent = None;
        }
    }

    pub fn remove_all_children(&mut self, id: ElementId) {
        for child in std::mem::take(&mut self[id].children) {
            self[child].parent = None;
        }
    }

    /// First child of `parent` whose generic name is `name`.
    pub fn child_by_name(&self, parent: ElementId, name: &str) -> Option<ElementId> {
        self[parent]
            .children
            .iter()
            .copied()
            .find(|c| self[*c].name == name)
    }

    /// Children ordered alphabetically by generic name. Ties keep insertion order.
    pub fn sorted_children(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = self[id].children.clone();
        out.sort_by(|a, b| self[*a].name.cmp(&self[*b].name));
        out
    }

    /// Deep-copy `id` and its subtree. The copy has fresh ids and no parent.
    pub fn copy_element(&mut self, id: ElementId) -> ElementId {
        let copy = ElementId(self.elements.len());
        let mut element = self[id].clone();
        element.id = copy;
        element.parent = None;
        element.children = Vec::new();
        self.elements.push(element);

        for child in self[id].children.clone() {
            let child_copy = self.copy_element(child);
            self.add_child(copy, child_copy);
        }
        copy
    }

    /// Drop detached nodes from the arena and renumber the rest in tree
    /// order: `Root` and its subtree first, then `TypeRefs`. Ids taken before
    /// compaction are invalid afterwards.
    pub fn compact(&mut self) {
        let mut order = Vec::with_capacity(self.elements.len());
        self.collect_preorder(self.root, &mut order);
        self.collect_preorder(self.type_refs, &mut order);

        let mut remap = vec![None; self.elements.len()];
        for (new, old) in order.iter().enumerate() {
            remap[old.0] = Some(ElementId(new));
        }
        let lookup = |id: ElementId| remap[id.0].unwrap_or(id);

        let mut slots: Vec<Option<TypeElement>> =
            std::mem::take(&mut self.elements).into_iter().map(Some).collect();
        for old in &order {
            let Some(mut element) = slots[old.0].take() else {
                continue;
            };
            element.id = lookup(element.id);
            element.parent = element.parent.map(lookup);
            element.children = element.children.iter().map(|c| lookup(*c)).collect();
            self.elements.push(element);
        }
        self.root = lookup(self.root);
        self.type_refs = lookup(self.type_refs);
    }

    fn collect_preorder(&self, id: ElementId, out: &mut Vec<ElementId>) {
        out.push(id);
        for child in &self[id].children {
            self.collect_preorder(*child, out);
        }
    }

    /// Allocated node count, detached nodes included.
    pub fn arena_len(&self) -> usize {
        self.elements.len()
    }

    /// Reachable node count, both trees included.
    pub fn len(&self) -> usize {
        self.subtree_len(self.root) + self.subtree_len(self.type_refs)
    }

    pub fn is_empty(&self) -> bool {
        self[self.root].children.is_empty() && self[self.type_refs].children.is_empty()
    }

    fn subtree_len(&self, id: ElementId) -> usize {
        1 + self[id]
            .children
            .iter()
            .map(|c| self.subtree_len(*c))
            .sum::<usize>()
    }

    /// Nested JSON view of both trees.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Index<ElementId> for Schema {
    type Output = TypeElement;

    fn index(&self, id: ElementId) -> &Self::Output {
        &self.elements[id.0]
    }
}

impl IndexMut<ElementId> for Schema {
    fn index_mut(&mut self, id: ElementId) -> &mut Self::Output {
        &mut self.elements[id.0]
    }
}

// ---- Tree dump ----

#[derive(Serialize)]
struct NodeDump {
    #[serde(skip_serializing_if = "String::is_empty")]
    name: String,
    #[serde(rename = "type")]
    type_: String,
    type_category: TypeCategory,
    #[serde(skip_serializing_if = "String::is_empty")]
    type_ref: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ElementError>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    native: IndexMap<String, NativeType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeDump>,
}

impl NodeDump {
    fn build(schema: &Schema, id: ElementId) -> Self {
        let e = &schema[id];
        Self {
            name: e.name.clone(),
            type_: e.type_label(),
            type_category: e.category(),
            type_ref: e.type_ref.clone(),
            nullable: e.nullable,
            error: e.error,
            native: if e.is_root() { IndexMap::new() } else { e.native.clone() },
            children: e
                .children
                .iter()
                .map(|c| NodeDump::build(schema, *c))
                .collect(),
        }
    }
}

impl Serialize for Schema {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(ROOT_NAME, &NodeDump::build(self, self.root))?;
        map.serialize_entry(TYPE_REFS_NAME, &NodeDump::build(self, self.type_refs))?;
        map.end()
    }
}
