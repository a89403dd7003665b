//! Type derivation engine.
//!
//! Walk a [`Reflect`] value depth-first and build a [`Schema`]:
//! - every node gets a generic type, even when it also gets an error
//! - named types are recorded as `type_ref` and extracted once into `TypeRefs`
//! - cycles are detected per path through a copied [`Ancestors`] set
//!
//! Errors are attached to the node that produced them and never abort the run.
//! A [`Reflector`] owns the schema under construction, so concurrent runs need
//! one engine each.
pub mod ancestors;
mod list;
mod object;
mod reference;
mod typeref;

use tracing::{debug, trace};

use crate::generic::{GenericType, TypeCategory};
use crate::reflect::{Reflect, Shape};
use crate::schema::{ElementError, ElementId, Schema};

pub use ancestors::Ancestors;

#[derive(Debug, Default)]
pub struct Reflector {
    schema: Schema,
}

impl Reflector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any partially built schema and start over with empty trees.
    pub fn reset(&mut self) {
        self.schema = Schema::new();
    }

    /// Derive the schema of `value`. The engine is reset before and after.
    pub fn derive_schema(&mut self, value: &dyn Reflect) -> Schema {
        self.reset();
        let root = self.schema.root();
        let top = self.schema.new_child(root, "");
        debug!(kind = %value.shape().kind(), type_name = ?value.type_name(), "deriving schema");

        self.reflect_element(Ancestors::new(), top, value);

        let mut schema = std::mem::take(&mut self.schema);
        schema.compact();
        debug!(
            nodes = schema.len(),
            type_refs = schema.children(schema.type_refs()).len(),
            "schema derived"
        );
        schema
    }

    /// Classify `value` into the node `id`, then expand it by category.
    ///
    /// `ancestors` is owned: callers hand each recursive call its own copy, so
    /// sibling branches never observe each other's named types.
    pub(crate) fn reflect_element(
        &mut self,
        mut ancestors: Ancestors,
        id: ElementId,
        value: &dyn Reflect,
    ) {
        let shape = value.shape();
        let kind = shape.kind();
        let generic = GenericType::of(kind);

        {
            let element = &mut self.schema[id];
            element.generic = generic;
            element.invalid_kind = None;
            element.native_default_mut().options.add_key_val("kind", kind.as_str());

            if generic.category() == TypeCategory::Invalid {
                element.error = Some(ElementError::KindNotSupported);
                element.invalid_kind = Some(kind.as_str().to_string());
                return;
            }
        }

        let parent_is_root = self
            .schema
            .parent(id)
            .is_some_and(|p| self.schema[p].is_root());
        if parent_is_root
            && generic != GenericType::Struct
            && generic.category() != TypeCategory::Reference
        {
            self.schema[id].error = Some(ElementError::RootKind);
            return;
        }

        let element = &mut self.schema[id];
        element.native_default_mut().type_ = kind.as_str().to_string();

        if let Some(name) = value.type_name().filter(|n| *n != kind.as_str()) {
            element.type_ref = name.to_string();
            let native = element.native_default_mut();
            native.type_ref = name.to_string();
            native.options.add_key_val("type_name", name);

            if ancestors.contains(name) {
                trace!(type_ref = name, depth = ancestors.len(), "cyclical reference");
                element.error = Some(ElementError::CyclicalReference);
                return;
            }
            ancestors.add(name);
        }

        match shape {
            Shape::Scalar(_) => {
                if generic.category() == TypeCategory::Known {
                    element.type_ref.clear();
                    element.native_default_mut().type_ref.clear();
                }
            }
            Shape::List { elements, zero, .. } => {
                self.reflect_list(&ancestors, id, elements, zero);
            }
            Shape::Struct(fields) => {
                self.reflect_struct(&ancestors, id, fields);
            }
            Shape::Map {
                key,
                key_type,
                entries,
            } => {
                self.reflect_map(&ancestors, id, key, &key_type, entries);
            }
            Shape::Dynamic(target) => {
                self.reflect_interface(&ancestors, id, target);
            }
            Shape::Pointer { target, zero } => {
                self.reflect_pointer(&ancestors, id, target, zero);
            }
            Shape::Nil => {}
        }

        self.add_type_ref(id);
    }
}

/// Derive the schema of `value` with a fresh engine.
pub fn derive(value: &dyn Reflect) -> Schema {
    Reflector::new().derive_schema(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Dynamic;
    use serde_json::json;

    #[derive(Default)]
    struct StringStruct {
        pub value: String,
    }
    crate::reflect_struct!(StringStruct { pub value as "Value" });

    #[derive(Default)]
    struct Holder {
        pub first: StringStruct,
        pub second: Option<StringStruct>,
        pub any: Dynamic,
    }
    crate::reflect_struct!(Holder {
        pub first as "First",
        pub second as "Second",
        pub any as "Any",
    });

    fn top(schema: &Schema) -> ElementId {
        schema.children(schema.root())[0]
    }

    #[test]
    fn scalar_at_root_is_rejected() {
        let schema = derive(&String::from("Hello"));
        let t = top(&schema);
        assert_eq!(schema[t].error, Some(ElementError::RootKind));
        assert_eq!(schema[t].generic, GenericType::String);
        assert!(schema.children(t).is_empty());
    }

    #[test]
    fn untyped_nil_is_not_supported() {
        let schema = derive(&serde_json::Value::Null);
        let t = top(&schema);
        assert_eq!(schema[t].error, Some(ElementError::KindNotSupported));
        assert_eq!(schema[t].type_label(), "invalid:nil");
    }

    #[test]
    fn named_struct_is_registered_once() {
        let schema = derive(&Holder::default());
        let registry = schema.type_refs();
        let names: Vec<_> = schema
            .sorted_children(registry)
            .into_iter()
            .map(|c| schema[c].name.clone())
            .collect();
        assert_eq!(names, vec!["Holder", "StringStruct"]);

        let t = top(&schema);
        assert_eq!(schema[t].type_ref, "Holder");
        let second = schema.child_by_name(t, "Second").unwrap();
        assert!(schema[second].nullable);
        assert_eq!(schema[second].type_ref, "StringStruct");
        assert_eq!(schema[second].generic, GenericType::Struct);
    }

    #[test]
    fn nil_dynamic_slot_is_an_invalid_leaf() {
        let schema = derive(&Holder::default());
        let t = top(&schema);
        let any = schema.child_by_name(t, "Any").unwrap();
        assert_eq!(schema[any].error, Some(ElementError::NilInterface));
        assert_eq!(schema[any].type_label(), "invalid");
    }

    #[test]
    fn populated_dynamic_slot_is_elided() {
        let holder = Holder {
            any: Dynamic::new(StringStruct::default()),
            ..Holder::default()
        };
        let schema = derive(&holder);
        let any = schema.child_by_name(top(&schema), "Any").unwrap();
        assert!(schema[any].nullable);
        assert_eq!(schema[any].type_ref, "StringStruct");
        assert_eq!(schema.children(any).len(), 1);
    }

    #[test]
    fn native_diagnostics_are_recorded() {
        let schema = derive(&json!({"list": [1, 2]}));
        let t = top(&schema);
        let list = schema.child_by_name(t, "List").unwrap();
        let native = schema[list].native_default();
        assert_eq!(native.type_, "vec");
        assert_eq!(native.options.get("len"), Some("2"));
        assert_eq!(native.name, "list");
    }

    #[test]
    fn derived_schema_keeps_only_reachable_nodes() {
        // Discarded list probes and registry copies of nested refs detach nodes.
        let doc = json!({"mixed": [1, "a"], "many": [1, 2, 3]});
        let schema = derive(&doc);
        assert_eq!(schema.arena_len(), schema.len());

        let schema = derive(&Holder::default());
        assert_eq!(schema.arena_len(), schema.len());
        assert_eq!(schema.children(schema.type_refs()).len(), 2);
    }

    #[test]
    fn fresh_engines_are_deterministic() {
        let doc = json!({"b": [1.5], "a": {"x": "y"}, "c": true});
        let a = derive(&doc);
        let b = derive(&doc);
        assert_eq!(a.to_json(), b.to_json());

        let mut engine = Reflector::new();
        let first = engine.derive_schema(&doc);
        let second = engine.derive_schema(&doc);
        assert_eq!(first.to_json(), second.to_json());
        assert_eq!(first.len(), second.len());
    }
}
