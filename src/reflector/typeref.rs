use tracing::debug;

use super::Reflector;
use crate::schema::{ElementId, Include};

impl Reflector {
    /// Register the named type carried by `id` in `TypeRefs`.
    ///
    /// The registry entry is a pruned deep copy: nested named types are
    /// registered separately and truncated to a reference in the copy.
    /// Cyclical references and already-registered names are skipped.
    pub(super) fn add_type_ref(&mut self, id: ElementId) {
        let type_ref = self.schema[id].native_default().type_ref.clone();
        if type_ref.is_empty() {
            return;
        }
        let registry = self.schema.type_refs();
        if self.schema.child_by_name(registry, &type_ref).is_some() {
            return;
        }
        if self.schema[id].is_cyclical() {
            return;
        }

        let copy = self.schema.copy_element(id);
        {
            let definition = &mut self.schema[copy];
            definition.name = type_ref.clone();
            definition.type_ref.clear();
            definition.nullable = false;
            for native in definition.native.values_mut() {
                native.name.clear();
                native.type_ref.clear();
                native.include = Include::True;
            }
        }

        self.prune_type_refs(copy);
        self.schema.add_child(registry, copy);
        debug!(%type_ref, "registered type");
    }

    /// Descend a registry copy: nested named types are registered on their
    /// own and lose their children here. Errors on reference sites are
    /// dropped from the copy.
    fn prune_type_refs(&mut self, id: ElementId) {
        if !self.schema[id].native_default().type_ref.is_empty() {
            if !self.schema[id].is_cyclical() {
                self.add_type_ref(id);
                self.schema.remove_all_children(id);
            }
            self.schema[id].error = None;
            return;
        }

        for child in self.schema.children(id).to_vec() {
            self.prune_type_refs(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::reflector::derive;
    use crate::schema::{ElementError, Schema};

    #[derive(Default)]
    struct AStruct {
        pub a_name: String,
        pub a_child: Option<Box<BStruct>>,
    }
    #[derive(Default)]
    struct BStruct {
        pub b_name: String,
        pub b_child: Option<Box<CStruct>>,
    }
    #[derive(Default)]
    struct CStruct {
        pub c_name: String,
        pub c_child: Option<Box<AStruct>>,
    }
    crate::reflect_struct!(AStruct { pub a_name as "AName", pub a_child as "AChild" });
    crate::reflect_struct!(BStruct { pub b_name as "BName", pub b_child as "BChild" });
    crate::reflect_struct!(CStruct { pub c_name as "CName", pub c_child as "CChild" });

    #[derive(Default)]
    struct Pair {
        pub left: BStruct,
        pub right: BStruct,
    }
    crate::reflect_struct!(Pair { pub left as "Left", pub right as "Right" });

    fn registry_names(schema: &Schema) -> Vec<String> {
        schema
            .sorted_children(schema.type_refs())
            .into_iter()
            .map(|c| schema[c].name.clone())
            .collect()
    }

    #[test]
    fn three_node_cycle_terminates() {
        let schema = derive(&AStruct::default());
        assert_eq!(registry_names(&schema), vec!["AStruct", "BStruct", "CStruct"]);

        // Root chain: A -> B -> C -> A(cyclical)
        let a = schema.children(schema.root())[0];
        let b = schema.child_by_name(a, "AChild").unwrap();
        let c = schema.child_by_name(b, "BChild").unwrap();
        let back = schema.child_by_name(c, "CChild").unwrap();
        assert_eq!(schema[back].error, Some(ElementError::CyclicalReference));
        assert_eq!(schema[back].type_ref, "AStruct");
        assert!(schema.children(back).is_empty());
    }

    #[test]
    fn registry_copies_are_truncated_at_references() {
        let schema = derive(&AStruct::default());
        for def in schema.children(schema.type_refs()) {
            let def = *def;
            assert!(schema[def].type_ref.is_empty());
            assert!(schema[def].error.is_none());
            for member in schema.children(def) {
                let member = &schema[*member];
                if !member.type_ref.is_empty() {
                    assert!(member.children().is_empty());
                    assert!(member.error.is_none());
                }
            }
        }
    }

    #[test]
    fn same_type_at_two_paths_registers_once() {
        let schema = derive(&Pair::default());
        let names = registry_names(&schema);
        assert_eq!(names, vec!["AStruct", "BStruct", "CStruct", "Pair"]);
        let count = names.iter().filter(|n| *n == "BStruct").count();
        assert_eq!(count, 1);
    }
}
