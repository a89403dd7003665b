use std::collections::HashSet;

use super::Reflector;
use crate::reflect::{Field, Kind, Target};
use crate::reflector::Ancestors;
use crate::schema::{ElementError, ElementId};
use crate::tags::parse_tags;

impl Reflector {
    /// Struct members in declaration order. Unexported members are skipped;
    /// field tags become per-dialect overrides on the member node.
    pub(super) fn reflect_struct(
        &mut self,
        ancestors: &Ancestors,
        id: ElementId,
        fields: Vec<Field<'_>>,
    ) {
        if self.schema[id].error.is_some() {
            return;
        }
        if fields.is_empty() {
            self.schema[id].error = Some(ElementError::EmptyStruct);
            return;
        }

        let mut exported = 0usize;
        for field in &fields {
            if !field.exported {
                continue;
            }
            exported += 1;

            let child = self.schema.new_child(id, field.name);
            for (dialect, tag) in parse_tags(field.tag) {
                self.schema[child].native_mut(&dialect).update_from_tag(&tag);
            }
            self.reflect_element(ancestors.clone(), child, &*field.value);
        }

        if exported == 0 {
            self.schema[id].error = Some(ElementError::NoExportedFields);
        }
    }

    /// Map entries become members named by their capitalized key, visited
    /// in (export name, original key) order.
    pub(super) fn reflect_map(
        &mut self,
        ancestors: &Ancestors,
        id: ElementId,
        key: Kind,
        key_type: &str,
        entries: Vec<(String, Target<'_>)>,
    ) {
        if self.schema[id].error.is_some() {
            return;
        }
        if key != Kind::String {
            let element = &mut self.schema[id];
            element.error = Some(ElementError::MapKeyType);
            element.native_default_mut().error =
                format!("{} not {key_type:?}", ElementError::MapKeyType);
            return;
        }
        if entries.is_empty() {
            self.schema[id].error = Some(ElementError::EmptyMap);
            return;
        }

        let mut keys: Vec<(String, &String, &Target<'_>)> = entries
            .iter()
            .map(|(name, value)| (capitalize(name), name, value))
            .collect();
        keys.sort_by(|a, b| (&a.0, a.1).cmp(&(&b.0, b.1)));

        let mut seen = HashSet::new();
        for (export, name, value) in keys {
            let child = self.schema.new_child(id, &export);
            let element = &mut self.schema[child];
            if export != *name {
                element.native_default_mut().name = name.clone();
            }
            if !seen.insert(export.clone()) {
                element.error = Some(ElementError::DuplicateMapKey);
                element.native_default_mut().error =
                    format!("{} {export:?} ({name:?})", ElementError::DuplicateMapKey);
            }
            self.reflect_element(ancestors.clone(), child, &**value);
        }
    }
}

/// Uppercase the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
