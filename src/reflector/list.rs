use indexmap::IndexMap;
use tracing::trace;

use super::Reflector;
use crate::reflect::{Target, ZeroFn};
use crate::reflector::Ancestors;
use crate::schema::{ElementError, ElementId};

impl Reflector {
    /// Lists keep one representative child. Every element is probed so that
    /// mixed element types are caught; an empty list is typed through a
    /// zero-valued placeholder.
    pub(super) fn reflect_list(
        &mut self,
        ancestors: &Ancestors,
        id: ElementId,
        elements: Vec<Target<'_>>,
        zero: ZeroFn,
    ) {
        self.schema[id]
            .native_default_mut()
            .options
            .add_key_val("len", elements.len().to_string());

        if self.schema[id].error.is_some() {
            return;
        }

        if elements.is_empty() {
            let child = self.schema.new_child(id, "");
            let placeholder = zero();
            trace!(element = %child, "typing empty list from placeholder");
            self.reflect_element(ancestors.clone(), child, &*placeholder);
            return;
        }

        let mut kinds: IndexMap<String, usize> = IndexMap::new();
        let mut probed = Vec::with_capacity(elements.len());

        for element in &elements {
            let child = self.schema.new_child(id, "");
            probed.push(child);
            self.reflect_element(ancestors.clone(), child, &**element);

            *kinds.entry(self.schema[child].type_label()).or_default() += 1;
            if kinds.len() > 1 {
                let breakdown = kinds
                    .iter()
                    .map(|(kind, count)| format!("{kind}:{count}"))
                    .collect::<Vec<_>>()
                    .join(",");
                trace!(element = %id, %breakdown, "list contains multiple kinds");

                let list = &mut self.schema[id];
                list.error = Some(ElementError::SliceMultiType);
                list.native_default_mut().error =
                    format!("{}: {breakdown}", ElementError::SliceMultiType);
                for child in probed {
                    self.schema.remove_child(id, child);
                }
                return;
            }
        }

        for extra in probed.into_iter().skip(1) {
            self.schema.remove_child(id, extra);
        }
    }
}
