use super::Reflector;
use crate::generic::GenericType;
use crate::reflect::{Target, ZeroFn};
use crate::reflector::Ancestors;
use crate::schema::{ElementError, ElementId};

impl Reflector {
    /// A populated dynamic slot contributes no node of its own: the contained
    /// value is derived into the same node.
    pub(super) fn reflect_interface(
        &mut self,
        ancestors: &Ancestors,
        id: ElementId,
        target: Option<Target<'_>>,
    ) {
        match target {
            None => {
                let element = &mut self.schema[id];
                element.generic = GenericType::Invalid;
                element.error = Some(ElementError::NilInterface);
            }
            Some(inner) => {
                self.schema[id].nullable = true;
                self.reflect_element(ancestors.clone(), id, &*inner);
            }
        }
    }

    /// Optional values are elided like dynamic slots. An empty optional is
    /// derived from a zero value of its target type.
    pub(super) fn reflect_pointer(
        &mut self,
        ancestors: &Ancestors,
        id: ElementId,
        target: Option<Target<'_>>,
        zero: ZeroFn,
    ) {
        let element = &mut self.schema[id];
        element
            .native_default_mut()
            .options
            .add_bool("is_nil", target.is_none());
        if element.error.is_some() {
            return;
        }
        element.nullable = true;

        match target {
            Some(inner) => self.reflect_element(ancestors.clone(), id, &*inner),
            None => {
                let placeholder = zero();
                self.reflect_element(ancestors.clone(), id, &*placeholder);
            }
        }
    }
}
