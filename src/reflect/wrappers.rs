use std::rc::Rc;
use std::sync::Arc;

use super::collections::zero;
use super::{Reflect, Shape, Target};

impl<T: Reflect + Default + 'static> Reflect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer {
            target: self.as_ref().map(|v| Target::Borrowed(v as &dyn Reflect)),
            zero: zero::<T>,
        }
    }
}

// ---- Transparent owners ----

macro_rules! transparent {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $wrapper<T> {
                fn shape(&self) -> Shape<'_> {
                    (**self).shape()
                }

                fn type_name(&self) -> Option<&'static str> {
                    (**self).type_name()
                }
            }
        )*
    };
}

transparent!(Box, Rc, Arc);

impl<T: Reflect + ?Sized> Reflect for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn type_name(&self) -> Option<&'static str> {
        (**self).type_name()
    }
}

// ---- Dynamic slot ----

/// A dynamically-typed slot holding any reflectable value, or nothing.
#[derive(Default)]
pub struct Dynamic(pub Option<Box<dyn Reflect>>);

impl Dynamic {
    pub fn new(value: impl Reflect + 'static) -> Self {
        Self(Some(Box::new(value)))
    }

    pub fn nil() -> Self {
        Self(None)
    }
}

impl Reflect for Dynamic {
    fn shape(&self) -> Shape<'_> {
        Shape::Dynamic(self.0.as_deref().map(|v| Target::Borrowed(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Kind;

    #[test]
    fn dynamic_slot_unwraps_one_level() {
        let slot = Dynamic::new(1.5f32);
        let Shape::Dynamic(Some(inner)) = slot.shape() else {
            panic!("expected populated slot");
        };
        assert_eq!(inner.shape().kind(), Kind::F32);
        assert!(matches!(Dynamic::nil().shape(), Shape::Dynamic(None)));
    }

    #[test]
    fn shared_owners_are_transparent() {
        let rc = Rc::new(String::from("x"));
        assert_eq!(rc.shape().kind(), Kind::String);
        let arc: Arc<str> = Arc::from("y");
        assert_eq!(arc.shape().kind(), Kind::String);
    }
}
