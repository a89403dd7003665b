//! Declarative `Reflect` implementations for user types.

/// Implements [`Reflect`](crate::reflect::Reflect) for a named struct.
///
/// Each member is listed in declaration order as
/// `[pub] field [as "ExportName"] [=> "tag"]`. Members without `pub` are
/// reported as unexported. The export name defaults to the field identifier.
///
/// ```ignore
/// reflect_struct!(User {
///     pub name as "Name" => r#"json:"name,omitempty""#,
///     pub age as "Age",
///     secret,
/// });
/// ```
///
/// Prefix the type with `anonymous` to report no declared type name.
#[macro_export]
macro_rules! reflect_struct {
    (@name $field:ident) => { stringify!($field) };
    (@name $field:ident $export:literal) => { $export };
    (@tag) => { "" };
    (@tag $tag:literal) => { $tag };
    (@fields $self:ident; $($vis:vis $field:ident $(as $export:literal)? $(=> $tag:literal)?),*) => {
        vec![$(
            $crate::reflect::Field {
                name: $crate::reflect_struct!(@name $field $($export)?),
                exported: !stringify!($vis).is_empty(),
                tag: $crate::reflect_struct!(@tag $($tag)?),
                value: $crate::reflect::Target::Borrowed(&$self.$field),
            }
        ),*]
    };
    (anonymous $name:ident { $($body:tt)* }) => {
        impl $crate::reflect::Reflect for $name {
            fn shape(&self) -> $crate::reflect::Shape<'_> {
                $crate::reflect::Shape::Struct($crate::reflect_struct!(@strip self; $($body)*))
            }
        }
    };
    ($name:ident { $($body:tt)* }) => {
        impl $crate::reflect::Reflect for $name {
            fn shape(&self) -> $crate::reflect::Shape<'_> {
                $crate::reflect::Shape::Struct($crate::reflect_struct!(@strip self; $($body)*))
            }

            fn type_name(&self) -> Option<&'static str> {
                Some(stringify!($name))
            }
        }
    };
    // Accept an optional trailing comma before handing off to `@fields`.
    (@strip $self:ident; $($vis:vis $field:ident $(as $export:literal)? $(=> $tag:literal)?),* $(,)?) => {
        $crate::reflect_struct!(@fields $self; $($vis $field $(as $export)? $(=> $tag)?),*)
    };
}

/// Implements [`Reflect`](crate::reflect::Reflect) for a named single-field
/// tuple struct, delegating structure to the wrapped value.
#[macro_export]
macro_rules! reflect_newtype {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $crate::reflect::Reflect for $name {
                fn shape(&self) -> $crate::reflect::Shape<'_> {
                    $crate::reflect::Reflect::shape(&self.0)
                }

                fn type_name(&self) -> Option<&'static str> {
                    Some(stringify!($name))
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use crate::reflect::{Reflect, Shape};

    #[derive(Default)]
    struct Label(String);
    crate::reflect_newtype!(Label);

    #[derive(Default)]
    struct Empty {}
    crate::reflect_struct!(Empty {});

    #[derive(Default)]
    struct Inline {
        pub value: i32,
    }
    crate::reflect_struct!(anonymous Inline { pub value });

    #[test]
    fn newtype_keeps_its_name() {
        let l = Label::default();
        assert_eq!(l.type_name(), Some("Label"));
        assert!(matches!(l.shape(), Shape::Scalar(crate::reflect::Kind::String)));
    }

    #[test]
    fn empty_and_anonymous_structs() {
        let empty = Empty::default();
        let Shape::Struct(fields) = empty.shape() else {
            panic!("expected struct");
        };
        assert!(fields.is_empty());

        let inline = Inline::default();
        assert!(inline.type_name().is_none());
        let Shape::Struct(fields) = inline.shape() else {
            panic!("expected struct");
        };
        assert_eq!(fields[0].name, "value");
        assert!(fields[0].exported);
    }
}
