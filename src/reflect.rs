//! Structural introspection.
//!
//! Rust has no runtime reflection, so values describe themselves through the
//! [`Reflect`] trait: a one-level [`Shape`] (kind plus borrowed members) and an
//! optional declared type name. The derivation engine walks these shapes
//! lazily, one level at a time, so recursive types never materialize more
//! than the engine asks for.
//!
//! Implementations are split by category:
//! - `primitives`: bool, integers, floats, char, strings
//! - `collections`: Vec, arrays, VecDeque, HashMap, BTreeMap, IndexMap
//! - `wrappers`: Option, Box, Rc, Arc, [`Dynamic`]
//! - `unsupported`: fn pointers, raw pointers, channels, unit
//! - `external`: chrono date-times and `serde_json::Value` documents

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

mod collections;
mod external;
mod macros;
mod primitives;
mod unsupported;
mod wrappers;

pub use external::JsonSlot;
pub use wrappers::Dynamic;

/// A value that can describe its own structure.
pub trait Reflect {
    /// Structural view of this value, one level deep.
    fn shape(&self) -> Shape<'_>;

    /// Declared name of the value's type when it differs from its structural
    /// kind (a named struct, a newtype). `None` for anonymous/structural types.
    fn type_name(&self) -> Option<&'static str> {
        None
    }
}

/// Constructor for a zero-valued placeholder of some element type.
pub type ZeroFn = fn() -> Box<dyn Reflect>;

// --------------------------------- Kind ----------------------------------- //

/// Closed set of structural kinds an adapter can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Char,
    String,
    Array,
    Vec,
    Map,
    Struct,
    Option,
    Dyn,
    DateTime,
    Fn,
    Channel,
    Complex,
    RawPointer,
    Nil,
}

impl Kind {
    pub const ALL: [Kind; 29] = [
        Kind::Bool,
        Kind::I8,
        Kind::I16,
        Kind::I32,
        Kind::I64,
        Kind::I128,
        Kind::Isize,
        Kind::U8,
        Kind::U16,
        Kind::U32,
        Kind::U64,
        Kind::U128,
        Kind::Usize,
        Kind::F32,
        Kind::F64,
        Kind::Char,
        Kind::String,
        Kind::Array,
        Kind::Vec,
        Kind::Map,
        Kind::Struct,
        Kind::Option,
        Kind::Dyn,
        Kind::DateTime,
        Kind::Fn,
        Kind::Channel,
        Kind::Complex,
        Kind::RawPointer,
        Kind::Nil,
    ];

    /// Canonical kind name; recorded as the native dialect's type.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::I128 => "i128",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::U128 => "u128",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Vec => "vec",
            Kind::Map => "map",
            Kind::Struct => "struct",
            Kind::Option => "option",
            Kind::Dyn => "dyn",
            Kind::DateTime => "datetime",
            Kind::Fn => "fn",
            Kind::Channel => "channel",
            Kind::Complex => "complex",
            Kind::RawPointer => "raw_pointer",
            Kind::Nil => "nil",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --------------------------------- Shape ---------------------------------- //

/// Borrowed or owned handle to a nested value.
pub enum Target<'a> {
    Borrowed(&'a dyn Reflect),
    Owned(Box<dyn Reflect + 'a>),
}

impl<'a> Target<'a> {
    pub fn owned(value: impl Reflect + 'a) -> Self {
        Target::Owned(Box::new(value))
    }
}

impl<'a> Deref for Target<'a> {
    type Target = dyn Reflect + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            Target::Borrowed(v) => *v,
            Target::Owned(v) => v.as_ref(),
        }
    }
}

/// One member of a struct-like value, in declaration order.
pub struct Field<'a> {
    pub name: &'static str,
    /// Unexported members are skipped by the engine.
    pub exported: bool,
    /// Raw field tag, e.g. `json:"name,omitempty"`.
    pub tag: &'static str,
    pub value: Target<'a>,
}

/// One-level structural view of a value.
pub enum Shape<'a> {
    /// Leaf value: scalars, atomic known types, and kinds the engine rejects.
    Scalar(Kind),
    /// Array (`fixed`) or growable list.
    List {
        fixed: bool,
        elements: Vec<Target<'a>>,
        zero: ZeroFn,
    },
    Struct(Vec<Field<'a>>),
    Map {
        key: Kind,
        key_type: Cow<'static, str>,
        entries: Vec<(String, Target<'a>)>,
    },
    /// Optional/pointer indirection; `target` is `None` when empty.
    Pointer {
        target: Option<Target<'a>>,
        zero: ZeroFn,
    },
    /// Dynamically-typed slot; `None` when nothing is stored.
    Dynamic(Option<Target<'a>>),
    /// The untyped nil.
    Nil,
}

impl Shape<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Shape::Scalar(kind) => *kind,
            Shape::List { fixed: true, .. } => Kind::Array,
            Shape::List { fixed: false, .. } => Kind::Vec,
            Shape::Struct(_) => Kind::Struct,
            Shape::Map { .. } => Kind::Map,
            Shape::Pointer { .. } => Kind::Option,
            Shape::Dynamic(_) => Kind::Dyn,
            Shape::Nil => Kind::Nil,
        }
    }
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::List { elements, .. } => write!(f, "{}[{}]", self.kind(), elements.len()),
            Shape::Struct(fields) => write!(f, "struct{{{} fields}}", fields.len()),
            Shape::Map { key, entries, .. } => write!(f, "map<{key}>[{}]", entries.len()),
            other => f.write_str(other.kind().as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    #[derive(Default)]
    struct Point {
        pub x: i64,
        pub y: i64,
        hidden: bool,
    }

    crate::reflect_struct!(Point {
        pub x as "X" => r#"json:"x""#,
        pub y as "Y",
        hidden,
    });

    #[test]
    fn primitive_kinds() {
        assert_eq!(true.shape().kind(), Kind::Bool);
        assert_eq!(3u16.shape().kind(), Kind::U16);
        assert_eq!(1.5f64.shape().kind(), Kind::F64);
        assert_eq!(String::from("a").shape().kind(), Kind::String);
        assert_eq!(().shape().kind(), Kind::Nil);
        assert!(3i32.type_name().is_none());
    }

    #[test]
    fn struct_macro_reports_fields_in_declaration_order() {
        let p = Point::default();
        assert_eq!(p.type_name(), Some("Point"));
        let Shape::Struct(fields) = p.shape() else {
            panic!("expected struct shape");
        };
        let names: Vec<_> = fields.iter().map(|f| (f.name, f.exported, f.tag)).collect();
        assert_eq!(
            names,
            vec![("X", true, r#"json:"x""#), ("Y", true, ""), ("hidden", false, "")]
        );
    }

    #[test]
    fn collections_expose_elements_and_placeholders() {
        let empty: Vec<String> = Vec::new();
        let Shape::List { fixed, elements, zero } = empty.shape() else {
            panic!("expected list");
        };
        assert!(!fixed);
        assert!(elements.is_empty());
        assert_eq!(zero().shape().kind(), Kind::String);

        let arr = [1u8, 2, 3];
        assert_eq!(arr.shape().kind(), Kind::Array);

        let mut m = HashMap::new();
        m.insert(1i32, true);
        let Shape::Map { key, key_type, entries } = m.shape() else {
            panic!("expected map");
        };
        assert_eq!(key, Kind::I32);
        assert_eq!(key_type, "i32");
        assert_eq!(entries.len(), 1);

        let b: BTreeMap<String, f32> = BTreeMap::new();
        assert_eq!(b.shape().kind(), Kind::Map);
    }

    #[test]
    fn targets_deref_to_short_lived_values() {
        let text = String::from("local");
        let borrowed = Target::Borrowed(&text);
        assert_eq!(borrowed.shape().kind(), Kind::String);

        let doc = serde_json::json!([1]);
        let owned = Target::owned(JsonSlot(&doc));
        assert_eq!(owned.shape().kind(), Kind::Dyn);
    }

    #[test]
    fn option_is_a_pointer_with_a_zero_target() {
        let none: Option<Point> = None;
        let Shape::Pointer { target, zero } = none.shape() else {
            panic!("expected pointer");
        };
        assert!(target.is_none());
        assert_eq!(zero().type_name(), Some("Point"));

        let boxed = Box::new(7i64);
        assert_eq!(boxed.shape().kind(), Kind::I64);
    }
}
