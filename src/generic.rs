//! Generic type vocabulary shared by every dialect.
//!
//! A schema never talks about `i64` or `HashMap`; it talks about `integer` and
//! `struct`. The structural [`Kind`](crate::reflect::Kind) reported by the
//! adapter is folded into a [`GenericType`] here, and the [`TypeCategory`] of
//! that generic type drives the derivation dispatch.

use std::fmt;

use serde::Serialize;

use crate::reflect::Kind;

// ------------------------------ Categories -------------------------------- //

/// Grouping of generic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    Invalid,
    Basic,
    Compound,
    Known,
    /// Wrappers or pointers around other types.
    Reference,
    /// Internal use only (tree roots).
    Internal,
}

impl TypeCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Basic => "basic",
            Self::Compound => "compound",
            Self::Known => "known",
            Self::Reference => "reference",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ------------------------------ Generic types ----------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "&'static str")]
pub enum GenericType {
    #[default]
    Invalid,
    Boolean,
    Integer,
    Float,
    String,
    List,
    Struct,
    DateTime,
    Interface,
    Pointer,
    Root,
}

impl GenericType {
    pub const ALL: [GenericType; 11] = [
        Self::Invalid,
        Self::Boolean,
        Self::Integer,
        Self::Float,
        Self::String,
        Self::List,
        Self::Struct,
        Self::DateTime,
        Self::Interface,
        Self::Pointer,
        Self::Root,
    ];

    /// Map a structural kind onto the generic vocabulary.
    /// Kinds with no mapping classify as [`GenericType::Invalid`].
    pub fn of(kind: Kind) -> Self {
        match kind {
            Kind::Bool => Self::Boolean,
            Kind::I8
            | Kind::I16
            | Kind::I32
            | Kind::I64
            | Kind::I128
            | Kind::Isize
            | Kind::U8
            | Kind::U16
            | Kind::U32
            | Kind::U64
            | Kind::U128
            | Kind::Usize => Self::Integer,
            Kind::F32 | Kind::F64 => Self::Float,
            Kind::Char | Kind::String => Self::String,
            Kind::Array | Kind::Vec => Self::List,
            Kind::Map | Kind::Struct => Self::Struct,
            Kind::DateTime => Self::DateTime,
            Kind::Dyn => Self::Interface,
            Kind::Option => Self::Pointer,
            Kind::Fn | Kind::Channel | Kind::Complex | Kind::RawPointer | Kind::Nil => Self::Invalid,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::List => "list",
            Self::Struct => "struct",
            Self::DateTime => "date-time",
            Self::Interface => "interface",
            Self::Pointer => "pointer",
            Self::Root => "root",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }

    pub fn category(self) -> TypeCategory {
        match self {
            Self::Invalid => TypeCategory::Invalid,
            Self::Boolean | Self::Integer | Self::Float | Self::String => TypeCategory::Basic,
            Self::List | Self::Struct => TypeCategory::Compound,
            Self::DateTime => TypeCategory::Known,
            Self::Interface | Self::Pointer => TypeCategory::Reference,
            Self::Root => TypeCategory::Internal,
        }
    }

    /// Token used for this type in path strings (`{}` for struct, `[]` for list).
    pub fn path_token(self) -> &'static str {
        match self {
            Self::Struct => "{}",
            Self::List => "[]",
            Self::DateTime => "datetime",
            other => other.slug(),
        }
    }

    pub fn is_basic(self) -> bool {
        self.category() == TypeCategory::Basic
    }
}

/// Path token for a type slug, falling back to the invalid token for unknown slugs.
pub fn path_token_of(slug: &str) -> &'static str {
    GenericType::from_slug(slug)
        .unwrap_or(GenericType::Invalid)
        .path_token()
}

impl From<GenericType> for &'static str {
    fn from(t: GenericType) -> Self {
        t.slug()
    }
}

impl fmt::Display for GenericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_maps_to_exactly_one_generic_type() {
        for kind in Kind::ALL {
            let t = GenericType::of(kind);
            assert_ne!(t, GenericType::Root, "{kind} must not map to root");
        }
        assert_eq!(GenericType::of(Kind::U8), GenericType::Integer);
        assert_eq!(GenericType::of(Kind::Map), GenericType::Struct);
        assert_eq!(GenericType::of(Kind::Channel), GenericType::Invalid);
    }

    #[test]
    fn categories_and_tokens() {
        assert_eq!(GenericType::DateTime.category(), TypeCategory::Known);
        assert_eq!(GenericType::Pointer.category(), TypeCategory::Reference);
        assert_eq!(GenericType::Struct.path_token(), "{}");
        assert_eq!(GenericType::List.path_token(), "[]");
        assert_eq!(path_token_of("boolean"), "boolean");
        assert_eq!(path_token_of("nonsense"), "invalid");
    }

    #[test]
    fn slugs_round_trip() {
        for t in GenericType::ALL {
            assert_eq!(GenericType::from_slug(t.slug()), Some(t));
        }
    }
}
