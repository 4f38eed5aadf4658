//! Type discriminant and native-interop mapping.
//!
//! [`Kind`] drives operator dispatch and the copy-vs-alias assignment
//! policy. [`NativeType`] models the host-native representation used at the
//! boundary to builtin functions implemented outside the value domain; the
//! mapping is used only there, never on the hot operator paths.

use std::fmt;

use thiserror::Error;

/// Discriminant of the runtime value domain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Double,
    Str,
    Array,
    /// The aliasing discriminant. Also reported by lazy array slots, which
    /// are l-value handles rather than stored values.
    Ref,
    /// Sentinel for malformed conversions. No live `Value` carries it.
    Invalid,
}

impl Kind {
    /// True for every discriminant whose values are immutable after
    /// creation. This flag is the basis for the copy-vs-alias assignment
    /// policy: value types copy, `Ref` aliases.
    #[inline]
    pub const fn is_value_type(self) -> bool {
        !matches!(self, Kind::Ref)
    }

    /// Human-readable name, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Double => "double",
            Kind::Str => "string",
            Kind::Array => "array",
            Kind::Ref => "reference",
            Kind::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Host-native representation of a value at the builtin-function boundary.
///
/// Builtins implemented in native code receive unboxed primitives where the
/// signature allows it; `Value` is the catch-all handle form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NativeType {
    Bool,
    Int,
    Double,
    Str,
    Table,
    /// Boxed `Value` handle, used when no primitive form exists.
    Value,
}

impl NativeType {
    /// The discriminant a native parameter of this type corresponds to.
    ///
    /// Total: a boxed handle maps to the aliasing discriminant, since the
    /// callee may observe and mutate through it.
    pub const fn kind(self) -> Kind {
        match self {
            NativeType::Bool => Kind::Bool,
            NativeType::Int => Kind::Int,
            NativeType::Double => Kind::Double,
            NativeType::Str => Kind::Str,
            NativeType::Table => Kind::Array,
            NativeType::Value => Kind::Ref,
        }
    }
}

/// Error at the native-interop boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InteropError {
    /// The discriminant has no unboxed native representation.
    #[error("no native representation for `{0}` values")]
    NoNativeType(Kind),
}

impl TryFrom<Kind> for NativeType {
    type Error = InteropError;

    fn try_from(kind: Kind) -> Result<Self, InteropError> {
        match kind {
            Kind::Bool => Ok(NativeType::Bool),
            Kind::Int => Ok(NativeType::Int),
            Kind::Double => Ok(NativeType::Double),
            Kind::Str => Ok(NativeType::Str),
            Kind::Array => Ok(NativeType::Table),
            Kind::Ref => Ok(NativeType::Value),
            Kind::Null | Kind::Invalid => Err(InteropError::NoNativeType(kind)),
        }
    }
}
