//! Closed scalar-name → schema-primitive table.
//!
//! Callers have already decided the name denotes a scalar (built-in or
//! standard-library wrapper, not a user model). The table is case-sensitive
//! on the short name. Unknown names degrade to `string` with the fallback
//! flag set rather than erroring; that lenient policy is load-bearing for
//! compatibility, so it is kept observable instead of being a log line only.

/// Schema-side primitive the writer knows how to print.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaPrimitive {
    /// `integer` / `int32`
    Int32,
    /// `integer` / `int64`
    Int64,
    /// `number` / `float`
    Float,
    /// `number` / `double`
    Double,
    /// `number`, precision unspecified
    Number,
    Boolean,
    Str,
    /// `string` / `byte`
    ByteString,
    /// `string` / `binary`
    BinaryString,
    /// `object` with string-valued `additionalProperties`
    StringMap,
}

/// A mapped primitive plus whether the unknown-type fallback fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mapped {
    pub primitive: SchemaPrimitive,
    pub fallback: bool,
}

/// Total and pure: every name maps, unknown ones to `Str` with
/// `fallback = true`.
pub fn map_primitive(short_name: &str) -> Mapped {
    use SchemaPrimitive::*;
    let primitive = match short_name {
        "int" | "Integer" => Int32,
        "Date" | "long" | "Long" => Int64,
        "float" | "Float" => Float,
        "double" | "Double" => Double,
        "BigDecimal" => Number,
        "boolean" | "Boolean" => Boolean,
        "String" => Str,
        "Byte" => ByteString,
        "Map" => StringMap,
        _ => return Mapped { primitive: Str, fallback: true },
    };
    Mapped { primitive, fallback: false }
}

/// Membership in the closed table.
pub fn is_scalar(short_name: &str) -> bool {
    !map_primitive(short_name).fallback
}
