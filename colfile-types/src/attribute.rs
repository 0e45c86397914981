//! Attribute descriptors: the per-column slice of a table's schema.

/// Declared width of a variable-length attribute.
pub const VARIABLE_WIDTH: i16 = -1;

/// Logical type of an attribute.
///
/// Fixed-width by-value types map one-to-one onto a little-endian codec.
/// `FixedBinary` is the by-reference fixed-width case (think `uuid` or
/// `name`): its width comes from the descriptor, not from the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Bool,
    /// Single-byte signed character (`"char"`).
    Char,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Fixed-length byte string passed by reference.
    FixedBinary,
    /// Variable-length byte string. Declared so hosts can describe such
    /// columns; the storage core rejects them.
    Varlena,
}

impl AttributeType {
    /// Natural width of a by-value type, `None` for by-reference types.
    pub fn by_value_width(self) -> Option<i16> {
        match self {
            AttributeType::Bool | AttributeType::Char => Some(1),
            AttributeType::Int16 => Some(2),
            AttributeType::Int32 | AttributeType::Float32 => Some(4),
            AttributeType::Int64 | AttributeType::Float64 => Some(8),
            AttributeType::FixedBinary | AttributeType::Varlena => None,
        }
    }
}

/// Schema entry for one attribute.
///
/// `width` is the declared byte width; a negative width marks a
/// variable-length attribute. A zero width has no storable encoding. `by_value` distinguishes datums stored inline
/// from datums the host passes by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDesc {
    pub name: String,
    pub width: i16,
    pub by_value: bool,
    pub logical_type: AttributeType,
}

impl AttributeDesc {
    /// Build a descriptor from raw catalog fields.
    pub fn from_parts(
        name: impl Into<String>,
        width: i16,
        by_value: bool,
        logical_type: AttributeType,
    ) -> Self {
        Self {
            name: name.into(),
            width,
            by_value,
            logical_type,
        }
    }

    /// Descriptor for a by-value type with its natural width.
    ///
    /// Passing a by-reference type yields a variable-width descriptor.
    pub fn by_value(name: impl Into<String>, logical_type: AttributeType) -> Self {
        match logical_type.by_value_width() {
            Some(width) => Self::from_parts(name, width, true, logical_type),
            None => Self::varlena(name),
        }
    }

    pub fn bool(name: impl Into<String>) -> Self {
        Self::by_value(name, AttributeType::Bool)
    }

    pub fn int16(name: impl Into<String>) -> Self {
        Self::by_value(name, AttributeType::Int16)
    }

    pub fn int32(name: impl Into<String>) -> Self {
        Self::by_value(name, AttributeType::Int32)
    }

    pub fn int64(name: impl Into<String>) -> Self {
        Self::by_value(name, AttributeType::Int64)
    }

    pub fn float64(name: impl Into<String>) -> Self {
        Self::by_value(name, AttributeType::Float64)
    }

    /// Fixed-width by-reference attribute of `width` bytes.
    pub fn fixed_binary(name: impl Into<String>, width: i16) -> Self {
        Self::from_parts(name, width, false, AttributeType::FixedBinary)
    }

    /// Variable-length by-reference attribute.
    pub fn varlena(name: impl Into<String>) -> Self {
        Self::from_parts(name, VARIABLE_WIDTH, false, AttributeType::Varlena)
    }

    #[inline]
    pub fn is_fixed_width(&self) -> bool {
        self.width > 0
    }

    /// Declared width in bytes, `None` for variable-length and zero-width
    /// attributes.
    #[inline]
    pub fn fixed_width(&self) -> Option<usize> {
        usize::try_from(self.width).ok().filter(|&w| w > 0)
    }
}
