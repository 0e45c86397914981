//! Row codec: fixed-width encoding of a single attribute value.
//!
//! A numeric attribute is encoded as its bit pattern in little-endian byte
//! order, whether the host passes it by value or by reference (`int8` and
//! `float8` on hosts without by-value 8-byte datums). A `FixedBinary`
//! attribute is encoded as the `width` content bytes of the datum. Every
//! encoding is exactly `width` bytes, which is what keeps column files
//! aligned record-for-record.

use colfile_result::{Error, Result};

use crate::attribute::{AttributeDesc, AttributeType};
use crate::ids::AttributeOrdinal;
use crate::internal::{Bool, Codec, DecodeError, LeF32, LeF64, LeI8, LeI16, LeI32, LeI64};
use crate::value::Value;

/// Check the codec preconditions for `attr` and return its width.
#[inline]
fn fixed_width(ordinal: AttributeOrdinal, attr: &AttributeDesc) -> Result<usize> {
    attr.fixed_width().ok_or(Error::UnsupportedColumnType {
        attribute: ordinal,
        width: attr.width,
    })
}

/// Validate that `value` could be encoded for `attr` without encoding it.
///
/// Checks, in order: fixed width, non-null, type agreement, and then that
/// the declared width fits the type (the natural width for numerics, the
/// content length for `FixedBinary`).
pub fn check_value(ordinal: AttributeOrdinal, attr: &AttributeDesc, value: &Value) -> Result<()> {
    let width = fixed_width(ordinal, attr)?;
    if value.is_null() {
        return Err(Error::NullValueUnsupported { attribute: ordinal });
    }
    if !value.matches_type(attr.logical_type) {
        return Err(Error::invalid_argument(format!(
            "attribute {ordinal} ({}) is {:?} but got a {} value",
            attr.name,
            attr.logical_type,
            value.kind()
        )));
    }
    match (attr.logical_type.by_value_width(), attr.logical_type) {
        (Some(natural), _) if natural as usize == width => {}
        (Some(_), ty) => {
            return Err(Error::invalid_argument(format!(
                "attribute {ordinal} ({}) declares width {width} which does not fit {ty:?}",
                attr.name
            )));
        }
        (None, AttributeType::FixedBinary) if !attr.by_value => {
            if let Value::Bytes(bytes) = value {
                if bytes.len() != width {
                    return Err(Error::invalid_argument(format!(
                        "attribute {ordinal} ({}) is {width} bytes wide but the value has {} bytes",
                        attr.name,
                        bytes.len()
                    )));
                }
            }
        }
        (None, ty) => {
            return Err(Error::invalid_argument(format!(
                "attribute {ordinal} ({}) has unsupported storage {ty:?} (by_value = {})",
                attr.name, attr.by_value
            )));
        }
    }
    Ok(())
}

/// Append the encoding of `value` to `out`.
///
/// Writes exactly `attr.width` bytes on success and nothing on failure.
pub fn encode_into(
    ordinal: AttributeOrdinal,
    attr: &AttributeDesc,
    value: &Value,
    out: &mut Vec<u8>,
) -> Result<()> {
    check_value(ordinal, attr, value)?;
    match value {
        Value::Bool(v) => Bool::encode_into(out, v),
        Value::Char(v) => LeI8::encode_into(out, v),
        Value::Int16(v) => LeI16::encode_into(out, v),
        Value::Int32(v) => LeI32::encode_into(out, v),
        Value::Int64(v) => LeI64::encode_into(out, v),
        Value::Float32(v) => LeF32::encode_into(out, v),
        Value::Float64(v) => LeF64::encode_into(out, v),
        // Content, not a reference to it.
        Value::Bytes(bytes) => out.extend_from_slice(bytes),
        Value::Null => unreachable!("check_value rejects NULL"),
    }
    Ok(())
}

/// Encode `value` into a fresh `width`-byte vector.
pub fn encode(ordinal: AttributeOrdinal, attr: &AttributeDesc, value: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(attr.fixed_width().unwrap_or(0));
    encode_into(ordinal, attr, value, &mut out)?;
    Ok(out)
}

/// Decode one fixed-width record for `attr`.
///
/// `bytes` must be exactly the attribute's declared width.
pub fn decode(ordinal: AttributeOrdinal, attr: &AttributeDesc, bytes: &[u8]) -> Result<Value> {
    let width = fixed_width(ordinal, attr)?;
    if bytes.len() != width {
        return Err(Error::invalid_argument(format!(
            "attribute {ordinal} ({}) expects {width}-byte records, got {}",
            attr.name,
            bytes.len()
        )));
    }

    let map_err = |e: DecodeError| Error::Internal(format!("decode attribute {ordinal}: {e:?}"));
    if let Some(natural) = attr.logical_type.by_value_width() {
        if natural as usize != width {
            return Err(Error::invalid_argument(format!(
                "attribute {ordinal} ({}) declares width {width} which does not fit {:?}",
                attr.name, attr.logical_type
            )));
        }
    }

    // Numerics decode the same way whether passed by value or by reference.
    let value = match (attr.by_value, attr.logical_type) {
        (_, AttributeType::Bool) => Value::Bool(Bool::decode(bytes).map_err(map_err)?),
        (_, AttributeType::Char) => Value::Char(LeI8::decode(bytes).map_err(map_err)?),
        (_, AttributeType::Int16) => Value::Int16(LeI16::decode(bytes).map_err(map_err)?),
        (_, AttributeType::Int32) => Value::Int32(LeI32::decode(bytes).map_err(map_err)?),
        (_, AttributeType::Int64) => Value::Int64(LeI64::decode(bytes).map_err(map_err)?),
        (_, AttributeType::Float32) => Value::Float32(LeF32::decode(bytes).map_err(map_err)?),
        (_, AttributeType::Float64) => Value::Float64(LeF64::decode(bytes).map_err(map_err)?),
        (false, AttributeType::FixedBinary) => Value::Bytes(bytes.to_vec()),
        (by_value, ty) => {
            return Err(Error::invalid_argument(format!(
                "attribute {ordinal} ({}) has unsupported storage {ty:?} (by_value = {by_value})",
                attr.name
            )));
        }
    };
    Ok(value)
}
