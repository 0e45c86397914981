use super::*;

/// Defines a little-endian codec for a primitive numeric type.
///
/// The encoding is the value's raw bit pattern in little-endian byte order,
/// so floats round-trip bit-exactly (including NaN payloads and `-0.0`).
macro_rules! le_codec {
    ($name:ident, $ty:ty, $width:expr) => {
        #[doc = concat!("Little-endian `", stringify!($ty), "` codec.")]
        pub struct $name;

        impl Codec for $name {
            const WIDTH: usize = $width;
            type Owned = $ty;

            #[inline]
            fn encode_into(dst: &mut Vec<u8>, v: &$ty) {
                dst.extend_from_slice(&v.to_le_bytes());
            }

            #[inline]
            fn decode(src: &[u8]) -> Result<$ty, DecodeError> {
                let bytes: [u8; $width] = src
                    .get(..$width)
                    .and_then(|s| s.try_into().ok())
                    .ok_or(DecodeError::NotEnoughData)?;
                Ok(<$ty>::from_le_bytes(bytes))
            }
        }
    };
}

le_codec!(LeI8, i8, 1);
le_codec!(LeI16, i16, 2);
le_codec!(LeI32, i32, 4);
le_codec!(LeI64, i64, 8);
le_codec!(LeF32, f32, 4);
le_codec!(LeF64, f64, 8);
