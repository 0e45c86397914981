use super::*;

/// Codec for bool. `false` -> `0u8`, `true` -> `1u8`.
pub struct Bool;

impl Codec for Bool {
    const WIDTH: usize = 1;
    type Owned = bool;

    #[inline]
    fn encode_into(dst: &mut Vec<u8>, v: &bool) {
        dst.push(if *v { 1 } else { 0 });
    }

    #[inline]
    fn decode(src: &[u8]) -> Result<bool, DecodeError> {
        match src.first() {
            Some(b) => Ok(*b != 0),
            None => Err(DecodeError::NotEnoughData),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_roundtrip() {
        let mut f_bytes = Vec::new();
        let mut t_bytes = Vec::new();

        Bool::encode_into(&mut f_bytes, &false);
        Bool::encode_into(&mut t_bytes, &true);

        assert_eq!(f_bytes, &[0]);
        assert_eq!(t_bytes, &[1]);

        assert!(!Bool::decode(&f_bytes).unwrap());
        assert!(Bool::decode(&t_bytes).unwrap());
    }
}
