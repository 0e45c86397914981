use colfile_result::Error;
use colfile_types::codec::{decode, encode, encode_into};
use colfile_types::{AttributeDesc, AttributeType, Value};

/* --------------------------- Shared helpers ---------------------------- */

/// One attribute per supported by-value type plus a by-reference column.
fn mixed_schema() -> Vec<AttributeDesc> {
    vec![
        AttributeDesc::bool("flag"),
        AttributeDesc::by_value("initial", AttributeType::Char),
        AttributeDesc::int16("small"),
        AttributeDesc::int32("medium"),
        AttributeDesc::int64("large"),
        AttributeDesc::by_value("ratio", AttributeType::Float32),
        AttributeDesc::float64("score"),
        AttributeDesc::fixed_binary("tag", 6),
    ]
}

fn mixed_row() -> Vec<Value> {
    vec![
        Value::Bool(true),
        Value::Char(-7),
        Value::Int16(i16::MIN),
        Value::Int32(123_456),
        Value::Int64(-9_876_543_210),
        Value::Float32(1.25),
        Value::Float64(f64::MAX),
        Value::Bytes(b"abcdef".to_vec()),
    ]
}

/* ------------------------------- Tests --------------------------------- */

#[test]
fn every_supported_type_writes_its_declared_width() {
    for (ordinal, (attr, value)) in mixed_schema().iter().zip(mixed_row()).enumerate() {
        let bytes = encode(ordinal, attr, &value).expect("encode");
        assert_eq!(
            bytes.len(),
            attr.fixed_width().unwrap(),
            "attribute {} wrote the wrong number of bytes",
            attr.name
        );
        assert_eq!(decode(ordinal, attr, &bytes).expect("decode"), value);
    }
}

#[test]
fn records_concatenate_without_framing() {
    let schema = mixed_schema();
    let mut buf = Vec::new();
    for (ordinal, (attr, value)) in schema.iter().zip(mixed_row()).enumerate() {
        encode_into(ordinal, attr, &value, &mut buf).expect("encode");
    }
    let total: usize = schema.iter().map(|a| a.fixed_width().unwrap()).sum();
    assert_eq!(buf.len(), total);
}

#[test]
fn by_reference_encoding_is_content_not_address() {
    let attr = AttributeDesc::fixed_binary("digest", 32);
    let a = Value::Bytes(vec![0xAB; 32]);
    let b = Value::Bytes(vec![0xAB; 32]);
    // Two distinct allocations with equal content encode identically.
    assert_eq!(encode(0, &attr, &a).unwrap(), encode(0, &attr, &b).unwrap());
    assert_eq!(encode(0, &attr, &a).unwrap(), vec![0xAB; 32]);
}

#[test]
fn variable_width_attribute_is_unsupported() {
    let attr = AttributeDesc::varlena("body");
    let err = encode(2, &attr, &Value::Bytes(b"hello".to_vec())).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedColumnType { attribute: 2, .. }
    ));
}

#[test]
fn null_value_is_unsupported() {
    let attr = AttributeDesc::fixed_binary("tag", 4);
    let err = encode(5, &attr, &Value::Null).unwrap_err();
    assert!(matches!(err, Error::NullValueUnsupported { attribute: 5 }));
}
