use bytes::Bytes;
use proptest::prelude::*;
use qpack::{float::Float, vecmap::VecMap, Qpack};

/// arbitrary raw bytes for use with proptest
///
/// Lengths straddle the inline limit and the 8-bit length form.
pub fn arb_raw() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..300).prop_map(Bytes::from)
}

/// arbitrary integers, biased towards the edges of each width
pub fn arb_int() -> impl Strategy<Value = i64> {
    prop_oneof![
        -70i64..70,
        any::<i8>().prop_map(i64::from),
        any::<i16>().prop_map(i64::from),
        any::<i32>().prop_map(i64::from),
        any::<i64>(),
        Just(i64::min_value()),
        Just(i64::max_value()),
    ]
}

/// arbitrary doubles, including the compact ones and signed zero
pub fn arb_double() -> impl Strategy<Value = Float> {
    prop_oneof![
        Just(Float::from(-1.0)),
        Just(Float::from(0.0)),
        Just(Float::from(1.0)),
        Just(Float::from(-0.0)),
        any::<f32>().prop_map(Float::from),
        any::<u64>().prop_map(Float::from_bits),
    ]
}

/// arbitrary Qpack for use with proptest
pub fn arb_qpack() -> impl Strategy<Value = Qpack> {
    let leaf = prop_oneof![
        Just(Qpack::Null),
        any::<bool>().prop_map(Qpack::Bool),
        any::<()>().prop_map(Qpack::from),
        arb_int().prop_map(Qpack::Int),
        arb_double().prop_map(Qpack::Double),
        any::<String>().prop_map(Qpack::from),
        arb_raw().prop_map(Qpack::Raw),
    ];
    leaf.prop_recursive(
        8,  // max depth
        64, // max nodes
        12, // max items per collection
        |inner| {
            prop_oneof![
                // both sides of the inline count limit
                prop::collection::vec(inner.clone(), 0..12).prop_map(Qpack::Array),
                prop::collection::vec((inner.clone(), inner), 0..12)
                    .prop_map(|pairs| Qpack::Map(VecMap::from(pairs)))
            ]
        },
    )
}
