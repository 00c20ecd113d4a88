use std::thread;

use fieldwire_core::{CountPrefix, CountWidth, ErrorKind, Field, Pipeline};
use proptest::prelude::*;

#[derive(Debug, Default)]
struct Samples {
    values: Vec<u16>,
}

fn samples_pipeline(prefix: CountPrefix) -> Pipeline<Samples> {
    Pipeline::new(vec![Field::dynamic_array(
        prefix,
        Field::value::<u16>(|s: &mut Samples, v| s.values.push(v)),
    )])
}

fn encode(values: &[u16]) -> Vec<u8> {
    let mut bytes = vec![values.len() as u8];
    for value in values {
        bytes.extend_from_slice(&value.to_ne_bytes());
    }
    bytes
}

proptest! {
    #[test]
    fn dynamic_array_applies_element_count_times(values in prop::collection::vec(any::<u16>(), 0..64)) {
        let bytes = encode(&values);
        let mut samples = Samples::default();
        let consumed = samples_pipeline(CountWidth::U8.into())
            .decode_consumed(&bytes, &mut samples)
            .unwrap();
        prop_assert_eq!(consumed, bytes.len());
        prop_assert_eq!(samples.values, values);
    }

    #[test]
    fn inverted_prefix_matches_native_count(count in 0u16..32) {
        let mut bytes = count.swap_bytes().to_ne_bytes().to_vec();
        bytes.extend(std::iter::repeat(0xab).take(count as usize * 2));
        let mut samples = Samples::default();
        let prefix = CountPrefix::inverted(CountWidth::U16).unwrap();
        samples_pipeline(prefix).decode(&bytes, &mut samples).unwrap();
        prop_assert_eq!(samples.values.len(), count as usize);
    }

    #[test]
    fn cursor_never_passes_buffer_end(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let mut samples = Samples::default();
        let result = samples_pipeline(CountWidth::U8.into()).decode_consumed(&bytes, &mut samples);
        match result {
            Ok(consumed) => prop_assert!(consumed <= bytes.len()),
            Err(err) => prop_assert_eq!(err.kind(), ErrorKind::ExceededDataRange),
        }
        prop_assert!(samples.values.len() * 2 < bytes.len().max(1));
    }
}

#[test]
fn one_pipeline_serves_many_threads() {
    let pipeline = samples_pipeline(CountWidth::U8.into());
    let inputs: Vec<Vec<u16>> = (0..8u16)
        .map(|seed| (0..seed + 1).map(|i| seed * 100 + i).collect())
        .collect();

    let decoded: Vec<Vec<u16>> = thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|values| {
                let pipeline = &pipeline;
                scope.spawn(move || {
                    let mut samples = Samples::default();
                    pipeline.decode(&encode(values), &mut samples).unwrap();
                    samples.values
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(decoded, inputs);
}
