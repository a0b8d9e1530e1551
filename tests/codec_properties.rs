//! Property tests for the image/sample codec.

use imgwave::codec::{
    decode, denormalize, encode, map_sequential, normalize, ChunkedTransform, Header, HEADER_LEN,
};
use imgwave::Error;
use ndarray::Array3;
use proptest::prelude::*;

fn image_strategy(max_side: usize) -> impl Strategy<Value = Array3<u8>> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(h, w)| {
        proptest::collection::vec(any::<u8>(), h * w * 3)
            .prop_map(move |bytes| Array3::from_shape_vec((h, w, 3), bytes).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn roundtrip_reconstructs_every_channel(image in image_strategy(64)) {
        let stream = encode(&image);
        prop_assert_eq!(stream.len(), HEADER_LEN + image.len());
        prop_assert!(stream[HEADER_LEN..].iter().all(|s| (-1.0..=1.0).contains(s)));

        let decoded = decode(&stream).unwrap();
        prop_assert_eq!(decoded.dim(), image.dim());
        for (a, b) in decoded.iter().zip(image.iter()) {
            prop_assert!(a.abs_diff(*b) <= 1);
        }
    }

    #[test]
    fn header_samples_roundtrip(height in 0usize..=10_000, width in 0usize..=10_000) {
        let header = Header::checked(height, width).unwrap();
        prop_assert_eq!(Header::parse(&header.to_samples()).unwrap(), header);
    }

    #[test]
    fn header_fidelity_through_decode(long in 0usize..=10_000, short in 0usize..=2, tall in any::<bool>()) {
        let (h, w) = if tall { (long, short) } else { (short, long) };
        let image = Array3::<u8>::from_elem((h, w, 3), 200);

        let decoded = decode(&encode(&image)).unwrap();
        prop_assert_eq!(decoded.dim(), (h, w, 3));
    }

    #[test]
    fn chunked_equals_sequential(
        payload in proptest::collection::vec(-1.0f32..=1.0, 0..2048),
        workers in 1usize..=8,
    ) {
        let transform = ChunkedTransform::new(workers).unwrap();
        let mut expected = vec![0u8; payload.len()];
        map_sequential(&payload, &mut expected, denormalize).unwrap();

        prop_assert_eq!(transform.run(&payload, denormalize).unwrap(), expected);
    }

    #[test]
    fn wrong_payload_length_is_rejected(h in 1usize..=8, w in 1usize..=8, extra in 1usize..=5, longer in any::<bool>()) {
        let image = Array3::<u8>::zeros((h, w, 3));
        let mut stream = encode(&image);
        let expected = h * w * 3;
        let actual = if longer {
            stream.extend(std::iter::repeat(0.0).take(extra));
            expected + extra
        } else {
            let extra = extra.min(expected);
            stream.truncate(stream.len() - extra);
            expected - extra
        };

        match decode(&stream) {
            Err(Error::LengthMismatch { expected: e, actual: a }) => {
                prop_assert_eq!(e, expected);
                prop_assert_eq!(a, actual);
            }
            other => prop_assert!(false, "unexpected result: {:?}", other),
        }
    }
}

#[test]
fn normalization_pair_is_exact_for_every_byte() {
    for byte in 0..=u8::MAX {
        assert_eq!(denormalize(normalize(byte)).unwrap(), byte);
    }
}

#[test]
fn chunk_order_invariance_grid() {
    for workers in [1, 2, 3, 5, 8] {
        let transform = ChunkedTransform::new(workers).unwrap();
        for len in [0usize, 1, 7, 1000, 1001] {
            #[allow(clippy::cast_precision_loss)]
            let payload: Vec<f32> = (0..len)
                .map(|i| ((i * 37) % 511) as f32 / 255.0 - 1.0)
                .collect();
            let mut expected = vec![0u8; len];
            map_sequential(&payload, &mut expected, denormalize).unwrap();

            let got = transform.run(&payload, denormalize).unwrap();
            assert_eq!(got, expected, "workers {workers} len {len}");
        }
    }
}

#[test]
fn black_two_by_two_scenario() {
    let image = Array3::<u8>::zeros((2, 2, 3));
    let stream = encode(&image);
    assert_eq!(
        stream,
        vec![2.0, 2.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0]
    );

    let decoded = decode(&stream).unwrap();
    assert_eq!(decoded.dim(), (2, 2, 3));
    assert!(decoded.iter().all(|&b| b == 0));
}

#[test]
fn three_by_three_missing_sample_scenario() {
    let mut stream = vec![3.0, 3.0];
    stream.extend(std::iter::repeat(0.0).take(26));

    assert!(matches!(
        decode(&stream),
        Err(Error::LengthMismatch {
            expected: 27,
            actual: 26
        })
    ));
}
