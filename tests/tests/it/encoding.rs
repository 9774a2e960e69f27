use hex_literal::hex;

use verglas::ciphersuite::Secp256k1;
use verglas::generic_ec::{curves, Point, Scalar};
use verglas::{PointEncoding, SessionConfig, SessionError, SigningSession};
use verglas_tests::{deal, DealtKeys};

type Curve = curves::Secp256k1;

const IDS: [u8; 3] = [1, 2, 3];

fn two_sessions(encoding: PointEncoding) -> (SigningSession<Secp256k1>, SigningSession<Secp256k1>) {
    let mut rng = rand_dev::DevRng::new();
    let DealtKeys {
        group_public_key,
        shares,
    } = deal::<Curve>(&mut rng, &IDS, 2);

    let mut sessions = shares.into_iter().map(|(id, share)| {
        let config = SessionConfig::new(id, 2, 3).with_encoding(encoding);
        SigningSession::<Secp256k1>::new(config, share, group_public_key).unwrap()
    });
    let s1 = sessions.next().unwrap();
    let s2 = sessions.next().unwrap();
    (s1, s2)
}

#[test]
fn commit_output_is_two_points_wide() {
    let mut rng = rand_dev::DevRng::new();

    let (mut s1, _) = two_sessions(PointEncoding::Compressed);
    let bytes = s1.commit(&mut rng).to_bytes(PointEncoding::Compressed);
    assert_eq!(bytes.len(), 66);
    assert!(matches!(bytes[0], 0x02 | 0x03));
    assert!(matches!(bytes[33], 0x02 | 0x03));

    let (mut s1, _) = two_sessions(PointEncoding::Uncompressed);
    let bytes = s1.commit(&mut rng).to_bytes(PointEncoding::Uncompressed);
    assert_eq!(bytes.len(), 130);
    assert_eq!(bytes[0], 0x04);
    assert_eq!(bytes[65], 0x04);
}

#[test]
fn compressed_generator_encoding_is_canonical() {
    let generator = Point::<Curve>::generator() * Scalar::<Curve>::one();
    let expected = hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
    assert_eq!(generator.to_bytes(true).as_bytes(), expected.as_slice());
}

#[test]
fn canonicalization_roundtrips() {
    let mut rng = rand_dev::DevRng::new();

    for _ in 0..16 {
        let point = Point::<Curve>::generator() * Scalar::<Curve>::random(&mut rng);

        let uncompressed = point.to_bytes(false);
        assert_eq!(uncompressed.len(), 65);
        assert_eq!(Point::<Curve>::from_bytes(&uncompressed).unwrap(), point);

        // Re-encoding to the canonical compressed form and back must not lose anything
        let compressed = point.to_bytes(true);
        assert_eq!(compressed.len(), 33);
        assert_eq!(Point::<Curve>::from_bytes(&compressed).unwrap(), point);
    }
}

#[test]
fn rejects_uncompressed_points_in_compressed_session() {
    let mut rng = rand_dev::DevRng::new();
    let (mut s1, mut s2) = two_sessions(PointEncoding::Compressed);
    s2.commit(&mut rng);

    let bytes = s1.commit(&mut rng).to_bytes(PointEncoding::Uncompressed);
    assert_eq!(
        s2.register_commitment(1, &bytes[..65], &bytes[65..])
            .unwrap_err(),
        SessionError::EncodingMismatch
    );
}

#[test]
fn rejects_compressed_points_in_uncompressed_session() {
    let mut rng = rand_dev::DevRng::new();
    let (mut s1, mut s2) = two_sessions(PointEncoding::Uncompressed);
    s2.commit(&mut rng);

    let bytes = s1.commit(&mut rng).to_bytes(PointEncoding::Compressed);
    assert_eq!(
        s2.register_commitment(1, &bytes[..33], &bytes[33..])
            .unwrap_err(),
        SessionError::EncodingMismatch
    );
}

#[test]
fn rejects_malformed_points() {
    let mut rng = rand_dev::DevRng::new();
    let (_, mut s2) = two_sessions(PointEncoding::Compressed);
    s2.commit(&mut rng);

    // Truncated point
    assert_eq!(
        s2.register_commitment(1, &[0x02, 0xff, 0xff], &[0x02, 0xff, 0xff])
            .unwrap_err(),
        SessionError::MalformedPoint
    );
    // Empty point
    assert_eq!(
        s2.register_commitment(1, &[], &[]).unwrap_err(),
        SessionError::MalformedPoint
    );
}
