use rand::{rngs::StdRng, RngCore, SeedableRng};

use verglas::ciphersuite::Secp256k1;
use verglas::generic_ec::{curves, NonZero, Point};
use verglas::session::CommitmentRecord;
use verglas::{PointEncoding, PublicCommitments, SessionConfig, SigningSession};
use verglas_tests::{aggregate, deal, register, verify, DealtKeys};

type Curve = curves::Secp256k1;

const IDS: [u8; 3] = [1, 2, 3];

fn sessions(
    rng: &mut rand_dev::DevRng,
    encoding: PointEncoding,
) -> (NonZero<Point<Curve>>, Vec<SigningSession<Secp256k1>>) {
    let DealtKeys {
        group_public_key,
        shares,
    } = deal::<Curve>(rng, &IDS, 2);

    let sessions = shares
        .into_iter()
        .map(|(id, share)| {
            let config = SessionConfig::new(id, 2, 3).with_encoding(encoding);
            SigningSession::<Secp256k1>::new(config, share, group_public_key).unwrap()
        })
        .collect();
    (group_public_key, sessions)
}

fn records(commitments: &[PublicCommitments<Curve>]) -> Vec<CommitmentRecord<Curve>> {
    IDS.iter()
        .zip(commitments)
        .map(|(&identifier, comm)| CommitmentRecord {
            identifier,
            hiding: comm.hiding,
            binding: comm.binding,
        })
        .collect()
}

fn full_round(encoding: PointEncoding) {
    let mut rng = rand_dev::DevRng::new();
    let (pk, mut sessions) = sessions(&mut rng, encoding);

    let commitments = sessions
        .iter_mut()
        .map(|session| session.commit(&mut rng))
        .collect::<Vec<_>>();

    for session in &mut sessions {
        for (&id, comm) in IDS.iter().zip(&commitments) {
            register(session, id, comm).unwrap();
        }
    }

    let mut message = vec![0u8; 47];
    rng.fill_bytes(&mut message);

    let shares = sessions
        .iter_mut()
        .map(|session| session.sign(&message).unwrap())
        .collect::<Vec<_>>();
    for share in &shares {
        assert_eq!(share.to_be_bytes().len(), 32);
    }

    let sig = aggregate::<Secp256k1>(&pk, &records(&commitments), &shares, &message);
    verify::<Secp256k1>(&sig, &pk, &message).expect("invalid signature");
}

#[test]
fn full_round_compressed() {
    full_round(PointEncoding::Compressed);
}

#[test]
fn full_round_uncompressed() {
    full_round(PointEncoding::Uncompressed);
}

#[test]
fn threshold_subset_signs() {
    let mut rng = rand_dev::DevRng::new();
    let (pk, mut sessions) = sessions(&mut rng, PointEncoding::Compressed);

    // Only signers 1 and 3 take part in this round
    let mut s3 = sessions.pop().unwrap();
    let mut s1 = sessions.swap_remove(0);

    let c1 = s1.commit(&mut rng);
    let c3 = s3.commit(&mut rng);

    for session in [&mut s1, &mut s3] {
        register(session, 1, &c1).unwrap();
        register(session, 3, &c3).unwrap();
    }

    let message = b"subset of signers";
    let shares = [s1.sign(message).unwrap(), s3.sign(message).unwrap()];

    let records = [
        CommitmentRecord {
            identifier: 1,
            hiding: c1.hiding,
            binding: c1.binding,
        },
        CommitmentRecord {
            identifier: 3,
            hiding: c3.hiding,
            binding: c3.binding,
        },
    ];
    let sig = aggregate::<Secp256k1>(&pk, &records, &shares, message);
    verify::<Secp256k1>(&sig, &pk, message).expect("invalid signature");
}

#[test]
fn third_party_tampering_is_caught_at_aggregation() {
    let mut rng = rand_dev::DevRng::new();
    let (pk, mut sessions) = sessions(&mut rng, PointEncoding::Compressed);

    let commitments = sessions
        .iter_mut()
        .map(|session| session.commit(&mut rng))
        .collect::<Vec<_>>();

    // Signer 2 receives an altered hiding commitment for signer 1. Registration
    // cannot catch this (signer 1 is not self), so the round proceeds; only the
    // aggregated signature reveals the tampering.
    let mut tampered = commitments.clone();
    let altered = tampered[0].binding;
    tampered[0].hiding = altered;

    for (i, session) in sessions.iter_mut().enumerate() {
        let view = if i == 1 { &tampered } else { &commitments };
        for (&id, comm) in IDS.iter().zip(view) {
            register(session, id, comm).unwrap();
        }
    }

    let message = b"tampered round";
    let shares = sessions
        .iter_mut()
        .map(|session| session.sign(message).unwrap())
        .collect::<Vec<_>>();

    let sig = aggregate::<Secp256k1>(&pk, &records(&commitments), &shares, message);
    assert!(verify::<Secp256k1>(&sig, &pk, message).is_err());
}

#[test]
fn replayed_randomness_reproduces_the_share() {
    let mut rng = rand_dev::DevRng::new();
    let keys = deal::<Curve>(&mut rng, &IDS, 2);

    let run = |seed: u64, encoding: PointEncoding| -> Vec<Vec<u8>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut sessions = keys
            .shares
            .iter()
            .map(|(id, share)| {
                let config = SessionConfig::new(*id, 2, 3).with_encoding(encoding);
                SigningSession::<Secp256k1>::new(config, share.clone(), keys.group_public_key)
                    .unwrap()
            })
            .collect::<Vec<_>>();

        let commitments = sessions
            .iter_mut()
            .map(|session| session.commit(&mut rng))
            .collect::<Vec<_>>();
        for session in &mut sessions {
            for (&id, comm) in IDS.iter().zip(&commitments) {
                register(session, id, comm).unwrap();
            }
        }
        sessions
            .iter_mut()
            .map(|session| session.sign(b"replay me").unwrap().to_be_bytes().to_vec())
            .collect()
    };

    // Identical randomness, identical inputs => identical shares
    assert_eq!(
        run(7, PointEncoding::Compressed),
        run(7, PointEncoding::Compressed)
    );
    // Binding factors canonicalize points before hashing, so the share doesn't
    // depend on the wire encoding either
    assert_eq!(
        run(7, PointEncoding::Compressed),
        run(7, PointEncoding::Uncompressed)
    );
    // ...but it does depend on the randomness
    assert_ne!(
        run(7, PointEncoding::Compressed),
        run(8, PointEncoding::Compressed)
    );
}
