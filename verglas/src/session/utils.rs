//! Commitment-list operations
//!
//! Deterministic functions over the full (validated) commitment list, as described in
//! [Section 4.3-4.5] of RFC 9591. They consume only public data (the message, the
//! commitment list and the group public key) and are shared verbatim by the signing
//! participant and the aggregating coordinator; the latter is why they are exposed
//! publicly even though this crate implements only the participant role.
//!
//! [Section 4.3-4.5]: https://www.rfc-editor.org/rfc/rfc9591#name-list-operations

use digest::{FixedOutput, Update};
use generic_ec::{Curve, NonZero, Point, Scalar};

use crate::ciphersuite::Ciphersuite;

use super::registry::CommitmentRecord;

/// Feeds the encoded commitment list into the digest
///
/// Every record contributes its identifier as a fixed-width big-endian scalar
/// followed by both commitment points in canonical compressed form, whatever wire
/// encoding the session is configured with. This keeps the resulting digest (and
/// everything derived from it) independent of the point-encoding choice.
pub fn encode_group_commitment_list<C: Ciphersuite>(
    mut output: C::Digest,
    commitments: &[CommitmentRecord<C::Curve>],
) -> C::Digest {
    for record in commitments {
        let identifier = identifier_scalar::<C::Curve>(record.identifier);
        output.update(C::serialize_scalar(&identifier).as_ref());
        output.update(C::serialize_point(&record.hiding).as_ref());
        output.update(C::serialize_point(&record.binding).as_ref());
    }
    output
}

/// Computes one binding factor per registered commitment, in registry order
///
/// Each factor is `H1(pk || H4(msg) || H5(commitment list) || identifier)`: a
/// deterministic function of the full commitment set, the message and the group key,
/// never of any per-party secret. The commitment list must be sorted by ascending
/// identifier; a debug assertion enforces this.
pub fn compute_binding_factors<C: Ciphersuite>(
    group_public_key: &NonZero<Point<C::Curve>>,
    commitments: &[CommitmentRecord<C::Curve>],
    msg: &[u8],
) -> Vec<Scalar<C::Curve>> {
    debug_assert!(
        is_strictly_ascending(commitments),
        "commitments list must be sorted"
    );

    let pk_bytes = C::serialize_point(group_public_key);
    let msg_hash = C::h4().chain(msg).finalize_fixed();
    let commitment_list_hash =
        encode_group_commitment_list::<C>(C::h5(), commitments).finalize_fixed();

    commitments
        .iter()
        .map(|record| {
            C::h1(&[
                pk_bytes.as_ref(),
                &msg_hash,
                &commitment_list_hash,
                C::serialize_scalar(&identifier_scalar::<C::Curve>(record.identifier)).as_ref(),
            ])
        })
        .collect()
}

/// Aggregates the group commitment
/// `R = Σ (hiding_j + binding_factor_j · binding_j)` over the registered commitments
///
/// Commitments and binding factors must come in the same (registry) order.
pub fn compute_group_commitment<E: Curve>(
    commitments: &[CommitmentRecord<E>],
    binding_factors: &[Scalar<E>],
) -> Point<E> {
    debug_assert_eq!(commitments.len(), binding_factors.len());
    commitments
        .iter()
        .zip(binding_factors)
        .fold(Point::zero(), |acc, (record, factor)| {
            acc + record.hiding + record.binding * *factor
        })
}

fn identifier_scalar<E: Curve>(identifier: u8) -> Scalar<E> {
    Scalar::from(u16::from(identifier))
}

pub(crate) fn is_strictly_ascending<E: Curve>(commitments: &[CommitmentRecord<E>]) -> bool {
    commitments
        .windows(2)
        .all(|win| win[0].identifier < win[1].identifier)
}
