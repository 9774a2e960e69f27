use generic_ec::{Curve, Point, SecretScalar};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::ciphersuite::Ciphersuite;

use super::PointEncoding;

/// This participant's public nonce commitments for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound = "")
)]
pub struct PublicCommitments<E: Curve> {
    /// Commitment to the hiding nonce
    pub hiding: Point<E>,
    /// Commitment to the binding nonce
    pub binding: Point<E>,
}

impl<E: Curve> PublicCommitments<E> {
    /// Encodes the commitments as hiding || binding in the given wire encoding
    ///
    /// Output length is twice the point size: 66 bytes for compressed secp256k1-class
    /// curves, 130 for uncompressed.
    pub fn to_bytes(&self, encoding: PointEncoding) -> Vec<u8> {
        let compressed = encoding.is_compressed();
        let hiding = self.hiding.to_bytes(compressed);
        let binding = self.binding.to_bytes(compressed);
        let mut bytes = Vec::with_capacity(hiding.len() + binding.len());
        bytes.extend_from_slice(&hiding);
        bytes.extend_from_slice(&binding);
        bytes
    }
}

/// Secret nonces of one round, together with the cached public commitments
///
/// Lives only between a successful `commit` and the end of the corresponding `sign`;
/// the secret scalars are zeroized on drop.
pub(crate) struct RoundNonces<E: Curve> {
    pub hiding_nonce: SecretScalar<E>,
    pub binding_nonce: SecretScalar<E>,
    pub commitments: PublicCommitments<E>,
}

/// Nonce generation as defined in [Section 4.1] of RFC 9591
///
/// Binding the secret share into the derivation is defense-in-depth against a weak
/// randomness source: predicting the nonce requires knowing the share as well.
///
/// [Section 4.1]: https://www.rfc-editor.org/rfc/rfc9591#name-nonce-generation
pub(crate) fn generate_nonce<C: Ciphersuite>(
    rng: &mut (impl RngCore + CryptoRng),
    secret_share: &SecretScalar<C::Curve>,
) -> SecretScalar<C::Curve> {
    let mut random_bytes = Zeroizing::new([0u8; 32]);
    rng.fill_bytes(&mut *random_bytes);

    let share_bytes = Zeroizing::new(
        C::serialize_scalar(secret_share.as_ref())
            .as_ref()
            .to_vec(),
    );

    let mut nonce = C::h3(&[&random_bytes[..], share_bytes.as_slice()]);
    SecretScalar::new(&mut nonce)
}
