//! FROST Signing Session
//!
//! A [`SigningSession`] carries out one participant's side of the two-round FROST
//! signing protocol. We assume presence of a Coordinator: some entity (or consensus
//! between the signers) that picks the signing cohort, relays commitments and
//! aggregates signature shares. One round of the protocol looks like this:
//!
//! 1. The participant commits nonces via [`SigningSession::commit`]. \
//!    Inputs to this phase: a source of cryptographic randomness. The message to be
//!    signed doesn't need to be known at this point yet. The returned
//!    [`PublicCommitments`] are sent to the Coordinator; the secret nonces stay
//!    inside the session and never leave it.
//! 2. The Coordinator chooses the signing cohort and sends every cohort member the
//!    full commitment list, sorted by ascending signer identifier. The participant
//!    feeds each entry to [`SigningSession::register_commitment`] in that order.
//!    The entry carrying this participant's own identifier must be byte-identical
//!    to what `commit` produced, otherwise the round is rejected (a malicious
//!    Coordinator could otherwise substitute commitments).
//! 3. The participant signs the message via [`SigningSession::sign`] and sends the
//!    resulting [`SigShare`] to the Coordinator, which aggregates all shares into a
//!    regular Schnorr signature.
//!
//! Any validation failure discards the round: the registered commitments and the
//! self position are cleared, and the caller must restart from `commit`. The secret
//! nonces of a round are consumed by the first `sign` call; signing twice with the
//! same nonces would leak the secret share, so a second call fails with
//! [`SessionError::NoncesConsumed`].

use core::fmt;

use generic_ec::{NonZero, Point, Scalar, SecretScalar};
use rand_core::{CryptoRng, RngCore};

use crate::ciphersuite::Ciphersuite;

mod config;
mod lagrange;
mod nonces;
mod registry;
pub mod utils;

pub use self::{
    config::{PointEncoding, SessionConfig},
    lagrange::Lagrange,
    nonces::PublicCommitments,
    registry::CommitmentRecord,
};

use self::{nonces::RoundNonces, registry::CommitmentRegistry};

/// Partial signature
#[derive(Debug, Copy, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound = "")
)]
pub struct SigShare<E: generic_ec::Curve>(pub Scalar<E>);

impl<E: generic_ec::Curve> SigShare<E> {
    /// Encodes the share as a fixed-width big-endian scalar
    pub fn to_be_bytes(&self) -> generic_ec::EncodedScalar<E> {
        self.0.to_be_bytes()
    }
}

/// One participant's signing session
///
/// The session is created once with the externally provisioned key material and can
/// run many `commit` → `register_commitment`… → `sign` rounds. All round state
/// (registered commitments, self position, secret nonces) belongs exclusively to the
/// current round.
pub struct SigningSession<C: Ciphersuite> {
    config: SessionConfig,
    secret_share: NonZero<SecretScalar<C::Curve>>,
    group_public_key: NonZero<Point<C::Curve>>,
    registry: CommitmentRegistry<C::Curve>,
    self_index: Option<usize>,
    nonces: Option<RoundNonces<C::Curve>>,
}

impl<C: Ciphersuite> SigningSession<C> {
    /// Constructs a session from validated configuration and provisioned key material
    ///
    /// The secret share and group public key are expected to be already present on
    /// the device; generating or storing them is not this crate's concern.
    pub fn new(
        config: SessionConfig,
        secret_share: NonZero<SecretScalar<C::Curve>>,
        group_public_key: NonZero<Point<C::Curve>>,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            registry: CommitmentRegistry::new(usize::from(config.max_participants)),
            config,
            secret_share,
            group_public_key,
            self_index: None,
            nonces: None,
        })
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Starts a new round: generates fresh secret nonces and returns their public
    /// commitments
    ///
    /// Clears any previously registered commitments. The returned commitments are
    /// also cached internally so that the self entry of the incoming commitment list
    /// can be cross-checked in [`register_commitment`](Self::register_commitment).
    pub fn commit(&mut self, rng: &mut (impl RngCore + CryptoRng)) -> PublicCommitments<C::Curve> {
        let hiding_nonce = nonces::generate_nonce::<C>(rng, self.secret_share.as_ref());
        let binding_nonce = nonces::generate_nonce::<C>(rng, self.secret_share.as_ref());
        let commitments = PublicCommitments {
            hiding: Point::generator() * &hiding_nonce,
            binding: Point::generator() * &binding_nonce,
        };
        self.nonces = Some(RoundNonces {
            hiding_nonce,
            binding_nonce,
            commitments,
        });
        self.reset();
        commitments
    }

    /// Registers one co-signer's commitments (including this participant's own)
    ///
    /// `hiding` and `binding` are the wire encodings of the two commitment points, in
    /// the session's configured [`PointEncoding`]. Records must arrive sorted by
    /// strictly ascending identifier; this is a protocol precondition enforced here,
    /// not something the session sorts itself.
    ///
    /// On any error the round is discarded (registry and self position cleared).
    pub fn register_commitment(
        &mut self,
        identifier: u8,
        hiding: &[u8],
        binding: &[u8],
    ) -> Result<(), SessionError> {
        match self.try_register(identifier, hiding, binding) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.reset();
                Err(err)
            }
        }
    }

    fn try_register(
        &mut self,
        identifier: u8,
        hiding: &[u8],
        binding: &[u8],
    ) -> Result<(), SessionError> {
        self.registry.check_accepts(identifier)?;
        let hiding = decode_point::<C>(self.config.encoding, hiding)?;
        let binding = decode_point::<C>(self.config.encoding, binding)?;
        if identifier == self.config.participant_id {
            let nonces = self.nonces.as_ref().ok_or(SessionError::NoncesConsumed)?;
            if nonces.commitments.hiding != hiding || nonces.commitments.binding != binding {
                return Err(SessionError::CommitmentMismatch);
            }
        }
        let index = self.registry.push(CommitmentRecord {
            identifier,
            hiding,
            binding,
        });
        if identifier == self.config.participant_id {
            self.self_index = Some(index);
        }
        Ok(())
    }

    /// Issues this participant's signature share on the `msg`
    ///
    /// Requires at least `min_participants` registered commitments, among them this
    /// participant's own. Consumes the round's secret nonces: a subsequent `sign`
    /// fails with [`SessionError::NoncesConsumed`] until a new round is started via
    /// [`commit`](Self::commit).
    ///
    /// On any error the round is discarded (registry and self position cleared).
    pub fn sign(&mut self, msg: &[u8]) -> Result<SigShare<C::Curve>, SessionError> {
        match self.try_sign(msg) {
            Ok(share) => Ok(share),
            Err(err) => {
                self.reset();
                Err(err)
            }
        }
    }

    fn try_sign(&mut self, msg: &[u8]) -> Result<SigShare<C::Curve>, SessionError> {
        if self.registry.len() < usize::from(self.config.min_participants) {
            return Err(SessionError::NotEnoughCommitments);
        }
        let self_index = self.self_index.ok_or(SessionError::IdentifierNotIncluded)?;
        let nonces = self.nonces.take().ok_or(SessionError::NoncesConsumed)?;

        let records = self.registry.records();
        let binding_factors =
            utils::compute_binding_factors::<C>(&self.group_public_key, records, msg);
        let binding_factor = *binding_factors
            .get(self_index)
            .ok_or(SessionError::Bug(InternalBug::MissingBindingFactor))?;
        let group_commitment = utils::compute_group_commitment(records, &binding_factors);

        let identifiers = records
            .iter()
            .map(|record| record.identifier)
            .collect::<Vec<_>>();
        let lambda = self
            .config
            .lagrange
            .coefficient::<C::Curve>(&identifiers, self_index)?;

        let challenge = C::h2(&[
            C::serialize_point(&group_commitment).as_ref(),
            C::serialize_point(&self.group_public_key).as_ref(),
            msg,
        ]);

        Ok(SigShare(
            nonces.hiding_nonce
                + (nonces.binding_nonce * binding_factor)
                + (lambda * &self.secret_share * challenge),
        ))
    }

    /// Discards the current round's registered commitments and self position
    ///
    /// Secret nonces are left intact: a round that was merely interrupted while
    /// collecting commitments can be restarted by re-registering the same list.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.self_index = None;
    }
}

/// Decodes a point, rejecting bytes that are not in the session's configured encoding
///
/// Mixing encodings between `commit` output and `register_commitment` input is an
/// error, not undefined behavior: a SEC1 tag belonging to the other mode fails with
/// [`SessionError::EncodingMismatch`] before any decoding is attempted.
fn decode_point<C: Ciphersuite>(
    encoding: PointEncoding,
    bytes: &[u8],
) -> Result<Point<C::Curve>, SessionError> {
    match (encoding, bytes.first()) {
        (PointEncoding::Compressed, Some(0x04)) => Err(SessionError::EncodingMismatch),
        (PointEncoding::Uncompressed, Some(0x02 | 0x03)) => Err(SessionError::EncodingMismatch),
        _ => C::deserialize_point(bytes).map_err(|_| SessionError::MalformedPoint),
    }
}

/// Signing session error
///
/// Every condition is fatal to the current round. Variants are stable and
/// `Eq`-comparable so that a transport layer can translate them into its own status
/// representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// Participant identifier is zero (identifiers are 1-255)
    InvalidIdentifier,
    /// Configured thresholds are inconsistent (`2 <= min <= max` must hold)
    InvalidThreshold,
    /// Optimized Lagrange strategy configured with a capacity above its safe bound
    TooManyParticipants,
    /// Commitment registry is already at configured capacity
    TooManyCommitments,
    /// Incoming identifier is not strictly greater than the previously registered one
    IdentifierOrdering,
    /// Own commitment entry doesn't match the points generated at the last commit
    CommitmentMismatch,
    /// Fewer registered commitments than the minimum threshold
    NotEnoughCommitments,
    /// Own identifier never appeared among the registered commitments
    IdentifierNotIncluded,
    /// Point bytes are not in the session's configured encoding
    EncodingMismatch,
    /// Point bytes do not decode to a valid curve point
    MalformedPoint,
    /// Secret nonces were already spent, or no round was started
    NoncesConsumed,
    /// Internal invariant violated
    Bug(InternalBug),
}

/// Error indicating a bug in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InternalBug {
    /// Self position points outside the list of registered identifiers
    SelfIndexOutOfRange,
    /// Interpolation denominator turned out to be zero
    ZeroDenominator,
    /// Binding factor missing for own commitment
    MissingBindingFactor,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidIdentifier => f.write_str("identifier must be in range 1-255"),
            SessionError::InvalidThreshold => {
                f.write_str("thresholds must satisfy 2 <= min_participants <= max_participants")
            }
            SessionError::TooManyParticipants => write!(
                f,
                "optimized lagrange strategy supports at most {} participants",
                Lagrange::OPTIMIZED_MAX_PARTICIPANTS
            ),
            SessionError::TooManyCommitments => {
                f.write_str("commitment registry is already at capacity")
            }
            SessionError::IdentifierOrdering => f.write_str(
                "commitments must be registered in strictly \
                ascending identifier order",
            ),
            SessionError::CommitmentMismatch => f.write_str(
                "own commitment entry doesn't match the nonce \
                commitments generated at the last commit",
            ),
            SessionError::NotEnoughCommitments => {
                f.write_str("not enough commitments registered to sign")
            }
            SessionError::IdentifierNotIncluded => {
                f.write_str("own identifier is not included in the registered commitments")
            }
            SessionError::EncodingMismatch => {
                f.write_str("point is not in the session's configured encoding")
            }
            SessionError::MalformedPoint => f.write_str("point bytes are malformed"),
            SessionError::NoncesConsumed => {
                f.write_str("secret nonces were already spent; start a new round")
            }
            SessionError::Bug(_) => f.write_str("bug occurred"),
        }
    }
}

impl fmt::Display for InternalBug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalBug::SelfIndexOutOfRange => f.write_str("self index out of range"),
            InternalBug::ZeroDenominator => f.write_str("zero interpolation denominator"),
            InternalBug::MissingBindingFactor => f.write_str("missing own binding factor"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Bug(bug) => Some(bug),
            _ => None,
        }
    }
}

impl std::error::Error for InternalBug {}
