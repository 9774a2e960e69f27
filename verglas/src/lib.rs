//! Signing-participant core for [FROST] threshold Schnorr signatures
//!
//! FROST is a two-round threshold signature scheme in which `t`-of-`n` participants
//! jointly produce a single Schnorr signature without ever reconstructing the shared
//! secret key. This crate implements exactly one role of that protocol: a single
//! participant's signing session. It covers
//!
//! * nonce commitment generation ([`SigningSession::commit`]),
//! * collection and validation of co-signers' commitments
//!   ([`SigningSession::register_commitment`]),
//! * computation of this participant's signature share ([`SigningSession::sign`]).
//!
//! Everything else is an external collaborator: key generation/DKG, the transport and
//! command layer driving the session, and the coordinator that aggregates signature
//! shares and verifies the result. Curve and modular arithmetic come from
//! [`generic_ec`]; hashing primitives are fixed by a [`Ciphersuite`].
//!
//! The session is deliberately strict: commitments must arrive pre-sorted by
//! ascending identifier, any validation failure discards the round, and the secret
//! nonces of a round can be spent at most once.
//!
//! ```rust,no_run
//! use verglas::{SessionConfig, SigningSession};
//! use verglas::ciphersuite::Secp256k1;
//! use verglas::generic_ec::{curves, NonZero, Point, SecretScalar};
//! # fn provisioned() -> (NonZero<SecretScalar<curves::Secp256k1>>, NonZero<Point<curves::Secp256k1>>) { unimplemented!() }
//! # fn incoming() -> Vec<(u8, Vec<u8>, Vec<u8>)> { unimplemented!() }
//!
//! // Key material is provisioned out of band, before the session exists
//! let (secret_share, group_public_key) = provisioned();
//!
//! let config = SessionConfig::new(2, 2, 3);
//! let mut session =
//!     SigningSession::<Secp256k1>::new(config, secret_share, group_public_key)?;
//!
//! let commitments = session.commit(&mut rand_core::OsRng);
//! // broadcast `commitments.to_bytes(session.config().encoding)` …
//!
//! for (identifier, hiding, binding) in incoming() {
//!     session.register_commitment(identifier, &hiding, &binding)?;
//! }
//! let share = session.sign(b"message to sign")?;
//! # Ok::<_, verglas::SessionError>(())
//! ```
//!
//! [FROST]: https://www.rfc-editor.org/rfc/rfc9591

#![forbid(unsafe_code, unused_crate_dependencies)]
#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
#![deny(missing_docs)]

pub use generic_ec;

pub mod ciphersuite;
pub mod session;

pub use self::{
    ciphersuite::Ciphersuite,
    session::{
        Lagrange, PointEncoding, PublicCommitments, SessionConfig, SessionError, SigShare,
        SigningSession,
    },
};
