//! FROST Ciphersuite
//!
//! A ciphersuite fixes the curve and the domain-separated hash primitives used by the
//! signing session. Out of the box we provide [`Secp256k1`], matching the
//! `FROST(secp256k1, SHA-256)` suite of RFC 9591 (requires the
//! `ciphersuite-secp256k1` feature).

use generic_ec::{
    errors::{InvalidPoint, InvalidScalar},
    Curve, Point, Scalar, SecretScalar,
};

#[cfg(feature = "ciphersuite-secp256k1")]
mod secp256k1;

#[cfg(feature = "ciphersuite-secp256k1")]
pub use secp256k1::Secp256k1;

/// Ciphersuite determines an underlying curve and the set of cryptographic primitives
/// used in the protocol
///
/// For the details, refer to [Section 6] of RFC 9591.
///
/// [Section 6]: https://www.rfc-editor.org/rfc/rfc9591#name-ciphersuites
pub trait Ciphersuite: Sized + Clone + Copy + core::fmt::Debug {
    /// Name of the ciphersuite, also known as `contextString` in RFC 9591
    const NAME: &'static str;

    /// Underlying curve on which signatures will be produced
    type Curve: Curve;

    /// Digest that's used to feed data into [H4](Self::h4) and [H5](Self::h5) hash functions
    type Digest: digest::Update + digest::FixedOutput + Clone;

    /// `H1` hash function: binding-factor derivation
    ///
    /// Accepts a list of bytestrings that are concatenated before hashing.
    /// Returns `H1(data[0] || data[1] || ... || data[data.len() - 1])`.
    fn h1(msg: &[&[u8]]) -> Scalar<Self::Curve>;
    /// `H2` hash function: the Schnorr challenge
    ///
    /// Accepts a list of bytestrings that are concatenated before hashing.
    /// Returns `H2(data[0] || data[1] || ... || data[data.len() - 1])`.
    fn h2(msg: &[&[u8]]) -> Scalar<Self::Curve>;
    /// `H3` hash function: nonce derivation
    ///
    /// Accepts a list of bytestrings that are concatenated before hashing.
    /// Returns `H3(data[0] || data[1] || ... || data[data.len() - 1])`.
    fn h3(msg: &[&[u8]]) -> Scalar<Self::Curve>;

    /// `H4` hash function: message pre-hashing
    ///
    /// Returns a digest seeded with the `H4` domain tag; the caller feeds the message
    /// into it and finalizes.
    fn h4() -> Self::Digest;
    /// `H5` hash function: commitment-list hashing
    ///
    /// Returns a digest seeded with the `H5` domain tag; the caller feeds the encoded
    /// commitment list into it and finalizes.
    fn h5() -> Self::Digest;

    /// Byte array that contains bytes representation of the point
    type PointBytes: AsRef<[u8]>;
    /// Serializes a point in the canonical form used for hashing (compressed)
    ///
    /// Every hash input containing a point uses this encoding, regardless of the
    /// session's configured wire encoding.
    fn serialize_point(point: &Point<Self::Curve>) -> Self::PointBytes;
    /// Deserializes a point
    fn deserialize_point(bytes: &[u8]) -> Result<Point<Self::Curve>, InvalidPoint>;

    /// Byte array that contains bytes representation of the scalar
    type ScalarBytes: AsRef<[u8]>;
    /// Size of serialized scalar in bytes
    const SCALAR_SIZE: usize;
    /// Serializes a scalar as fixed-width big-endian bytes
    fn serialize_scalar(scalar: &Scalar<Self::Curve>) -> Self::ScalarBytes;
    /// Deserializes a scalar
    fn deserialize_scalar(bytes: &[u8]) -> Result<Scalar<Self::Curve>, InvalidScalar>;
    /// Deserializes a secret scalar
    fn deserialize_secret_scalar(bytes: &[u8]) -> Result<SecretScalar<Self::Curve>, InvalidScalar> {
        let mut scalar = Self::deserialize_scalar(bytes)?;
        Ok(SecretScalar::new(&mut scalar))
    }
}
