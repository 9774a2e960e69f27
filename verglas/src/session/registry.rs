use generic_ec::{Curve, Point};

use super::SessionError;

/// One co-signer's registered nonce commitments
///
/// Points are stored decoded; the wire bytes were validated against the session's
/// configured encoding at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitmentRecord<E: Curve> {
    /// Signer identifier (1-255)
    pub identifier: u8,
    /// Commitment to the hiding nonce
    pub hiding: Point<E>,
    /// Commitment to the binding nonce
    pub binding: Point<E>,
}

/// Ordered storage for one round's commitments
///
/// Records are append-only and strictly increasing by identifier; the capacity equals
/// the configured maximum number of participants.
pub(crate) struct CommitmentRegistry<E: Curve> {
    records: Vec<CommitmentRecord<E>>,
    capacity: usize,
}

impl<E: Curve> CommitmentRegistry<E> {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[CommitmentRecord<E>] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Checks whether a record with this identifier could be appended right now
    pub fn check_accepts(&self, identifier: u8) -> Result<(), SessionError> {
        if self.records.len() >= self.capacity {
            return Err(SessionError::TooManyCommitments);
        }
        if identifier == 0 {
            return Err(SessionError::InvalidIdentifier);
        }
        if let Some(last) = self.records.last() {
            if identifier <= last.identifier {
                return Err(SessionError::IdentifierOrdering);
            }
        }
        Ok(())
    }

    /// Appends a record and returns its position
    ///
    /// The caller must have run [`check_accepts`](Self::check_accepts) first.
    pub fn push(&mut self, record: CommitmentRecord<E>) -> usize {
        debug_assert!(self.check_accepts(record.identifier).is_ok());
        self.records.push(record);
        self.records.len() - 1
    }
}
