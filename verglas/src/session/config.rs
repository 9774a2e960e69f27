use super::{Lagrange, SessionError};

/// Wire encoding of elliptic-curve points
///
/// The whole session uses a single encoding: `commit` output and
/// `register_commitment` input must agree on it. Hash inputs always use the
/// compressed form, whatever the wire encoding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointEncoding {
    /// 33-byte SEC1 compressed encoding (tag `02`/`03`)
    Compressed,
    /// 65-byte SEC1 uncompressed encoding (tag `04`)
    Uncompressed,
}

impl PointEncoding {
    pub(crate) fn is_compressed(self) -> bool {
        matches!(self, PointEncoding::Compressed)
    }
}

/// Signing session configuration
///
/// All values are provisioned externally before the first round. The configuration is
/// an explicit value passed to [`SigningSession::new`](super::SigningSession::new);
/// nothing in this crate is process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// This participant's identifier (1-255)
    pub participant_id: u8,
    /// Minimum number of registered commitments required to sign
    pub min_participants: u8,
    /// Maximum number of commitments a round can hold; bounds the registry capacity
    pub max_participants: u8,
    /// Wire encoding of commitment points
    pub encoding: PointEncoding,
    /// Strategy for the Lagrange coefficient computation
    pub lagrange: Lagrange,
}

impl SessionConfig {
    /// Constructs a configuration with compressed points and the Lagrange strategy
    /// best fitting `max_participants`
    pub fn new(participant_id: u8, min_participants: u8, max_participants: u8) -> Self {
        Self {
            participant_id,
            min_participants,
            max_participants,
            encoding: PointEncoding::Compressed,
            lagrange: Lagrange::for_capacity(max_participants),
        }
    }

    /// Overrides the wire encoding of commitment points
    pub fn with_encoding(mut self, encoding: PointEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Overrides the Lagrange strategy
    ///
    /// [`SigningSession::new`](super::SigningSession::new) rejects the configuration
    /// with [`SessionError::TooManyParticipants`] if [`Lagrange::Optimized`] is
    /// chosen with `max_participants` above its safe bound.
    pub fn with_lagrange(mut self, lagrange: Lagrange) -> Self {
        self.lagrange = lagrange;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SessionError> {
        if self.participant_id == 0 {
            return Err(SessionError::InvalidIdentifier);
        }
        if self.min_participants < 2 || self.min_participants > self.max_participants {
            return Err(SessionError::InvalidThreshold);
        }
        self.lagrange.ensure_capacity(self.max_participants)
    }
}
