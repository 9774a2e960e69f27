use generic_ec::{Curve, NonZero, Scalar};

use super::{InternalBug, SessionError};

/// Strategy for computing this participant's Lagrange interpolation coefficient
///
/// Both strategies evaluate, over the scalar field and at `x = 0`,
/// $\lambda_i = \prod_{j \neq i} x_j / (x_j - x_i)$,
/// where `x_j` are the identifiers of all registered commitments. They produce
/// bit-identical results for every valid input; the optimized one exists purely for
/// performance on constrained hardware, where native integer multiplication is far
/// cheaper than modular big-integer multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lagrange {
    /// Accumulates numerator and denominator in the scalar field, one modular
    /// multiplication per identifier; works for any participant count
    General,
    /// Accumulates numerator and denominator as native integers and reduces into the
    /// scalar field once at the end; requires a cohort of at most
    /// [`OPTIMIZED_MAX_PARTICIPANTS`](Self::OPTIMIZED_MAX_PARTICIPANTS)
    Optimized,
}

impl Lagrange {
    /// Largest cohort the [`Optimized`](Self::Optimized) strategy accepts
    pub const OPTIMIZED_MAX_PARTICIPANTS: u8 = 12;

    /// Selects the strategy fitting a registry capacity
    pub fn for_capacity(max_participants: u8) -> Self {
        if max_participants <= Self::OPTIMIZED_MAX_PARTICIPANTS {
            Lagrange::Optimized
        } else {
            Lagrange::General
        }
    }

    pub(crate) fn ensure_capacity(self, max_participants: u8) -> Result<(), SessionError> {
        match self {
            Lagrange::Optimized if max_participants > Self::OPTIMIZED_MAX_PARTICIPANTS => {
                Err(SessionError::TooManyParticipants)
            }
            _ => Ok(()),
        }
    }

    /// Computes the coefficient for the identifier at `self_index`
    ///
    /// `identifiers` must be non-zero and strictly ascending (the registry
    /// invariant); a debug assertion enforces this.
    pub fn coefficient<E: Curve>(
        self,
        identifiers: &[u8],
        self_index: usize,
    ) -> Result<Scalar<E>, SessionError> {
        debug_assert!(
            identifiers.windows(2).all(|win| win[0] < win[1]),
            "identifiers must be strictly ascending"
        );
        match self {
            Lagrange::General => general(identifiers, self_index),
            Lagrange::Optimized => optimized(identifiers, self_index),
        }
    }
}

fn general<E: Curve>(identifiers: &[u8], self_index: usize) -> Result<Scalar<E>, SessionError> {
    let self_id = identifiers
        .get(self_index)
        .copied()
        .ok_or(SessionError::Bug(InternalBug::SelfIndexOutOfRange))?;
    let x_i = Scalar::<E>::from(u16::from(self_id));

    let mut num = Scalar::<E>::one();
    let mut denom = NonZero::<Scalar<E>>::one();
    for (j, &id) in identifiers.iter().enumerate() {
        if j == self_index {
            continue;
        }
        let x_j = Scalar::<E>::from(u16::from(id));
        num *= x_j;
        let difference = NonZero::from_scalar(x_j - x_i)
            .ok_or(SessionError::Bug(InternalBug::ZeroDenominator))?;
        denom = denom * difference;
    }

    Ok(num * denom.invert())
}

fn optimized<E: Curve>(identifiers: &[u8], self_index: usize) -> Result<Scalar<E>, SessionError> {
    if identifiers.len() > usize::from(Lagrange::OPTIMIZED_MAX_PARTICIPANTS) {
        return Err(SessionError::TooManyParticipants);
    }
    let self_id = identifiers
        .get(self_index)
        .copied()
        .ok_or(SessionError::Bug(InternalBug::SelfIndexOutOfRange))?;
    let x_i = i128::from(self_id);

    // At most 11 factors of magnitude <= 255 each: the accumulators are bounded by
    // 255^11 < 2^88 and cannot overflow.
    let mut num: i128 = 1;
    let mut denom: i128 = 1;
    for (j, &id) in identifiers.iter().enumerate() {
        if j == self_index {
            continue;
        }
        num *= i128::from(id);
        denom *= i128::from(id) - x_i;
    }

    let num = scalar_from_u128::<E>(num.unsigned_abs());
    let denom = if denom < 0 {
        -scalar_from_u128::<E>(denom.unsigned_abs())
    } else {
        scalar_from_u128::<E>(denom.unsigned_abs())
    };
    let denom =
        NonZero::from_scalar(denom).ok_or(SessionError::Bug(InternalBug::ZeroDenominator))?;

    Ok(num * denom.invert())
}

fn scalar_from_u128<E: Curve>(value: u128) -> Scalar<E> {
    Scalar::from_be_bytes_mod_order(value.to_be_bytes())
}
