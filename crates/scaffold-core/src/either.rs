//! Either result type
//!
//! A two-variant container holding either a failure or a success value.
//! Components report recoverable failures through it instead of panicking.

use serde::{Deserialize, Serialize};

/// Failure-or-success outcome of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Either<F, S> {
    /// Failed outcome carrying the failure payload
    Failure(F),

    /// Successful outcome carrying the success payload
    Success(S),
}

/// Construct a failed outcome.
pub fn failure<F, S>(value: F) -> Either<F, S> {
    Either::Failure(value)
}

/// Construct a successful outcome.
pub fn success<F, S>(value: S) -> Either<F, S> {
    Either::Success(value)
}

impl<F, S> Either<F, S> {
    /// Returns true if this is a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Either::Failure(_))
    }

    /// Returns true if this is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Either::Success(_))
    }

    /// Borrow whichever payload is populated.
    ///
    /// The returned variant tells the caller how to interpret the value.
    pub fn value(&self) -> Either<&F, &S> {
        match self {
            Either::Failure(f) => Either::Failure(f),
            Either::Success(s) => Either::Success(s),
        }
    }

    /// Failure payload, if failed
    pub fn failure_value(&self) -> Option<&F> {
        match self {
            Either::Failure(f) => Some(f),
            Either::Success(_) => None,
        }
    }

    /// Success payload, if succeeded
    pub fn success_value(&self) -> Option<&S> {
        match self {
            Either::Failure(_) => None,
            Either::Success(s) => Some(s),
        }
    }

    /// Consume into a standard `Result`, success on the `Ok` side.
    ///
    /// # Errors
    ///
    /// Returns the failure payload as `Err`.
    pub fn into_result(self) -> Result<S, F> {
        match self {
            Either::Failure(f) => Err(f),
            Either::Success(s) => Ok(s),
        }
    }

    /// Transform the success payload, leaving failures untouched
    pub fn map<T>(self, op: impl FnOnce(S) -> T) -> Either<F, T> {
        match self {
            Either::Failure(f) => Either::Failure(f),
            Either::Success(s) => Either::Success(op(s)),
        }
    }

    /// Transform the failure payload, leaving successes untouched
    pub fn map_failure<E>(self, op: impl FnOnce(F) -> E) -> Either<E, S> {
        match self {
            Either::Failure(f) => Either::Failure(op(f)),
            Either::Success(s) => Either::Success(s),
        }
    }

    /// Chain another fallible step after a success
    pub fn and_then<T>(self, op: impl FnOnce(S) -> Either<F, T>) -> Either<F, T> {
        match self {
            Either::Failure(f) => Either::Failure(f),
            Either::Success(s) => op(s),
        }
    }
}

impl<F, S> From<Result<S, F>> for Either<F, S> {
    fn from(result: Result<S, F>) -> Self {
        match result {
            Ok(s) => Either::Success(s),
            Err(f) => Either::Failure(f),
        }
    }
}

impl<F, S> From<Either<F, S>> for Result<S, F> {
    fn from(either: Either<F, S>) -> Self {
        either.into_result()
    }
}
