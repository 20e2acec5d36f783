//! Typed workflow outcome.

/// Result of a workflow call that completed without a storage error.
///
/// `Failure` carries an expected, enumerable business outcome (a conflict, a
/// missing record). Unexpected storage errors never appear here; workflows
/// return those through the outer `Result`.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, F> {
    Success(T),
    Failure(F),
}

impl<T, F> Outcome<T, F> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(self) -> Option<F> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<T, F> {
        self.into()
    }
}

impl<T, F> From<Outcome<T, F>> for Result<T, F> {
    fn from(outcome: Outcome<T, F>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        let ok: Outcome<i32, &str> = Outcome::Success(1);
        assert_eq!(ok.into_result(), Ok(1));

        let failed: Outcome<i32, &str> = Outcome::Failure("nope");
        assert!(failed.is_failure());
        assert_eq!(failed.into_result(), Err("nope"));
    }
}
