// ABOUTME: Decision table mapping provider errors to retry, ignore or abort.
// ABOUTME: Pure function of the mutation kind and the provider's (code, message).

use std::time::Duration;

use crate::provider::ProviderError;

/// Message fragment the provider uses when a parent resource is still settling.
const NOT_READY: &str = "is not ready";

/// Which kind of mutation produced the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Destroy,
}

/// What the loop should do about a failed provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Transient; wait, then restart the loop. No retry limit.
    Retry { after: Duration },
    /// The resource is already where the mutation wanted it; re-poll.
    Ignore,
    /// Unknown failure; abort the call.
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorClassifier {
    not_ready_backoff: Duration,
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl ErrorClassifier {
    pub fn new(not_ready_backoff: Duration) -> Self {
        Self { not_ready_backoff }
    }

    pub fn classify(&self, mutation: Mutation, error: &ProviderError) -> Disposition {
        match (mutation, error.code) {
            (Mutation::Create, Some(400)) if error.message.contains(NOT_READY) => {
                Disposition::Retry {
                    after: self.not_ready_backoff,
                }
            }
            (Mutation::Create, Some(409)) => Disposition::Ignore,
            (Mutation::Destroy, Some(404)) => Disposition::Ignore,
            _ => Disposition::Fatal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classify(mutation: Mutation, code: Option<u16>, message: &str) -> Disposition {
        ErrorClassifier::default().classify(mutation, &ProviderError::new(code, message))
    }

    #[test]
    fn create_not_ready_is_retried_after_backoff() {
        assert_eq!(
            classify(
                Mutation::Create,
                Some(400),
                "The resource 'projects/p/global/networks/parent' is not ready"
            ),
            Disposition::Retry {
                after: Duration::from_secs(5)
            }
        );
    }

    #[test]
    fn create_bad_request_without_not_ready_is_fatal() {
        assert_eq!(
            classify(Mutation::Create, Some(400), "Invalid value for field"),
            Disposition::Fatal
        );
    }

    #[test]
    fn create_conflict_is_ignored() {
        assert_eq!(
            classify(Mutation::Create, Some(409), "already exists"),
            Disposition::Ignore
        );
    }

    #[test]
    fn destroy_not_found_is_ignored() {
        assert_eq!(
            classify(Mutation::Destroy, Some(404), "was not found"),
            Disposition::Ignore
        );
    }

    #[test]
    fn missing_code_is_fatal_for_both_mutations() {
        assert_eq!(
            classify(Mutation::Create, None, "is not ready"),
            Disposition::Fatal
        );
        assert_eq!(classify(Mutation::Destroy, None, "gone"), Disposition::Fatal);
    }

    #[test]
    fn codes_do_not_cross_mutations() {
        assert_eq!(
            classify(Mutation::Destroy, Some(409), "conflict"),
            Disposition::Fatal
        );
        assert_eq!(
            classify(Mutation::Create, Some(404), "not found"),
            Disposition::Fatal
        );
    }

    #[test]
    fn backoff_is_configurable() {
        let classifier = ErrorClassifier::new(Duration::from_millis(250));
        let err = ProviderError::with_code(400, "parent is not ready");
        assert_eq!(
            classifier.classify(Mutation::Create, &err),
            Disposition::Retry {
                after: Duration::from_millis(250)
            }
        );
    }

    proptest! {
        #[test]
        fn any_not_ready_message_is_retryable(prefix in ".*", suffix in ".*") {
            let message = format!("{prefix}is not ready{suffix}");
            let disposition = classify(Mutation::Create, Some(400), &message);
            prop_assert!(matches!(disposition, Disposition::Retry { .. }), "expected retry");
        }

        #[test]
        fn conflict_on_create_is_never_fatal(message in ".*") {
            prop_assert_eq!(classify(Mutation::Create, Some(409), &message), Disposition::Ignore);
        }

        #[test]
        fn destroy_is_fatal_unless_not_found(code in proptest::option::of(0u16..1000), message in ".*") {
            let expected = if code == Some(404) { Disposition::Ignore } else { Disposition::Fatal };
            prop_assert_eq!(classify(Mutation::Destroy, code, &message), expected);
        }

        #[test]
        fn create_never_retries_other_codes(code in 0u16..1000, message in ".*") {
            prop_assume!(code != 400);
            prop_assert!(!matches!(
                classify(Mutation::Create, Some(code), &message),
                Disposition::Retry { .. }
            ), "expected no retry");
        }
    }
}
