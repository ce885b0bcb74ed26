// ABOUTME: Translation of gcloud CLI failures into provider errors.
// ABOUTME: Recovers an HTTP-style status code from stderr when one can be identified.

use crate::provider::ProviderError;

/// Markers after which gcloud prints the HTTP status of a failed request.
const CODE_MARKERS: &[&str] = &["HTTPError ", "code=", "\"code\": ", "code: "];

/// Phrases of well-known Compute API failures that gcloud reports without a
/// numeric status.
const KNOWN_PHRASES: &[(&str, u16)] = &[
    ("is not ready", 400),
    ("already exists", 409),
    ("was not found", 404),
];

/// Build a [`ProviderError`] from the stderr of a failed gcloud invocation.
///
/// The message is kept intact (minus the `ERROR: ` prefix) so downstream
/// classification can still match on it.
pub fn parse_error(stderr: &str) -> ProviderError {
    let message = stderr.trim();
    let message = message.strip_prefix("ERROR: ").unwrap_or(message).to_string();
    let code = explicit_code(&message).or_else(|| inferred_code(&message));
    ProviderError::new(code, message)
}

fn explicit_code(text: &str) -> Option<u16> {
    CODE_MARKERS.iter().find_map(|marker| {
        let start = text.find(marker)? + marker.len();
        let digits: String = text[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.len() == 3 {
            digits.parse().ok()
        } else {
            None
        }
    })
}

fn inferred_code(text: &str) -> Option<u16> {
    let lower = text.to_lowercase();
    KNOWN_PHRASES
        .iter()
        .find(|(phrase, _)| lower.contains(phrase))
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_http_status_wins() {
        let err = parse_error("ERROR: (gcloud.compute.networks.create) HTTPError 403: Forbidden");
        assert_eq!(err.code, Some(403));
        assert_eq!(
            err.message,
            "(gcloud.compute.networks.create) HTTPError 403: Forbidden"
        );
    }

    #[test]
    fn already_exists_maps_to_conflict() {
        let err = parse_error(
            "ERROR: (gcloud.compute.networks.create) Could not fetch resource:\n - The resource 'projects/p/global/networks/net-1' already exists\n",
        );
        assert_eq!(err.code, Some(409));
    }

    #[test]
    fn missing_resource_maps_to_not_found() {
        let err = parse_error(
            "ERROR: (gcloud.compute.networks.describe) Could not fetch resource:\n - The resource 'projects/p/global/networks/net-1' was not found\n",
        );
        assert_eq!(err.code, Some(404));
    }

    #[test]
    fn not_ready_maps_to_bad_request_and_keeps_message() {
        let err = parse_error(
            "ERROR: (gcloud.compute.networks.create) The resource 'projects/p' is not ready",
        );
        assert_eq!(err.code, Some(400));
        assert!(err.message.contains("is not ready"));
    }

    #[test]
    fn unknown_failure_has_no_code() {
        let err = parse_error("ERROR: (gcloud.compute.routes.list) something odd happened");
        assert_eq!(err.code, None);
    }

    #[test]
    fn stray_not_found_is_not_a_missing_resource() {
        let err = parse_error("ERROR: (gcloud.compute.networks.describe) config file not found");
        assert_eq!(err.code, None);
    }

    #[test]
    fn short_digit_runs_are_not_codes() {
        assert_eq!(explicit_code("code=12 nope"), None);
    }
}
