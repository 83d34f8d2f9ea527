use std::collections::HashMap;

use serde::Serialize;

use crate::transport::DispatchOutcome;

/// Aggregate result of one send call.
///
/// Deliberately lossy: only the first disqualifying outcome's detail
/// survives. Callers cannot tell which request in a multi-request send
/// failed beyond that, and a transport-level failure carries no status or
/// headers at all.
#[derive(Debug, Clone, Serialize)]
pub struct SendResult {
    /// True when every request completed with a 2xx response.
    pub success: bool,
    /// Status of the first non-2xx response, when that is what failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Headers of that same response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

impl SendResult {
    /// Every request succeeded (vacuously true for an empty send).
    pub fn ok() -> Self {
        Self {
            success: true,
            status_code: None,
            headers: None,
        }
    }

    fn transport_failure() -> Self {
        Self {
            success: false,
            status_code: None,
            headers: None,
        }
    }

    fn rejected(status_code: Option<u16>, headers: Option<HashMap<String, String>>) -> Self {
        Self {
            success: false,
            status_code,
            headers,
        }
    }
}

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Reduce per-request outcomes into one result.
///
/// Any transport-level failure disqualifies the whole send with no further
/// detail. Otherwise the first non-2xx outcome in iteration order supplies
/// the status and headers. This is a short-circuiting reduction, not a
/// tally.
pub fn aggregate(outcomes: &[DispatchOutcome]) -> SendResult {
    if outcomes.iter().any(|outcome| outcome.transport_failed) {
        return SendResult::transport_failure();
    }

    for outcome in outcomes {
        let rejected = outcome.status.map_or(true, |status| !is_success_status(status));
        if rejected {
            return SendResult::rejected(outcome.status, outcome.headers.clone());
        }
    }

    SendResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(index: usize, status: u16) -> DispatchOutcome {
        DispatchOutcome::completed(index, status, HashMap::new())
    }

    #[test]
    fn test_all_success() {
        let outcomes = vec![completed(0, 200), completed(1, 201), completed(2, 204)];
        let result = aggregate(&outcomes);

        assert!(result.success);
        assert!(result.status_code.is_none());
        assert!(result.headers.is_none());
    }

    #[test]
    fn test_empty_outcomes_are_success() {
        assert!(aggregate(&[]).success);
    }

    #[test]
    fn test_transport_failure_wins_with_no_detail() {
        let outcomes = vec![
            completed(0, 200),
            DispatchOutcome::failed(1),
            completed(2, 200),
        ];
        let result = aggregate(&outcomes);

        assert!(!result.success);
        assert!(result.status_code.is_none());
        assert!(result.headers.is_none());
    }

    #[test]
    fn test_transport_failure_shadows_http_rejection() {
        // The transport check runs over all outcomes before any status check.
        let outcomes = vec![completed(0, 404), DispatchOutcome::failed(1)];
        let result = aggregate(&outcomes);

        assert!(!result.success);
        assert!(result.status_code.is_none());
    }

    #[test]
    fn test_first_rejection_supplies_detail() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), "120".to_string());

        let outcomes = vec![
            completed(0, 200),
            DispatchOutcome::completed(1, 429, headers.clone()),
            completed(2, 503),
        ];
        let result = aggregate(&outcomes);

        assert!(!result.success);
        assert_eq!(result.status_code, Some(429));
        assert_eq!(
            result.headers.as_ref().and_then(|h| h.get("retry-after")).map(String::as_str),
            Some("120")
        );
    }
}
