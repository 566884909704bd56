//! Test-result model and payload parsing
//!
//! Xcode Server reports an integration's test results as a JSON object
//! keyed by test-suite name, each suite holding a list of records with
//! pass/fail counts and optional failure summaries. This module decodes
//! that payload into per-suite results with cleaned failure locations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw test-result payload as reported by the server, keyed by suite name
pub type TestResultsPayload = BTreeMap<String, Vec<SuiteRecord>>;

/// One raw record within a suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteRecord {
    pub failed: u32,
    pub passed: u32,
    #[serde(rename = "failureSummaries", skip_serializing_if = "Option::is_none")]
    pub failure_summaries: Option<Vec<FailureSummary>>,
}

/// Raw failure summary within a suite record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureSummary {
    pub message: String,
    #[serde(rename = "lineNumber")]
    pub line_number: u32,
    #[serde(rename = "fileName")]
    pub file_name: String,
}

/// Location of a failed test assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedTestLocation {
    pub file_name: String,
    pub line_number: u32,
    pub message: String,
}

/// Aggregated outcome of one test suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub failed_count: u32,
    pub locations: Vec<FailedTestLocation>,
}

impl TestResult {
    /// Aggregate a raw payload into per-suite results, ordered by suite name.
    ///
    /// With `only_failed`, suites without failures are dropped.
    pub fn from_payload(payload: &TestResultsPayload, only_failed: bool) -> Vec<TestResult> {
        let mut results = Vec::new();

        for (name, records) in payload {
            let failed_count = records.iter().map(|r| r.failed).sum();

            let mut locations = Vec::new();
            for record in records {
                if let Some(summaries) = &record.failure_summaries {
                    locations.extend(summaries.iter().map(|summary| FailedTestLocation {
                        file_name: cleaned_file_name(&summary.file_name),
                        line_number: summary.line_number,
                        message: summary.message.clone(),
                    }));
                }
            }

            if !only_failed || failed_count > 0 {
                results.push(TestResult {
                    name: name.clone(),
                    failed_count,
                    locations,
                });
            }
        }

        results
    }
}

/// Strip the builder checkout prefix the server puts in front of source
/// paths, e.g. `…/XCSBuilder/Bots/<hash>/Source/<project>/Tests/FooTests.swift`
/// becomes `Tests/FooTests.swift`. Paths without the marker pass through.
fn cleaned_file_name(file_name: &str) -> String {
    let components: Vec<&str> = file_name.split('/').collect();

    let index = match components.iter().position(|c| *c == "XCSBuilder") {
        Some(index) => index,
        None => return file_name.to_string(),
    };
    if components.get(index + 1) != Some(&"Bots") {
        return file_name.to_string();
    }

    // XCSBuilder/Bots/<hash>/Source/<project> precede the in-repo path
    components[index + 5..].join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_from_json(json: &str) -> TestResultsPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_payload() {
        let payload = payload_from_json(
            r#"{
                "AppTests": [
                    {
                        "failed": 1,
                        "passed": 7,
                        "failureSummaries": [
                            {
                                "message": "XCTAssertEqual failed",
                                "lineNumber": 42,
                                "fileName": "/Library/Developer/XcodeServer/Integrations/Caches/1/Source/App/Tests/AppTests.swift"
                            }
                        ]
                    }
                ]
            }"#,
        );

        let records = payload.get("AppTests").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].failed, 1);
        assert_eq!(records[0].passed, 7);

        let summaries = records[0].failure_summaries.as_ref().unwrap();
        assert_eq!(summaries[0].line_number, 42);
        assert!(summaries[0].file_name.ends_with("AppTests.swift"));
    }

    #[test]
    fn test_from_payload_aggregates_failures() {
        let payload = payload_from_json(
            r#"{
                "AppTests": [
                    {"failed": 1, "passed": 3},
                    {"failed": 2, "passed": 0}
                ],
                "UiTests": [
                    {"failed": 0, "passed": 5}
                ]
            }"#,
        );

        let results = TestResult::from_payload(&payload, false);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "AppTests");
        assert_eq!(results[0].failed_count, 3);
        assert_eq!(results[1].name, "UiTests");
        assert_eq!(results[1].failed_count, 0);
    }

    #[test]
    fn test_from_payload_only_failed() {
        let payload = payload_from_json(
            r#"{
                "AppTests": [{"failed": 1, "passed": 3}],
                "UiTests": [{"failed": 0, "passed": 5}]
            }"#,
        );

        let results = TestResult::from_payload(&payload, true);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "AppTests");
    }

    #[test]
    fn test_from_payload_collects_locations() {
        let payload = payload_from_json(
            r#"{
                "AppTests": [
                    {
                        "failed": 2,
                        "passed": 0,
                        "failureSummaries": [
                            {"message": "first", "lineNumber": 10, "fileName": "a/b.swift"},
                            {"message": "second", "lineNumber": 20, "fileName": "a/c.swift"}
                        ]
                    }
                ]
            }"#,
        );

        let results = TestResult::from_payload(&payload, false);
        assert_eq!(results[0].locations.len(), 2);
        assert_eq!(results[0].locations[0].message, "first");
        assert_eq!(results[0].locations[1].line_number, 20);
    }

    #[test]
    fn test_from_payload_empty() {
        let payload = payload_from_json("{}");
        let results = TestResult::from_payload(&payload, false);
        assert!(results.is_empty());
    }

    #[test]
    fn test_cleaned_file_name_strips_builder_prefix() {
        let cleaned = cleaned_file_name(
            "/Library/XCSBuilder/Bots/98677bd28b34731516fbc5e26d2f70c4/Source/MacDesigner/Common/Unit Tests/ParserTests.swift",
        );
        assert_eq!(cleaned, "Common/Unit Tests/ParserTests.swift");
    }

    #[test]
    fn test_cleaned_file_name_without_marker() {
        let path = "/Users/dev/project/Tests/ParserTests.swift";
        assert_eq!(cleaned_file_name(path), path);
    }

    #[test]
    fn test_cleaned_file_name_marker_without_bots() {
        let path = "/srv/XCSBuilder/Other/ParserTests.swift";
        assert_eq!(cleaned_file_name(path), path);
    }
}
