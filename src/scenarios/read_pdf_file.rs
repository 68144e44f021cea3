//! Diagnostic for the "read pdf file" action
//!
//! Seeds a minimal but well-formed PDF so the action has something real to
//! decode; the check only cares that the known text surfaces among the
//! extracted elements.

use serde_json::Value;

use super::success_payload;
use crate::common::Result;
use crate::harness::{FixtureSpec, TestCase, Validation};

const EXPECTED_TEXT: &str = "Hello diagnostic PDF";

const SAMPLE_PDF: &str = "%PDF-1.4
1 0 obj <</Type /Catalog /Pages 2 0 R>> endobj
2 0 obj <</Type /Pages /Kids [3 0 R] /Count 1>> endobj
3 0 obj <</Type /Page /Parent 2 0 R /MediaBox [0 0 200 200] /Contents 4 0 R /Resources <</Font <</F1 5 0 R>>>>>> endobj
4 0 obj <</Length 44>> stream
BT /F1 24 Tf 72 120 Td (Hello diagnostic PDF) Tj ET
endstream
endobj
5 0 obj <</Type /Font /Subtype /Type1 /BaseFont /Helvetica>> endobj
xref
0 6
0000000000 65535 f
0000000010 00000 n
0000000060 00000 n
0000000117 00000 n
0000000240 00000 n
0000000339 00000 n
trailer <</Size 6 /Root 1 0 R>>
startxref
408
%%EOF
";

pub(crate) fn test_case() -> Result<TestCase> {
    Ok(TestCase::new("read pdf file")
        .fixture(FixtureSpec::new().bytes("sample.pdf", SAMPLE_PDF.as_bytes()))
        .sandbox_input("file_path", "sample.pdf")
        .validator(|outcome, _input| {
            let payload = match success_payload(outcome) {
                Ok(payload) => payload,
                Err(failed) => return failed,
            };
            let Some(content) = payload.get("content").and_then(Value::as_object) else {
                return Validation::Fail("Expected 'content' to be an object.".to_string());
            };
            let Some(elements) = content.get("elements").and_then(Value::as_array) else {
                return Validation::Fail("PDF content did not include any elements.".to_string());
            };
            if elements.is_empty() {
                return Validation::Fail("PDF content did not include any elements.".to_string());
            }
            let any_text = elements.iter().any(|element| {
                element
                    .get("text")
                    .and_then(Value::as_str)
                    .is_some_and(|text| text.contains(EXPECTED_TEXT))
            });
            if !any_text {
                return Validation::Fail(
                    "Expected text not found in extracted elements.".to_string(),
                );
            }
            Validation::Pass("PDF content extracted successfully.".to_string())
        }))
}
