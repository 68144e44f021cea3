//! Diagnostic placeholder for the "ignore" action

use crate::common::Result;
use crate::harness::TestCase;

pub(crate) fn test_case() -> Result<TestCase> {
    Ok(TestCase::new("ignore")
        .skip_reason("Requires the host action interface to acknowledge ignore events."))
}
