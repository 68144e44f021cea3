//! Diagnostic placeholder for the "send message" action
//!
//! Sending requires the host conversation service, which a sandboxed run
//! cannot reach.

use crate::common::Result;
use crate::harness::TestCase;

pub(crate) fn test_case() -> Result<TestCase> {
    Ok(TestCase::new("send message")
        .skip_reason("Requires the host conversation service to deliver chat messages."))
}
