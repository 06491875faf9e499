// system-tests/tests/helpers/readiness.rs
// ============================================================================
// Module: Readiness Helpers
// Description: Readiness probes for storefront GraphQL endpoints.
// Purpose: Ensure endpoints answer before cases run, without arbitrary sleeps.
// Dependencies: storefront-harness
// ============================================================================

use std::thread::sleep;
use std::time::Duration;
use std::time::Instant;

use storefront_harness::GraphQlTransport;

/// Polls `{ __typename }` until the endpoint answers or timeout expires.
pub fn wait_for_graphql_ready(
    transport: &dyn GraphQlTransport,
    timeout: Duration,
) -> Result<(), String> {
    let start = Instant::now();
    let mut attempts = 0u32;
    loop {
        attempts = attempts.saturating_add(1);
        match transport.execute("readiness", "{ __typename }") {
            Ok(_) => return Ok(()),
            Err(err) => {
                if start.elapsed() > timeout {
                    return Err(format!(
                        "graphql readiness timeout after {attempts} attempts: {err}"
                    ));
                }
                sleep(Duration::from_millis(50));
            }
        }
    }
}
