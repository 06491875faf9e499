// system-tests/tests/suites/failure_paths.rs
// ============================================================================
// Module: Failure Path Tests
// Description: Fault-injected runs against the stub storefront.
// Purpose: Validate stage tagging and cleanup when a case cannot pass.
// Dependencies: system-tests helpers, storefront-harness
// ============================================================================

//! Failure-path system tests; always hermetic.

use std::error::Error;

use storefront_harness::CART_ALIAS;
use storefront_harness::CaseError;
use storefront_harness::CaseFailure;
use storefront_harness::CaseStage;
use storefront_harness::FixtureDeclaration;
use storefront_harness::FixtureError;
use storefront_harness::GraphQlError;
use storefront_harness::MaskedIdError;
use storefront_harness::PRODUCT_NAME_CASES;
use storefront_harness::ProductNameCase;
use system_tests::logging::init_test_logging;

use crate::helpers;
use helpers::artifacts::TestReporter;
use helpers::harness::StorefrontHarness;
use helpers::storefront_stub::StubOptions;
use helpers::storefront_stub::StubSnapshot;

fn expect_failure<T: std::fmt::Debug>(outcome: Result<T, CaseError>) -> Result<CaseError, String> {
    match outcome {
        Ok(report) => Err(format!("case unexpectedly passed: {report:?}")),
        Err(err) => Ok(err),
    }
}

fn expect_stage(err: &CaseError, stage: CaseStage) -> Result<(), String> {
    if err.stage == stage {
        Ok(())
    } else {
        Err(format!("expected {stage} failure, got: {err}"))
    }
}

fn expect_empty_store(harness: &StorefrontHarness) -> Result<StubSnapshot, String> {
    let snapshot = harness.stub().ok_or("stub expected")?.snapshot();
    if snapshot.products != 0 || snapshot.carts != 0 {
        return Err(format!("fixtures left behind: {snapshot:?}"));
    }
    Ok(snapshot)
}

fn finish(
    reporter: &mut TestReporter,
    harness: &StorefrontHarness,
    err: &CaseError,
) -> Result<(), Box<dyn Error>> {
    reporter.record_failure(err);
    reporter.write_json("graphql_transcript.json", &harness.client().transcript())?;
    reporter.finish("pass", vec![format!("failed at {} as expected", err.stage)])?;
    Ok(())
}

#[test]
fn missing_masked_id_fails_setup_without_mutation() -> Result<(), Box<dyn Error>> {
    init_test_logging();
    let mut reporter = TestReporter::new("missing_masked_id_fails_setup_without_mutation")?;
    let harness = StorefrontHarness::with_stub(StubOptions {
        mask_lookup_fails: true,
        ..StubOptions::default()
    })?;

    let err = expect_failure(harness.runner().run(&PRODUCT_NAME_CASES[0]))?;
    expect_stage(&err, CaseStage::Setup)?;
    if !matches!(err.failure, CaseFailure::MaskedId(MaskedIdError::NotFound(_))) {
        return Err(format!("expected masked id not found, got: {err}").into());
    }
    let snapshot = expect_empty_store(&harness)?;
    if snapshot.mutations != 0 {
        return Err(format!("no mutation should be sent, saw {}", snapshot.mutations).into());
    }

    finish(&mut reporter, &harness, &err)
}

#[test]
fn fixture_creation_failure_leaves_no_partial_state() -> Result<(), Box<dyn Error>> {
    init_test_logging();
    let mut reporter = TestReporter::new("fixture_creation_failure_leaves_no_partial_state")?;
    let harness = StorefrontHarness::with_stub(StubOptions {
        fail_product_skus: vec!["test-product-3".to_string()],
        ..StubOptions::default()
    })?;

    let err = expect_failure(harness.runner().run(&PRODUCT_NAME_CASES[0]))?;
    expect_stage(&err, CaseStage::Setup)?;
    if !matches!(err.failure, CaseFailure::Fixture(FixtureError::Create { .. })) {
        return Err(format!("expected fixture create failure, got: {err}").into());
    }
    if !err.to_string().contains("catalog unavailable") {
        return Err(format!("service message should be preserved: {err}").into());
    }
    let snapshot = expect_empty_store(&harness)?;
    if snapshot.mutations != 0 {
        return Err(format!("no mutation should be sent, saw {}", snapshot.mutations).into());
    }

    finish(&mut reporter, &harness, &err)
}

#[test]
fn undecoded_entity_reports_expected_and_actual() -> Result<(), Box<dyn Error>> {
    init_test_logging();
    let mut reporter = TestReporter::new("undecoded_entity_reports_expected_and_actual")?;
    let harness = StorefrontHarness::with_stub(StubOptions {
        decode_entities: false,
        ..StubOptions::default()
    })?;

    let err = expect_failure(harness.runner().run(&PRODUCT_NAME_CASES[3]))?;
    expect_stage(&err, CaseStage::Assert)?;
    let mismatch = err.assertion().ok_or("assertion failure expected")?;
    if mismatch.expected != "Sample Product™ 4" || mismatch.actual != "Sample Product&trade; 4" {
        return Err(format!("unexpected mismatch: {mismatch}").into());
    }
    expect_empty_store(&harness)?;

    finish(&mut reporter, &harness, &err)
}

#[test]
fn literal_glyphs_pass_without_entity_decoding() -> Result<(), Box<dyn Error>> {
    init_test_logging();
    let mut reporter = TestReporter::new("literal_glyphs_pass_without_entity_decoding")?;
    let harness = StorefrontHarness::with_stub(StubOptions {
        decode_entities: false,
        ..StubOptions::default()
    })?;

    let report = harness.runner().run(&PRODUCT_NAME_CASES[0])?;
    if report.actual_name != "Test Product© 1" {
        return Err(format!("unexpected name {:?}", report.actual_name).into());
    }
    expect_empty_store(&harness)?;

    reporter.record_pass(&report);
    reporter.write_json("case_report.json", &report)?;
    reporter.finish("pass", vec!["glyphs survive without decoding".to_string()])?;
    Ok(())
}

#[test]
fn quoted_sku_is_escaped_in_the_mutation() -> Result<(), Box<dyn Error>> {
    init_test_logging();
    let mut reporter = TestReporter::new("quoted_sku_is_escaped_in_the_mutation")?;
    let harness = StorefrontHarness::with_stub(StubOptions::default())?;
    let case = ProductNameCase {
        sku: "the \"quoted\" sku",
        expected_name: "Quoted Product™",
    };
    let runner = harness.runner_with(vec![
        FixtureDeclaration::product(case.sku, "Quoted Product&trade;"),
        FixtureDeclaration::guest_cart().with_alias(CART_ALIAS),
    ]);

    let report = runner.run(&case)?;
    if report.sku != case.sku || report.actual_name != case.expected_name {
        return Err(format!("unexpected report: {report:?}").into());
    }
    expect_empty_store(&harness)?;

    reporter.record_pass(&report);
    reporter.write_json("case_report.json", &report)?;
    reporter.write_json("graphql_transcript.json", &harness.client().transcript())?;
    reporter.finish("pass", vec!["quoted sku round-tripped through the parser".to_string()])?;
    Ok(())
}

#[test]
fn unknown_sku_surfaces_graphql_errors() -> Result<(), Box<dyn Error>> {
    init_test_logging();
    let mut reporter = TestReporter::new("unknown_sku_surfaces_graphql_errors")?;
    let harness = StorefrontHarness::with_stub(StubOptions::default())?;
    let case = ProductNameCase {
        sku: "ghost-product",
        expected_name: "Ghost",
    };
    let runner =
        harness.runner_with(vec![FixtureDeclaration::guest_cart().with_alias(CART_ALIAS)]);

    let err = expect_failure(runner.run(&case))?;
    expect_stage(&err, CaseStage::Send)?;
    match &err.failure {
        CaseFailure::GraphQl(GraphQlError::Response(messages))
            if messages.iter().any(|message| message.contains("ghost-product")) => {}
        other => return Err(format!("expected graphql errors naming the sku, got: {other}").into()),
    }
    expect_empty_store(&harness)?;

    finish(&mut reporter, &harness, &err)
}
