// crates/storefront-harness/src/fixtures/scope.rs
// ============================================================================
// Module: Fixture Scope
// Description: Scoped ownership of fixture records created for one case.
// Purpose: Materialize declarations and guarantee teardown on every exit path.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! A [`FixtureScope`] owns every record it created and removes them in
//! reverse creation order, explicitly through [`FixtureScope::teardown`] or
//! implicitly on drop.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::fixtures::backend::FixtureBackend;
use crate::fixtures::backend::FixtureError;
use crate::fixtures::declaration::FixtureDeclaration;
use crate::fixtures::declaration::FixtureRecord;
use crate::fixtures::declaration::FixtureSpec;
use crate::fixtures::declaration::GuestCartRecord;
use crate::fixtures::declaration::ProductRecord;

// ============================================================================
// SECTION: Scope
// ============================================================================

/// Records created for a single case, removed in reverse order on teardown.
///
/// # Invariants
/// - `aliases` only index into `records`.
/// - After teardown `records` is empty and `Drop` does nothing.
pub struct FixtureScope {
    /// Backend used for creation and removal.
    backend: Arc<dyn FixtureBackend>,
    /// Created records in creation order.
    records: Vec<FixtureRecord>,
    /// Alias to record index.
    aliases: BTreeMap<String, usize>,
}

impl FixtureScope {
    /// Creates every declared fixture in order.
    ///
    /// Aliases are validated before anything is created. If a creation fails,
    /// the records created so far are removed before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::DuplicateAlias`] for repeated aliases, or the
    /// backend's creation error.
    pub fn materialize(
        backend: Arc<dyn FixtureBackend>,
        declarations: &[FixtureDeclaration],
    ) -> Result<Self, FixtureError> {
        let mut seen = BTreeSet::new();
        for alias in declarations.iter().filter_map(|declaration| declaration.alias.as_deref()) {
            if !seen.insert(alias) {
                return Err(FixtureError::DuplicateAlias(alias.to_string()));
            }
        }

        let mut scope = Self {
            backend,
            records: Vec::with_capacity(declarations.len()),
            aliases: BTreeMap::new(),
        };
        for declaration in declarations {
            // Dropping `scope` on error removes what was already created.
            let record = scope.create(&declaration.spec)?;
            tracing::debug!(kind = record.kind(), alias = ?declaration.alias, "fixture created");
            if let Some(alias) = &declaration.alias {
                scope.aliases.insert(alias.clone(), scope.records.len());
            }
            scope.records.push(record);
        }
        Ok(scope)
    }

    /// Returns the record registered under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::MissingAlias`] when nothing uses the alias.
    pub fn get(&self, alias: &str) -> Result<&FixtureRecord, FixtureError> {
        self.aliases
            .get(alias)
            .and_then(|index| self.records.get(*index))
            .ok_or_else(|| FixtureError::MissingAlias(alias.to_string()))
    }

    /// Returns the guest cart registered under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::MissingAlias`] or [`FixtureError::AliasKind`].
    pub fn guest_cart(&self, alias: &str) -> Result<&GuestCartRecord, FixtureError> {
        match self.get(alias)? {
            FixtureRecord::GuestCart(cart) => Ok(cart),
            other => Err(FixtureError::AliasKind {
                alias: alias.to_string(),
                expected: "guest_cart",
                actual: other.kind(),
            }),
        }
    }

    /// Returns the product registered under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::MissingAlias`] or [`FixtureError::AliasKind`].
    pub fn product(&self, alias: &str) -> Result<&ProductRecord, FixtureError> {
        match self.get(alias)? {
            FixtureRecord::Product(product) => Ok(product),
            other => Err(FixtureError::AliasKind {
                alias: alias.to_string(),
                expected: "product",
                actual: other.kind(),
            }),
        }
    }

    /// Returns every live record in creation order.
    #[must_use]
    pub fn records(&self) -> &[FixtureRecord] {
        &self.records
    }

    /// Removes every record and reports the first removal failure.
    ///
    /// Removal continues past failures so one stuck record does not leak the
    /// rest.
    ///
    /// # Errors
    ///
    /// Returns the first [`FixtureError::Remove`] encountered.
    pub fn teardown(mut self) -> Result<(), FixtureError> {
        self.remove_all().into_iter().next().map_or(Ok(()), Err)
    }

    /// Creates one record through the backend.
    fn create(&self, spec: &FixtureSpec) -> Result<FixtureRecord, FixtureError> {
        match spec {
            FixtureSpec::Product(product) => {
                self.backend.create_product(product).map(FixtureRecord::Product)
            }
            FixtureSpec::GuestCart => {
                self.backend.create_guest_cart().map(FixtureRecord::GuestCart)
            }
        }
    }

    /// Removes records newest first and collects failures.
    fn remove_all(&mut self) -> Vec<FixtureError> {
        self.aliases.clear();
        let mut failures = Vec::new();
        while let Some(record) = self.records.pop() {
            let outcome = match &record {
                FixtureRecord::Product(product) => self.backend.remove_product(product),
                FixtureRecord::GuestCart(cart) => self.backend.remove_guest_cart(cart),
            };
            match outcome {
                Ok(()) => tracing::debug!(kind = record.kind(), "fixture removed"),
                Err(err) => failures.push(err),
            }
        }
        failures
    }
}

impl Drop for FixtureScope {
    fn drop(&mut self) {
        if self.records.is_empty() {
            return;
        }
        for err in self.remove_all() {
            tracing::warn!(error = %err, "fixture teardown failed");
        }
    }
}
