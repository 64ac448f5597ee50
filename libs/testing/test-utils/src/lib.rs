//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with the coffee schema migrated (feature: "postgres")
//! - `TestDataBuilder`: deterministic test data generation
//! - `assertions`: custom assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let coffee_name = builder.name("coffee", "main");
//!     let flavors = builder.flavors(2);
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// Names derived from the same seed are stable across runs, and distinct seeds keep
/// tests that share a database from colliding on flavor names.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (seed is the hash of the name)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_coffee");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("coffee", "main"), "test-coffee-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// `count` distinct flavor names scoped to this builder's seed.
    pub fn flavors(&self, count: usize) -> Vec<String> {
        (0..count)
            .map(|i| self.name("flavor", &i.to_string()))
            .collect()
    }
}

/// Test assertion helpers
pub mod assertions {
    use std::collections::BTreeSet;

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert two collections of names are equal ignoring order
    pub fn assert_same_names<A, E>(actual: A, expected: E, context: &str)
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let actual: BTreeSet<String> = actual.into_iter().map(|s| s.as_ref().to_owned()).collect();
        let expected: BTreeSet<String> =
            expected.into_iter().map(|s| s.as_ref().to_owned()).collect();

        assert_eq!(
            actual, expected,
            "{}: expected names {:?}, got {:?}",
            context, expected, actual
        );
    }
}
