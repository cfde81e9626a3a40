/// Derived views: pure projections of (Dataset, Selection).
///
/// Both computations are total — degraded selections (unset indicators,
/// unknown countries) produce empty series or listings, never errors — and
/// keep no state across invocations.
pub mod graph;
pub mod table;
