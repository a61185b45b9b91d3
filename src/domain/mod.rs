// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Pure types and rules, independent of HTTP and the store.
//
// ============================================================================

pub mod order;
