// ============================================================================
// Order Domain
// ============================================================================
//
// Everything the service knows about an order:
// - Value objects (LineItem, Customer)
// - Entity (NewOrder before persistence, Order after)
// - Submission schema and validation
// - Errors (ValidationError)
//
// Persistence lives in `crate::store`; this module has no I/O.
//
// ============================================================================

pub mod entity;
pub mod errors;
pub mod validation;
pub mod value_objects;

pub use entity::*;
pub use errors::*;
pub use validation::validate_submission;
pub use value_objects::*;
