//! Read models for the live view
//!
//! The view-model is the single denormalized representation of server
//! state the renderers read from; it is mutated only by the reconciler
//! (on fetch success) and by the filter/pagination composer methods
//! (on user input).

pub mod view_model;

pub use view_model::{Filters, Pagination, ViewModel};
