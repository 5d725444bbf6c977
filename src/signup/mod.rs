//! The registration flow: steps, validation, form state and submission

pub mod form;
pub mod pages;
pub mod pipeline;
pub mod validation;

pub use form::{SignupForm, SubmitHandler};
pub use pages::{signup_steps, SignupPage, SIGNUP_FIELDS};
pub use pipeline::{parse_values, SignupError, SubmissionPipeline};
pub use validation::{signup_schema, ValidationSchema};
