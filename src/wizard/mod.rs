//! Multi-step wizard core: route tokens, step registry, router and form host
//! surfaces, and the navigation controller tying them together.

pub mod form;
pub mod navigation;
pub mod registry;
pub mod route;
pub mod router;

pub use form::{FieldErrors, FormHost, FormValues};
pub use navigation::{AdvanceOutcome, ForwardLabel, NavigationController, RetreatOutcome};
pub use registry::{Step, StepDefinition, StepRegistry};
pub use route::RouteToken;
pub use router::{MemoryRouter, Router};
