//! Client for the registration GraphQL API

pub mod error;
pub mod graphql;
pub mod register;

pub use error::ApiError;
pub use graphql::GraphQlClient;
pub use register::{RegisterUserPayload, RegisterUserVariables, UserRegistrar, REGISTER_USER_MUTATION};
