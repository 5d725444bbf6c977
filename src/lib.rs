//! Swallowtail - landing screen and registration wizard for the Swallowtail
//! trading bot.
//!
//! The wizard core in [`wizard`] is generic over its rendering unit and knows
//! nothing about registration; [`signup`] binds it to the two registration
//! steps and the GraphQL submission.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod logging;
pub mod signup;
pub mod ui;
pub mod wizard;
