//! Step registry: the single source of truth for step order, routes and
//! field ownership.

use std::collections::HashSet;
use std::fmt;

use super::route::RouteToken;

/// Caller-supplied definition of one wizard step
#[derive(Debug, Clone)]
pub struct StepDefinition<U> {
    /// Rendering unit for the step (opaque to the registry)
    pub unit: U,
    /// Names of the form fields this step owns
    pub fields: Vec<String>,
}

impl<U> StepDefinition<U> {
    pub fn new<I, S>(unit: U, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            unit,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// A step with its assigned route
#[derive(Debug, Clone)]
pub struct Step<U> {
    pub route: RouteToken,
    pub unit: U,
    pub fields: Vec<String>,
}

type ExitCallback = Box<dyn Fn() + Send + Sync>;

/// Ordered, immutable list of wizard steps plus the exit callback
pub struct StepRegistry<U> {
    steps: Vec<Step<U>>,
    exit: ExitCallback,
}

impl<U> StepRegistry<U> {
    /// Build a registry, assigning every step a fresh route token.
    ///
    /// Input order becomes the canonical step order. An empty list is accepted;
    /// every query on it returns "no result".
    pub fn new<F>(definitions: Vec<StepDefinition<U>>, exit: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut seen = HashSet::with_capacity(definitions.len());
        let steps = definitions
            .into_iter()
            .map(|def| {
                let mut route = RouteToken::random();
                while !seen.insert(route.clone()) {
                    route = RouteToken::random();
                }
                Step {
                    route,
                    unit: def.unit,
                    fields: def.fields,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(steps = steps.len(), "step registry built");

        Self {
            steps,
            exit: Box::new(exit),
        }
    }

    /// Route of the first step
    pub fn first_route(&self) -> Option<&RouteToken> {
        self.steps.first().map(|s| &s.route)
    }

    pub fn is_first_route(&self, route: &RouteToken) -> bool {
        self.first_route() == Some(route)
    }

    /// Field names owned by `route`; empty when the route is unknown
    pub fn fields_for(&self, route: &RouteToken) -> &[String] {
        self.step(route).map_or(&[], |s| s.fields.as_slice())
    }

    /// Route following `route`, or `None` for the last step and unknown routes
    pub fn next_route(&self, route: &RouteToken) -> Option<&RouteToken> {
        let index = self.position(route)?;
        self.steps.get(index + 1).map(|s| &s.route)
    }

    /// Zero-based position of `route` in the step order
    pub fn position(&self, route: &RouteToken) -> Option<usize> {
        self.steps.iter().position(|s| &s.route == route)
    }

    /// Rendering unit of the step at `route`
    pub fn unit_for(&self, route: &RouteToken) -> Option<&U> {
        self.step(route).map(|s| &s.unit)
    }

    /// Map a router location onto a step route.
    ///
    /// Locations that are not wizard routes fall through to the first step.
    pub fn resolve(&self, location: Option<&RouteToken>) -> Option<&RouteToken> {
        location
            .and_then(|loc| self.step(loc))
            .map(|s| &s.route)
            .or_else(|| self.first_route())
    }

    /// Invoke the exit callback
    pub fn exit(&self) {
        (self.exit)();
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteToken> {
        self.steps.iter().map(|s| &s.route)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn step(&self, route: &RouteToken) -> Option<&Step<U>> {
        self.steps.iter().find(|s| &s.route == route)
    }
}

impl<U: fmt::Debug> fmt::Debug for StepRegistry<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepRegistry")
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}
