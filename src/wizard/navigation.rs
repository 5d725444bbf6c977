//! Navigation controller: gates forward progress on the current step's
//! validation, lets the user step back freely, submits past the last step and
//! exits the wizard when backing out of the first one.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use super::form::FormHost;
use super::registry::StepRegistry;
use super::route::RouteToken;
use super::router::Router;

/// Result of a forward action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// A submission is in flight; nothing happened
    Ignored,
    /// Fields on the current step failed validation; the form was asked to
    /// submit so it surfaces those errors, and the route did not change
    Blocked { invalid_fields: Vec<String> },
    /// Moved to the next step
    Moved(RouteToken),
    /// Current step was the last one; final submission triggered
    Submitted,
}

/// Result of a backward action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetreatOutcome {
    /// A submission is in flight; nothing happened
    Ignored,
    /// Backed out of the first step: exit callback invoked, then history back
    Exited,
    /// History moved back one entry
    Back,
}

/// Label for the forward control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardLabel {
    InProgress,
    Continue,
    Finish,
}

impl fmt::Display for ForwardLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardLabel::InProgress => f.write_str("Submitting…"),
            ForwardLabel::Continue => f.write_str("Continue"),
            ForwardLabel::Finish => f.write_str("Finish Registration"),
        }
    }
}

/// Drives a form host and a router through a step registry
pub struct NavigationController<U> {
    registry: Arc<StepRegistry<U>>,
}

impl<U> NavigationController<U> {
    pub fn new(registry: Arc<StepRegistry<U>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<StepRegistry<U>> {
        &self.registry
    }

    /// Step currently on display: the router location, or the first step when
    /// the location is not a wizard route
    pub fn current_route<R: Router + ?Sized>(&self, router: &R) -> Option<RouteToken> {
        self.registry.resolve(router.location()).cloned()
    }

    /// Route the forward control would move to
    pub fn next_route<R: Router + ?Sized>(&self, router: &R) -> Option<RouteToken> {
        let current = self.current_route(router)?;
        self.registry.next_route(&current).cloned()
    }

    /// Validate the current step and move forward, or submit on the last step
    pub async fn advance<F, R>(&self, form: &mut F, router: &mut R) -> AdvanceOutcome
    where
        F: FormHost + ?Sized,
        R: Router + ?Sized,
    {
        if form.is_submitting() {
            debug!("advance ignored while submitting");
            return AdvanceOutcome::Ignored;
        }

        let errors = form.validate_form().await;
        let current = self.current_route(router);

        let invalid_fields: Vec<String> = current
            .as_ref()
            .map(|route| self.registry.fields_for(route))
            .unwrap_or_default()
            .iter()
            .filter(|field| errors.get(*field).is_some_and(|msg| !msg.is_empty()))
            .cloned()
            .collect();

        if !invalid_fields.is_empty() {
            debug!(fields = ?invalid_fields, "step blocked by validation");
            form.submit_form().await;
            return AdvanceOutcome::Blocked { invalid_fields };
        }

        let next = current
            .as_ref()
            .and_then(|route| self.registry.next_route(route))
            .cloned();

        match next {
            Some(next) => {
                let values = form.values();
                form.reset_form(values);
                router.push(next.clone());
                debug!(route = %next, "advanced to next step");
                AdvanceOutcome::Moved(next)
            }
            None => {
                info!("final step complete, submitting");
                form.submit_form().await;
                AdvanceOutcome::Submitted
            }
        }
    }

    /// Step back one entry; backing out of the first step also exits
    pub fn retreat<F, R>(&self, form: &F, router: &mut R) -> RetreatOutcome
    where
        F: FormHost + ?Sized,
        R: Router + ?Sized,
    {
        if form.is_submitting() {
            debug!("retreat ignored while submitting");
            return RetreatOutcome::Ignored;
        }

        let on_first = self
            .current_route(router)
            .is_some_and(|route| self.registry.is_first_route(&route));

        if on_first {
            self.registry.exit();
        }

        // Fires on the first step too, after the exit callback.
        router.go_back();

        if on_first {
            RetreatOutcome::Exited
        } else {
            RetreatOutcome::Back
        }
    }

    pub fn forward_label<F, R>(&self, form: &F, router: &R) -> ForwardLabel
    where
        F: FormHost + ?Sized,
        R: Router + ?Sized,
    {
        if form.is_submitting() {
            ForwardLabel::InProgress
        } else if self.next_route(router).is_some() {
            ForwardLabel::Continue
        } else {
            ForwardLabel::Finish
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::form::{FieldErrors, FormValues};
    use crate::wizard::registry::StepDefinition;
    use crate::wizard::router::MemoryRouter;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Form host fake with canned validation errors
    #[derive(Default)]
    struct FakeForm {
        values: FormValues,
        errors: FieldErrors,
        submitting: bool,
        submit_calls: usize,
        reset_calls: usize,
    }

    #[async_trait]
    impl FormHost for FakeForm {
        fn values(&self) -> FormValues {
            self.values.clone()
        }

        async fn validate_form(&mut self) -> FieldErrors {
            self.errors.clone()
        }

        fn reset_form(&mut self, values: FormValues) {
            self.values = values;
            self.reset_calls += 1;
        }

        async fn submit_form(&mut self) {
            self.submit_calls += 1;
        }

        fn is_submitting(&self) -> bool {
            self.submitting
        }
    }

    fn controller(exits: Arc<AtomicUsize>) -> NavigationController<&'static str> {
        let registry = StepRegistry::new(
            vec![
                StepDefinition::new("name", ["firstName", "lastName"]),
                StepDefinition::new("account", ["email", "password"]),
            ],
            move || {
                exits.fetch_add(1, Ordering::SeqCst);
            },
        );
        NavigationController::new(Arc::new(registry))
    }

    fn routes(nav: &NavigationController<&'static str>) -> Vec<RouteToken> {
        nav.registry().routes().cloned().collect()
    }

    #[tokio::test]
    async fn test_advance_blocked_by_owned_field_error() {
        let nav = controller(Arc::default());
        let routes = routes(&nav);
        let mut router = MemoryRouter::new(routes[0].clone());
        let mut form = FakeForm::default();
        form.errors
            .insert("lastName".into(), "Last name is required".into());

        let outcome = nav.advance(&mut form, &mut router).await;

        assert_eq!(
            outcome,
            AdvanceOutcome::Blocked {
                invalid_fields: vec!["lastName".to_string()]
            }
        );
        assert_eq!(router.location(), Some(&routes[0]));
        assert_eq!(form.submit_calls, 1);
        assert_eq!(form.reset_calls, 0);
    }

    #[tokio::test]
    async fn test_advance_ignores_errors_on_other_steps() {
        let nav = controller(Arc::default());
        let routes = routes(&nav);
        let mut router = MemoryRouter::new(routes[0].clone());
        let mut form = FakeForm::default();
        form.errors.insert("email".into(), "Email is required".into());

        let outcome = nav.advance(&mut form, &mut router).await;

        assert_eq!(outcome, AdvanceOutcome::Moved(routes[1].clone()));
        assert_eq!(router.location(), Some(&routes[1]));
        assert_eq!(form.reset_calls, 1);
        assert_eq!(form.submit_calls, 0);
    }

    #[tokio::test]
    async fn test_advance_empty_message_is_not_an_error() {
        let nav = controller(Arc::default());
        let routes = routes(&nav);
        let mut router = MemoryRouter::new(routes[0].clone());
        let mut form = FakeForm::default();
        form.errors.insert("firstName".into(), String::new());

        let outcome = nav.advance(&mut form, &mut router).await;
        assert_eq!(outcome, AdvanceOutcome::Moved(routes[1].clone()));
    }

    #[tokio::test]
    async fn test_advance_on_last_step_submits_once() {
        let nav = controller(Arc::default());
        let routes = routes(&nav);
        let mut router = MemoryRouter::new(routes[1].clone());
        let mut form = FakeForm::default();

        let outcome = nav.advance(&mut form, &mut router).await;

        assert_eq!(outcome, AdvanceOutcome::Submitted);
        assert_eq!(form.submit_calls, 1);
        assert_eq!(router.location(), Some(&routes[1]));
    }

    #[tokio::test]
    async fn test_advance_ignored_while_submitting() {
        let nav = controller(Arc::default());
        let routes = routes(&nav);
        let mut router = MemoryRouter::new(routes[1].clone());
        let mut form = FakeForm {
            submitting: true,
            ..FakeForm::default()
        };

        let outcome = nav.advance(&mut form, &mut router).await;

        assert_eq!(outcome, AdvanceOutcome::Ignored);
        assert_eq!(form.submit_calls, 0);
    }

    #[tokio::test]
    async fn test_advance_from_unknown_location_uses_first_step() {
        let nav = controller(Arc::default());
        let routes = routes(&nav);
        let mut router = MemoryRouter::new(RouteToken::from_path("/"));
        let mut form = FakeForm::default();

        let outcome = nav.advance(&mut form, &mut router).await;
        assert_eq!(outcome, AdvanceOutcome::Moved(routes[1].clone()));
    }

    #[test]
    fn test_retreat_from_first_step_exits_once_and_goes_back() {
        let exits = Arc::new(AtomicUsize::new(0));
        let nav = controller(exits.clone());
        let routes = routes(&nav);
        let mut router = MemoryRouter::new(RouteToken::from_path("/signup"));
        router.push(routes[0].clone());
        let form = FakeForm::default();

        let outcome = nav.retreat(&form, &mut router);

        assert_eq!(outcome, RetreatOutcome::Exited);
        assert_eq!(exits.load(Ordering::SeqCst), 1);
        assert_eq!(router.location(), Some(&RouteToken::from_path("/signup")));
    }

    #[test]
    fn test_retreat_from_later_step_goes_back() {
        let exits = Arc::new(AtomicUsize::new(0));
        let nav = controller(exits.clone());
        let routes = routes(&nav);
        let mut router = MemoryRouter::new(routes[0].clone());
        router.push(routes[1].clone());
        let form = FakeForm::default();

        let outcome = nav.retreat(&form, &mut router);

        assert_eq!(outcome, RetreatOutcome::Back);
        assert_eq!(exits.load(Ordering::SeqCst), 0);
        assert_eq!(router.location(), Some(&routes[0]));
    }

    #[test]
    fn test_retreat_ignored_while_submitting() {
        let exits = Arc::new(AtomicUsize::new(0));
        let nav = controller(exits.clone());
        let routes = routes(&nav);
        let mut router = MemoryRouter::new(routes[0].clone());
        let form = FakeForm {
            submitting: true,
            ..FakeForm::default()
        };

        assert_eq!(nav.retreat(&form, &mut router), RetreatOutcome::Ignored);
        assert_eq!(exits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_forward_label() {
        let nav = controller(Arc::default());
        let routes = routes(&nav);
        let mut router = MemoryRouter::new(routes[0].clone());
        let mut form = FakeForm::default();

        assert_eq!(nav.forward_label(&form, &router), ForwardLabel::Continue);
        router.push(routes[1].clone());
        assert_eq!(nav.forward_label(&form, &router), ForwardLabel::Finish);
        form.submitting = true;
        assert_eq!(nav.forward_label(&form, &router), ForwardLabel::InProgress);

        assert_eq!(ForwardLabel::Continue.to_string(), "Continue");
        assert_eq!(ForwardLabel::Finish.to_string(), "Finish Registration");
        assert_eq!(ForwardLabel::InProgress.to_string(), "Submitting…");
    }
}
