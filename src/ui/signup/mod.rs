//! Registration wizard screen

use std::sync::Arc;

use crossterm::event::KeyCode;
use tracing::debug;

use crate::signup::pages::field_spec;
use crate::signup::{signup_steps, SignupForm, SignupPage, SubmitHandler};
use crate::ui::form_field::TextField;
use crate::wizard::{
    AdvanceOutcome, ForwardLabel, FormHost, MemoryRouter, NavigationController, RetreatOutcome,
    RouteToken, Router, StepRegistry,
};

mod render;


/// What a key press did to the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupAction {
    /// Nothing beyond local editing or focus changes
    None,
    Advanced(AdvanceOutcome),
    Retreated(RetreatOutcome),
}

/// Wizard screen: step display, field editing and navigation buttons
pub struct SignupScreen {
    nav: NavigationController<SignupPage>,
    router: MemoryRouter,
    pub form: SignupForm,
    /// Inputs of the step on display
    pub(crate) fields: Vec<TextField>,
    pub(crate) focus: usize,
    /// Message from the last failed submission
    pub(crate) last_error: Option<String>,
    pub(crate) signed_in: bool,
    pub(crate) tick: usize,
}

impl SignupScreen {
    /// Build a fresh wizard; `exit` runs when the user backs out of the first step
    pub fn new<F>(exit: F, handler: impl SubmitHandler + 'static) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let registry = Arc::new(StepRegistry::new(signup_steps(), exit));
        let mut router = MemoryRouter::new(RouteToken::from_path("/"));
        if let Some(first) = registry.first_route() {
            router.replace(first.clone());
        }

        let mut screen = Self {
            nav: NavigationController::new(registry),
            router,
            form: SignupForm::new(handler),
            fields: Vec::new(),
            focus: 0,
            last_error: None,
            signed_in: false,
            tick: 0,
        };
        screen.rebuild_fields();
        screen
    }

    pub fn with_signed_in(mut self, signed_in: bool) -> Self {
        self.signed_in = signed_in;
        self
    }

    pub fn current_route(&self) -> Option<RouteToken> {
        self.nav.current_route(&self.router)
    }

    pub fn current_page(&self) -> Option<&SignupPage> {
        let route = self.current_route()?;
        self.nav.registry().unit_for(&route)
    }

    /// 1-based step number and step count
    pub fn progress(&self) -> (usize, usize) {
        let total = self.nav.registry().len();
        let index = self
            .current_route()
            .and_then(|route| self.nav.registry().position(&route))
            .unwrap_or(0);
        (index + 1, total)
    }

    pub fn focused_field(&self) -> Option<&'static str> {
        self.fields.get(self.focus).map(|f| f.name)
    }

    pub fn forward_label(&self) -> ForwardLabel {
        self.nav.forward_label(&self.form, &self.router)
    }

    pub fn is_submitting(&self) -> bool {
        self.form.is_submitting()
    }

    /// Advance the spinner
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub async fn handle_key(&mut self, key: KeyCode) -> SignupAction {
        match key {
            KeyCode::Enter => SignupAction::Advanced(self.advance().await),
            KeyCode::Esc => SignupAction::Retreated(self.retreat()),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                SignupAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                SignupAction::None
            }
            other => {
                self.edit_focused(other);
                SignupAction::None
            }
        }
    }

    /// Forward button
    pub async fn advance(&mut self) -> AdvanceOutcome {
        if let Some(name) = self.focused_field() {
            self.form.touch(name);
        }
        let outcome = self.nav.advance(&mut self.form, &mut self.router).await;
        match &outcome {
            AdvanceOutcome::Moved(_) => self.rebuild_fields(),
            AdvanceOutcome::Blocked { invalid_fields } => {
                if let Some(index) = self
                    .fields
                    .iter()
                    .position(|f| invalid_fields.iter().any(|name| name == f.name))
                {
                    self.focus = index;
                }
            }
            AdvanceOutcome::Submitted => self.last_error = None,
            AdvanceOutcome::Ignored => {}
        }
        debug!(?outcome, "advance");
        outcome
    }

    /// Back button
    pub fn retreat(&mut self) -> RetreatOutcome {
        let outcome = self.nav.retreat(&self.form, &mut self.router);
        if outcome == RetreatOutcome::Back {
            self.rebuild_fields();
        }
        outcome
    }

    /// The background submission failed; stay on this step so the user can retry
    pub fn submission_failed(&mut self, message: impl Into<String>) {
        self.form.finish_submission();
        self.last_error = Some(message.into());
    }


    fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.blur_focused();
        self.focus = (self.focus + 1) % self.fields.len();
    }

    fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.blur_focused();
        self.focus = if self.focus == 0 {
            self.fields.len() - 1
        } else {
            self.focus - 1
        };
    }

    fn blur_focused(&mut self) {
        if let Some(name) = self.focused_field() {
            self.form.touch(name);
        }
    }

    fn edit_focused(&mut self, key: KeyCode) {
        if self.form.is_submitting() {
            return;
        }
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        let mut value = self.form.value(field.name).to_string();
        if field.handle_key(key, &mut value) {
            self.form.set_value(field.name, value);
        }
    }

    /// Recreate the inputs for the step on display
    fn rebuild_fields(&mut self) {
        let Some(route) = self.current_route() else {
            self.fields.clear();
            return;
        };
        self.fields = self
            .nav
            .registry()
            .fields_for(&route)
            .iter()
            .filter_map(|name| field_spec(name))
            .map(|spec| {
                let mut field = TextField::new(spec.name, spec.label, spec.masked);
                field.move_to_end(self.form.value(spec.name));
                field
            })
            .collect();
        self.focus = 0;
    }
}
