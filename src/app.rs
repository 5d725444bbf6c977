use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::GraphQlClient;
use crate::auth::{credential_store, CredentialStore};
use crate::config::Config;
use crate::signup::{SignupError, SubmissionPipeline, SubmitHandler};
use crate::ui::terminal_guard::{install_panic_hook, TerminalGuard};
use crate::ui::{LandingScreen, SignupScreen};
use crate::wizard::FormValues;

/// Notifications delivered to the event loop from callbacks and background tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The user backed out of the first wizard step
    SignupExited,
    /// The registration request finished; `Ok` carries the stored token
    SubmissionFinished(Result<String, String>),
}

/// Runs the submission pipeline on a background task so the UI keeps drawing
pub struct BackgroundSubmitter {
    pipeline: Arc<SubmissionPipeline>,
    events: mpsc::UnboundedSender<AppEvent>,
}

impl BackgroundSubmitter {
    pub fn new(pipeline: Arc<SubmissionPipeline>, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { pipeline, events }
    }
}

impl SubmitHandler for BackgroundSubmitter {
    fn on_submit(&mut self, values: FormValues) {
        let pipeline = Arc::clone(&self.pipeline);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = pipeline.run(&values).await.map_err(|e| failure_message(&e));
            if events.send(AppEvent::SubmissionFinished(result)).is_err() {
                warn!("event loop gone before submission finished");
            }
        });
    }
}

/// Text for the error line; transient API failures invite a retry
pub fn failure_message(error: &SignupError) -> String {
    match error {
        SignupError::Api(api) if api.is_retryable() => format!("{error} (try again)"),
        _ => error.to_string(),
    }
}

/// Screen currently on display
pub enum Screen {
    Landing(LandingScreen),
    Signup(Box<SignupScreen>),
}

pub struct App {
    config: Config,
    pipeline: Arc<SubmissionPipeline>,
    credentials: Arc<dyn CredentialStore>,
    screen: Screen,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let credentials = credential_store(&config);
        let client = GraphQlClient::from_config(&config.api);
        info!(endpoint = client.endpoint(), "registration API configured");
        let pipeline = Arc::new(SubmissionPipeline::new(
            Arc::new(client),
            Arc::clone(&credentials),
        ));
        Ok(Self::with_parts(config, pipeline, credentials))
    }

    /// Assemble an app around an existing pipeline and credential store
    pub fn with_parts(
        config: Config,
        pipeline: Arc<SubmissionPipeline>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let signed_in = credentials.access_token().is_some();
        Self {
            config,
            pipeline,
            credentials,
            screen: Screen::Landing(LandingScreen::new(signed_in)),
            events_tx,
            events_rx,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let (_guard, mut terminal) = TerminalGuard::enter()?;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            terminal.draw(|f| match &self.screen {
                Screen::Landing(landing) => landing.render(f),
                Screen::Signup(signup) => signup.render(f),
            })?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('c')
                        {
                            self.should_quit = true;
                        } else {
                            self.handle_key(key.code).await;
                        }
                    }
                }
            }

            self.drain_events();
            if let Screen::Signup(signup) = &mut self.screen {
                signup.tick();
            }
        }

        terminal.show_cursor()?;
        Ok(())
    }

    pub async fn handle_key(&mut self, key: KeyCode) {
        if let Screen::Signup(signup) = &mut self.screen {
            signup.handle_key(key).await;
            return;
        }
        match key {
            KeyCode::Enter | KeyCode::Char('s') => self.open_signup(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    /// Apply every pending event without blocking
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn open_signup(&mut self) {
        let exit_tx = self.events_tx.clone();
        let submitter = BackgroundSubmitter::new(Arc::clone(&self.pipeline), self.events_tx.clone());
        let signup = SignupScreen::new(
            move || {
                if exit_tx.send(AppEvent::SignupExited).is_err() {
                    warn!("event loop gone before signup exit");
                }
            },
            submitter,
        )
        .with_signed_in(self.credentials.access_token().is_some());
        self.screen = Screen::Signup(Box::new(signup));
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SignupExited => {
                self.screen = Screen::Landing(LandingScreen::new(
                    self.credentials.access_token().is_some(),
                ));
            }
            AppEvent::SubmissionFinished(Ok(_)) => {
                let mut landing = LandingScreen::new(true);
                landing.notice = Some("Registration complete. You are signed in.".to_string());
                self.screen = Screen::Landing(landing);
            }
            AppEvent::SubmissionFinished(Err(message)) => {
                if let Screen::Signup(signup) = &mut self.screen {
                    signup.submission_failed(message);
                }
            }
        }
    }
}
