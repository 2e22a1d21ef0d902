use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::auth::{Credential, KeyLoader, Session};
use crate::consts::{
    STATUS_EMPTY_INPUT, STATUS_FETCHING_KEY, STATUS_INTERRUPTED, STATUS_KEY_FAILED,
    STATUS_REQUESTING,
};
use crate::display::{DisplayState, Tone};
use crate::error::{EvalError, Result};
use crate::events::{Event, EventBus, Stage};
use crate::prompts::build_calc_prompt;
use crate::sanitize::{Evaluation, sanitize_and_validate};
use crate::thinker::Thinker;
use crate::typeset::Typesetter;

/// The evaluation loop. Wires together a key loader, a thinker, and the
/// display state.
///
/// `evaluate` and `reset` take `&mut self`, so one calculator runs at most
/// one attempt at a time and is the only writer of its session.
pub struct Calculator {
    session: Session,
    loader: KeyLoader,
    thinker: Box<dyn Thinker>,
    typesetter: Option<Box<dyn Typesetter>>,
    display: DisplayState,
    events: EventBus,
}

impl Calculator {
    pub fn new(loader: KeyLoader, thinker: Box<dyn Thinker>) -> Self {
        Self {
            session: Session::new(),
            loader,
            thinker,
            typesetter: None,
            display: DisplayState::default(),
            events: EventBus::default(),
        }
    }

    /// Start from an existing session instead of an empty one.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn with_typesetter(mut self, typesetter: Box<dyn Typesetter>) -> Self {
        self.typesetter = Some(typesetter);
        self
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn model(&self) -> &str {
        self.thinker.model()
    }

    pub fn key_url(&self) -> &str {
        self.loader.url()
    }

    pub fn typesetter_name(&self) -> Option<&str> {
        self.typesetter.as_deref().map(|t| t.name())
    }

    /// Receive a [`Event::Stage`] for every stage an attempt enters.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Run one evaluation attempt for `input` and update the display.
    ///
    /// Every failure leaves both result regions on the error placeholder;
    /// nothing is retried.
    pub async fn evaluate(&mut self, input: &str) -> Result<Evaluation> {
        let result = self.attempt(input).await;

        if let Err(e) = &result {
            warn!(error = %e, "evaluation failed");
            match e {
                EvalError::EmptyInput => self.display.fail_with(STATUS_EMPTY_INPUT),
                EvalError::CredentialUnavailable => self.display.fail_with(STATUS_KEY_FAILED),
                _ => self.display.fail(),
            }
            if e.is_unauthorized() {
                // rotated or revoked; fetch a fresh one next time
                warn!("completion endpoint rejected the API key, dropping it");
                self.session.forget();
            }
        }

        self.enter(Stage::Idle);
        result
    }

    /// Clear the input and both result regions. No network, cannot fail.
    pub fn reset(&mut self) {
        self.display.reset();
    }

    /// Mark an attempt whose future was dropped before it finished.
    pub fn interrupt(&mut self) {
        self.display.fail_with(STATUS_INTERRUPTED);
        self.enter(Stage::Idle);
    }

    async fn attempt(&mut self, input: &str) -> Result<Evaluation> {
        self.display.input = input.to_string();
        self.enter(Stage::ValidatingInput);

        let expression = input.trim();
        if expression.is_empty() {
            return Err(EvalError::EmptyInput);
        }

        let credential = self.ensure_credential().await?;

        self.display.pending(STATUS_REQUESTING);
        self.enter(Stage::Requesting);
        let prompt = build_calc_prompt(expression);
        let raw = self.thinker.complete(&credential, &prompt).await?;

        self.enter(Stage::Sanitizing);
        let evaluation = sanitize_and_validate(&raw)?;

        self.display.succeed(&evaluation);
        self.typeset(&evaluation).await;
        self.enter(Stage::Displaying);

        info!(
            expression,
            result = %evaluation.value_text(),
            "operation evaluated"
        );
        Ok(evaluation)
    }

    async fn ensure_credential(&mut self) -> Result<Credential> {
        let held = self.session.credential().cloned();
        if held.is_none() {
            self.display.set_status(STATUS_FETCHING_KEY, Tone::Muted);
        }
        self.enter(Stage::EnsuringCredential);

        if let Some(credential) = held {
            return Ok(credential);
        }

        if !self.loader.load_credential(&mut self.session).await {
            return Err(EvalError::CredentialUnavailable);
        }
        self.session
            .credential()
            .cloned()
            .ok_or(EvalError::CredentialUnavailable)
    }

    async fn typeset(&mut self, evaluation: &Evaluation) {
        let Some(typesetter) = &self.typesetter else {
            return;
        };
        match typesetter.typeset(&evaluation.latex).await {
            Ok(rendered) => self.display.rendered = Some(rendered),
            Err(e) => warn!(error = %e, typesetter = typesetter.name(), "typesetting failed"),
        }
    }

    fn enter(&self, stage: Stage) {
        self.events.emit(Event::Stage {
            stage,
            status: self.display.status.clone(),
        });
    }
}
