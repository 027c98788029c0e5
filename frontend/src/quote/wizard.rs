use log::{debug, info, warn};

use crate::quote::dispatch::DispatchMessage;
use crate::quote::error::{SubmitError, ValidationError};
use crate::quote::model::{FieldUpdate, QuoteRequest};
use crate::quote::validation::validate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Personal,
    Address,
    ServiceInfo,
    Review,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Personal, Step::Address, Step::ServiceInfo, Step::Review];

    pub fn number(self) -> u8 {
        match self {
            Step::Personal => 1,
            Step::Address => 2,
            Step::ServiceInfo => 3,
            Step::Review => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Personal => "Informações Pessoais",
            Step::Address => "Endereço do Serviço",
            Step::ServiceInfo => "Tipo de Serviço",
            Step::Review => "Revisão",
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::Personal => Some(Step::Address),
            Step::Address => Some(Step::ServiceInfo),
            Step::ServiceInfo => Some(Step::Review),
            Step::Review => None,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Personal => None,
            Step::Address => Some(Step::Personal),
            Step::ServiceInfo => Some(Step::Address),
            Step::Review => Some(Step::ServiceInfo),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardState {
    Step(Step),
    Submitting,
    Submitted,
}

impl WizardState {
    pub fn step(self) -> Option<Step> {
        match self {
            WizardState::Step(step) => Some(step),
            _ => None,
        }
    }
}

/// The quote form's state machine and the record it is filling in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wizard {
    state: WizardState,
    request: QuoteRequest,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            state: WizardState::Step(Step::Personal),
            request: QuoteRequest::new(),
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn request(&self) -> &QuoteRequest {
        &self.request
    }

    pub fn is_submitting(&self) -> bool {
        self.state == WizardState::Submitting
    }

    /// Applies a field edit. Returns `false` once the record has been handed
    /// to the dispatcher.
    pub fn update(&mut self, update: FieldUpdate) -> bool {
        if self.state.step().is_none() {
            debug!("Ignoring field update while {:?}", self.state);
            return false;
        }
        self.request = self.request.with(update);
        true
    }

    /// Moves one step forward if the current step validates. The state is
    /// untouched when validation fails.
    pub fn next(&mut self) -> Result<WizardState, ValidationError> {
        let Some(step) = self.state.step() else {
            return Ok(self.state);
        };
        let Some(target) = step.next() else {
            return Ok(self.state);
        };

        if let Err(err) = validate(step, &self.request).into_result(step) {
            warn!("Step {} rejected: {:?}", step.number(), err.fields);
            return Err(err);
        }

        info!("Quote wizard: step {} -> {}", step.number(), target.number());
        self.state = WizardState::Step(target);
        Ok(self.state)
    }

    /// Moves one step back without validating anything.
    pub fn back(&mut self) -> WizardState {
        if let Some(target) = self.state.step().and_then(Step::previous) {
            debug!("Quote wizard: back to step {}", target.number());
            self.state = WizardState::Step(target);
        }
        self.state
    }

    /// Hands the record over for delivery.
    ///
    /// Only the review step can submit. Anywhere else, including while a
    /// submission is already in flight, this is a silent no-op returning
    /// `Ok(None)`.
    pub fn begin_submit(&mut self) -> Result<Option<DispatchMessage>, ValidationError> {
        if self.state != WizardState::Step(Step::Review) {
            debug!("Ignoring submit while {:?}", self.state);
            return Ok(None);
        }

        for step in Step::ALL {
            validate(step, &self.request).into_result(step)?;
        }

        info!("Quote wizard: submitting");
        self.state = WizardState::Submitting;
        Ok(Some(DispatchMessage::from_request(&self.request)))
    }

    /// Settles the in-flight submission. On failure the wizard goes back to
    /// the review step with the record intact.
    pub fn finish_submit(&mut self, outcome: Result<(), SubmitError>) -> Result<(), SubmitError> {
        if self.state != WizardState::Submitting {
            warn!("Submission settled while {:?}", self.state);
            return outcome;
        }

        match outcome {
            Ok(()) => {
                info!("Quote wizard: submitted");
                self.state = WizardState::Submitted;
                Ok(())
            }
            Err(err) => {
                warn!("Quote submission failed: {}", err);
                self.state = WizardState::Step(Step::Review);
                Err(err)
            }
        }
    }
}
