use futures::future::LocalBoxFuture;
use log::info;

use crate::quote::dispatch::EmailDispatcher;
use crate::quote::error::SubmitError;
use crate::quote::notify::{Notice, Notifier};
use crate::quote::wizard::{Step, Wizard, WizardState};

pub const SUBMITTED_NOTICE: &str = "Solicitação enviada com sucesso! Entraremos em contato em breve.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already running, or the wizard was not on the review step.
    Ignored,
    /// The step checks failed; nothing was sent.
    Invalid,
    Delivered,
    Failed(SubmitError),
}

/// Runs quotes through an [`EmailDispatcher`], one at a time.
///
/// The wizard's `Submitting` state is the in-flight flag: while it is set,
/// [`SubmissionCoordinator::start`] neither queues nor errors, it just does
/// nothing.
pub struct SubmissionCoordinator<D> {
    dispatcher: D,
}

impl<D: EmailDispatcher> SubmissionCoordinator<D> {
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    /// Moves the wizard to `Submitting` and returns the pending delivery.
    /// `None` means nothing was dispatched. If a step check failed, the
    /// notifier gets one error naming that step.
    pub fn start(
        &self,
        wizard: &mut Wizard,
        notifier: &dyn Notifier,
    ) -> Option<LocalBoxFuture<'static, Result<(), SubmitError>>> {
        match wizard.begin_submit() {
            Ok(Some(message)) => {
                info!("Dispatching quote with {} fields", message.len());
                Some(self.dispatcher.send(message))
            }
            Ok(None) => None,
            Err(err) => {
                notifier.notify(Notice::error(err.to_string()));
                None
            }
        }
    }

    /// Applies the dispatcher's answer to the wizard and tells the user.
    pub fn finish(
        &self,
        wizard: &mut Wizard,
        outcome: Result<(), SubmitError>,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        match wizard.finish_submit(outcome) {
            Ok(()) => {
                notifier.notify(Notice::info(SUBMITTED_NOTICE));
                SubmitOutcome::Delivered
            }
            Err(err) => {
                notifier.notify(Notice::error(format!(
                    "Não foi possível enviar a solicitação ({}). Tente novamente.",
                    err
                )));
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// `start` and `finish` in one go, for callers that can hold the wizard
    /// across the await.
    pub async fn submit(&self, wizard: &mut Wizard, notifier: &dyn Notifier) -> SubmitOutcome {
        let was_submittable = wizard.state() == WizardState::Step(Step::Review);
        let Some(delivery) = self.start(wizard, notifier) else {
            return if was_submittable { SubmitOutcome::Invalid } else { SubmitOutcome::Ignored };
        };
        let outcome = delivery.await;
        self.finish(wizard, outcome, notifier)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::future::FutureExt;

    use super::*;
    use crate::quote::dispatch::DispatchMessage;
    use crate::quote::model::{AddressField, FieldUpdate, ServiceType, Urgency};
    use crate::quote::notify::NoticeLevel;

    #[derive(Default)]
    struct RecordingNotifier {
        notices: RefCell<Vec<Notice>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.borrow_mut().push(notice);
        }
    }

    /// Hands each send a channel so the test decides when it settles.
    #[derive(Clone, Default)]
    struct HeldDispatcher {
        calls: Rc<Cell<usize>>,
        sent: Rc<RefCell<Vec<DispatchMessage>>>,
        pending: Rc<RefCell<Vec<oneshot::Sender<Result<(), SubmitError>>>>>,
    }

    impl HeldDispatcher {
        fn settle(&self, outcome: Result<(), SubmitError>) {
            let sender = self.pending.borrow_mut().remove(0);
            let _ = sender.send(outcome);
        }
    }

    impl EmailDispatcher for HeldDispatcher {
        fn send(&self, message: DispatchMessage) -> LocalBoxFuture<'static, Result<(), SubmitError>> {
            self.calls.set(self.calls.get() + 1);
            self.sent.borrow_mut().push(message);
            let (tx, rx) = oneshot::channel();
            self.pending.borrow_mut().push(tx);
            async move { rx.await.unwrap_or_else(|_| Err(SubmitError::Request("dropped".into()))) }
                .boxed_local()
        }
    }

    struct ImmediateDispatcher(Result<(), SubmitError>);

    impl EmailDispatcher for ImmediateDispatcher {
        fn send(&self, _message: DispatchMessage) -> LocalBoxFuture<'static, Result<(), SubmitError>> {
            futures::future::ready(self.0.clone()).boxed_local()
        }
    }

    fn ana_at_review() -> Wizard {
        let mut wizard = Wizard::new();
        wizard.update(FieldUpdate::Name("Ana Silva".into()));
        wizard.update(FieldUpdate::Phone("(24) 99999-0000".into()));
        wizard.update(FieldUpdate::Email("ana@example.com".into()));
        wizard.next().unwrap();
        for (field, value) in [
            (AddressField::Street, "Rua Quinze de Novembro"),
            (AddressField::Number, "100"),
            (AddressField::Neighborhood, "Centro"),
            (AddressField::City, "Volta Redonda"),
            (AddressField::PostalCode, "27253-000"),
        ] {
            wizard.update(FieldUpdate::Address(field, value.into()));
        }
        wizard.next().unwrap();
        wizard.update(FieldUpdate::ServiceType(ServiceType::from_label("Manutenção elétrica")));
        wizard.update(FieldUpdate::Urgency(Urgency::from_label("Urgente")));
        wizard.next().unwrap();
        wizard
    }

    #[test]
    fn double_submit_dispatches_once() {
        let dispatcher = HeldDispatcher::default();
        let coordinator = SubmissionCoordinator::new(dispatcher.clone());
        let notifier = RecordingNotifier::default();
        let mut wizard = ana_at_review();

        let first = coordinator.start(&mut wizard, &notifier).expect("first submit dispatches");
        assert!(coordinator.start(&mut wizard, &notifier).is_none());
        assert_eq!(dispatcher.calls.get(), 1);
        assert!(notifier.notices.borrow().is_empty());

        dispatcher.settle(Ok(()));
        let outcome = block_on(first);
        assert_eq!(coordinator.finish(&mut wizard, outcome, &notifier), SubmitOutcome::Delivered);
        assert_eq!(wizard.state(), WizardState::Submitted);
        assert_eq!(dispatcher.calls.get(), 1);
    }

    #[test]
    fn ana_silva_is_sent_verbatim() {
        let dispatcher = HeldDispatcher::default();
        let coordinator = SubmissionCoordinator::new(dispatcher.clone());
        let notifier = RecordingNotifier::default();
        let mut wizard = ana_at_review();

        let delivery = coordinator.start(&mut wizard, &notifier).unwrap();
        dispatcher.settle(Ok(()));
        let outcome = block_on(delivery);
        coordinator.finish(&mut wizard, outcome, &notifier);

        let sent = dispatcher.sent.borrow();
        assert_eq!(sent.len(), 1);
        let message = &sent[0];
        assert_eq!(message.get("nome"), Some("Ana Silva"));
        assert_eq!(message.get("telefone"), Some("(24) 99999-0000"));
        assert_eq!(message.get("email"), Some("ana@example.com"));
        assert_eq!(message.get("rua"), Some("Rua Quinze de Novembro"));
        assert_eq!(message.get("numero"), Some("100"));
        assert_eq!(message.get("bairro"), Some("Centro"));
        assert_eq!(message.get("cidade"), Some("Volta Redonda"));
        assert_eq!(message.get("cep"), Some("27253-000"));
        assert_eq!(message.get("tipoServico"), Some("Manutenção elétrica"));
        assert_eq!(message.get("urgencia"), Some("Urgente"));
        assert!(!message.contains("descricao"));

        let notices = notifier.notices.borrow();
        assert_eq!(notices.as_slice(), &[Notice::info(SUBMITTED_NOTICE)]);
    }

    #[test]
    fn failure_keeps_the_record_and_allows_retry() {
        let coordinator = SubmissionCoordinator::new(ImmediateDispatcher(Err(SubmitError::Rejected {
            status: 400,
            body: "bad template".into(),
        })));
        let notifier = RecordingNotifier::default();
        let mut wizard = ana_at_review();
        let before = wizard.request().clone();

        let outcome = block_on(coordinator.submit(&mut wizard, &notifier));
        assert!(matches!(outcome, SubmitOutcome::Failed(SubmitError::Rejected { status: 400, .. })));
        assert_eq!(wizard.state(), WizardState::Step(Step::Review));
        assert_eq!(wizard.request(), &before);

        let notices = notifier.notices.borrow();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].text.contains("Tente novamente"));
        drop(notices);

        let retry = SubmissionCoordinator::new(ImmediateDispatcher(Ok(())));
        assert_eq!(block_on(retry.submit(&mut wizard, &notifier)), SubmitOutcome::Delivered);
    }

    #[test]
    fn submit_away_from_review_is_ignored() {
        let dispatcher = HeldDispatcher::default();
        let coordinator = SubmissionCoordinator::new(dispatcher.clone());
        let notifier = RecordingNotifier::default();
        let mut wizard = Wizard::new();

        assert_eq!(block_on(coordinator.submit(&mut wizard, &notifier)), SubmitOutcome::Ignored);
        assert_eq!(dispatcher.calls.get(), 0);
        assert!(notifier.notices.borrow().is_empty());
    }
}
