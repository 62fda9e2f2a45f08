mod support;

use appointmentDesk::app::Route;
use appointmentDesk::controllers::CloseReason;
use appointmentDesk::error::{GatewayError, SubmitError, ValidationError};
use appointmentDesk::forms::{ParticipantDraft, ParticipantField};
use appointmentDesk::models::ParticipantPayload;
use appointmentDesk::pages::{DeleteOutcome, ParticipantsPage};
use support::{Call, FakeGateway, ScriptedPrompter, participant};

#[tokio::test]
async fn create_participant_refetches_before_navigation() {
    let gateway = FakeGateway::default();
    let mut page = ParticipantsPage::new();
    page.load(&gateway).await.unwrap();
    page.open_create();
    page.set_field(ParticipantField::Name, "Ann");
    page.set_field(ParticipantField::Email, "ann@x.com");

    let route = page.submit(&gateway).await.unwrap();
    assert_eq!(route, Some(Route::Participants));
    assert_eq!(
        gateway.calls(),
        vec![
            Call::ListParticipants,
            Call::CreateParticipant(ParticipantPayload {
                name: "Ann".into(),
                email: "ann@x.com".into(),
            }),
            Call::ListParticipants,
        ]
    );
    assert_eq!(page.list().rows().len(), 1);
    assert!(!page.drawer().is_open());
}

#[tokio::test]
async fn invalid_email_blocks_submission() {
    let gateway = FakeGateway::default();
    let mut page = ParticipantsPage::new();
    page.open_create();
    page.set_field(ParticipantField::Name, "Ann");
    page.set_field(ParticipantField::Email, "ann");

    let result = page.submit(&gateway).await;
    assert!(matches!(
        result,
        Err(SubmitError::Validation(ValidationError::InvalidEmail("Email")))
    ));
    assert!(gateway.calls().is_empty());
    assert_eq!(page.drawer().error(), Some("Email must be a valid email address."));
}

#[tokio::test]
async fn backend_message_is_shown_and_cleared_by_cancel() {
    let gateway = FakeGateway::default();
    let mut page = ParticipantsPage::new();
    page.open_create();
    page.set_field(ParticipantField::Name, "Ann");
    page.set_field(ParticipantField::Email, "ann@x.com");
    gateway.fail_next_mutation(GatewayError::Http {
        status: 422,
        message: "Email invalid".into(),
    });

    assert!(page.submit(&gateway).await.is_err());
    assert_eq!(page.drawer().error(), Some("Email invalid"));
    assert_eq!(page.drawer().draft().name, "Ann");

    page.close(CloseReason::Cancel);
    page.open_create();
    assert_eq!(page.drawer().error(), None);
    assert_eq!(page.drawer().draft(), &ParticipantDraft::default());
}

#[tokio::test]
async fn declined_delete_issues_no_call() {
    let gateway = FakeGateway::with_participants(vec![participant(1, "Ann"), participant(2, "Bo")]);
    let prompter = ScriptedPrompter::answering(false);
    let mut page = ParticipantsPage::new();
    page.load(&gateway).await.unwrap();

    let outcome = page.remove(&gateway, &prompter, 2).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(
        prompter.confirms(),
        vec!["Are you sure you want to delete this participant \"Bo\"?".to_string()]
    );
    assert_eq!(gateway.calls(), vec![Call::ListParticipants]);
    assert_eq!(page.list().rows().len(), 2);
}

#[tokio::test]
async fn confirmed_delete_reloads_collection() {
    let gateway = FakeGateway::with_participants(vec![participant(1, "Ann"), participant(2, "Bo")]);
    let prompter = ScriptedPrompter::answering(true);
    let mut page = ParticipantsPage::new();
    page.load(&gateway).await.unwrap();

    let outcome = page.remove(&gateway, &prompter, 1).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(
        gateway.calls(),
        vec![
            Call::ListParticipants,
            Call::DeleteParticipant(1),
            Call::ListParticipants,
        ]
    );
    let names: Vec<&str> = page.list().rows().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Bo"]);
}

#[tokio::test]
async fn failed_delete_alerts_and_keeps_rows() {
    let gateway = FakeGateway::with_participants(vec![participant(1, "Ann")]);
    let prompter = ScriptedPrompter::answering(true);
    let mut page = ParticipantsPage::new();
    page.load(&gateway).await.unwrap();
    gateway.fail_next_mutation(GatewayError::Http {
        status: 500,
        message: "Failed to delete participant.".into(),
    });

    let result = page.remove(&gateway, &prompter, 1).await;
    assert!(result.is_err());
    assert_eq!(prompter.alerts(), vec!["Failed to delete participant.".to_string()]);
    assert_eq!(page.list().rows().len(), 1);
    assert_eq!(
        gateway.calls(),
        vec![Call::ListParticipants, Call::DeleteParticipant(1)]
    );
}
