//! `PostgreSQL` round-trips through the ticket lifecycle service.
//!
//! These tests need a live database and are ignored by default. Run them
//! with `QRT_TEST_DATABASE_URL` set and `cargo test -- --ignored`.

use mockable::DefaultClock;
use qrt::{
    audit::{domain::AuditLogEntry, ports::AuditLogRepository},
    notification::{
        domain::{AdminNotification, Notification, PendingNotification, SystemNotification},
        ports::NotificationRepository,
    },
    ticket::{
        domain::{Actor, PersistedTicketData, Role, Ticket, TicketId, TicketStatus, UserId},
        ports::{CommitKind, TicketCommit, TicketRepository, TicketRepositoryError},
        services::{SubmitTicketRequest, TicketLifecycleError, UpdateTicketRequest},
    },
};
use rstest::rstest;

use crate::postgres::helpers::{BoxError, PgContext, context};

fn create_commit(ticket: &Ticket) -> TicketCommit {
    TicketCommit {
        ticket: ticket.clone(),
        kind: CommitKind::Create,
        audit_entry: AuditLogEntry::created(
            ticket.id(),
            ticket.submitter_id(),
            ticket.uid(),
            ticket.status(),
            &DefaultClock,
        ),
        notifications: vec![
            PendingNotification::System(SystemNotification::new(ticket, "auto", &DefaultClock)),
            PendingNotification::Admin(AdminNotification::new(
                ticket.id(),
                "created",
                &DefaultClock,
            )),
        ],
    }
}

#[rstest]
#[ignore = "requires QRT_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn submission_persists_ticket_audit_and_notifications(
    #[future] context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let pre = Actor::new(UserId::new(), Role::Pre);

    let ticket = ctx
        .service
        .submit(SubmitTicketRequest::new(pre, "PG-1", ctx.automated, "Name differs"))
        .await?;

    let stored = ctx.store.find_by_id(ticket.id()).await?;
    assert_eq!(stored.map(|item| item.status()), Some(TicketStatus::Closed));
    assert_eq!(ctx.store.list_entries_for_ticket(ticket.id()).await?.len(), 1);
    let notices = ctx.service.list_notifications(pre.id()).await?;
    assert_eq!(notices.len(), 1);
    assert_eq!(ctx.service.list_admin_notifications().await?.len(), 1);

    let resubmitted = ctx
        .service
        .submit(SubmitTicketRequest::new(pre, "PG-1", ctx.automated, "Again"))
        .await?;
    assert_eq!(resubmitted.status(), TicketStatus::Escalated);
    Ok(())
}

#[rstest]
#[ignore = "requires QRT_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn updates_accumulate_comments_and_mark_reads(
    #[future] context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let pre = Actor::new(UserId::new(), Role::Pre);
    let datacr = Actor::new(UserId::new(), Role::DataCr);
    let ticket = ctx
        .service
        .submit(SubmitTicketRequest::new(pre, "PG-2", ctx.manual, "Crash"))
        .await?;

    ctx.service
        .update(UpdateTicketRequest::new(datacr, ticket.id()).with_comment("first"))
        .await?;
    let updated = ctx
        .service
        .update(
            UpdateTicketRequest::new(datacr, ticket.id())
                .with_comment("second")
                .with_status(TicketStatus::Completed),
        )
        .await?;

    let stored = ctx
        .store
        .find_by_id(ticket.id())
        .await?
        .ok_or("ticket missing after update")?;
    assert_eq!(stored.comment(), Some("first\n---\nsecond"));
    assert_eq!(stored.status(), updated.status());
    assert_eq!(stored.description(), "Crash");

    let notice = ctx
        .service
        .list_notifications(pre.id())
        .await?
        .into_iter()
        .next()
        .ok_or("missing resolution notice")?;
    ctx.service.mark_notification_read(notice.id()).await?;
    assert_eq!(ctx.service.unread_notification_count(pre.id()).await?, 0);
    assert_eq!(ctx.service.list_audit_log(Some(ticket.id())).await?.len(), 3);
    Ok(())
}

#[rstest]
#[ignore = "requires QRT_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn updating_a_missing_ticket_writes_nothing(
    #[future] context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let admin = Actor::new(UserId::new(), Role::Admin);

    let result = ctx.service.complete(admin, TicketId::new()).await;

    assert!(matches!(result, Err(TicketLifecycleError::NotFound(_))));
    assert!(ctx.store.list_entries().await?.is_empty());
    Ok(())
}

#[rstest]
#[ignore = "requires QRT_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_create_rolls_back_audit_and_notifications(
    #[future] context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let pre = Actor::new(UserId::new(), Role::Pre);
    let ticket = ctx
        .service
        .submit(SubmitTicketRequest::new(pre, "PG-3", ctx.automated, "Name differs"))
        .await?;

    let result = ctx.store.commit(&create_commit(&ticket)).await;

    assert!(matches!(
        result,
        Err(TicketRepositoryError::DuplicateTicket(id)) if id == ticket.id()
    ));
    assert_eq!(ctx.store.list_entries().await?.len(), 1);
    assert_eq!(ctx.store.list_for_submitter(pre.id()).await?.len(), 1);
    assert_eq!(ctx.store.list_admin().await?.len(), 1);
    Ok(())
}

#[rstest]
#[ignore = "requires QRT_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn update_commit_for_unknown_ticket_writes_nothing(
    #[future] context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let pre = Actor::new(UserId::new(), Role::Pre);
    let stored = ctx
        .service
        .submit(SubmitTicketRequest::new(pre, "PG-4", ctx.automated, "Name differs"))
        .await?;
    let unknown = Ticket::from_persisted(PersistedTicketData {
        id: TicketId::new(),
        uid: stored.uid().clone(),
        submitter_id: stored.submitter_id(),
        error_type_id: stored.error_type_id(),
        description: stored.description().to_owned(),
        comment: None,
        status: TicketStatus::Completed,
        created_at: stored.created_at(),
        updated_at: stored.updated_at(),
    });
    let mut commit = create_commit(&unknown);
    commit.kind = CommitKind::Update;

    let result = ctx.store.commit(&commit).await;

    assert!(matches!(
        result,
        Err(TicketRepositoryError::NotFound(id)) if id == unknown.id()
    ));
    assert_eq!(ctx.store.list_entries().await?.len(), 1);
    assert_eq!(ctx.store.list_for_submitter(pre.id()).await?.len(), 1);
    assert_eq!(ctx.store.list_admin().await?.len(), 1);
    Ok(())
}
