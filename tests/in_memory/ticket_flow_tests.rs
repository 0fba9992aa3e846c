//! End-to-end ticket flows against in-memory adapters.

use super::helpers::{FUZZY_MATCH_ANSWER, datacr_user, pre_user, seeded_service};
use qrt::{
    audit::domain::AuditAction,
    config::LifecycleConfig,
    notification::domain::Notification,
    ticket::{
        domain::{TicketId, TicketStatus},
        services::{SubmitTicketRequest, TicketFilter, TicketLifecycleError, UpdateTicketRequest},
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fuzzy_error_is_answered_then_escalated_then_resolved() -> Result<(), eyre::Report> {
    let (service, catalog) = seeded_service(LifecycleConfig::default()).await?;
    let pre = pre_user();
    let datacr = datacr_user();

    let first = service
        .submit(
            SubmitTicketRequest::new(pre, "PAN123", catalog.fuzzy_match, "Name differs")
                .with_comment("Spelling of surname"),
        )
        .await?;
    eyre::ensure!(first.status() == TicketStatus::Closed);

    let notices = service.list_notifications(pre.id()).await?;
    let answer = notices
        .first()
        .ok_or_else(|| eyre::eyre!("missing auto-resolution notice"))?;
    eyre::ensure!(answer.message().contains(FUZZY_MATCH_ANSWER));
    service.mark_notification_read(answer.id()).await?;

    let second = service
        .submit(SubmitTicketRequest::new(
            pre,
            "PAN123",
            catalog.fuzzy_match,
            "Still failing",
        ))
        .await?;
    eyre::ensure!(second.status() == TicketStatus::Escalated);
    eyre::ensure!(service.unread_notification_count(pre.id()).await? == 0);
    eyre::ensure!(service.unread_admin_notification_count().await? == 2);

    let resolved = service
        .update(
            UpdateTicketRequest::new(datacr, second.id())
                .with_comment("Corrected master record")
                .with_status(TicketStatus::Completed),
        )
        .await?;
    eyre::ensure!(resolved.status() == TicketStatus::Completed);
    eyre::ensure!(resolved.description() == "Still failing");

    let notices = service.list_notifications(pre.id()).await?;
    let resolution = notices
        .first()
        .ok_or_else(|| eyre::eyre!("missing resolution notice"))?;
    eyre::ensure!(
        resolution.message()
            == "Your ticket for UID PAN123 has been resolved. \
                DataCR Comment: \"Corrected master record\""
    );
    eyre::ensure!(!resolution.is_read());
    eyre::ensure!(service.unread_notification_count(pre.id()).await? == 1);

    let audit = service.list_audit_log(None).await?;
    let actions: Vec<AuditAction> = audit.iter().map(|entry| entry.action()).collect();
    eyre::ensure!(
        actions == vec![AuditAction::Update, AuditAction::Create, AuditAction::Create],
        "unexpected audit actions {actions:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manual_error_type_never_auto_triages() -> Result<(), eyre::Report> {
    let (service, catalog) = seeded_service(LifecycleConfig::default()).await?;
    let pre = pre_user();

    for _ in 0..3 {
        let ticket = service
            .submit(SubmitTicketRequest::new(
                pre,
                "ACC-9",
                catalog.system_error,
                "Timeout on upload",
            ))
            .await?;
        eyre::ensure!(ticket.status() == TicketStatus::InProgress);
    }

    eyre::ensure!(service.list_admin_notifications().await?.is_empty());
    eyre::ensure!(service.list_notifications(pre.id()).await?.is_empty());
    eyre::ensure!(service.list_audit_log(None).await?.len() == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn audit_count_tracks_successful_operations() -> Result<(), eyre::Report> {
    let (service, catalog) = seeded_service(LifecycleConfig::default()).await?;
    let pre = pre_user();
    let datacr = datacr_user();
    let ticket = service
        .submit(SubmitTicketRequest::new(
            pre,
            "ACC-10",
            catalog.system_error,
            "Wrong balance",
        ))
        .await?;

    let statuses = [
        TicketStatus::Escalated,
        TicketStatus::Escalated,
        TicketStatus::AwaitingNbfc,
        TicketStatus::Closed,
    ];
    for status in statuses {
        service
            .update(UpdateTicketRequest::new(datacr, ticket.id()).with_status(status))
            .await?;
    }
    let rejected = service.complete(pre, ticket.id()).await;
    eyre::ensure!(matches!(rejected, Err(TicketLifecycleError::Forbidden { .. })));

    let entries = service.list_audit_log(Some(ticket.id())).await?;
    eyre::ensure!(entries.len() == 1 + statuses.len());
    eyre::ensure!(service.list_admin_notifications().await?.len() == 1);
    eyre::ensure!(service.list_notifications(pre.id()).await?.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_queries_reflect_the_store() -> Result<(), eyre::Report> {
    let (service, catalog) = seeded_service(LifecycleConfig::default()).await?;
    let pre = pre_user();
    for uid in ["A-1", "A-2", "A-1"] {
        service
            .submit(SubmitTicketRequest::new(pre, uid, catalog.fuzzy_match, "Name"))
            .await?;
    }
    service
        .submit(SubmitTicketRequest::new(pre, "B-1", catalog.system_error, "Crash"))
        .await?;

    let escalated = service
        .list_tickets(&TicketFilter::new().with_status(TicketStatus::Escalated))
        .await?;
    eyre::ensure!(escalated.len() == 1);
    let fuzzy = service
        .list_tickets(&TicketFilter::new().with_search("fuzzy"))
        .await?;
    eyre::ensure!(fuzzy.len() == 3);

    let summary = service.summarize().await?;
    eyre::ensure!(summary.total == 4);
    eyre::ensure!(summary.in_progress == 1);
    let top = summary
        .most_frequent
        .ok_or_else(|| eyre::eyre!("missing most frequent error type"))?;
    eyre::ensure!(top.name.as_deref() == Some("Fuzzy Logic Error"));
    eyre::ensure!(top.count == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_ticket_is_not_found() -> Result<(), eyre::Report> {
    let (service, _) = seeded_service(LifecycleConfig::default()).await?;
    let missing = TicketId::new();

    let result = service
        .update(UpdateTicketRequest::new(datacr_user(), missing).with_comment("hello"))
        .await;

    eyre::ensure!(matches!(result, Err(TicketLifecycleError::NotFound(id)) if id == missing));
    eyre::ensure!(service.list_audit_log(None).await?.is_empty());
    Ok(())
}
