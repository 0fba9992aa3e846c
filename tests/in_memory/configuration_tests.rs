//! Behaviour driven by TOML configuration.

use super::helpers::{datacr_user, pre_user, seeded_service};
use qrt::{
    config::LifecycleConfig,
    ticket::{
        domain::{TicketDomainError, TicketStatus},
        services::{SubmitTicketRequest, TicketLifecycleError, UpdateTicketRequest},
    },
};
use rstest::rstest;

const CUSTOM_CONFIG: &str = r#"
transition_policy = "strict"

[templates]
admin_escalated = "Escalation: {{ uid }}"
submitter_resolved = "{{ uid }} done ({{ comment }})"
comment_placeholder = "n/a"
"#;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn custom_templates_shape_notifications() -> Result<(), eyre::Report> {
    let config = LifecycleConfig::from_toml_str(CUSTOM_CONFIG)?;
    let (service, catalog) = seeded_service(config).await?;
    let pre = pre_user();
    let datacr = datacr_user();
    let ticket = service
        .submit(SubmitTicketRequest::new(
            pre,
            "CFG-1",
            catalog.system_error,
            "Export stalls",
        ))
        .await?;

    service
        .update(UpdateTicketRequest::new(datacr, ticket.id()).with_status(TicketStatus::Escalated))
        .await?;
    service.complete(datacr, ticket.id()).await?;

    let admin = service.list_admin_notifications().await?;
    eyre::ensure!(admin.first().map(|item| item.message()) == Some("Escalation: CFG-1"));
    let notices = service.list_notifications(pre.id()).await?;
    eyre::ensure!(notices.first().map(|item| item.message()) == Some("CFG-1 done (n/a)"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strict_configuration_blocks_leaving_completed() -> Result<(), eyre::Report> {
    let config = LifecycleConfig::from_toml_str(CUSTOM_CONFIG)?;
    let (service, catalog) = seeded_service(config).await?;
    let datacr = datacr_user();
    let ticket = service
        .submit(SubmitTicketRequest::new(
            pre_user(),
            "CFG-2",
            catalog.system_error,
            "Export stalls",
        ))
        .await?;
    service.complete(datacr, ticket.id()).await?;

    let result = service
        .update(
            UpdateTicketRequest::new(datacr, ticket.id()).with_status(TicketStatus::AwaitingNbfc),
        )
        .await;

    eyre::ensure!(matches!(
        result,
        Err(TicketLifecycleError::Domain(
            TicketDomainError::InvalidStatusTransition { .. }
        ))
    ));
    let reopened = service
        .update(UpdateTicketRequest::new(datacr, ticket.id()).with_status(TicketStatus::Escalated))
        .await?;
    eyre::ensure!(reopened.status() == TicketStatus::Escalated);
    Ok(())
}
