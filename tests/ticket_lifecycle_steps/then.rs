//! Then steps for ticket lifecycle BDD scenarios.

use super::world::{TicketWorld, run_async};
use qrt::ticket::{
    domain::{TicketDomainError, TicketStatus},
    services::TicketLifecycleError,
};
use rstest_bdd_macros::then;

#[then(r#"the ticket status is "{status}""#)]
fn ticket_status_is(world: &TicketWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TicketStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let stored = run_async(world.service.get_ticket(world.ticket()?.id()))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("the submitter has {count:usize} unread {noun}")]
fn submitter_unread_count(
    world: &TicketWorld,
    count: usize,
    noun: String,
) -> Result<(), eyre::Report> {
    eyre::ensure!(noun.starts_with("notification"), "unexpected noun {noun}");
    let unread = run_async(
        world
            .service
            .unread_notification_count(world.submitter.id()),
    )?;
    eyre::ensure!(unread == count, "expected {count} unread, found {unread}");
    Ok(())
}

#[then("the admin feed has {count:usize} unread {noun}")]
fn admin_unread_count(world: &TicketWorld, count: usize, noun: String) -> Result<(), eyre::Report> {
    eyre::ensure!(noun.starts_with("notification"), "unexpected noun {noun}");
    let unread = run_async(world.service.unread_admin_notification_count())?;
    eyre::ensure!(unread == count, "expected {count} unread, found {unread}");
    Ok(())
}

#[then(r#"the latest admin notification reads "{message}""#)]
fn latest_admin_notification(world: &TicketWorld, message: String) -> Result<(), eyre::Report> {
    let feed = run_async(world.service.list_admin_notifications())?;
    let latest = feed
        .first()
        .ok_or_else(|| eyre::eyre!("admin feed is empty"))?;
    eyre::ensure!(
        latest.message() == message,
        "expected {message:?}, found {:?}",
        latest.message()
    );
    Ok(())
}

#[then(r#"the latest submitter notification mentions "{text}""#)]
fn latest_submitter_notification(world: &TicketWorld, text: String) -> Result<(), eyre::Report> {
    let feed = run_async(world.service.list_notifications(world.submitter.id()))?;
    let latest = feed
        .first()
        .ok_or_else(|| eyre::eyre!("submitter feed is empty"))?;
    eyre::ensure!(
        latest.message().contains(&text),
        "expected {text:?} in {:?}",
        latest.message()
    );
    Ok(())
}

#[then("the audit trail for the ticket has {count:usize} entries")]
fn audit_trail_length(world: &TicketWorld, count: usize) -> Result<(), eyre::Report> {
    let entries = run_async(world.service.list_audit_log(Some(world.ticket()?.id())))?;
    eyre::ensure!(
        entries.len() == count,
        "expected {count} audit entries, found {}",
        entries.len()
    );
    Ok(())
}

#[then("the update is rejected as forbidden")]
fn update_forbidden(world: &TicketWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_update_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))?;

    if !matches!(result, Err(TicketLifecycleError::Forbidden { .. })) {
        return Err(eyre::eyre!("expected Forbidden error, got {result:?}"));
    }
    Ok(())
}

#[then("the update is rejected as an invalid transition")]
fn update_invalid_transition(world: &TicketWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_update_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))?;

    if !matches!(
        result,
        Err(TicketLifecycleError::Domain(
            TicketDomainError::InvalidStatusTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidStatusTransition error, got {result:?}"
        ));
    }
    Ok(())
}
