//! When steps for ticket lifecycle BDD scenarios.

use super::world::{TicketWorld, run_async};
use eyre::WrapErr;
use qrt::ticket::{
    domain::{Actor, TicketStatus},
    services::{SubmitTicketRequest, UpdateTicketRequest},
};
use rstest_bdd_macros::when;

#[when(r#"the submitter files a ticket for UID "{uid}" against "{error_type}""#)]
fn submitter_files(
    world: &mut TicketWorld,
    uid: String,
    error_type: String,
) -> Result<(), eyre::Report> {
    let error_type_id = world.error_type(&error_type)?;
    let request = SubmitTicketRequest::new(world.submitter, uid, error_type_id, "Seen again");
    let ticket = run_async(world.service.submit(request)).wrap_err("file ticket")?;
    world.last_ticket = Some(ticket);
    Ok(())
}

fn apply_update(
    world: &mut TicketWorld,
    actor: Actor,
    status_label: &str,
    comment: Option<String>,
) -> Result<(), eyre::Report> {
    let status = TicketStatus::try_from(status_label)
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let mut request = UpdateTicketRequest::new(actor, world.ticket()?.id()).with_status(status);
    if let Some(text) = comment {
        request = request.with_comment(text);
    }

    let result = run_async(world.service.update(request));
    if let Ok(ref updated) = result {
        world.last_ticket = Some(updated.clone());
    }
    world.last_update_result = Some(result);
    Ok(())
}

#[when(r#"a resolver sets the ticket to "{status}""#)]
fn resolver_sets_status(world: &mut TicketWorld, status: String) -> Result<(), eyre::Report> {
    let resolver = world.resolver;
    apply_update(world, resolver, &status, None)
}

#[when(r#"a resolver comments "{comment}" and sets the ticket to "{status}""#)]
fn resolver_comments_and_sets_status(
    world: &mut TicketWorld,
    comment: String,
    status: String,
) -> Result<(), eyre::Report> {
    let resolver = world.resolver;
    apply_update(world, resolver, &status, Some(comment))
}

#[when(r#"the submitter sets the ticket to "{status}""#)]
fn submitter_sets_status(world: &mut TicketWorld, status: String) -> Result<(), eyre::Report> {
    let submitter = world.submitter;
    apply_update(world, submitter, &status, None)
}
