//! Given steps for ticket lifecycle BDD scenarios.

use super::world::{TicketWorld, run_async};
use eyre::WrapErr;
use qrt::{
    catalog::{
        domain::{AutomatedMessage, ErrorType},
        ports::CatalogRepository,
    },
    config::LifecycleConfig,
    ticket::services::SubmitTicketRequest,
};
use rstest_bdd_macros::given;

fn register_error_type(world: &mut TicketWorld, name: &str) -> Result<ErrorType, eyre::Report> {
    let error_type = ErrorType::new(name, format!("{name} reported by submitters"))?;
    run_async(world.catalog.register_error_type(&error_type))
        .wrap_err("register error type for scenario")?;
    world.error_types.insert(name.to_owned(), error_type.id());
    Ok(error_type)
}

#[given(r#"the catalog has manual error type "{name}""#)]
fn catalog_has_error_type(world: &mut TicketWorld, name: String) -> Result<(), eyre::Report> {
    register_error_type(world, &name)?;
    Ok(())
}

#[given(r#"the catalog has error type "{name}" with automated message "{message}""#)]
fn catalog_has_automated_error_type(
    world: &mut TicketWorld,
    name: String,
    message: String,
) -> Result<(), eyre::Report> {
    let error_type = register_error_type(world, &name)?;
    let automated = AutomatedMessage::new(error_type.id(), message)?;
    run_async(world.catalog.register_automated_message(&automated))
        .wrap_err("register automated message for scenario")?;
    Ok(())
}

#[given("the lifecycle uses the strict transition policy")]
fn strict_policy(world: &mut TicketWorld) {
    world.reconfigure(LifecycleConfig::strict());
}

#[given(r#"the submitter has filed a ticket for UID "{uid}" against "{error_type}""#)]
fn submitter_has_filed(
    world: &mut TicketWorld,
    uid: String,
    error_type: String,
) -> Result<(), eyre::Report> {
    let error_type_id = world.error_type(&error_type)?;
    let request = SubmitTicketRequest::new(world.submitter, uid, error_type_id, "Seen at login");
    let ticket = run_async(world.service.submit(request)).wrap_err("file ticket in setup")?;
    world.last_ticket = Some(ticket);
    Ok(())
}
