//! Message templates for lifecycle notifications.
//!
//! Templates use `minijinja` syntax. The variables available are `uid`,
//! `message` (automated resolution text) and `comment` (resolver comment,
//! already replaced by the placeholder when absent).

use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a notification template cannot be rendered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render notification template '{template}': {reason}")]
pub struct TemplateError {
    /// Name of the failing template.
    pub template: &'static str,
    /// Renderer diagnostic.
    pub reason: String,
}

/// Wording of every notification the lifecycle engine emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationTemplates {
    /// Admin notice for a first-occurrence submission.
    pub admin_created: String,
    /// Admin notice for a re-submission that escalated.
    pub admin_resubmitted: String,
    /// Admin notice for an update that moved a ticket to escalated.
    pub admin_escalated: String,
    /// Submitter notice carrying the automated resolution text.
    pub submitter_auto_resolved: String,
    /// Submitter notice for a ticket forwarded to the NBFC team.
    pub submitter_awaiting_nbfc: String,
    /// Submitter notice for a completed or closed ticket.
    pub submitter_resolved: String,
    /// Stand-in text when a ticket has no resolver comment.
    pub comment_placeholder: String,
}

impl Default for NotificationTemplates {
    fn default() -> Self {
        Self {
            admin_created: "New ticket from UID {{ uid }} was created.".to_owned(),
            admin_resubmitted:
                "Ticket for UID {{ uid }} was re-submitted and has been escalated.".to_owned(),
            admin_escalated: "Ticket for UID {{ uid }} has been escalated.".to_owned(),
            submitter_auto_resolved: "Ticket for UID {{ uid }}: {{ message }}".to_owned(),
            submitter_awaiting_nbfc: concat!(
                "Your ticket for UID {{ uid }} has been forwarded to the NBFC support team. ",
                "DataCR Comment: \"{{ comment }}\""
            )
            .to_owned(),
            submitter_resolved: concat!(
                "Your ticket for UID {{ uid }} has been resolved. ",
                "DataCR Comment: \"{{ comment }}\""
            )
            .to_owned(),
            comment_placeholder: "No comment provided.".to_owned(),
        }
    }
}

impl NotificationTemplates {
    /// Renders the admin notice for a first-occurrence submission.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the template is malformed.
    pub fn render_admin_created(&self, uid: &str) -> Result<String, TemplateError> {
        render("admin_created", &self.admin_created, uid, "", "")
    }

    /// Renders the admin notice for an escalating re-submission.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the template is malformed.
    pub fn render_admin_resubmitted(&self, uid: &str) -> Result<String, TemplateError> {
        render("admin_resubmitted", &self.admin_resubmitted, uid, "", "")
    }

    /// Renders the admin notice for an escalating update.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the template is malformed.
    pub fn render_admin_escalated(&self, uid: &str) -> Result<String, TemplateError> {
        render("admin_escalated", &self.admin_escalated, uid, "", "")
    }

    /// Renders the submitter notice carrying the automated resolution.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the template is malformed.
    pub fn render_submitter_auto_resolved(
        &self,
        uid: &str,
        message: &str,
    ) -> Result<String, TemplateError> {
        render(
            "submitter_auto_resolved",
            &self.submitter_auto_resolved,
            uid,
            message,
            "",
        )
    }

    /// Renders the submitter notice for a ticket forwarded to NBFC.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the template is malformed.
    pub fn render_submitter_awaiting_nbfc(
        &self,
        uid: &str,
        comment: Option<&str>,
    ) -> Result<String, TemplateError> {
        render(
            "submitter_awaiting_nbfc",
            &self.submitter_awaiting_nbfc,
            uid,
            "",
            self.comment_or_placeholder(comment),
        )
    }

    /// Renders the submitter notice for a resolved ticket.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the template is malformed.
    pub fn render_submitter_resolved(
        &self,
        uid: &str,
        comment: Option<&str>,
    ) -> Result<String, TemplateError> {
        render(
            "submitter_resolved",
            &self.submitter_resolved,
            uid,
            "",
            self.comment_or_placeholder(comment),
        )
    }

    /// Renders every template once against sample values.
    ///
    /// # Errors
    ///
    /// Returns the first [`TemplateError`] encountered.
    pub fn validate(&self) -> Result<(), TemplateError> {
        self.render_admin_created("UID0")?;
        self.render_admin_resubmitted("UID0")?;
        self.render_admin_escalated("UID0")?;
        self.render_submitter_auto_resolved("UID0", "sample")?;
        self.render_submitter_awaiting_nbfc("UID0", None)?;
        self.render_submitter_resolved("UID0", Some("sample"))?;
        Ok(())
    }

    fn comment_or_placeholder<'a>(&'a self, comment: Option<&'a str>) -> &'a str {
        comment
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(&self.comment_placeholder)
    }
}

fn render(
    name: &'static str,
    template: &str,
    uid: &str,
    message: &str,
    comment: &str,
) -> Result<String, TemplateError> {
    let environment = Environment::new();
    environment
        .render_str(template, context! { uid, message, comment })
        .map_err(|error| TemplateError {
            template: name,
            reason: error.to_string(),
        })
}
