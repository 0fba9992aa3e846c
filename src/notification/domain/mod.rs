//! Domain model for notifications.

mod notification;
mod templates;

pub use notification::{
    AdminNotification, Notification, NotificationId, PendingNotification, SystemNotification,
};
pub use templates::{NotificationTemplates, TemplateError};
