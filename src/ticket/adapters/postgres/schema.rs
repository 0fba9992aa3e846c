//! Diesel schema for ticket lifecycle persistence.

diesel::table! {
    /// Ticket records.
    tickets (id) {
        /// Internal ticket identifier.
        id -> Uuid,
        /// External uid the ticket was filed under.
        #[max_length = 255]
        uid -> Varchar,
        /// Submitting user.
        submitter_id -> Uuid,
        /// Catalogued error type.
        error_type_id -> Uuid,
        /// Submitter's description.
        description -> Text,
        /// Accumulated comment thread.
        comment -> Nullable<Text>,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only audit trail.
    audit_log_entries (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Ticket the entry concerns.
        ticket_id -> Uuid,
        /// Acting user.
        actor_id -> Uuid,
        /// `CREATE` or `UPDATE`.
        #[max_length = 20]
        action -> Varchar,
        /// When the action happened.
        occurred_at -> Timestamptz,
        /// Human-readable summary.
        details -> Text,
    }
}

diesel::table! {
    /// Notifications addressed to ticket submitters.
    system_notifications (id) {
        /// Notification identifier.
        id -> Uuid,
        /// Ticket the notification concerns.
        ticket_id -> Uuid,
        /// Addressed submitter.
        submitter_id -> Uuid,
        /// Ticket uid, copied for display.
        #[max_length = 255]
        uid -> Varchar,
        /// Message text.
        message -> Text,
        /// Read flag.
        is_read -> Bool,
        /// Emission timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Notifications addressed to the admin audience.
    admin_notifications (id) {
        /// Notification identifier.
        id -> Uuid,
        /// Ticket the notification concerns.
        ticket_id -> Uuid,
        /// Message text.
        message -> Text,
        /// Read flag.
        is_read -> Bool,
        /// Emission timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(audit_log_entries -> tickets (ticket_id));
diesel::joinable!(system_notifications -> tickets (ticket_id));
diesel::joinable!(admin_notifications -> tickets (ticket_id));

diesel::allow_tables_to_appear_in_same_query!(
    tickets,
    audit_log_entries,
    system_notifications,
    admin_notifications,
);
