//! `PostgreSQL` store implementation for tickets, audit entries and
//! notifications.

use super::{
    models::{
        AdminNotificationRow, AuditRow, NewTicketRow, SystemNotificationRow, TicketChangeset,
        TicketRow,
    },
    schema::{admin_notifications, audit_log_entries, system_notifications, tickets},
};
use crate::audit::{
    domain::{AuditAction, AuditEntryId, AuditLogEntry},
    ports::{AuditLogRepository, AuditRepositoryError, AuditRepositoryResult},
};
use crate::catalog::domain::ErrorTypeId;
use crate::notification::{
    domain::{
        AdminNotification, Notification, NotificationId, PendingNotification, SystemNotification,
    },
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::ticket::{
    domain::{PersistedTicketData, Ticket, TicketId, TicketStatus, Uid, UserId},
    ports::{
        CommitKind, TicketCommit, TicketRepository, TicketRepositoryError, TicketRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// `PostgreSQL` connection pool type used by ticket adapters.
pub type TicketPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed ticket store.
#[derive(Debug, Clone)]
pub struct PostgresTicketStore {
    pool: TicketPgPool,
}

/// Error types that can wrap pool and worker-thread failures.
trait PersistenceFailure {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

impl PersistenceFailure for TicketRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for AuditRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for NotificationRepositoryError {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PostgresTicketStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TicketPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: PersistenceFailure + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(E::from_failure)?;
            f(&mut connection)
        })
        .await
        .map_err(E::from_failure)?
    }
}

/// Rows written by one commit.
#[derive(Debug, Clone)]
pub(super) struct CommitRows {
    pub(super) kind: CommitKind,
    pub(super) ticket: NewTicketRow,
    pub(super) audit: AuditRow,
    pub(super) system: Vec<SystemNotificationRow>,
    pub(super) admin: Vec<AdminNotificationRow>,
}

impl CommitRows {
    pub(super) fn from_commit(commit: &TicketCommit) -> Self {
        let mut system = Vec::new();
        let mut admin = Vec::new();
        for notification in &commit.notifications {
            match notification {
                PendingNotification::System(item) => system.push(system_to_row(item)),
                PendingNotification::Admin(item) => admin.push(admin_to_row(item)),
            }
        }
        Self {
            kind: commit.kind,
            ticket: ticket_to_row(&commit.ticket),
            audit: audit_to_row(&commit.audit_entry),
            system,
            admin,
        }
    }

    fn write(&self, connection: &mut PgConnection) -> QueryResult<()> {
        match self.kind {
            CommitKind::Create => {
                diesel::insert_into(tickets::table)
                    .values(&self.ticket)
                    .execute(connection)?;
            }
            CommitKind::Update => {
                let changeset = TicketChangeset {
                    comment: self.ticket.comment.clone(),
                    status: self.ticket.status.clone(),
                    updated_at: self.ticket.updated_at,
                };
                let changed = diesel::update(tickets::table.find(self.ticket.id))
                    .set(&changeset)
                    .execute(connection)?;
                if changed == 0 {
                    return Err(DieselError::NotFound);
                }
            }
        }
        diesel::insert_into(audit_log_entries::table)
            .values(&self.audit)
            .execute(connection)?;
        if !self.system.is_empty() {
            diesel::insert_into(system_notifications::table)
                .values(&self.system)
                .execute(connection)?;
        }
        if !self.admin.is_empty() {
            diesel::insert_into(admin_notifications::table)
                .values(&self.admin)
                .execute(connection)?;
        }
        Ok(())
    }
}

#[async_trait]
impl TicketRepository for PostgresTicketStore {
    async fn commit(&self, commit: &TicketCommit) -> TicketRepositoryResult<()> {
        let ticket_id = commit.ticket.id();
        let rows = CommitRows::from_commit(commit);

        self.run_blocking(move |connection| {
            connection
                .transaction(|transaction| rows.write(transaction))
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
                        if rows.kind == CommitKind::Create =>
                    {
                        TicketRepositoryError::DuplicateTicket(ticket_id)
                    }
                    DieselError::NotFound => TicketRepositoryError::NotFound(ticket_id),
                    _ => TicketRepositoryError::persistence(err),
                })?;
            debug!(ticket_id = %ticket_id, kind = ?rows.kind, "ticket commit applied");
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TicketId) -> TicketRepositoryResult<Option<Ticket>> {
        self.run_blocking(move |connection| {
            let row = tickets::table
                .find(id.into_inner())
                .select(TicketRow::as_select())
                .first::<TicketRow>(connection)
                .optional()
                .map_err(TicketRepositoryError::persistence)?;
            row.map(row_to_ticket).transpose()
        })
        .await
    }

    async fn list_all(&self) -> TicketRepositoryResult<Vec<Ticket>> {
        self.run_blocking(move |connection| {
            tickets::table
                .order((tickets::created_at.desc(), tickets::id.desc()))
                .select(TicketRow::as_select())
                .load::<TicketRow>(connection)
                .map_err(TicketRepositoryError::persistence)?
                .into_iter()
                .map(row_to_ticket)
                .collect()
        })
        .await
    }

    async fn find_by_uid_and_error_type(
        &self,
        uid: &Uid,
        error_type_id: ErrorTypeId,
    ) -> TicketRepositoryResult<Vec<Ticket>> {
        let lookup_uid = uid.as_str().to_owned();
        self.run_blocking(move |connection| {
            tickets::table
                .filter(tickets::uid.eq(lookup_uid))
                .filter(tickets::error_type_id.eq(error_type_id.into_inner()))
                .order(tickets::created_at.desc())
                .select(TicketRow::as_select())
                .load::<TicketRow>(connection)
                .map_err(TicketRepositoryError::persistence)?
                .into_iter()
                .map(row_to_ticket)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl AuditLogRepository for PostgresTicketStore {
    async fn list_entries(&self) -> AuditRepositoryResult<Vec<AuditLogEntry>> {
        self.run_blocking(move |connection| {
            audit_log_entries::table
                .order(audit_log_entries::occurred_at.desc())
                .select(AuditRow::as_select())
                .load::<AuditRow>(connection)
                .map_err(AuditRepositoryError::persistence)?
                .into_iter()
                .map(row_to_audit)
                .collect()
        })
        .await
    }

    async fn list_entries_for_ticket(
        &self,
        ticket_id: TicketId,
    ) -> AuditRepositoryResult<Vec<AuditLogEntry>> {
        self.run_blocking(move |connection| {
            audit_log_entries::table
                .filter(audit_log_entries::ticket_id.eq(ticket_id.into_inner()))
                .order(audit_log_entries::occurred_at.desc())
                .select(AuditRow::as_select())
                .load::<AuditRow>(connection)
                .map_err(AuditRepositoryError::persistence)?
                .into_iter()
                .map(row_to_audit)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl NotificationRepository for PostgresTicketStore {
    async fn list_for_submitter(
        &self,
        submitter_id: UserId,
    ) -> NotificationRepositoryResult<Vec<SystemNotification>> {
        self.run_blocking(move |connection| {
            system_notifications::table
                .filter(system_notifications::submitter_id.eq(submitter_id.into_inner()))
                .order(system_notifications::created_at.desc())
                .select(SystemNotificationRow::as_select())
                .load::<SystemNotificationRow>(connection)
                .map_err(NotificationRepositoryError::persistence)?
                .into_iter()
                .map(row_to_system)
                .collect()
        })
        .await
    }

    async fn list_admin(&self) -> NotificationRepositoryResult<Vec<AdminNotification>> {
        self.run_blocking(move |connection| {
            let rows = admin_notifications::table
                .order(admin_notifications::created_at.desc())
                .select(AdminNotificationRow::as_select())
                .load::<AdminNotificationRow>(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_admin).collect())
        })
        .await
    }

    async fn count_unread_for_submitter(
        &self,
        submitter_id: UserId,
    ) -> NotificationRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let count = system_notifications::table
                .filter(system_notifications::submitter_id.eq(submitter_id.into_inner()))
                .filter(system_notifications::is_read.eq(false))
                .count()
                .get_result::<i64>(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            usize::try_from(count).map_err(NotificationRepositoryError::persistence)
        })
        .await
    }

    async fn count_unread_admin(&self) -> NotificationRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let count = admin_notifications::table
                .filter(admin_notifications::is_read.eq(false))
                .count()
                .get_result::<i64>(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            usize::try_from(count).map_err(NotificationRepositoryError::persistence)
        })
        .await
    }

    async fn mark_system_read(&self, id: NotificationId) -> NotificationRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let changed = diesel::update(system_notifications::table.find(id.into_inner()))
                .set(system_notifications::is_read.eq(true))
                .execute(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            if changed == 0 {
                return Err(NotificationRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn mark_admin_read(&self, id: NotificationId) -> NotificationRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let changed = diesel::update(admin_notifications::table.find(id.into_inner()))
                .set(admin_notifications::is_read.eq(true))
                .execute(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            if changed == 0 {
                return Err(NotificationRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

pub(super) fn ticket_to_row(ticket: &Ticket) -> NewTicketRow {
    NewTicketRow {
        id: ticket.id().into_inner(),
        uid: ticket.uid().as_str().to_owned(),
        submitter_id: ticket.submitter_id().into_inner(),
        error_type_id: ticket.error_type_id().into_inner(),
        description: ticket.description().to_owned(),
        comment: ticket.comment().map(str::to_owned),
        status: ticket.status().as_str().to_owned(),
        created_at: ticket.created_at(),
        updated_at: ticket.updated_at(),
    }
}

pub(super) fn row_to_ticket(row: TicketRow) -> TicketRepositoryResult<Ticket> {
    let TicketRow {
        id,
        uid: persisted_uid,
        submitter_id,
        error_type_id,
        description,
        comment,
        status: persisted_status,
        created_at,
        updated_at,
    } = row;

    let uid = Uid::new(persisted_uid).map_err(TicketRepositoryError::persistence)?;
    let status = TicketStatus::try_from(persisted_status.as_str())
        .map_err(TicketRepositoryError::persistence)?;

    Ok(Ticket::from_persisted(PersistedTicketData {
        id: TicketId::from_uuid(id),
        uid,
        submitter_id: UserId::from_uuid(submitter_id),
        error_type_id: ErrorTypeId::from_uuid(error_type_id),
        description,
        comment,
        status,
        created_at,
        updated_at,
    }))
}

pub(super) fn audit_to_row(entry: &AuditLogEntry) -> AuditRow {
    AuditRow {
        id: entry.id().into_inner(),
        ticket_id: entry.ticket_id().into_inner(),
        actor_id: entry.actor_id().into_inner(),
        action: entry.action().as_str().to_owned(),
        occurred_at: entry.timestamp(),
        details: entry.details().to_owned(),
    }
}

pub(super) fn row_to_audit(row: AuditRow) -> AuditRepositoryResult<AuditLogEntry> {
    let action =
        AuditAction::try_from(row.action.as_str()).map_err(AuditRepositoryError::persistence)?;
    Ok(AuditLogEntry::from_persisted(
        AuditEntryId::from_uuid(row.id),
        TicketId::from_uuid(row.ticket_id),
        UserId::from_uuid(row.actor_id),
        action,
        row.occurred_at,
        row.details,
    ))
}

pub(super) fn system_to_row(notification: &SystemNotification) -> SystemNotificationRow {
    SystemNotificationRow {
        id: notification.id().into_inner(),
        ticket_id: notification.ticket_id().into_inner(),
        submitter_id: notification.submitter_id().into_inner(),
        uid: notification.uid().as_str().to_owned(),
        message: notification.message().to_owned(),
        is_read: notification.is_read(),
        created_at: notification.timestamp(),
    }
}

pub(super) fn row_to_system(
    row: SystemNotificationRow,
) -> NotificationRepositoryResult<SystemNotification> {
    let uid = Uid::new(row.uid).map_err(NotificationRepositoryError::persistence)?;
    Ok(SystemNotification::from_persisted(
        NotificationId::from_uuid(row.id),
        TicketId::from_uuid(row.ticket_id),
        UserId::from_uuid(row.submitter_id),
        uid,
        row.message,
        row.created_at,
        row.is_read,
    ))
}

pub(super) fn admin_to_row(notification: &AdminNotification) -> AdminNotificationRow {
    AdminNotificationRow {
        id: notification.id().into_inner(),
        ticket_id: notification.ticket_id().into_inner(),
        message: notification.message().to_owned(),
        is_read: notification.is_read(),
        created_at: notification.timestamp(),
    }
}

pub(super) fn row_to_admin(row: AdminNotificationRow) -> AdminNotification {
    AdminNotification::from_persisted(
        NotificationId::from_uuid(row.id),
        TicketId::from_uuid(row.ticket_id),
        row.message,
        row.created_at,
        row.is_read,
    )
}
