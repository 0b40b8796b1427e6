use crate::db::{DbConnection, RepositoryError};
use crate::models::admin::{NewWorker, NewWorkerSchedule, Worker, WorkerSchedule};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error;
use log::{error, info};

#[derive(Clone)]
pub struct WorkerOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl WorkerOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn create_worker(&self, new_worker: NewWorker) -> Result<Worker, RepositoryError> {
        if new_worker.name.trim().is_empty() || new_worker.role.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "Name and role are required".to_string(),
            ));
        }
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_worker: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::workers::dsl::*;
        diesel::insert_into(workers)
            .values(&new_worker)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_worker: error inserting worker '{}': {}",
                    new_worker.name, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_all_workers(&self) -> Result<Vec<Worker>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_all_workers: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::workers::dsl::*;
        workers
            .order_by(created_at.desc())
            .load::<Worker>(conn.connection())
            .map_err(|e| {
                error!("get_all_workers: error fetching workers: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    /// Deletes a worker. Order assignments are cleared and schedules
    /// removed by the foreign-key actions, so the whole policy is one
    /// atomic statement.
    pub fn remove_worker(&self, id: i32) -> Result<Worker, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "remove_worker: failed to acquire DB connection for id {}: {}",
                id, e
            );
            e
        })?;

        use crate::db::schema::workers::dsl::*;
        let removed: Worker = diesel::delete(workers.filter(worker_id.eq(id)))
            .get_result(conn.connection())
            .map_err(|e| {
                error!("remove_worker: error deleting worker with id {}: {}", id, e);
                match e {
                    Error::NotFound => RepositoryError::NotFound(format!("workers: {id}")),
                    other => RepositoryError::DatabaseError(other),
                }
            })?;
        info!("remove_worker: worker {} removed", removed.worker_id);
        Ok(removed)
    }

    pub fn create_schedule(
        &self,
        schedule_worker_id: i32,
        schedule_starts_at: DateTime<Utc>,
        schedule_ends_at: DateTime<Utc>,
    ) -> Result<WorkerSchedule, RepositoryError> {
        if schedule_ends_at <= schedule_starts_at {
            return Err(RepositoryError::ValidationError(
                "Schedule end must be after its start".to_string(),
            ));
        }
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_schedule: failed to acquire DB connection: {}", e);
            e
        })?;

        {
            use crate::db::schema::workers::dsl::*;
            let exists = workers
                .filter(worker_id.eq(schedule_worker_id))
                .select(worker_id)
                .first::<i32>(conn.connection())
                .optional()
                .map_err(RepositoryError::DatabaseError)?;
            if exists.is_none() {
                return Err(RepositoryError::NotFound(format!(
                    "workers: {schedule_worker_id}"
                )));
            }
        }

        use crate::db::schema::worker_schedules::dsl::*;
        diesel::insert_into(worker_schedules)
            .values(&NewWorkerSchedule {
                worker_id: schedule_worker_id,
                starts_at: schedule_starts_at,
                ends_at: schedule_ends_at,
            })
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_schedule: error inserting schedule for worker {}: {}",
                    schedule_worker_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_schedules_for_worker(
        &self,
        schedule_worker_id: i32,
    ) -> Result<Vec<WorkerSchedule>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_schedules_for_worker: failed to acquire DB connection for worker {}: {}",
                schedule_worker_id, e
            );
            e
        })?;

        use crate::db::schema::worker_schedules::dsl::*;
        worker_schedules
            .filter(worker_id.eq(schedule_worker_id))
            .order_by(starts_at.asc())
            .load::<WorkerSchedule>(conn.connection())
            .map_err(|e| {
                error!(
                    "get_schedules_for_worker: error fetching schedules for worker {}: {}",
                    schedule_worker_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn remove_schedule(&self, id: i32) -> Result<WorkerSchedule, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "remove_schedule: failed to acquire DB connection for id {}: {}",
                id, e
            );
            e
        })?;

        use crate::db::schema::worker_schedules::dsl::*;
        diesel::delete(worker_schedules.filter(schedule_id.eq(id)))
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "remove_schedule: error deleting schedule with id {}: {}",
                    id, e
                );
                match e {
                    Error::NotFound => {
                        RepositoryError::NotFound(format!("worker_schedules: {id}"))
                    }
                    other => RepositoryError::DatabaseError(other),
                }
            })
    }
}
