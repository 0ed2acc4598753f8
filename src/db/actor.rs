use crate::db::draft::EntryDraft;
use crate::db::filter::{EntryFilter, PageWindow};
use crate::db::models::DbEntry;
use crate::db::ops;
use crate::db::schema::SQLITE_INIT;
use crate::error::CatalogError;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::{Connection, SqliteConnection};
use std::{str::FromStr, time::Duration};
use tracing::{info, warn};

#[derive(Debug)]
pub enum DbActorMessage {
    /// Insert a validated entry and return its new id.
    Insert(EntryDraft, RpcReplyPort<Result<i64, CatalogError>>),

    /// Overwrite an entry by id and return the stored row.
    Update(i64, EntryDraft, RpcReplyPort<Result<DbEntry, CatalogError>>),

    /// Delete an entry by id; missing ids are reported as not found.
    Delete(i64, RpcReplyPort<Result<(), CatalogError>>),

    /// Get one entry by id.
    Get(i64, RpcReplyPort<Result<Option<DbEntry>, CatalogError>>),

    /// List matching entries in id order, optionally one page of them.
    List(
        EntryFilter,
        Option<PageWindow>,
        RpcReplyPort<Result<Vec<DbEntry>, CatalogError>>,
    ),

    /// Count matching entries.
    Count(EntryFilter, RpcReplyPort<Result<u64, CatalogError>>),

    /// Distinct type codes present in the table.
    TypeCodes(RpcReplyPort<Result<Vec<String>, CatalogError>>),

    /// Swap the ids of two entries.
    Swap(i64, i64, RpcReplyPort<Result<(), CatalogError>>),

    /// Replace every entry (import).
    ReplaceAll(Vec<EntryDraft>, RpcReplyPort<Result<u64, CatalogError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn insert(&self, draft: EntryDraft) -> Result<i64, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::Insert, draft)
            .map_err(|e| CatalogError::Ractor(format!("DbActor Insert RPC failed: {e}")))?
    }

    pub async fn update(&self, id: i64, draft: EntryDraft) -> Result<DbEntry, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::Update, id, draft)
            .map_err(|e| CatalogError::Ractor(format!("DbActor Update RPC failed: {e}")))?
    }

    pub async fn delete(&self, id: i64) -> Result<(), CatalogError> {
        ractor::call!(self.actor, DbActorMessage::Delete, id)
            .map_err(|e| CatalogError::Ractor(format!("DbActor Delete RPC failed: {e}")))?
    }

    pub async fn get(&self, id: i64) -> Result<Option<DbEntry>, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::Get, id)
            .map_err(|e| CatalogError::Ractor(format!("DbActor Get RPC failed: {e}")))?
    }

    pub async fn list(
        &self,
        filter: EntryFilter,
        window: Option<PageWindow>,
    ) -> Result<Vec<DbEntry>, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::List, filter, window)
            .map_err(|e| CatalogError::Ractor(format!("DbActor List RPC failed: {e}")))?
    }

    pub async fn count(&self, filter: EntryFilter) -> Result<u64, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::Count, filter)
            .map_err(|e| CatalogError::Ractor(format!("DbActor Count RPC failed: {e}")))?
    }

    pub async fn type_codes(&self) -> Result<Vec<String>, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::TypeCodes)
            .map_err(|e| CatalogError::Ractor(format!("DbActor TypeCodes RPC failed: {e}")))?
    }

    pub async fn swap(&self, id1: i64, id2: i64) -> Result<(), CatalogError> {
        ractor::call!(self.actor, DbActorMessage::Swap, id1, id2)
            .map_err(|e| CatalogError::Ractor(format!("DbActor Swap RPC failed: {e}")))?
    }

    pub async fn replace_all(&self, drafts: Vec<EntryDraft>) -> Result<u64, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::ReplaceAll, drafts)
            .map_err(|e| CatalogError::Ractor(format!("DbActor ReplaceAll RPC failed: {e}")))?
    }
}

struct DbActorState {
    connect_opts: SqliteConnectOptions,
}

impl DbActorState {
    async fn connect(&self) -> Result<SqliteConnection, CatalogError> {
        Ok(SqliteConnection::connect_with(&self.connect_opts).await?)
    }
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let state = DbActorState { connect_opts };
        let mut conn = state
            .connect()
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;
        apply_schema(&mut conn)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;
        close_quietly(conn).await;

        info!("DbActor initialized");
        Ok(state)
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        // One short-lived connection per message.
        let mut conn = match state.connect().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "db connect failed");
                message.fail(e);
                return Ok(());
            }
        };

        match message {
            DbActorMessage::Insert(draft, reply) => {
                let res = ops::insert(&mut conn, &draft).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Update(id, draft, reply) => {
                let res = ops::update(&mut conn, id, &draft).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Delete(id, reply) => {
                let res = ops::delete(&mut conn, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Get(id, reply) => {
                let res = ops::fetch_one(&mut conn, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::List(filter, window, reply) => {
                let res = ops::fetch_page(&mut conn, &filter, window).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Count(filter, reply) => {
                let res = ops::count(&mut conn, &filter).await;
                let _ = reply.send(res);
            }
            DbActorMessage::TypeCodes(reply) => {
                let res = ops::type_codes(&mut conn).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Swap(id1, id2, reply) => {
                let res = ops::swap_ids(&mut conn, id1, id2).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ReplaceAll(drafts, reply) => {
                let res = ops::replace_all(&mut conn, &drafts).await;
                let _ = reply.send(res);
            }
        }

        close_quietly(conn).await;
        Ok(())
    }
}

impl DbActorMessage {
    /// Answers the request with `err` without touching the database.
    fn fail(self, err: CatalogError) {
        match self {
            DbActorMessage::Insert(_, reply) => {
                let _ = reply.send(Err(err));
            }
            DbActorMessage::Update(_, _, reply) => {
                let _ = reply.send(Err(err));
            }
            DbActorMessage::Delete(_, reply) | DbActorMessage::Swap(_, _, reply) => {
                let _ = reply.send(Err(err));
            }
            DbActorMessage::Get(_, reply) => {
                let _ = reply.send(Err(err));
            }
            DbActorMessage::List(_, _, reply) => {
                let _ = reply.send(Err(err));
            }
            DbActorMessage::Count(_, reply) | DbActorMessage::ReplaceAll(_, reply) => {
                let _ = reply.send(Err(err));
            }
            DbActorMessage::TypeCodes(reply) => {
                let _ = reply.send(Err(err));
            }
        }
    }
}

async fn close_quietly(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        warn!(error = %e, "failed to close sqlite connection");
    }
}

/// Spawn the database actor and return a cloneable handle.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, CatalogError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| CatalogError::Ractor(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(conn: &mut SqliteConnection) -> Result<(), CatalogError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(&mut *conn).await?;
    }
    Ok(())
}
