//! Checkout outbox.
//!
//! Orders that cannot be written to the database are appended to a local spool file, one JSON
//! document per line, and re-submitted later by [`CheckoutService::reconcile`].

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tokio::{
    fs::{self, OpenOptions},
    io::AsyncWriteExt,
    sync::{Mutex, MutexGuard},
    task,
};
use tracing::{error, info, warn};

use crate::domain::orders::{
    OrdersService, OrdersServiceError, data::NewOrder, records::OrderRecord,
};

#[derive(Debug, Error)]
pub enum OutboxError {
    #[error("outbox spool I/O failed")]
    Io(#[from] std::io::Error),

    #[error("could not encode order for the outbox")]
    Encode(#[source] serde_json::Error),

    #[error("outbox lock task failed")]
    LockTask(#[from] task::JoinError),
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Orders(#[from] OrdersServiceError),

    #[error(transparent)]
    Outbox(#[from] OutboxError),
}

/// Outcome of placing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacedOrder {
    /// Written to the order store.
    Stored(Box<OrderRecord>),

    /// Spooled locally until the order store is reachable.
    Queued(Box<NewOrder>),
}

impl PlacedOrder {
    /// Human-readable number of the placed order.
    pub fn order_number(&self) -> &str {
        match self {
            Self::Stored(order) => &order.order_number,
            Self::Queued(order) => &order.order_number,
        }
    }
}

/// Counts from one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Spooled orders written to the order store
    pub stored: usize,

    /// Spooled orders the order store already had
    pub already_present: usize,

    /// Entries still waiting in the spool
    pub remaining: usize,
}

/// Append-only spool of orders awaiting insertion.
///
/// Appends and reconciliation passes hold advisory locks on sidecar files, so processes that
/// share a spool path exclude each other. A pass moves the spool aside to a batch file before
/// reading it, and orders appended while the pass runs start a fresh spool.
#[derive(Debug)]
pub struct OrderOutbox {
    path: PathBuf,
    appends: Mutex<()>,
    passes: Mutex<()>,
}

impl OrderOutbox {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            appends: Mutex::new(()),
            passes: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn batch_path(&self) -> PathBuf {
        sidecar(&self.path, "processing")
    }

    /// Durably append an order to the spool.
    ///
    /// # Errors
    ///
    /// Returns an error when the order cannot be encoded or the spool cannot be locked, written
    /// and synced.
    pub async fn enqueue(&self, order: &NewOrder) -> Result<(), OutboxError> {
        let mut line = serde_json::to_string(order).map_err(OutboxError::Encode)?;

        line.push('\n');

        let _lock = self.lock_appends().await?;

        append(&self.path, &line).await
    }

    /// Number of entries waiting in the spool, including any batch a pass is working through.
    ///
    /// # Errors
    ///
    /// Returns an error when the spool exists but cannot be read.
    pub async fn pending(&self) -> Result<usize, OutboxError> {
        let _lock = self.lock_appends().await?;

        let spooled = read_lines(&self.path).await?.len();
        let in_flight = read_lines(&self.batch_path()).await?.len();

        Ok(spooled + in_flight)
    }

    async fn lock_appends(&self) -> Result<HeldLock<'_>, OutboxError> {
        let guard = self.appends.lock().await;
        let file = FileLock::acquire(sidecar(&self.path, "lock")).await?;

        Ok(HeldLock {
            _file: file,
            _guard: guard,
        })
    }

    async fn lock_pass(&self) -> Result<HeldLock<'_>, OutboxError> {
        let guard = self.passes.lock().await;
        let file = FileLock::acquire(sidecar(&self.path, "reconcile.lock")).await?;

        Ok(HeldLock {
            _file: file,
            _guard: guard,
        })
    }

    /// Move the spool aside and return the entries of the batch. A batch left behind by an
    /// interrupted pass is resumed instead.
    async fn take_batch(&self) -> Result<Vec<String>, OutboxError> {
        let _lock = self.lock_appends().await?;
        let batch = self.batch_path();

        if !fs::try_exists(&batch).await? {
            match fs::rename(&self.path, &batch).await {
                Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
                result => result?,
            }
        }

        read_lines(&batch).await
    }

    /// Return unfinished entries to the spool and discard the batch.
    async fn finish_batch(&self, remaining: &[String]) -> Result<(), OutboxError> {
        let _lock = self.lock_appends().await?;

        if !remaining.is_empty() {
            let mut contents = remaining.join("\n");

            contents.push('\n');

            append(&self.path, &contents).await?;
        }

        match fs::remove_file(self.batch_path()).await {
            Err(error) if error.kind() != ErrorKind::NotFound => Err(error.into()),
            _ => Ok(()),
        }
    }
}

fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();

    name.push(".");
    name.push(suffix);

    PathBuf::from(name)
}

async fn append(path: &Path, contents: &str) -> Result<(), OutboxError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;

    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(())
}

async fn read_lines(path: &Path) -> Result<Vec<String>, OutboxError> {
    match fs::read_to_string(path).await {
        Ok(contents) => Ok(contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(error) => Err(error.into()),
    }
}

/// In-process guard plus the matching cross-process file lock.
#[derive(Debug)]
struct HeldLock<'a> {
    _file: FileLock,
    _guard: MutexGuard<'a, ()>,
}

/// Exclusive advisory lock on a sidecar file, released when the file is closed.
#[derive(Debug)]
struct FileLock {
    _file: std::fs::File,
}

impl FileLock {
    async fn acquire(path: PathBuf) -> Result<Self, OutboxError> {
        let file = task::spawn_blocking(move || {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .truncate(false)
                .write(true)
                .open(&path)?;

            lock_exclusive(&file)?;

            Ok::<_, std::io::Error>(file)
        })
        .await??;

        Ok(Self { _file: file })
    }
}

#[cfg(unix)]
fn lock_exclusive(file: &std::fs::File) -> std::io::Result<()> {
    use std::os::unix::io::AsRawFd;

    loop {
        // SAFETY: flock is a POSIX call on a descriptor owned by `file`, which outlives it.
        let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };

        if result == 0 {
            return Ok(());
        }

        let error = std::io::Error::last_os_error();

        if error.kind() != ErrorKind::Interrupted {
            return Err(error);
        }
    }
}

#[cfg(not(unix))]
fn lock_exclusive(_file: &std::fs::File) -> std::io::Result<()> {
    Ok(())
}

#[derive(Clone)]
pub struct OutboxCheckoutService {
    orders: Arc<dyn OrdersService>,
    outbox: Arc<OrderOutbox>,
}

impl OutboxCheckoutService {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersService>, outbox: Arc<OrderOutbox>) -> Self {
        Self { orders, outbox }
    }
}

#[async_trait]
impl CheckoutService for OutboxCheckoutService {
    async fn place_order(&self, order: NewOrder) -> Result<PlacedOrder, CheckoutError> {
        match self.orders.create_order(order.clone()).await {
            Ok(record) => Ok(PlacedOrder::Stored(Box::new(record))),
            Err(failure) if failure.is_storage() => {
                warn!(
                    order_number = %order.order_number,
                    "order store unavailable, spooling order: {failure}"
                );

                self.outbox.enqueue(&order).await?;

                Ok(PlacedOrder::Queued(Box::new(order)))
            }
            Err(failure) => Err(failure.into()),
        }
    }

    async fn reconcile(&self) -> Result<ReconcileReport, CheckoutError> {
        let _pass = self.outbox.lock_pass().await?;

        let lines = self.outbox.take_batch().await?;

        if lines.is_empty() {
            self.outbox.finish_batch(&[]).await?;

            return Ok(ReconcileReport::default());
        }

        let mut report = ReconcileReport::default();
        let mut remaining = Vec::new();

        for line in lines {
            let order = match serde_json::from_str::<NewOrder>(&line) {
                Ok(order) => order,
                Err(source) => {
                    error!("unreadable outbox entry left in spool: {source}");
                    remaining.push(line);
                    continue;
                }
            };

            match self.orders.create_order(order.clone()).await {
                Ok(_) => report.stored += 1,
                Err(OrdersServiceError::AlreadyExists) => report.already_present += 1,
                Err(failure) => {
                    warn!(
                        order_number = %order.order_number,
                        "spooled order not yet stored: {failure}"
                    );
                    remaining.push(line);
                }
            }
        }

        self.outbox.finish_batch(&remaining).await?;

        report.remaining = remaining.len();

        info!(
            stored = report.stored,
            already_present = report.already_present,
            remaining = report.remaining,
            "outbox reconciled"
        );

        Ok(report)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Store an order, spooling it locally when the order store is unavailable.
    async fn place_order(&self, order: NewOrder) -> Result<PlacedOrder, CheckoutError>;

    /// Re-submit spooled orders. Stored and already-present orders leave the spool.
    async fn reconcile(&self) -> Result<ReconcileReport, CheckoutError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mockall::predicate::function;
    use tempfile::TempDir;
    use testresult::TestResult;
    use tokio::runtime::Handle;

    use crate::{
        domain::orders::{MockOrdersService, records::OrderUuid},
        test::helpers::{order_details, order_record},
    };

    use super::*;

    fn outbox(dir: &TempDir) -> Arc<OrderOutbox> {
        Arc::new(OrderOutbox::new(dir.path().join("orders.jsonl")))
    }

    fn new_order() -> TestResult<NewOrder> {
        Ok(NewOrder::from_details(order_details(), Timestamp::now())?)
    }

    fn storage_down() -> OrdersServiceError {
        OrdersServiceError::Sql(sqlx::Error::PoolTimedOut)
    }

    #[tokio::test]
    async fn stored_orders_skip_the_spool() -> TestResult {
        let dir = TempDir::new()?;
        let outbox = outbox(&dir);
        let order = new_order()?;
        let record = order_record(&order);

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(move |_| Ok(record));

        let service = OutboxCheckoutService::new(Arc::new(orders), outbox.clone());

        let placed = service.place_order(order.clone()).await?;

        assert!(matches!(placed, PlacedOrder::Stored(_)));
        assert_eq!(placed.order_number(), order.order_number);
        assert_eq!(outbox.pending().await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_queues_order() -> TestResult {
        let dir = TempDir::new()?;
        let outbox = outbox(&dir);
        let order = new_order()?;

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .returning(|_| Err(storage_down()));

        let service = OutboxCheckoutService::new(Arc::new(orders), outbox.clone());

        let placed = service.place_order(order.clone()).await?;

        assert_eq!(placed, PlacedOrder::Queued(Box::new(order.clone())));
        assert_eq!(outbox.pending().await?, 1);

        let spooled = fs::read_to_string(outbox.path()).await?;
        let decoded: NewOrder = serde_json::from_str(spooled.trim())?;

        assert_eq!(decoded, order);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_orders_are_not_queued() -> TestResult {
        let dir = TempDir::new()?;
        let outbox = outbox(&dir);

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .returning(|_| Err(OrdersServiceError::InvalidData));

        let service = OutboxCheckoutService::new(Arc::new(orders), outbox.clone());

        let result = service.place_order(new_order()?).await;

        assert!(
            matches!(
                result,
                Err(CheckoutError::Orders(OrdersServiceError::InvalidData))
            ),
            "expected InvalidData, got {result:?}"
        );
        assert_eq!(outbox.pending().await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn reconcile_drops_stored_and_present_orders_and_keeps_the_rest() -> TestResult {
        let dir = TempDir::new()?;
        let outbox = outbox(&dir);

        let stored = new_order()?;
        let present = new_order()?;
        let still_failing = new_order()?;

        outbox.enqueue(&stored).await?;
        outbox.enqueue(&present).await?;
        outbox.enqueue(&still_failing).await?;

        let stored_uuid = stored.uuid;
        let present_uuid = present.uuid;
        let failing_uuid = still_failing.uuid;
        let stored_record = order_record(&stored);

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .with(function(move |order: &NewOrder| order.uuid == stored_uuid))
            .once()
            .return_once(move |_| Ok(stored_record));

        orders
            .expect_create_order()
            .with(function(move |order: &NewOrder| order.uuid == present_uuid))
            .once()
            .returning(|_| Err(OrdersServiceError::AlreadyExists));

        orders
            .expect_create_order()
            .with(function(move |order: &NewOrder| order.uuid == failing_uuid))
            .once()
            .returning(|_| Err(storage_down()));

        let service = OutboxCheckoutService::new(Arc::new(orders), outbox.clone());

        let report = service.reconcile().await?;

        assert_eq!(
            report,
            ReconcileReport {
                stored: 1,
                already_present: 1,
                remaining: 1,
            }
        );

        let spooled = fs::read_to_string(outbox.path()).await?;
        let decoded: NewOrder = serde_json::from_str(spooled.trim())?;

        assert_eq!(decoded.uuid, still_failing.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn reconcile_removes_empty_spool() -> TestResult {
        let dir = TempDir::new()?;
        let outbox = outbox(&dir);
        let order = new_order()?;
        let record = order_record(&order);

        outbox.enqueue(&order).await?;

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(move |_| Ok(record));

        let service = OutboxCheckoutService::new(Arc::new(orders), outbox.clone());

        service.reconcile().await?;

        assert!(!outbox.path().exists());
        assert!(!outbox.batch_path().exists());

        Ok(())
    }

    #[tokio::test]
    async fn unreadable_entries_stay_in_spool() -> TestResult {
        let dir = TempDir::new()?;
        let outbox = outbox(&dir);

        fs::write(outbox.path(), "{not json}\n").await?;

        let mut orders = MockOrdersService::new();

        orders.expect_create_order().never();

        let service = OutboxCheckoutService::new(Arc::new(orders), outbox.clone());

        let report = service.reconcile().await?;

        assert_eq!(report.remaining, 1);
        assert_eq!(outbox.pending().await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn missing_spool_reconciles_to_nothing() -> TestResult {
        let dir = TempDir::new()?;

        let mut orders = MockOrdersService::new();

        orders.expect_create_order().never();

        let service = OutboxCheckoutService::new(Arc::new(orders), outbox(&dir));

        assert_eq!(service.reconcile().await?, ReconcileReport::default());

        Ok(())
    }

    async fn spooled_uuids(path: &Path) -> TestResult<Vec<OrderUuid>> {
        let mut uuids = Vec::new();

        for line in read_lines(path).await? {
            uuids.push(serde_json::from_str::<NewOrder>(&line)?.uuid);
        }

        Ok(uuids)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn orders_spooled_during_a_pass_from_another_process_are_kept() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("orders.jsonl");

        // Server and CLI each open the spool on their own.
        let checkout_outbox = Arc::new(OrderOutbox::new(&path));
        let reconcile_outbox = Arc::new(OrderOutbox::new(&path));

        let spooled = new_order()?;
        let late = new_order()?;

        checkout_outbox.enqueue(&spooled).await?;

        let appender = checkout_outbox.clone();
        let late_order = late.clone();

        let mut orders = MockOrdersService::new();

        orders.expect_create_order().once().returning(move |_| {
            let appended = task::block_in_place(|| {
                Handle::current().block_on(appender.enqueue(&late_order))
            });

            assert!(appended.is_ok(), "late order was not spooled: {appended:?}");

            Err(storage_down())
        });

        let service = OutboxCheckoutService::new(Arc::new(orders), reconcile_outbox);

        let report = tokio::spawn(async move { service.reconcile().await }).await??;

        assert_eq!(report.remaining, 1);
        assert_eq!(checkout_outbox.pending().await?, 2);

        let uuids = spooled_uuids(&path).await?;

        assert!(uuids.contains(&spooled.uuid), "retried order missing: {uuids:?}");
        assert!(uuids.contains(&late.uuid), "late order missing: {uuids:?}");

        Ok(())
    }

    #[tokio::test]
    async fn interrupted_batch_is_resumed_before_new_entries() -> TestResult {
        let dir = TempDir::new()?;
        let outbox = outbox(&dir);

        let stranded = new_order()?;
        let fresh = new_order()?;

        fs::write(
            outbox.batch_path(),
            format!("{}\n", serde_json::to_string(&stranded)?),
        )
        .await?;
        outbox.enqueue(&fresh).await?;

        assert_eq!(outbox.pending().await?, 2);

        let stranded_uuid = stranded.uuid;
        let record = order_record(&stranded);

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .with(function(move |order: &NewOrder| order.uuid == stranded_uuid))
            .once()
            .return_once(move |_| Ok(record));

        let service = OutboxCheckoutService::new(Arc::new(orders), outbox.clone());

        let report = service.reconcile().await?;

        assert_eq!(report.stored, 1);
        assert!(!outbox.batch_path().exists());
        assert_eq!(spooled_uuids(outbox.path()).await?, vec![fresh.uuid]);

        Ok(())
    }
}
