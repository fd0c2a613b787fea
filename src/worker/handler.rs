//! Store worker: runs every storage operation off the render thread.
//!
//! The worker is configured once with a [`StoreLocation`], opens the JSON
//! document store and the settings file lazily, and answers each
//! [`WorkerMessage`] with exactly one [`WorkerResponse`]. Spans created here are
//! parented to the plugin-side span that sent the message.

use crate::domain::{EntityKind, OrderStatus, ProductDraft, Result, Settings, ShopdashError};
use crate::storage::{DocumentStore, JsonDocumentStore, SettingsStore, RECENT_ORDERS_LIMIT};
use crate::worker::{StoreLocation, WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};

/// Worker-side state.
///
/// Zellij constructs the worker through `Default`, so both stores start empty
/// and are filled by the first `Configure` message.
#[derive(Serialize, Deserialize, Default)]
pub struct StoreWorker {
    #[serde(skip)]
    store: Option<Box<dyn DocumentStore>>,
    #[serde(skip)]
    settings: Option<SettingsStore>,
}

impl StoreWorker {
    /// Opens the stores named by `location`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document store cannot be opened.
    pub fn open(location: &StoreLocation) -> Result<Self> {
        let store = JsonDocumentStore::open(location.store_file.clone(), location.seed_demo)?;
        Ok(Self::with_stores(
            Box::new(store),
            SettingsStore::new(location.settings_file.clone()),
        ))
    }

    /// Builds a worker around already-open stores.
    #[must_use]
    pub fn with_stores(store: Box<dyn DocumentStore>, settings: SettingsStore) -> Self {
        Self {
            store: Some(store),
            settings: Some(settings),
        }
    }

    /// Whether a store has been opened. Data requests fail until then.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    fn store(&mut self) -> Result<&mut Box<dyn DocumentStore>> {
        self.store
            .as_mut()
            .ok_or_else(|| ShopdashError::Worker("store not configured".to_string()))
    }

    fn settings_store(&self) -> Result<&SettingsStore> {
        self.settings
            .as_ref()
            .ok_or_else(|| ShopdashError::Worker("settings not configured".to_string()))
    }

    /// Maps a storage result to a response, logging the outcome.
    fn handle_db_result<T, F, E>(operation: &str, result: Result<T>, on_success: F, on_error: E) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
        E: FnOnce(String) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation, error = %e, "storage operation failed");
                on_error(e.to_string())
            }
        }
    }

    fn handle_configure(&mut self, location: &StoreLocation) -> WorkerResponse {
        match Self::open(location) {
            Ok(worker) => {
                *self = worker;
                tracing::info!(store = ?location.store_file, "worker configured");
                WorkerResponse::Configured
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to open store");
                WorkerResponse::Error {
                    message: format!("Failed to open store: {e}"),
                }
            }
        }
    }

    fn handle_load_rows(&mut self, kind: EntityKind, generation: u64) -> WorkerResponse {
        Self::handle_db_result(
            "load rows",
            self.store().and_then(|store| store.load(kind)),
            |rows| {
                tracing::debug!(%kind, count = rows.len(), generation, "rows loaded");
                WorkerResponse::RowsLoaded { generation, rows }
            },
            |message| WorkerResponse::LoadFailed {
                kind: Some(kind),
                generation,
                message,
            },
        )
    }

    fn handle_load_metrics(&mut self, generation: u64) -> WorkerResponse {
        Self::handle_db_result(
            "load metrics",
            self.store()
                .and_then(|store| Ok((store.metrics()?, store.recent_orders(RECENT_ORDERS_LIMIT)?))),
            |(metrics, recent_orders)| WorkerResponse::MetricsLoaded {
                generation,
                metrics,
                recent_orders,
            },
            |message| WorkerResponse::LoadFailed {
                kind: None,
                generation,
                message,
            },
        )
    }

    fn handle_delete_records(&mut self, kind: EntityKind, ids: Vec<String>) -> WorkerResponse {
        let result = self.store().and_then(|store| store.delete_many(kind, &ids));
        match result {
            Ok(count) => {
                tracing::info!(%kind, count, "records deleted");
                WorkerResponse::RecordsDeleted { kind, ids, count }
            }
            Err(e) => {
                tracing::warn!(%kind, error = %e, "bulk delete rejected");
                WorkerResponse::DeleteFailed {
                    kind,
                    ids,
                    message: e.to_string(),
                }
            }
        }
    }

    fn handle_update_order_status(&mut self, id: String, status: OrderStatus) -> WorkerResponse {
        let result = self.store().and_then(|store| store.update_order_status(&id, status));
        Self::handle_db_result(
            "update order status",
            result,
            |order| WorkerResponse::OrderStatusUpdated { order },
            |message| WorkerResponse::StatusUpdateFailed { id, message },
        )
    }

    fn handle_save_product(&mut self, id: Option<String>, draft: &ProductDraft) -> WorkerResponse {
        let created = id.is_none();
        let result = self.store().and_then(|store| match &id {
            Some(id) => store.update_product(id, draft),
            None => store.insert_product(draft),
        });
        Self::handle_db_result(
            if created { "insert product" } else { "update product" },
            result,
            |product| {
                tracing::info!(id = %product.id, created, "product saved");
                WorkerResponse::ProductSaved { product, created }
            },
            |message| WorkerResponse::ProductSaveFailed { id, message },
        )
    }

    fn handle_load_settings(&self) -> WorkerResponse {
        Self::handle_db_result(
            "load settings",
            self.settings_store().and_then(SettingsStore::load),
            |settings| WorkerResponse::SettingsLoaded { settings },
            |message| WorkerResponse::Error { message },
        )
    }

    fn handle_save_settings(&self, settings: &Settings) -> WorkerResponse {
        Self::handle_db_result(
            "save settings",
            self.settings_store().and_then(|store| store.save(settings)),
            |()| WorkerResponse::SettingsSaved,
            |message| WorkerResponse::Error { message },
        )
    }

    /// Makes the sender's span the remote parent of spans created here.
    ///
    /// Returns a guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);
        Some(otel_context.attach())
    }

    /// Handles one request and produces its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::Configure { location, .. } => self.handle_configure(&location),
            WorkerMessage::LoadRows { kind, generation, .. } => self.handle_load_rows(kind, generation),
            WorkerMessage::LoadMetrics { generation, .. } => self.handle_load_metrics(generation),
            WorkerMessage::DeleteRecords { kind, ids, .. } => self.handle_delete_records(kind, ids),
            WorkerMessage::UpdateOrderStatus { id, status, .. } => {
                self.handle_update_order_status(id, status)
            }
            WorkerMessage::CreateProduct { draft, .. } => self.handle_save_product(None, &draft),
            WorkerMessage::UpdateProduct { id, draft, .. } => self.handle_save_product(Some(id), &draft),
            WorkerMessage::LoadSettings { .. } => self.handle_load_settings(),
            WorkerMessage::SaveSettings { settings, .. } => self.handle_save_settings(&settings),
        }
    }
}

/// Zellij entry point. Only linked into the wasm plugin.
#[cfg(target_arch = "wasm32")]
mod zellij_worker {
    use super::StoreWorker;
    use crate::worker::{WorkerMessage, WorkerResponse};
    use std::sync::atomic::{AtomicBool, Ordering};
    use zellij_tile::prelude::{PluginMessage, ZellijWorker};
    use zellij_tile::shim::post_message_to_plugin;

    static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

    fn reply(name: String, response: &WorkerResponse) {
        match serde_json::to_string(response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::error!(error = %e, "failed to serialize worker response"),
        }
    }

    impl ZellijWorker<'_> for StoreWorker {
        fn on_message(&mut self, message: String, payload: String) {
            if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
                crate::observability::init_tracing(&crate::Config::default());
            }

            let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to deserialize worker message");
                    reply(
                        message,
                        &WorkerResponse::Error {
                            message: format!("Malformed request: {e}"),
                        },
                    );
                    return;
                }
            };

            let response = self.handle_message(worker_message);
            reply(message, &response);
        }
    }
}
