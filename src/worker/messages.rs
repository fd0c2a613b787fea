//! Worker protocol.
//!
//! Requests and responses exchanged between the plugin thread and the store
//! worker. Both travel as JSON through Zellij's plugin message API. Requests
//! carry the sender's trace context so worker spans join the same trace.

use crate::domain::{DashboardMetrics, EntityKind, Order, OrderStatus, Product, ProductDraft, Settings};
use crate::storage::RowSet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Extracts the OpenTelemetry trace ID and span ID from the active span.
    /// Returns `None` if the current span context is invalid or not sampled.
    ///
    /// Without an OpenTelemetry layer installed every span context is invalid,
    /// so this returns `None` in tests and before tracing is initialized.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id_str = format!("{:032x}", span_context.trace_id());
            let parent_span_id_str = format!("{:016x}", span_context.span_id());

            tracing::trace!(
                trace_id = %trace_id_str,
                parent_span_id = %parent_span_id_str,
                "capturing trace context"
            );

            Some(Self {
                trace_id: trace_id_str,
                parent_span_id: parent_span_id_str,
            })
        } else {
            None
        }
    }
}

/// Where the worker finds its files. Sent once, before any other request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLocation {
    pub store_file: PathBuf,
    pub settings_file: PathBuf,
    /// Seed a missing store with the bundled demo data.
    pub seed_demo: bool,
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    configure(Configure { location: StoreLocation }),
    load_rows(LoadRows { kind: EntityKind, generation: u64 }),
    load_metrics(LoadMetrics { generation: u64 }),
    delete_records(DeleteRecords { kind: EntityKind, ids: Vec<String> }),
    update_order_status(UpdateOrderStatus { id: String, status: OrderStatus }),
    create_product(CreateProduct { draft: ProductDraft }),
    update_product(UpdateProduct { id: String, draft: ProductDraft }),
    load_settings(LoadSettings {}),
    save_settings(SaveSettings { settings: Settings }),
}

/// Requests sent from the plugin thread to the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Points the worker at its store and settings files.
    Configure {
        location: StoreLocation,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Load every row of one collection for the view mounted as `generation`.
    LoadRows {
        kind: EntityKind,
        generation: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Compute dashboard metrics for the dashboard mounted as `generation`.
    LoadMetrics {
        generation: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Delete the given records; all or nothing.
    DeleteRecords {
        kind: EntityKind,
        ids: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Change the status of one order.
    UpdateOrderStatus {
        id: String,
        status: OrderStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Add a product built from a validated form draft.
    CreateProduct {
        draft: ProductDraft,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Replace the editable fields of an existing product.
    UpdateProduct {
        id: String,
        draft: ProductDraft,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    LoadSettings {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    SaveSettings {
        settings: Settings,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context carried by any variant.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Configure { trace_context, .. }
            | Self::LoadRows { trace_context, .. }
            | Self::LoadMetrics { trace_context, .. }
            | Self::DeleteRecords { trace_context, .. }
            | Self::UpdateOrderStatus { trace_context, .. }
            | Self::CreateProduct { trace_context, .. }
            | Self::UpdateProduct { trace_context, .. }
            | Self::LoadSettings { trace_context }
            | Self::SaveSettings { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker back to the plugin thread.
///
/// Every failure is reported as data; the worker never panics on a bad request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The store and settings files are open.
    Configured,

    RowsLoaded {
        generation: u64,
        rows: RowSet,
    },

    /// A row or metrics load failed. `kind` is `None` for metrics.
    LoadFailed {
        kind: Option<EntityKind>,
        generation: u64,
        message: String,
    },

    MetricsLoaded {
        generation: u64,
        metrics: DashboardMetrics,
        /// Newest orders first.
        recent_orders: Vec<Order>,
    },

    /// Every requested record was deleted.
    RecordsDeleted {
        kind: EntityKind,
        ids: Vec<String>,
        count: usize,
    },

    /// Nothing was deleted.
    DeleteFailed {
        kind: EntityKind,
        ids: Vec<String>,
        message: String,
    },

    /// The stored order after the status change.
    OrderStatusUpdated {
        order: Order,
    },

    StatusUpdateFailed {
        id: String,
        message: String,
    },

    /// The stored product after a create (`created`) or an edit.
    ProductSaved {
        product: Product,
        created: bool,
    },

    /// Nothing was written. `id` is `None` for a create.
    ProductSaveFailed {
        id: Option<String>,
        message: String,
    },

    SettingsLoaded {
        settings: Settings,
    },

    SettingsSaved,

    /// A request could not be handled at all (store not configured, bad payload).
    Error {
        message: String,
    },
}
