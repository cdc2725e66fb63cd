use prometheus_client::{
    encoding::EncodeLabelSet,
    metrics::{counter::Counter, family::Family},
    registry::Registry,
};

use inventory_controller_core::ResourceKind;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct KindLabels {
    kind: String,
}

/// Collection-cycle counters, labeled by resource kind.
#[derive(Clone)]
pub struct SinkMetrics {
    collections: Family<KindLabels, Counter>,
    errors: Family<KindLabels, Counter>,
}

// === impl SinkMetrics ===

impl SinkMetrics {
    pub fn register(prom: &mut Registry) -> Self {
        let collections = Family::default();
        prom.register(
            "collections",
            "Count of successful collection cycles",
            collections.clone(),
        );

        let errors = Family::default();
        prom.register(
            "collection_errors",
            "Count of collection cycles skipped due to an error",
            errors.clone(),
        );

        Self {
            collections,
            errors,
        }
    }

    pub(crate) fn incr_collections(&self, kind: ResourceKind) {
        self.collections
            .get_or_create(&KindLabels {
                kind: kind.as_str().to_string(),
            })
            .inc();
    }

    pub(crate) fn incr_errors(&self, kind: ResourceKind) {
        self.errors
            .get_or_create(&KindLabels {
                kind: kind.as_str().to_string(),
            })
            .inc();
    }
}
