use serde_json::Value;

use crate::{
    permissions::{Capability, PermissionSet},
    ResourceKind, ResourceView,
};

/// Converts a cached, unfiltered collection into a per-user view.
///
/// Wildcard principals and the `clusterevents` kind see the full
/// collection flagged writable. Everything else is matched label value
/// by label value against the principal's capability map: the first
/// write grant includes the item writable and ends its scan; a read
/// grant keeps scanning so a later write grant can still upgrade the
/// item. Each item is included at most once, and input order is
/// preserved for included items.
pub fn filter(
    kind: ResourceKind,
    items: Vec<Value>,
    permissions: &PermissionSet,
    global_read_only: bool,
) -> Vec<ResourceView> {
    if permissions.has_wildcard() || kind == ResourceKind::ClusterEvents {
        return items
            .into_iter()
            .map(|data| ResourceView { data, write: true })
            .collect();
    }

    let capabilities = permissions.capabilities(global_read_only);
    let mut views = Vec::new();
    for item in items {
        let mut writable = false;
        let mut readable = false;
        {
            // Items without a well-formed label map are invisible to
            // every non-wildcard principal.
            let Some(labels) = item_labels(&item) else { continue };
            for value in labels.values().filter_map(Value::as_str) {
                match capabilities.for_label(value) {
                    Capability::Write => {
                        writable = true;
                        break;
                    }
                    Capability::Read => readable = true,
                    Capability::None => {}
                }
            }
        }
        if writable {
            views.push(ResourceView { data: item, write: true });
        } else if readable {
            views.push(ResourceView { data: item, write: false });
        }
    }
    views
}

fn item_labels(item: &Value) -> Option<&serde_json::Map<String, Value>> {
    item.get("metadata")?.get("labels")?.as_object()
}
