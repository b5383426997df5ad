use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::gate::{LookupError, OwnershipGate, RouteLookup, RouteRef};
use crate::image::ImageStore;
use crate::layout::MediaLayout;
use crate::track::TrackStore;

/// In-memory route table.
#[derive(Default)]
pub(crate) struct FakeRoutes {
    owners: Mutex<HashMap<i32, String>>,
    failing: AtomicBool,
}

impl FakeRoutes {
    pub(crate) fn with(routes: &[(i32, &str)]) -> Arc<Self> {
        let owners = routes
            .iter()
            .map(|(id, owner)| (*id, owner.to_string()))
            .collect();
        Arc::new(Self {
            owners: Mutex::new(owners),
            failing: AtomicBool::new(false),
        })
    }

    pub(crate) fn set_owner(&self, route_id: i32, owner: &str) {
        self.owners
            .lock()
            .unwrap()
            .insert(route_id, owner.to_string());
    }

    pub(crate) fn fail_lookups(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl RouteLookup for FakeRoutes {
    async fn find_route(&self, route_id: i32) -> Result<Option<RouteRef>, LookupError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err("database unavailable".into());
        }
        let owners = self.owners.lock().unwrap();
        Ok(owners.get(&route_id).map(|owner| RouteRef {
            id: route_id,
            owner_username: owner.clone(),
        }))
    }
}

pub(crate) struct Stores {
    pub tracks: TrackStore,
    pub images: ImageStore,
    pub layout: MediaLayout,
    pub _dir: tempfile::TempDir,
}

/// Both stores over a fresh temp root, with route 42 owned by `alice`.
pub(crate) fn stores() -> Stores {
    let dir = tempfile::tempdir().unwrap();
    let layout = MediaLayout::new(dir.path().join("files")).unwrap();
    let gate = OwnershipGate::new(FakeRoutes::with(&[(42, "alice"), (7, "bob")]));
    Stores {
        tracks: TrackStore::new(layout.clone(), gate.clone()),
        images: ImageStore::new(layout.clone(), gate),
        layout,
        _dir: dir,
    }
}

/// Number of regular files anywhere under `path`.
pub(crate) fn count_files(path: &std::path::Path) -> usize {
    let Ok(entries) = std::fs::read_dir(path) else {
        return 0;
    };
    entries
        .filter_map(Result::ok)
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() { count_files(&path) } else { 1 }
        })
        .sum()
}
