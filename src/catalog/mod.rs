//! Service catalog
//!
//! Catalog endpoints return heterogeneous descriptors; [`normalize`] turns
//! them into uniform [`Service`] records and [`ServiceCatalog`] keeps one
//! slot per category so each is fetched at most once per client.

pub mod models;
pub mod normalize;

pub use models::{Service, ServiceCategory, ServiceParams};
pub use normalize::{ServiceMap, normalize_services};

/// Per-instance cache, one slot per category.
#[derive(Debug, Default)]
pub struct ServiceCatalog {
    imei: Option<ServiceMap>,
    server: Option<ServiceMap>,
    file: Option<ServiceMap>,
}

impl ServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: ServiceCategory) -> Option<&ServiceMap> {
        match category {
            ServiceCategory::Imei => self.imei.as_ref(),
            ServiceCategory::Server => self.server.as_ref(),
            ServiceCategory::File => self.file.as_ref(),
        }
    }

    pub fn is_cached(&self, category: ServiceCategory) -> bool {
        self.get(category).is_some()
    }

    /// Remove and return a cached category.
    pub fn take(&mut self, category: ServiceCategory) -> Option<ServiceMap> {
        self.slot_mut(category).take()
    }

    /// Store a fetched category and hand back the cached copy.
    pub fn store(&mut self, category: ServiceCategory, services: ServiceMap) -> &ServiceMap {
        self.slot_mut(category).insert(services)
    }

    fn slot_mut(&mut self, category: ServiceCategory) -> &mut Option<ServiceMap> {
        match category {
            ServiceCategory::Imei => &mut self.imei,
            ServiceCategory::Server => &mut self.server,
            ServiceCategory::File => &mut self.file,
        }
    }
}
