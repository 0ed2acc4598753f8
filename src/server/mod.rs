pub mod flash;
pub mod pagination;
pub mod render;
pub mod router;
pub mod routes;

pub use router::{CatalogState, catalog_router};
