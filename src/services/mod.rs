pub mod ingest;
pub mod registry;

pub use ingest::IngestionService;
pub use registry::DeviceRegistry;
