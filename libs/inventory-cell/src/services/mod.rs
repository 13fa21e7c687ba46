pub mod products;

pub use products::InventoryService;
