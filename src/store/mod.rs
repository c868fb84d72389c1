pub mod alerts;

pub use alerts::{AlertStore, InMemoryAlertStore};
