mod settings;

pub use settings::{ClientConfig, DeliveryConfig, GcmConfig, Settings};
