pub mod model_service;
pub mod payload_service;
