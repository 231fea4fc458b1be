pub mod chat;
pub mod generation;

pub use chat::{ChatRequest, TurnDto};
pub use generation::{HealthResponse, ResultResponse, TextRequest};
