use std::sync::Arc;
use runway_pass::BoardingPassService;

#[derive(Clone)]
pub struct AppState {
    pub passes: Arc<BoardingPassService>,
}
