#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Card(#[from] kc_card::CardError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
