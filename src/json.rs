use erased_serde::Serialize as EraSerialize;
use log::warn;
use rocket::response::Responder;
use rocket::response::content::RawJson;
use serde::Serialize;

/// Outcome of a request, sent as the `status` field of every response
#[derive(Serialize)]
pub enum Status {
    Ok,
    Error(String),
}

/// Every response body: `{"status": ..., "data": ...}`
#[derive(Serialize)]
pub struct JsonStatus {
    status: Status,
    data: Box<dyn EraSerialize + Send>,
}

impl From<JsonStatus> for RawJson<String> {
    fn from(status: JsonStatus) -> Self {
        match serde_json::to_string(&status) {
            Ok(body) => RawJson(body),
            Err(e) => {
                warn!("Failed to serialize response: {}", e);
                RawJson(r#"{"status":{"Error":"Failed to serialize response"},"data":[]}"#.to_string())
            }
        }
    }
}

impl<T: std::error::Error> From<T> for JsonStatus {
    fn from(error: T) -> Self {
        JsonStatus::error(error)
    }
}

pub type JsonResult = Result<JsonStatus, JsonStatus>;

impl JsonStatus {
    pub fn new_owned(status: Status, data: impl EraSerialize + Send + 'static) -> Self {
        JsonStatus {
            status,
            data: Box::new(data),
        }
    }

    pub fn new_empty(status: Status) -> Self {
        JsonStatus::new_owned(status, Vec::<String>::new())
    }

    pub fn error<T: ToString>(message: T) -> Self {
        let message = message.to_string();
        warn!("Error while running request: {}", message);
        JsonStatus::new_empty(Status::Error(message))
    }

    pub fn ok<T: ToString>(message: Option<T>) -> Self {
        match message {
            Some(message) => JsonStatus::new_owned(Status::Ok, vec![message.to_string()]),
            None => JsonStatus::new_empty(Status::Ok),
        }
    }

    pub fn data_owned(data: impl EraSerialize + Send + 'static) -> Self {
        JsonStatus::new_owned(Status::Ok, data)
    }

    /// Keeps the whole context chain in the message
    pub fn from_anyhow(error: anyhow::Error) -> Self {
        JsonStatus::error(format!("{:#}", error))
    }
}

impl<'r> Responder<'r, 'static> for JsonStatus {
    fn respond_to(self, request: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        RawJson::<String>::from(self).respond_to(request)
    }
}
