use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// `{message, status, data}` wrapper used by most back-office endpoints.
#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    pub message: String,
    pub status: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { message: message.into(), status: true, data }
    }
}

/// Bare `{message}` body returned by deletes.
#[derive(Serialize, Deserialize, Debug)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
