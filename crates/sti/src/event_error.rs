use std::fmt;

#[derive(Debug, Clone)]
pub enum EventError {
    Observer { message: String },
}

impl EventError {
    pub fn observer(message: &str) -> Self {
        Self::Observer {
            message: message.to_string(),
        }
    }
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::Observer { message } => write!(f, "Observer error: {}", message),
        }
    }
}

impl std::error::Error for EventError {}
