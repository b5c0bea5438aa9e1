use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("WeatherError::Transport: {0}")]
    Transport(String),
    #[error("WeatherError::Status: upstream responded with http status {0}")]
    Status(u16),
    #[error("WeatherError::Document: {0}")]
    Document(String),
}

impl From<ureq::Error> for WeatherError {
    fn from(e: ureq::Error) -> WeatherError {
        match e {
            ureq::Error::StatusCode(code) => WeatherError::Status(code),
            _ => WeatherError::Transport(e.to_string()),
        }
    }
}
impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> WeatherError {
        WeatherError::Document(format!("json document error: {}", e))
    }
}
