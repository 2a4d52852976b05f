use std::env;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub max_upload_bytes: usize,
    pub max_documents: usize,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: env::var("READER_API_BIND").unwrap_or(defaults.bind_addr),
            max_upload_bytes: env::var("READER_API_MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
            max_documents: env::var("READER_API_MAX_DOCUMENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_documents),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            max_upload_bytes: 64 * 1024 * 1024,
            max_documents: 32,
        }
    }
}
