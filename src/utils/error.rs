use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("Validation error on '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("API key is missing")]
    CredentialMissing,

    #[error("Generation request failed: {0}")]
    ServiceError(#[from] reqwest::Error),

    #[error("Generation service rejected the request (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Generation service returned an empty response")]
    EmptyResponse,

    #[error("Generation service returned malformed JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("ZIP export error: {0}")]
    ZipError(#[from] zip::result::ZipError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// User can fix the input and resubmit.
    Medium,
    /// The remote service or the network failed.
    High,
    /// Local problem (filesystem, configuration).
    Critical,
}

impl EstimateError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EstimateError::ValidationError { .. } | EstimateError::CredentialMissing => {
                ErrorSeverity::Medium
            }
            EstimateError::ServiceError(_)
            | EstimateError::ApiError { .. }
            | EstimateError::EmptyResponse
            | EstimateError::MalformedResponse(_) => ErrorSeverity::High,
            EstimateError::ConfigError { .. }
            | EstimateError::IoError(_)
            | EstimateError::CsvError(_)
            | EstimateError::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EstimateError::ValidationError { field, reason } => {
                format!("Data proyek tidak valid ({}): {}", field, reason)
            }
            EstimateError::CredentialMissing => {
                "API Key belum diisi. Silakan masukkan Google Gemini API Key Anda.".to_string()
            }
            EstimateError::ServiceError(_) | EstimateError::ApiError { .. } => {
                "Gagal menghasilkan estimasi RAB. Pastikan API Key valid atau coba lagi nanti."
                    .to_string()
            }
            EstimateError::EmptyResponse | EstimateError::MalformedResponse(_) => {
                "Layanan AI tidak mengembalikan hasil yang dapat dibaca. Coba lagi nanti."
                    .to_string()
            }
            EstimateError::ConfigError { message } => {
                format!("Konfigurasi tidak valid: {}", message)
            }
            EstimateError::IoError(_) | EstimateError::CsvError(_) | EstimateError::ZipError(_) => {
                "Gagal menulis berkas hasil estimasi.".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EstimateError::ValidationError { .. } => {
                "Periksa kembali parameter proyek yang ditandai".to_string()
            }
            EstimateError::CredentialMissing => {
                "Berikan --api-key atau set variabel lingkungan GEMINI_API_KEY".to_string()
            }
            EstimateError::ServiceError(_) => {
                "Periksa koneksi internet dan endpoint layanan".to_string()
            }
            EstimateError::ApiError { status, .. } if *status == 401 || *status == 403 => {
                "Periksa apakah API Key masih berlaku".to_string()
            }
            EstimateError::ApiError { .. } => {
                "Tunggu beberapa saat lalu ajukan ulang estimasi".to_string()
            }
            EstimateError::EmptyResponse | EstimateError::MalformedResponse(_) => {
                "Ajukan ulang estimasi; keluaran model tidak selalu identik".to_string()
            }
            EstimateError::ConfigError { .. } => {
                "Perbaiki berkas konfigurasi TOML yang dirujuk".to_string()
            }
            EstimateError::IoError(_) | EstimateError::CsvError(_) | EstimateError::ZipError(_) => {
                "Pastikan direktori keluaran dapat ditulis".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimateError>;
