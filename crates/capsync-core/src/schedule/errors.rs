use crate::errors::CapsyncError;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Schedule registry corrupted: {message}")]
    RegistryCorrupted { message: String },

    #[error("Failed to save schedule registry: {message}")]
    SaveFailed { message: String },

    #[error("Schedule registry lock poisoned")]
    LockPoisoned,

    #[error("IO operation failed: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl CapsyncError for ScheduleError {
    fn error_code(&self) -> &'static str {
        match self {
            ScheduleError::RegistryCorrupted { .. } => "SCHEDULE_REGISTRY_CORRUPTED",
            ScheduleError::SaveFailed { .. } => "SCHEDULE_SAVE_FAILED",
            ScheduleError::LockPoisoned => "SCHEDULE_LOCK_POISONED",
            ScheduleError::IoError { .. } => "SCHEDULE_IO_ERROR",
        }
    }
}
