/// Completion of async work. `seq` identifies the share request it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    ShareUploaded { seq: u64, id: String },
    ShareFailed { seq: u64, error: String },
}

impl AppMessage {
    pub fn seq(&self) -> u64 {
        match self {
            Self::ShareUploaded { seq, .. } | Self::ShareFailed { seq, .. } => *seq,
        }
    }
}
