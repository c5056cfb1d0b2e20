use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
    /// Anything else the API reports, kept verbatim. Empty when the pod has no phase yet.
    Other(String),
}

impl PodPhase {
    pub fn from_api(phase: Option<&str>) -> Self {
        match phase {
            Some("Pending") => PodPhase::Pending,
            Some("Running") => PodPhase::Running,
            Some("Succeeded") => PodPhase::Succeeded,
            Some("Failed") => PodPhase::Failed,
            Some("Unknown") => PodPhase::Unknown,
            other => PodPhase::Other(other.unwrap_or_default().to_string()),
        }
    }
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PodPhase::Pending => "Pending",
            PodPhase::Running => "Running",
            PodPhase::Succeeded => "Succeeded",
            PodPhase::Failed => "Failed",
            PodPhase::Unknown => "Unknown",
            PodPhase::Other(phase) => phase.as_str(),
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct PodSummary {
    pub namespace: String,
    pub name: String,
    pub phase: PodPhase,
}

#[derive(Debug, Clone)]
pub struct EventSummary {
    pub reason: String,
    pub type_: String,
    pub message: String,
}
