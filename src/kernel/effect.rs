use crate::kernel::analysis::AnalysisInput;
use crate::kernel::workspace::WorkspaceSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PersistLocal(WorkspaceSnapshot),
    /// Latest active file for the deferred analysis view; `None` clears it.
    ScheduleAnalysis(Option<AnalysisInput>),
    Share(WorkspaceSnapshot),
}
