use std::path::Path;

use vigil_core::Issue;
use vigil_workspace::Workspace;

use crate::{EngineError, RunContext};

/// A pluggable analysis unit the [`Runner`](crate::Runner) can schedule.
///
/// `analyze` runs on a blocking thread. Engines that loop over many files
/// should poll `ctx` between items.
pub trait Engine: Send + Sync {
    /// Stable name, used in logs and in combined failure messages.
    fn name(&self) -> &str;

    /// Inspect `root` and return findings.
    ///
    /// # Errors
    ///
    /// Only failures that prevent the whole engine from running belong here.
    /// Task-level problems should become findings.
    fn analyze(
        &self,
        ctx: &RunContext,
        root: &Path,
        workspace: &dyn Workspace,
    ) -> Result<Vec<Issue>, EngineError>;
}
