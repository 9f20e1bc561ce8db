use serde::Deserialize;
use serde::Serialize;

use crate::model::ResultInfo;
use crate::model::RunId;
use crate::model::RunInfo;

/// Every run and result of one SARIF file, normalized.
///
/// Results are listed run by run, each run's results in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedLog {
    pub sarif_file_name: String,
    pub runs: Vec<RunInfo>,
    pub results: Vec<ResultInfo>,
}

impl LoadedLog {
    pub fn run(&self, run_id: RunId) -> Option<&RunInfo> {
        self.runs.iter().find(|run| run.run_id == run_id)
    }

    pub fn results_for_run(&self, run_id: RunId) -> impl Iterator<Item = &ResultInfo> + '_ {
        self.results
            .iter()
            .filter(move |result| result.run_id == run_id)
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }
}
