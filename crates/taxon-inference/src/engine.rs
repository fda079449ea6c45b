//! TaxonomyEngine: loads a dataset through an `ITableSource` and runs the
//! full three-phase pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taxon_core::errors::TaxonResult;
use taxon_core::models::{
    ColumnProfile, Diagnostic, EquipmentType, EvidenceReport, KeywordAnalysis,
    SignatureDiscovery,
};
use taxon_core::traits::{ITableSource, ITreeSink};
use taxon_core::constants::VERSION;
use taxon_core::{run_span, TaxonomyConfig};
use tracing::info;
use uuid::Uuid;

use crate::pipeline::{self, PipelineOutput};
use crate::sink::FileTreeSink;

/// Everything produced by one run, ready to be cached as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyReport {
    pub run_id: Uuid,
    /// Version of the pipeline that produced the report.
    pub version: String,
    pub dataset: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub column_profiles: Vec<ColumnProfile>,
    pub signatures: SignatureDiscovery,
    pub keywords: KeywordAnalysis,
    pub evidence: EvidenceReport,
}

impl TaxonomyReport {
    pub fn equipment_types(&self) -> &[EquipmentType] {
        &self.keywords.equipment_types
    }

    /// Diagnostics from every phase, in phase order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.signatures
            .diagnostics
            .iter()
            .chain(&self.keywords.diagnostics)
            .chain(&self.evidence.diagnostics)
    }

    pub fn tree_text(&self) -> &str {
        &self.evidence.tree.text
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Drives a taxonomy run.
pub struct TaxonomyEngine {
    config: TaxonomyConfig,
    sink: Option<Box<dyn ITreeSink>>,
}

impl TaxonomyEngine {
    /// Create an engine. A file sink is attached when the config names a
    /// tree output path.
    pub fn new(config: TaxonomyConfig) -> Self {
        let sink = config
            .evidence
            .tree_output_path
            .as_ref()
            .map(|path| Box::new(FileTreeSink::new(path)) as Box<dyn ITreeSink>);
        Self { config, sink }
    }

    /// Replace the tree sink.
    pub fn with_sink(mut self, sink: Box<dyn ITreeSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &TaxonomyConfig {
        &self.config
    }

    /// Load all three inputs, then run the phases in order.
    ///
    /// A missing input stops the run before any phase starts.
    pub fn run(&self, source: &dyn ITableSource) -> TaxonResult<TaxonomyReport> {
        let dataset = source.dataset_name().to_string();
        let started_at = Utc::now();
        let run_id = Uuid::new_v4();
        let _span = run_span!(dataset, run_id).entered();

        let facilities = source.load_facilities()?;
        let summary = source.load_column_summary()?;
        let evidence = source.load_evidence()?;
        info!(
            %run_id,
            dataset = %dataset,
            facilities = facilities.len(),
            columns = summary.columns.len(),
            evidence_rows = evidence.len(),
            "taxonomy run started"
        );

        let PipelineOutput {
            column_profiles,
            signatures,
            keywords,
            evidence,
        } = pipeline::run_pipeline(
            &dataset,
            &facilities,
            &summary,
            &evidence,
            &self.config,
            self.sink.as_deref(),
        )?;

        let finished_at = Utc::now();
        info!(
            %run_id,
            dataset = %dataset,
            equipment_types = keywords.equipment_types.len(),
            elapsed_ms = (finished_at - started_at).num_milliseconds(),
            "taxonomy run finished"
        );

        Ok(TaxonomyReport {
            run_id,
            version: VERSION.to_string(),
            dataset,
            started_at,
            finished_at,
            column_profiles,
            signatures,
            keywords,
            evidence,
        })
    }
}
