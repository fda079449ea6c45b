//! Data model shared by every phase.

pub mod column;
pub mod confidence;
pub mod consolidation;
pub mod diagnostic;
pub mod equipment;
pub mod evidence;
pub mod facility;
pub mod hierarchy;
pub mod report;
pub mod signature;

pub use column::{ColumnCategory, ColumnProfile, ColumnStats, ColumnSummary};
pub use confidence::{BucketMember, ConfidenceBucket, ConfidenceReport};
pub use consolidation::{ConsolidationResult, ConsolidationSummary, MergedGroup};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use equipment::{
    ConfidenceTier, EquipmentType, KeywordAnalysis, KeywordCount, TierCounts, VocabularyEntry,
};
pub use evidence::{EvidenceRow, EvidenceStatus, UdcCoverage, UdcCoverageProfile, UdcTier};
pub use facility::{FacilityRecord, FacilitySnapshot, FacilityTable, RawRow};
pub use hierarchy::{EquipmentHierarchy, HierarchyRelationship, SimilarityEntry};
pub use report::{EvidenceReport, TreeOutput};
pub use signature::{
    AttributeSignature, FacilityGroup, SignatureDiscovery, ValueCount, ValuePattern,
};
