//! Step sequence catalog

/// A single stage of the fixed six-stage pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    /// Stable string identifier used by the service API
    pub slug: &'static str,

    /// Short human-readable title
    pub title: &'static str,

    /// One-line description of what the stage does
    pub description: &'static str,

    /// Position in the fixed sequence
    pub ordinal: usize,
}

static STEPS: [StepDefinition; 6] = [
    StepDefinition {
        slug: "ingest",
        title: "Ingest",
        description: "Collect supermarket and open-data sources.",
        ordinal: 0,
    },
    StepDefinition {
        slug: "normalize",
        title: "Normalize",
        description: "Normalize raw ingestion data into canonical columns.",
        ordinal: 1,
    },
    StepDefinition {
        slug: "classify",
        title: "Classify",
        description: "Assign taxonomy families and subfamilies.",
        ordinal: 2,
    },
    StepDefinition {
        slug: "validate",
        title: "Validate GTIN",
        description: "Validate GTIN digits and flag invalid barcodes.",
        ordinal: 3,
    },
    StepDefinition {
        slug: "dedupe",
        title: "Dedupe & Unify",
        description: "Merge duplicates prioritising supermarket sources.",
        ordinal: 4,
    },
    StepDefinition {
        slug: "publish",
        title: "Publish",
        description: "Publish unified artifacts to CSV/JSONL/SQLite.",
        ordinal: 5,
    },
];

/// Catalog of the fixed step sequence
///
/// The sequence is compiled in and never changes at runtime; lookups are
/// infallible (`by_index` clamps instead of panicking).
#[derive(Debug, Clone, Copy, Default)]
pub struct StepRegistry;

impl StepRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Number of steps in the sequence
    pub fn count(&self) -> usize {
        STEPS.len()
    }

    /// Get a step by position, clamping out-of-range indices to the last step
    pub fn by_index(&self, index: usize) -> &'static StepDefinition {
        &STEPS[index.min(STEPS.len() - 1)]
    }

    /// Find the position of a step by its slug
    pub fn index_of(&self, slug: &str) -> Option<usize> {
        STEPS.iter().position(|step| step.slug == slug)
    }

    /// Iterate over the steps in sequence order
    pub fn iter(&self) -> impl Iterator<Item = &'static StepDefinition> {
        STEPS.iter()
    }
}
