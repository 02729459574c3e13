//! Operator-supplied letter parameters

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Parameters for generating a Letter of Authorization
///
/// Every field is optional. Missing values degrade to placeholders or clean
/// omission during prompt construction, never to an error. The `date` field
/// is free text on purpose: a malformed date is passed through verbatim and
/// left to the operator to notice in the draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LetterParams {
    pub reference_number: Option<String>,
    pub date: Option<String>,

    // Recipient address
    pub company_name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub address_line3: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,

    // Contact details
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,

    // Scenario
    pub scenario: Option<String>,
    pub scenario_description: Option<String>,
    pub location: Option<String>,
    pub size: Option<String>,
    pub duration: Option<String>,

    // Payment schedule
    pub payment_type: Option<String>,
    pub payment_amount: Option<String>,
    pub payment_unit: Option<String>,
    pub annual_increase: Option<String>,

    pub additional_terms: Option<String>,

    // Signatory block
    pub signatory_name: Option<String>,
    pub signatory_position: Option<String>,
    pub organization: Option<String>,

    pub special_requirements: Option<String>,
}

impl LetterParams {
    /// Load parameters from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(?path, "LetterParams::load: called");
        let content =
            std::fs::read_to_string(path).context(format!("Failed to read parameter file {}", path.display()))?;

        serde_yaml::from_str(&content).context(format!("Failed to parse parameter file {}", path.display()))
    }
}
