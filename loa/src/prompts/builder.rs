//! Request context assembly
//!
//! Turns the operator's raw letter parameters into the variables the request
//! template renders. All normalization lives here: the multi-line address
//! block, the date and reference defaults, and the placeholder fallbacks for
//! fields the letter body cannot do without.

use chrono::Local;
use serde::Serialize;
use tracing::debug;

use crate::letter::LetterParams;

/// Variables for the letter generation request template
///
/// `Option` fields drive `{{#if}}` sections: an absent field leaves no header
/// text behind in the rendered instruction. Required fields carry placeholder
/// defaults so a sparse parameter set still produces a coherent request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    pub reference_number: String,
    pub date: String,
    pub address_block: String,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub scenario: String,
    pub scenario_description: String,
    pub location: String,
    pub size: Option<String>,
    pub duration: String,
    pub has_payment: bool,
    pub payment_type: Option<String>,
    pub payment_amount: Option<String>,
    pub payment_unit: String,
    pub annual_increase: Option<String>,
    pub additional_terms: Option<String>,
    pub signatory_name: String,
    pub signatory_position: String,
    pub organization: String,
    pub special_requirements: Option<String>,
}

/// Treat missing, empty, and whitespace-only values alike
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn owned(value: &Option<String>) -> Option<String> {
    non_empty(value).map(str::to_string)
}

fn or_default(value: &Option<String>, default: &str) -> String {
    non_empty(value).unwrap_or(default).to_string()
}

/// Normalize the postal address fields into a single multi-line block
///
/// Populated segments are joined with single line breaks; empty segments are
/// dropped so the block never contains interior blank lines. City and
/// pincode collapse into one "City - Pincode" line.
fn address_block(params: &LetterParams) -> String {
    let mut parts: Vec<String> = Vec::new();

    for segment in [
        &params.company_name,
        &params.address_line1,
        &params.address_line2,
        &params.address_line3,
    ] {
        if let Some(text) = non_empty(segment) {
            parts.push(text.to_string());
        }
    }

    let city_pincode = match (non_empty(&params.city), non_empty(&params.pincode)) {
        (Some(city), Some(pin)) => Some(format!("{} - {}", city, pin)),
        (Some(city), None) => Some(city.to_string()),
        (None, Some(pin)) => Some(pin.to_string()),
        (None, None) => None,
    };
    if let Some(line) = city_pincode {
        parts.push(line);
    }

    parts.join("\n")
}

impl RequestContext {
    /// Assemble the template context from operator parameters
    ///
    /// Deterministic except for the date and reference defaults, which are
    /// stamped from the current calendar date when not supplied. A malformed
    /// date value is passed through as a literal, never rejected.
    pub fn from_params(params: &LetterParams) -> Self {
        debug!("RequestContext::from_params: called");
        let today = Local::now().date_naive();

        Self {
            reference_number: non_empty(&params.reference_number)
                .map(str::to_string)
                .unwrap_or_else(|| today.format("LOA/%Y/%m/%d").to_string()),
            date: non_empty(&params.date)
                .map(str::to_string)
                .unwrap_or_else(|| today.format("%d.%m.%Y").to_string()),
            address_block: address_block(params),
            contact_person: owned(&params.contact_person),
            contact_email: owned(&params.contact_email),
            contact_phone: owned(&params.contact_phone),
            scenario: or_default(&params.scenario, "outdoor advertising"),
            scenario_description: or_default(&params.scenario_description, "Outdoor Advertisement"),
            location: or_default(&params.location, "[Location]"),
            size: owned(&params.size),
            duration: or_default(&params.duration, "5"),
            has_payment: non_empty(&params.payment_type).is_some() && non_empty(&params.payment_amount).is_some(),
            payment_type: owned(&params.payment_type),
            payment_amount: owned(&params.payment_amount),
            payment_unit: or_default(&params.payment_unit, "square foot"),
            annual_increase: owned(&params.annual_increase),
            additional_terms: owned(&params.additional_terms),
            signatory_name: or_default(&params.signatory_name, "[Signatory Name]"),
            signatory_position: or_default(&params.signatory_position, "[Position]"),
            organization: or_default(&params.organization, "[Organization]"),
            special_requirements: owned(&params.special_requirements),
        }
    }
}
