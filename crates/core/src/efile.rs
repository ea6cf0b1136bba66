//! E-file wizard steps and validation.
//!
//! The wizard collects an [`EfileDraft`] across five steps. The mortgage step
//! only applies to mortgage applications; for other filing types it is
//! skipped in both directions. Validation is per step so the UI can stop the
//! user at the first incomplete page, and [`validate_submission`] re-checks
//! every applicable step before a filing is stored.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Filing type and status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingType {
    PropertyDeed,
    MortgageApplication,
    LienRelease,
}

impl FilingType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PropertyDeed => "property_deed",
            Self::MortgageApplication => "mortgage_application",
            Self::LienRelease => "lien_release",
        }
    }

    pub fn requires_mortgage(self) -> bool {
        self == Self::MortgageApplication
    }
}

/// Status of a newly stored filing. Review outcomes are recorded by bank
/// staff outside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    Submitted,
}

impl FilingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
        }
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfileStep {
    FilingType,
    Filer,
    Property,
    Mortgage,
    Review,
}

pub const MIN_STEP: u8 = 1;
pub const MAX_STEP: u8 = 5;

impl EfileStep {
    /// Convert a 1-based step number to an `EfileStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::FilingType),
            2 => Ok(Self::Filer),
            3 => Ok(Self::Property),
            4 => Ok(Self::Mortgage),
            5 => Ok(Self::Review),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    pub fn to_number(self) -> u8 {
        match self {
            Self::FilingType => 1,
            Self::Filer => 2,
            Self::Property => 3,
            Self::Mortgage => 4,
            Self::Review => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FilingType => "Filing Type",
            Self::Filer => "Filer Details",
            Self::Property => "Property Details",
            Self::Mortgage => "Mortgage Terms",
            Self::Review => "Review & Submit",
        }
    }

    /// Whether the step is shown for the chosen filing type. Until a type is
    /// chosen every step counts as applicable.
    pub fn applies_to(self, filing_type: Option<FilingType>) -> bool {
        match (self, filing_type) {
            (Self::Mortgage, Some(ft)) => ft.requires_mortgage(),
            _ => true,
        }
    }
}

/// The next applicable step, or `None` from the review step.
pub fn next_step(current: EfileStep, filing_type: Option<FilingType>) -> Option<EfileStep> {
    ((current.to_number() + 1)..=MAX_STEP)
        .filter_map(|n| EfileStep::from_number(n).ok())
        .find(|step| step.applies_to(filing_type))
}

/// The previous applicable step, or `None` from the first step.
pub fn previous_step(current: EfileStep, filing_type: Option<FilingType>) -> Option<EfileStep> {
    (MIN_STEP..current.to_number())
        .rev()
        .filter_map(|n| EfileStep::from_number(n).ok())
        .find(|step| step.applies_to(filing_type))
}

/// Reject a step that is skipped for the chosen filing type.
pub fn ensure_step_applies(
    step: EfileStep,
    filing_type: Option<FilingType>,
) -> Result<(), CoreError> {
    if step.applies_to(filing_type) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Step {} ({}) does not apply to this filing type",
        step.to_number(),
        step.label()
    )))
}

/// A transition must move exactly one applicable step forward or back.
pub fn validate_step_transition(
    current: u8,
    next: u8,
    filing_type: Option<FilingType>,
) -> Result<(), CoreError> {
    let current_step = EfileStep::from_number(current)?;
    let next_step_requested = EfileStep::from_number(next)?;

    ensure_step_applies(next_step_requested, filing_type)?;

    let allowed = next_step(current_step, filing_type) == Some(next_step_requested)
        || previous_step(current_step, filing_type) == Some(next_step_requested);
    if !allowed {
        return Err(CoreError::Validation(format!(
            "Cannot move from step {current} to step {next}. \
             Must advance or go back exactly one step."
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Everything the wizard has collected so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfileDraft {
    pub filing_type: Option<FilingType>,
    pub filer: Option<FilerDetails>,
    pub property: Option<PropertyDetails>,
    pub mortgage: Option<MortgageTerms>,
    /// The filer confirmed the information is accurate.
    #[serde(default)]
    pub attested: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FilerDetails {
    #[validate(length(min = 1, max = 120))]
    pub legal_name: String,
    #[validate(length(min = 3, max = 20))]
    pub platform_username: String,
    #[validate(email)]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PropertyDetails {
    #[validate(length(min = 5, max = 200))]
    pub address: String,
    pub parcel_id: String,
    #[validate(range(min = 1))]
    pub assessed_value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MortgageTerms {
    #[validate(range(min = 1))]
    pub principal: i64,
    #[validate(range(min = 1, max = 360))]
    pub term_months: i32,
    /// Annual rate in basis points.
    #[validate(range(min = 0, max = 5000))]
    pub rate_bps: i32,
}

fn parcel_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^COL-\d{4,8}$").expect("parcel id pattern is valid"))
}

pub fn is_valid_parcel_id(parcel_id: &str) -> bool {
    parcel_pattern().is_match(parcel_id)
}

fn check<T: Validate>(section: &str, value: &T) -> Result<(), CoreError> {
    value
        .validate()
        .map_err(|e| CoreError::Validation(format!("{section}: {e}")))
}

fn missing(step: EfileStep) -> CoreError {
    CoreError::Validation(format!(
        "Step {} ({}) has not been completed",
        step.to_number(),
        step.label()
    ))
}

/// Validate the fields collected by one step.
pub fn validate_step(step: EfileStep, draft: &EfileDraft) -> Result<(), CoreError> {
    match step {
        EfileStep::FilingType => {
            draft.filing_type.ok_or_else(|| missing(step))?;
        }
        EfileStep::Filer => {
            let filer = draft.filer.as_ref().ok_or_else(|| missing(step))?;
            check("filer", filer)?;
        }
        EfileStep::Property => {
            let property = draft.property.as_ref().ok_or_else(|| missing(step))?;
            check("property", property)?;
            if !is_valid_parcel_id(&property.parcel_id) {
                return Err(CoreError::Validation(format!(
                    "property: parcel id '{}' must look like COL-1234",
                    property.parcel_id
                )));
            }
        }
        EfileStep::Mortgage => {
            if !step.applies_to(draft.filing_type) {
                return Ok(());
            }
            let mortgage = draft.mortgage.as_ref().ok_or_else(|| missing(step))?;
            check("mortgage", mortgage)?;
            if let Some(property) = &draft.property {
                if mortgage.principal > property.assessed_value {
                    return Err(CoreError::Validation(
                        "mortgage: principal cannot exceed the assessed property value".into(),
                    ));
                }
            }
        }
        EfileStep::Review => {
            if !draft.attested {
                return Err(CoreError::Validation(
                    "The filing must be attested before it can be submitted".into(),
                ));
            }
        }
    }
    Ok(())
}

/// Validate every applicable step. Returns the filing type on success.
pub fn validate_submission(draft: &EfileDraft) -> Result<FilingType, CoreError> {
    let filing_type = draft
        .filing_type
        .ok_or_else(|| missing(EfileStep::FilingType))?;

    for n in MIN_STEP..=MAX_STEP {
        let step = EfileStep::from_number(n)?;
        if step.applies_to(Some(filing_type)) {
            validate_step(step, draft)?;
        }
    }

    if !filing_type.requires_mortgage() && draft.mortgage.is_some() {
        return Err(CoreError::Validation(format!(
            "Mortgage terms are not accepted on a {} filing",
            filing_type.as_str()
        )));
    }
    Ok(filing_type)
}
