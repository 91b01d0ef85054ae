//! Two-phase journey construction.
//!
//! `propose` runs validation so a caller can show findings to the
//! traveler; `commit` turns an accepted (or explicitly overridden) leg
//! sequence into journeys, splitting into several when the validator
//! recommends it.

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{DomainError, FlightLeg, MultiLegJourney, TravelerProfile};
use crate::validator::{ConnectionValidator, FlightValidationResult, RecommendedAction};

/// Why a commit did not produce journeys.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The legs contain blocking errors and must be fixed first.
    #[error("itinerary has blocking errors; fix them before committing")]
    Blocked {
        /// Full validation output for display
        validation: FlightValidationResult,
    },

    /// The itinerary is unusual; retry with an explicit override after
    /// the traveler confirms.
    #[error("itinerary needs confirmation; retry with an explicit override")]
    NeedsConfirmation {
        /// Full validation output for display
        validation: FlightValidationResult,
    },

    /// Journey construction itself failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl CommitError {
    /// True when the caller may retry the same legs with an override.
    pub fn can_proceed(&self) -> bool {
        matches!(self, CommitError::NeedsConfirmation { .. })
    }

    /// The validation output behind the rejection, if any.
    pub fn validation(&self) -> Option<&FlightValidationResult> {
        match self {
            CommitError::Blocked { validation }
            | CommitError::NeedsConfirmation { validation } => Some(validation),
            CommitError::Domain(_) => None,
        }
    }
}

/// Validate a leg sequence without building anything.
pub fn propose(validator: &ConnectionValidator, legs: &[FlightLeg]) -> FlightValidationResult {
    validator.validate(legs)
}

/// Build journeys from a leg sequence.
///
/// The validator's recommendation drives construction: a recommended
/// split produces one journey per suggested group; blocking errors
/// reject with [`CommitError::Blocked`]; an unusual itinerary rejects
/// with [`CommitError::NeedsConfirmation`] unless `override_confirmed`
/// is set. Within each journey, layovers are derived only across
/// ground-connected pairs.
///
/// # Errors
///
/// Returns `Err` when validation rejects the legs and no applicable
/// override was given.
pub fn commit(
    validator: &ConnectionValidator,
    legs: &[FlightLeg],
    profile: Option<TravelerProfile>,
    override_confirmed: bool,
) -> Result<Vec<MultiLegJourney>, CommitError> {
    let validation = validator.validate(legs);
    let connected = validator.metros().as_connectivity();

    match validation.recommended_action {
        RecommendedAction::SingleJourney => {
            let journey = MultiLegJourney::new(legs.to_vec(), profile, &connected)?;
            Ok(vec![journey])
        }
        RecommendedAction::SplitTrips => {
            let groups = validation
                .suggested_groups
                .clone()
                .unwrap_or_else(|| vec![legs.to_vec()]);

            info!(groups = groups.len(), "splitting itinerary into separate journeys");

            groups
                .into_iter()
                .map(|group| {
                    MultiLegJourney::new(group, profile.clone(), &connected).map_err(Into::into)
                })
                .collect()
        }
        RecommendedAction::FixErrors => Err(CommitError::Blocked { validation }),
        RecommendedAction::ConfirmUnusual => {
            if override_confirmed {
                debug!("confirmation override supplied; building journey");
                let journey = MultiLegJourney::new(legs.to_vec(), profile, &connected)?;
                Ok(vec![journey])
            } else {
                Err(CommitError::NeedsConfirmation { validation })
            }
        }
    }
}
