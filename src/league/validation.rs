use chrono::NaiveDate;

use crate::models::competition::CreateCompetitionRequest;
use crate::models::team::TeamRegistrationRequest;

/// Highest score accepted for one side; anything above is a data entry error.
pub const MAX_REASONABLE_SCORE: i32 = 99;
pub const MAX_UPCOMING_LIMIT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Centralized validation for competition input
pub struct LeagueValidator;

impl LeagueValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a competition creation request and return it sanitized
    pub fn validate_create_competition_request(
        &self,
        request: &CreateCompetitionRequest,
    ) -> Result<CreateCompetitionRequest, ValidationError> {
        let name = self.validate_competition_name(&request.name)?;
        self.validate_date_window(request.starts_on, request.ends_on)?;

        if let (Some(start), Some(end)) =
            (request.registration_starts_on, request.registration_ends_on)
        {
            if start > end {
                return Err(ValidationError::new(
                    "Registration period must start before it ends",
                ));
            }
        }

        let modalities = self.normalize_modalities(&request.modalities)?;

        Ok(CreateCompetitionRequest {
            name,
            modalities,
            ..request.clone()
        })
    }

    /// Validate competition name
    pub fn validate_competition_name(&self, name: &str) -> Result<String, ValidationError> {
        let sanitized = self.sanitize_string_input(name);

        if sanitized.is_empty() {
            return Err(ValidationError::new("Competition name cannot be empty"));
        }

        if sanitized.chars().count() > 255 {
            return Err(ValidationError::new(
                "Competition name too long (maximum 255 characters)",
            ));
        }

        // Ensure name has actual content (not just whitespace/special chars)
        if !sanitized.chars().any(|c| c.is_alphanumeric()) {
            return Err(ValidationError::new(
                "Competition name must contain alphanumeric characters",
            ));
        }

        Ok(sanitized)
    }

    /// The window is inclusive, so a single-day competition is valid
    pub fn validate_date_window(
        &self,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
    ) -> Result<(), ValidationError> {
        if ends_on < starts_on {
            return Err(ValidationError::new(format!(
                "Competition period is invalid: ends on {} before starting on {}",
                ends_on, starts_on
            )));
        }
        Ok(())
    }

    /// Trim, drop empties and de-duplicate while keeping the first occurrence
    pub fn normalize_modalities(&self, modalities: &[String]) -> Result<Vec<String>, ValidationError> {
        let mut normalized: Vec<String> = Vec::new();
        for modality in modalities {
            let sanitized = self.sanitize_string_input(modality);
            if sanitized.is_empty() {
                continue;
            }
            if sanitized.chars().count() > 100 {
                return Err(ValidationError::new(format!(
                    "Modality name too long (max 100 characters): {}",
                    sanitized
                )));
            }
            if !normalized.contains(&sanitized) {
                normalized.push(sanitized);
            }
        }
        Ok(normalized)
    }

    /// Validate a team registration and return it sanitized
    pub fn validate_team_registration(
        &self,
        request: &TeamRegistrationRequest,
    ) -> Result<TeamRegistrationRequest, ValidationError> {
        let name = self.validate_and_sanitize_team_name(&request.name)?;
        let contact_name = self.sanitize_string_input(&request.contact_name);
        if contact_name.is_empty() {
            return Err(ValidationError::new("Contact name cannot be empty"));
        }
        let contact_email = self.validate_contact_email(&request.contact_email)?;

        Ok(TeamRegistrationRequest {
            name,
            modality: self.sanitize_string_input(&request.modality),
            contact_name,
            contact_email,
        })
    }

    /// Validate and sanitize team name
    pub fn validate_and_sanitize_team_name(&self, name: &str) -> Result<String, ValidationError> {
        let sanitized = self.sanitize_string_input(name);

        if sanitized.is_empty() {
            return Err(ValidationError::new("Team name cannot be empty"));
        }

        if sanitized.chars().count() > 100 {
            return Err(ValidationError::new("Team name too long (max 100 characters)"));
        }

        Ok(sanitized)
    }

    /// Minimal shape check; delivery problems surface in the notifier logs.
    pub fn validate_contact_email(&self, email: &str) -> Result<String, ValidationError> {
        let sanitized = self.sanitize_string_input(email);
        let valid = match sanitized.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !sanitized.contains(char::is_whitespace)
            }
            None => false,
        };

        if !valid {
            return Err(ValidationError::new(format!(
                "Invalid contact email: {}",
                sanitized
            )));
        }
        Ok(sanitized)
    }

    /// Validate fixture scores
    pub fn validate_scores(&self, home_score: i32, away_score: i32) -> Result<(), ValidationError> {
        // Scores cannot be negative
        if home_score < 0 {
            return Err(ValidationError::new(format!(
                "Home score cannot be negative: {}",
                home_score
            )));
        }

        if away_score < 0 {
            return Err(ValidationError::new(format!(
                "Away score cannot be negative: {}",
                away_score
            )));
        }

        if home_score > MAX_REASONABLE_SCORE {
            return Err(ValidationError::new(format!(
                "Home score too high: {} (max {})",
                home_score, MAX_REASONABLE_SCORE
            )));
        }

        if away_score > MAX_REASONABLE_SCORE {
            return Err(ValidationError::new(format!(
                "Away score too high: {} (max {})",
                away_score, MAX_REASONABLE_SCORE
            )));
        }

        Ok(())
    }

    /// Validate the limit of a listing request, falling back to `default`
    pub fn validate_limit(&self, limit: Option<i64>, default: i64) -> Result<i64, ValidationError> {
        let limit = limit.unwrap_or(default);

        if limit < 1 {
            return Err(ValidationError::new("Limit must be positive"));
        }

        if limit > MAX_UPCOMING_LIMIT {
            return Err(ValidationError::new(format!(
                "Limit too high (max {})",
                MAX_UPCOMING_LIMIT
            )));
        }

        Ok(limit)
    }

    /// Comprehensive input sanitization
    pub fn sanitize_string_input(&self, input: &str) -> String {
        input
            .chars()
            .filter(|&c| c != '\0') // Remove null bytes
            .collect::<String>()
            .trim()
            .to_string()
    }
}

impl Default for LeagueValidator {
    fn default() -> Self {
        Self::new()
    }
}
