use crate::domain::{NewDao, NewProposal};
use crate::foundation::error::VoteSproutError;
use crate::foundation::{
    DAO_DESCRIPTION_MAX_LEN, DAO_NAME_MAX_LEN, DAO_NAME_MIN_LEN, PROPOSAL_DESCRIPTION_MAX_LEN, PROPOSAL_MAX_OPTIONS, PROPOSAL_MIN_OPTIONS,
    PROPOSAL_TITLE_MAX_LEN, PROPOSAL_TITLE_MIN_LEN, VOTER_MAX_LEN, VOTER_MIN_LEN,
};

pub fn validate_new_dao(dao: &NewDao) -> Result<(), VoteSproutError> {
    validate_len("name", &dao.name, DAO_NAME_MIN_LEN, DAO_NAME_MAX_LEN)?;
    validate_optional_max("description", dao.description.as_deref(), DAO_DESCRIPTION_MAX_LEN)?;
    Ok(())
}

pub fn validate_new_proposal(proposal: &NewProposal) -> Result<(), VoteSproutError> {
    validate_proposal_content(&proposal.title, proposal.description.as_deref(), &proposal.options)
}

/// Title, description and option rules shared by the API and the on-chain submit paths.
pub fn validate_proposal_content(title: &str, description: Option<&str>, options: &[String]) -> Result<(), VoteSproutError> {
    validate_len("title", title, PROPOSAL_TITLE_MIN_LEN, PROPOSAL_TITLE_MAX_LEN)?;
    validate_optional_max("description", description, PROPOSAL_DESCRIPTION_MAX_LEN)?;

    let count = options.len();
    if !(PROPOSAL_MIN_OPTIONS..=PROPOSAL_MAX_OPTIONS).contains(&count) {
        return Err(VoteSproutError::validation(
            "options",
            format!("expected between {PROPOSAL_MIN_OPTIONS} and {PROPOSAL_MAX_OPTIONS} options, got {count}"),
        ));
    }
    if let Some(index) = options.iter().position(|option| option.trim().is_empty()) {
        return Err(VoteSproutError::validation(format!("options[{index}]"), "must not be empty"));
    }
    Ok(())
}

/// Validates the raw voter string and returns the normalized identity that is stored.
///
/// Addresses are lowercased so uniqueness is case-insensitive on every backend.
pub fn normalize_voter(voter: &str) -> Result<String, VoteSproutError> {
    let trimmed = voter.trim();
    validate_len("voter", trimmed, VOTER_MIN_LEN, VOTER_MAX_LEN)?;
    Ok(trimmed.to_lowercase())
}

pub fn validate_choice_index(choice_index: i64) -> Result<(), VoteSproutError> {
    if choice_index < 0 {
        return Err(VoteSproutError::validation("choiceIndex", format!("must be >= 0, got {choice_index}")));
    }
    Ok(())
}

/// Upper-bound check applied when strict choice validation is enabled.
pub fn validate_choice_in_range(choice_index: i64, option_count: usize) -> Result<(), VoteSproutError> {
    validate_choice_index(choice_index)?;
    let in_range = usize::try_from(choice_index).map(|index| index < option_count).unwrap_or(false);
    if !in_range {
        return Err(VoteSproutError::validation("choiceIndex", format!("must be < {option_count}, got {choice_index}")));
    }
    Ok(())
}

fn validate_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), VoteSproutError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(VoteSproutError::validation(field, format!("must be between {min} and {max} characters, got {len}")));
    }
    Ok(())
}

fn validate_optional_max(field: &str, value: Option<&str>, max: usize) -> Result<(), VoteSproutError> {
    let Some(value) = value else {
        return Ok(());
    };
    let len = value.chars().count();
    if len > max {
        return Err(VoteSproutError::validation(field, format!("must be at most {max} characters, got {len}")));
    }
    Ok(())
}
