//! Form validation returning a tagged [`Validation`] result.
//!
//! Reasons are reported in the order the forms check them, so the first
//! reason is always the one a single-message UI should show.

use std::sync::LazyLock;

use regex::Regex;
use validator::{Validate, ValidationErrors};

use crate::errors::AppError;
use crate::models::announcement::CreateAnnouncement;
use crate::models::post::{Category, CreatePost};
use crate::models::user::Profile;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_TAGS: usize = 5;

static UPPERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").expect("valid regex"));
static SPECIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(Vec<String>),
}

impl Validation {
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        if reasons.is_empty() {
            Validation::Valid
        } else {
            Validation::Invalid(reasons)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn reasons(&self) -> &[String] {
        match self {
            Validation::Valid => &[],
            Validation::Invalid(reasons) => reasons,
        }
    }

    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Validation::Valid => Ok(()),
            Validation::Invalid(reasons) => Err(AppError::Invalid(reasons)),
        }
    }
}

/// Complexity rules every new password must satisfy.
pub fn password_rules(password: &str) -> Vec<String> {
    let mut reasons = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        reasons.push("Password must be at least 8 characters!".to_string());
    }
    if !UPPERCASE.is_match(password) {
        reasons.push("At least one uppercase character required!".to_string());
    }
    if !DIGIT.is_match(password) {
        reasons.push("At least one number required!".to_string());
    }
    if !SPECIAL.is_match(password) {
        reasons.push("At least one special character required!".to_string());
    }
    reasons
}

/// Password rules followed by the confirmation check.
pub fn validate_new_password(password: &str, confirmation: &str) -> Validation {
    let mut reasons = password_rules(password);
    if password != confirmation {
        reasons.push("Passwords do not match!".to_string());
    }
    Validation::from_reasons(reasons)
}

#[derive(Debug, Validate)]
struct PostRules {
    #[validate(length(min = 5, message = "Title must be at least 5 characters."))]
    title: String,
    #[validate(length(min = 50, message = "Content must be at least 50 characters."))]
    content: String,
}

#[derive(Debug, Validate)]
struct ProfileRules {
    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    email: String,
    #[validate(length(max = 500, message = "Bio must not be longer than 500 characters."))]
    bio: String,
    #[validate(url(message = "Please enter a valid URL."))]
    url: Option<String>,
    #[validate(length(max = 100, message = "Location must not be longer than 100 characters."))]
    location: String,
}

/// Flatten validator errors into messages, following `fields` order.
fn reasons_in_order(errors: &ValidationErrors, fields: &[&str]) -> Vec<String> {
    let by_field = errors.field_errors();
    let mut reasons = Vec::new();
    for field in fields {
        if let Some(list) = by_field.get(*field) {
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                reasons.push(message);
            }
        }
    }
    reasons
}

fn rule_reasons(result: &Result<(), ValidationErrors>, fields: &[&str]) -> Vec<String> {
    match result {
        Ok(()) => Vec::new(),
        Err(errors) => reasons_in_order(errors, fields),
    }
}

pub const MAX_TITLE_LEN: usize = 100;

/// Title and body rules shared by posts and announcements.
fn title_and_content_reasons(title: &str, content: &str) -> Vec<String> {
    let rules = PostRules {
        title: title.trim().to_string(),
        content: content.trim().to_string(),
    };
    let result = rules.validate();
    let mut reasons = rule_reasons(&result, &["title"]);
    if rules.title.chars().count() > MAX_TITLE_LEN {
        reasons.push("Title must not be longer than 100 characters.".to_string());
    }
    reasons.extend(rule_reasons(&result, &["content"]));
    reasons
}

/// Trim tags, drop blanks and repeats, keep first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

pub fn validate_post(form: &CreatePost) -> Validation {
    let mut reasons = title_and_content_reasons(&form.title, &form.content);
    if Category::parse(form.category.trim()).is_none() {
        reasons.push("Please select a category.".to_string());
    }
    if normalize_tags(&form.tags).len() > MAX_TAGS {
        reasons.push(format!("You can add up to {MAX_TAGS} tags."));
    }
    Validation::from_reasons(reasons)
}

pub fn validate_announcement(form: &CreateAnnouncement) -> Validation {
    Validation::from_reasons(title_and_content_reasons(&form.title, &form.content))
}

pub fn validate_profile(profile: &Profile) -> Validation {
    let url = profile.url.trim();
    let rules = ProfileRules {
        name: profile.name.trim().to_string(),
        email: profile.email.trim().to_string(),
        bio: profile.bio.clone(),
        url: (!url.is_empty()).then(|| url.to_string()),
        location: profile.location.clone(),
    };
    Validation::from_reasons(rule_reasons(
        &rules.validate(),
        &["name", "email", "bio", "url", "location"],
    ))
}

pub fn validate_comment(content: &str) -> Validation {
    if content.trim().is_empty() {
        Validation::Invalid(vec!["Comment cannot be empty".to_string()])
    } else {
        Validation::Valid
    }
}

pub fn validate_report_reason(reason: &str) -> Validation {
    if reason.trim().is_empty() {
        Validation::Invalid(vec![
            "Please provide a reason for reporting this post.".to_string(),
        ])
    } else {
        Validation::Valid
    }
}
