//! Client-side form validation.
//!
//! Every check here runs before a request is built; a failure is surfaced
//! immediately as `SpotiLoveError::Validation` and no network call is made.

use crate::api::{BasicProfileUpdate, LoginRequest, RegisterRequest};
use crate::error::{Result, SpotiLoveError};

pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 120;
pub const MAX_BIO_CHARS: usize = 500;
pub const MIN_PASSWORD_CHARS: usize = 6;
/// Artists required before moving on to song selection.
pub const MIN_ARTISTS: usize = 3;
/// Songs required before the music profile can be submitted.
pub const MIN_SONGS: usize = 5;

/// Values accepted by the "interested in" picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
pub enum Interest {
    Men,
    Women,
    Everyone,
}

impl Interest {
    /// The orientation value the backend stores for this choice.
    pub fn api_value(self) -> &'static str {
        match self {
            Interest::Men => "Male",
            Interest::Women => "Female",
            Interest::Everyone => "Both",
        }
    }

    /// Maps free-form picker text, treating anything unknown as "Both".
    pub fn api_value_for(label: &str) -> &'static str {
        label
            .trim()
            .parse::<Interest>()
            .map(Interest::api_value)
            .unwrap_or("Both")
    }
}

fn validate_email(email: &str) -> Result<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(SpotiLoveError::validation("email", "Please enter your email"));
    }
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        });
    if !valid {
        return Err(SpotiLoveError::validation("email", "Please enter a valid email address"));
    }
    Ok(email.to_string())
}

/// Parses an age field and checks it against the allowed range.
pub fn validate_age(raw: &str) -> Result<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SpotiLoveError::validation("age", "Please enter your age"));
    }
    match raw.parse::<i32>() {
        Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => Ok(age),
        _ => Err(SpotiLoveError::validation(
            "age",
            format!("Please enter a valid age between {} and {}", MIN_AGE, MAX_AGE),
        )),
    }
}

/// Trims a bio; blank becomes `None`.
pub fn validate_bio(raw: Option<&str>) -> Result<Option<String>> {
    let Some(bio) = raw.map(str::trim).filter(|b| !b.is_empty()) else {
        return Ok(None);
    };
    if bio.chars().count() > MAX_BIO_CHARS {
        return Err(SpotiLoveError::validation(
            "bio",
            format!("Bio must be at most {} characters", MAX_BIO_CHARS),
        ));
    }
    Ok(Some(bio.to_string()))
}

fn required_choice(field: &'static str, value: Option<&str>, message: &str) -> Result<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| SpotiLoveError::validation(field, message))
}

/// Validates the sign-in form.
pub fn login_request(email: &str, password: &str, remember_me: bool) -> Result<LoginRequest> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err(SpotiLoveError::validation("password", "Please enter your password"));
    }
    Ok(LoginRequest {
        email,
        password: password.to_string(),
        remember_me,
    })
}

/// Raw sign-up form input.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: String,
    pub gender: Option<String>,
    pub interest: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<RegisterRequest> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SpotiLoveError::validation("name", "Please enter your name"));
        }
        let email = validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(SpotiLoveError::validation(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_CHARS),
            ));
        }
        let age = validate_age(&self.age)?;
        let gender = required_choice("gender", self.gender.as_deref(), "Please select your gender")?;

        Ok(RegisterRequest {
            name: name.to_string(),
            email,
            password: self.password.clone(),
            age,
            gender,
            sexual_orientation: self
                .interest
                .as_deref()
                .filter(|i| !i.trim().is_empty())
                .map(|i| Interest::api_value_for(i).to_string()),
            bio: validate_bio(self.bio.as_deref())?,
            profile_image: self.profile_image.clone().filter(|p| !p.trim().is_empty()),
        })
    }
}

/// Raw input of the complete-profile screen.
#[derive(Debug, Clone, Default)]
pub struct BasicProfileForm {
    pub age: String,
    pub gender: Option<String>,
    pub interest: Option<String>,
    pub bio: Option<String>,
}

impl BasicProfileForm {
    pub fn validate(&self) -> Result<BasicProfileUpdate> {
        let age = validate_age(&self.age)?;
        let gender = required_choice("gender", self.gender.as_deref(), "Please select your gender")?;
        let interest = required_choice(
            "interest",
            self.interest.as_deref(),
            "Please select who you're interested in",
        )?;

        Ok(BasicProfileUpdate {
            age,
            gender,
            sexual_orientation: Interest::api_value_for(&interest).to_string(),
            bio: validate_bio(self.bio.as_deref())?,
        })
    }
}
