//! Onboarding completeness classifier.

use super::model::Profile;
use serde::Serialize;

/// How far a user got through onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum Completeness {
    /// Age, gender or orientation is missing.
    BasicIncomplete,
    /// Basic profile present but no music taste recorded.
    MusicIncomplete,
    Complete,
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Classifies a profile. Basic fields are checked before music.
pub fn classify(profile: &Profile) -> Completeness {
    if profile.age == 0
        || is_blank(profile.gender.as_deref())
        || is_blank(profile.sexual_orientation.as_deref())
    {
        return Completeness::BasicIncomplete;
    }

    match &profile.music_profile {
        None => Completeness::MusicIncomplete,
        Some(music) if music.is_empty() => Completeness::MusicIncomplete,
        Some(_) => Completeness::Complete,
    }
}
