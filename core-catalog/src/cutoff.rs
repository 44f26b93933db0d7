//! Cutoff evaluation over acceptance profiles.
//!
//! An acceptance profile ranks qualities from lowest acceptable to highest
//! and marks one of them as the cutoff. Files ranked strictly below the
//! cutoff are eligible for an upgrade; eligibility queries page over the id
//! sets this module computes.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Language, Quality};

/// One ranked entry in an acceptance profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileItem {
    pub quality: Quality,
    /// Whether this quality may be grabbed at all. The cutoff computation
    /// ignores this flag; ordering alone decides eligibility.
    pub allowed: bool,
}

/// An ordered quality ranking with a configured cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceProfile {
    pub id: i64,
    pub name: String,
    /// Lowest acceptable quality first.
    pub items: Vec<ProfileItem>,
    pub cutoff: Quality,
}

/// An ordered language ranking with a configured cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub id: i64,
    pub name: String,
    /// Lowest acceptable language first.
    pub languages: Vec<Language>,
    pub cutoff: Language,
}

/// Quality ids below one profile's cutoff, keyed by profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitiesBelowCutoff {
    pub profile_id: i64,
    pub quality_ids: Vec<i32>,
}

/// Language ids below one profile's cutoff, keyed by profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagesBelowCutoff {
    pub profile_id: i64,
    pub language_ids: Vec<i32>,
}

/// Qualities ranked strictly before the profile's cutoff.
///
/// A cutoff marker missing from its own ranked list is a configuration
/// integrity problem, not a crash: nothing is below the cutoff and the
/// result is empty.
pub fn below_cutoff(profile: &AcceptanceProfile) -> Vec<Quality> {
    let Some(cutoff_index) = profile
        .items
        .iter()
        .position(|item| item.quality == profile.cutoff)
    else {
        warn!(
            profile = %profile.name,
            cutoff = %profile.cutoff,
            "Cutoff quality not present in profile items; treating nothing as below cutoff"
        );
        return Vec::new();
    };

    profile.items[..cutoff_index]
        .iter()
        .map(|item| item.quality.clone())
        .collect()
}

/// Languages ranked strictly before the profile's cutoff.
pub fn language_below_cutoff(profile: &LanguageProfile) -> Vec<Language> {
    let Some(cutoff_index) = profile
        .languages
        .iter()
        .position(|language| *language == profile.cutoff)
    else {
        warn!(
            profile = %profile.name,
            cutoff = %profile.cutoff,
            "Cutoff language not present in profile; treating nothing as below cutoff"
        );
        return Vec::new();
    };

    profile.languages[..cutoff_index].to_vec()
}

/// Below-cutoff quality id sets for every profile that has any.
///
/// Profiles with nothing below cutoff are omitted so downstream eligibility
/// queries never join against empty sets.
pub fn profiles_below_cutoff(profiles: &[AcceptanceProfile]) -> Vec<QualitiesBelowCutoff> {
    profiles
        .iter()
        .filter_map(|profile| {
            let below = below_cutoff(profile);
            if below.is_empty() {
                None
            } else {
                Some(QualitiesBelowCutoff {
                    profile_id: profile.id,
                    quality_ids: below.into_iter().map(|q| q.id).collect(),
                })
            }
        })
        .collect()
}

/// Below-cutoff language id sets for every profile that has any.
pub fn language_profiles_below_cutoff(profiles: &[LanguageProfile]) -> Vec<LanguagesBelowCutoff> {
    profiles
        .iter()
        .filter_map(|profile| {
            let below = language_below_cutoff(profile);
            if below.is_empty() {
                None
            } else {
                Some(LanguagesBelowCutoff {
                    profile_id: profile.id,
                    language_ids: below.into_iter().map(|l| l.id).collect(),
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(items: &[(i32, &str)], cutoff: Quality) -> AcceptanceProfile {
        AcceptanceProfile {
            id: 1,
            name: "Standard".to_string(),
            items: items
                .iter()
                .map(|(id, name)| ProfileItem {
                    quality: Quality::new(*id, *name),
                    allowed: true,
                })
                .collect(),
            cutoff,
        }
    }

    #[test]
    fn test_below_cutoff_returns_entries_before_marker() {
        let p = profile(
            &[(1, "Low"), (2, "Medium"), (3, "High")],
            Quality::new(2, "Medium"),
        );

        let below = below_cutoff(&p);
        assert_eq!(below, vec![Quality::new(1, "Low")]);
    }

    #[test]
    fn test_below_cutoff_at_lowest_rank_is_empty() {
        let p = profile(
            &[(1, "Low"), (2, "Medium"), (3, "High")],
            Quality::new(1, "Low"),
        );

        assert!(below_cutoff(&p).is_empty());
    }

    #[test]
    fn test_below_cutoff_missing_marker_is_empty_not_error() {
        let p = profile(
            &[(1, "Low"), (2, "Medium"), (3, "High")],
            Quality::new(99, "Remastered"),
        );

        assert!(below_cutoff(&p).is_empty());
    }

    #[test]
    fn test_profiles_below_cutoff_omits_empty_sets() {
        let with_below = profile(
            &[(1, "Low"), (2, "Medium"), (3, "High")],
            Quality::new(3, "High"),
        );
        let mut nothing_below = profile(
            &[(1, "Low"), (2, "Medium")],
            Quality::new(1, "Low"),
        );
        nothing_below.id = 2;

        let result = profiles_below_cutoff(&[with_below, nothing_below]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].profile_id, 1);
        assert_eq!(result[0].quality_ids, vec![1, 2]);
    }

    #[test]
    fn test_language_below_cutoff() {
        let p = LanguageProfile {
            id: 4,
            name: "Languages".to_string(),
            languages: vec![
                Language::new(1, "English"),
                Language::new(2, "French"),
                Language::new(3, "German"),
            ],
            cutoff: Language::new(3, "German"),
        };

        let below = language_below_cutoff(&p);
        assert_eq!(below.len(), 2);

        let sets = language_profiles_below_cutoff(&[p]);
        assert_eq!(sets[0].language_ids, vec![1, 2]);
    }
}
