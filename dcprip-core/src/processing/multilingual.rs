//! Grouping of compositions that only differ in language.
//!
//! Releases often ship one composition per language. The picture is taken
//! from one of them (the main track) and the sound of the others is added
//! next to it. English, or failing that an unsubtitled picture, is preferred
//! for the main track.

use super::CompositionJob;
use crate::naming::CompositionMetadata;

/// Language code of the merged output.
pub const MERGED_LANGUAGE: &str = "XX-XX";

/// Facility code of the merged output.
pub const MERGED_FACILITY: &str = "VDX";

/// A main composition and the other-language versions of it.
#[derive(Debug, Clone)]
pub struct MultilingualGroup<'a> {
    pub main: &'a CompositionJob,
    pub others: Vec<&'a CompositionJob>,
}

impl MultilingualGroup<'_> {
    /// Language of every member, main first.
    pub fn languages(&self) -> Vec<&str> {
        std::iter::once(self.main)
            .chain(self.others.iter().copied())
            .map(|job| job.metadata.language.as_str())
            .collect()
    }

    /// Standardized title of the merged output. Single-member groups keep
    /// the title of the main track.
    pub fn merged_title(&self) -> String {
        let metadata = &self.main.metadata;
        if self.others.is_empty() {
            return metadata.standard_title.clone();
        }
        let title = metadata
            .standard_title
            .replace(&metadata.language, MERGED_LANGUAGE);
        if metadata.facility.is_empty() {
            title
        } else {
            title.replace(&metadata.facility, MERGED_FACILITY)
        }
    }
}

/// Groups compositions with the same title, content type, modifiers and
/// aspect ratio. Groups appear in the order of their first member.
pub fn group_multilingual(jobs: &[CompositionJob]) -> Vec<MultilingualGroup<'_>> {
    let mut remaining: Vec<&CompositionJob> = jobs.iter().collect();
    let mut groups = Vec::new();

    while !remaining.is_empty() {
        let mut main = remaining.remove(0);
        let mut others = Vec::new();
        remaining.retain(|&other| {
            if !same_release(&main.metadata, &other.metadata) {
                return true;
            }
            if prefer_as_main(&main.metadata, &other.metadata) {
                others.push(main);
                main = other;
            } else {
                others.push(other);
            }
            false
        });
        groups.push(MultilingualGroup { main, others });
    }
    groups
}

// Aspect ratio is part of the match since a release may come in several.
fn same_release(first: &CompositionMetadata, second: &CompositionMetadata) -> bool {
    first.title == second.title
        && first.content_type == second.content_type
        && first.modifiers == second.modifiers
        && first.aspect_ratio == second.aspect_ratio
}

fn prefer_as_main(current: &CompositionMetadata, candidate: &CompositionMetadata) -> bool {
    candidate.language.starts_with("EN-")
        || (!current.is_unsubtitled() && candidate.is_unsubtitled())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::classify;
    use crate::playlist::Composition;
    use std::path::PathBuf;

    fn job(title: &str) -> CompositionJob {
        CompositionJob {
            playlist: PathBuf::from(format!("{title}.xml")),
            composition: Composition::new(title.to_string(), Vec::new()),
            metadata: classify(title).unwrap(),
        }
    }

    #[test]
    fn test_english_becomes_main() {
        let jobs = vec![
            job("Movie_FTR_F_DE-DE_DE_51_2K_ST_20200101_ACE_SMPTE_OV"),
            job("Movie_FTR_F_EN-XX_US_51_2K_ST_20200101_ACE_SMPTE_OV"),
            job("Movie_FTR_F_FR-FR_FR_51_2K_ST_20200101_ACE_SMPTE_OV"),
            job("Other_TLR_F_EN-XX_US_51_2K_ST_20200101_ACE_SMPTE_OV"),
        ];

        let groups = group_multilingual(&jobs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].languages(), vec!["EN-XX", "DE-DE", "FR-FR"]);
        assert_eq!(
            groups[0].merged_title(),
            "Movie_FTR_F_XX-XX_US_51_2K_ST_20200101_VDX_SMPTE_OV"
        );
        assert!(groups[1].others.is_empty());
        assert_eq!(groups[1].merged_title(), jobs[3].metadata.standard_title);
    }

    #[test]
    fn test_unsubtitled_preferred_over_subtitled() {
        let jobs = vec![
            job("Movie_FTR_S_DE-FR_CH_51_2K_ST_20200101_ACE"),
            job("Movie_FTR_S_FR-XX_FR_51_2K_ST_20200101_ACE"),
            job("Movie_FTR_S_IT-FR_CH_51_2K_ST_20200101_ACE"),
        ];

        let groups = group_multilingual(&jobs);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].main.metadata.language, "FR-XX");
    }

    #[test]
    fn test_aspect_ratios_stay_apart() {
        let jobs = vec![
            job("Movie_FTR_F_EN-XX_US_51_2K"),
            job("Movie_FTR_S_EN-XX_US_51_2K"),
        ];
        assert_eq!(group_multilingual(&jobs).len(), 2);
    }
}
