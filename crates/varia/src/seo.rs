//! SEO copy generation.
//!
//! An SEO template is a set of text fields, each a template for the
//! pipeline. Generated titles and descriptions are truncated to the lengths
//! search engines display.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{Chooser, Engine, pick_replacements};
use crate::types::{Replacements, VariableSets};

/// Maximum length of `title` and `og_title`.
pub const TITLE_LIMIT: usize = 60;

/// Maximum length of `description` and `og_description`.
pub const DESCRIPTION_LIMIT: usize = 160;

/// Shortest title that scores without a penalty.
pub const TITLE_MIN: usize = 30;

/// Shortest description that scores without a penalty.
pub const DESCRIPTION_MIN: usize = 120;

/// Focus keyword occurrences per hundred words, as an inclusive range, that
/// score without a penalty.
pub const KEYWORD_DENSITY_RANGE: (f64, f64) = (0.5, 3.0);

/// Names of the built-in templates, see [`preset`].
pub const PRESET_NAMES: [&str; 3] = ["service_location", "emergency_service", "best_service"];

/// SEO text fields. Used both for templates and for generated data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoFields {
    pub title: String,
    pub description: String,
    pub focus_keyword: String,
    pub og_title: String,
    pub og_description: String,
    pub twitter_title: String,
    pub twitter_description: String,
}

/// Generated SEO data with the replacements that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoVariation {
    pub seo_data: SeoFields,
    pub replacements: Replacements,
}

impl SeoFields {
    /// Apply `f` to every field, in declaration order.
    fn map(&self, mut f: impl FnMut(&str) -> String) -> SeoFields {
        SeoFields {
            title: f(&self.title),
            description: f(&self.description),
            focus_keyword: f(&self.focus_keyword),
            og_title: f(&self.og_title),
            og_description: f(&self.og_description),
            twitter_title: f(&self.twitter_title),
            twitter_description: f(&self.twitter_description),
        }
    }
}

impl Engine {
    /// Process every field of an SEO template and apply length limits.
    pub fn generate_seo_data(
        &self,
        template: &SeoFields,
        replacements: &Replacements,
        chooser: &mut dyn Chooser,
    ) -> SeoFields {
        let mut data = template.map(|field| self.process(field, replacements, chooser));
        data.title = truncate_text(&data.title, TITLE_LIMIT);
        data.description = truncate_text(&data.description, DESCRIPTION_LIMIT);
        data.og_title = truncate_text(&data.og_title, TITLE_LIMIT);
        data.og_description = truncate_text(&data.og_description, DESCRIPTION_LIMIT);
        data
    }

    /// Generate `count` SEO variations, one replacement map each.
    pub fn generate_seo_variations(
        &self,
        template: &SeoFields,
        variable_sets: &VariableSets,
        count: usize,
        chooser: &mut dyn Chooser,
    ) -> Vec<SeoVariation> {
        (0..count)
            .map(|_| {
                let replacements = pick_replacements(variable_sets, chooser);
                SeoVariation {
                    seo_data: self.generate_seo_data(template, &replacements, chooser),
                    replacements,
                }
            })
            .collect()
    }
}

/// A problem found by [`analyze_seo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeoIssue {
    #[error("Title is too short (recommended: 30-60 characters)")]
    TitleTooShort,
    #[error("Title is too long (recommended: 30-60 characters)")]
    TitleTooLong,
    #[error("Description is too short (recommended: 120-160 characters)")]
    DescriptionTooShort,
    #[error("Description is too long (recommended: 120-160 characters)")]
    DescriptionTooLong,
    #[error("Focus keyword not found in title")]
    KeywordMissingFromTitle,
    #[error("Focus keyword not found in description")]
    KeywordMissingFromDescription,
    #[error("Keyword density is too low")]
    KeywordDensityTooLow,
    #[error("Keyword density is too high (keyword stuffing)")]
    KeywordDensityTooHigh,
}

impl SeoIssue {
    /// Points subtracted from the score of 100.
    pub fn penalty(self) -> u32 {
        match self {
            SeoIssue::TitleTooLong | SeoIssue::DescriptionTooLong => 5,
            SeoIssue::TitleTooShort
            | SeoIssue::DescriptionTooShort
            | SeoIssue::KeywordMissingFromDescription
            | SeoIssue::KeywordDensityTooLow => 10,
            SeoIssue::KeywordMissingFromTitle | SeoIssue::KeywordDensityTooHigh => 15,
        }
    }
}

/// Measurements behind an [`SeoAnalysis`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeoStats {
    /// Title length in characters.
    pub title_length: usize,
    /// Description length in characters.
    pub description_length: usize,
    /// Focus keyword occurrences per hundred words of content, rounded to
    /// two decimals. Zero when there is no focus keyword.
    pub keyword_density: f64,
}

/// The score of one page's SEO data against its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoAnalysis {
    /// 100 minus the penalty of every issue, floored at zero.
    pub score: u32,
    pub issues: Vec<SeoIssue>,
    pub stats: SeoStats,
}

/// Score `seo_data` against the page `content`.
///
/// Checks title and description length, and when a focus keyword is set,
/// whether it appears in the title and the description and how dense it is
/// in the content. Keyword matching ignores case. Content with no words has
/// a density of zero.
///
/// # Example
///
/// ```
/// use varia::seo::{SeoIssue, analyze_seo};
/// use varia::SeoFields;
///
/// let seo = SeoFields {
///     title: "Roof repair".into(),
///     ..SeoFields::default()
/// };
/// let analysis = analyze_seo("", &seo);
/// assert_eq!(analysis.issues, vec![SeoIssue::TitleTooShort, SeoIssue::DescriptionTooShort]);
/// assert_eq!(analysis.score, 80);
/// ```
pub fn analyze_seo(content: &str, seo_data: &SeoFields) -> SeoAnalysis {
    let mut issues = Vec::new();

    let title_length = seo_data.title.chars().count();
    if title_length < TITLE_MIN {
        issues.push(SeoIssue::TitleTooShort);
    } else if title_length > TITLE_LIMIT {
        issues.push(SeoIssue::TitleTooLong);
    }

    let description_length = seo_data.description.chars().count();
    if description_length < DESCRIPTION_MIN {
        issues.push(SeoIssue::DescriptionTooShort);
    } else if description_length > DESCRIPTION_LIMIT {
        issues.push(SeoIssue::DescriptionTooLong);
    }

    let mut keyword_density = 0.0;
    if !seo_data.focus_keyword.is_empty() {
        let keyword = seo_data.focus_keyword.to_lowercase();
        if !seo_data.title.to_lowercase().contains(&keyword) {
            issues.push(SeoIssue::KeywordMissingFromTitle);
        }
        if !seo_data.description.to_lowercase().contains(&keyword) {
            issues.push(SeoIssue::KeywordMissingFromDescription);
        }

        keyword_density = density(&content.to_lowercase(), &keyword);
        let (low, high) = KEYWORD_DENSITY_RANGE;
        if keyword_density < low {
            issues.push(SeoIssue::KeywordDensityTooLow);
        } else if keyword_density > high {
            issues.push(SeoIssue::KeywordDensityTooHigh);
        }
    }

    let penalty: u32 = issues.iter().copied().map(SeoIssue::penalty).sum();
    SeoAnalysis {
        score: 100u32.saturating_sub(penalty),
        issues,
        stats: SeoStats {
            title_length,
            description_length,
            keyword_density: (keyword_density * 100.0).round() / 100.0,
        },
    }
}

/// Non-overlapping keyword occurrences per hundred words.
fn density(content: &str, keyword: &str) -> f64 {
    let words = word_count(content);
    if words == 0 {
        return 0.0;
    }
    content.matches(keyword).count() as f64 * 100.0 / words as f64
}

/// Runs of letters, apostrophes and hyphens.
fn word_count(text: &str) -> usize {
    text.split(|c: char| !(c.is_alphabetic() || c == '\'' || c == '-'))
        .filter(|word| !word.is_empty())
        .count()
}

/// Shorten `text` to at most `limit` characters.
///
/// When the cut falls inside the text it backs up to the last space and
/// appends `...`; with no space the hard cut is kept without an ellipsis.
///
/// # Example
///
/// ```
/// use varia::seo::truncate_text;
///
/// assert_eq!(truncate_text("short", 10), "short");
/// assert_eq!(truncate_text("hello brave new world", 12), "hello brave...");
/// assert_eq!(truncate_text("abcdefghij", 4), "abcd");
/// ```
pub fn truncate_text(text: &str, limit: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(limit) else {
        return text.to_string();
    };
    let truncated = &text[..cut];
    match truncated.rfind(' ') {
        Some(space) => format!("{}...", &truncated[..space]),
        None => truncated.to_string(),
    }
}

/// A built-in SEO template by name.
pub fn preset(name: &str) -> Option<SeoFields> {
    let (title, description, focus_keyword, og_title, og_description) = match name {
        "service_location" => (
            "{service|capitalize} in {location} - Professional {service}",
            "Looking for {service} in {location}? \
             We offer professional {service} with experienced technicians. \
             Call now for a free quote!",
            "{service} {location}",
            "{service|capitalize} in {location} | Your Local Experts",
            "Professional {service} in {location}. Experienced, \
             reliable, and affordable. Get your free quote today!",
        ),
        "emergency_service" => (
            "24/7 Emergency {service|capitalize} in {location}",
            "Need emergency {service} in {location}? \
             Available 24/7 with fast response times. Call our emergency hotline now!",
            "emergency {service} {location}",
            "Emergency {service|capitalize} {location} - 24/7 Service",
            "24/7 emergency {service} in {location}. \
             Fast response, professional service. Call now!",
        ),
        "best_service" => (
            "Best {service|capitalize} in {location} - Top Rated Local {service}",
            "Discover the best {service} in {location}. \
             Top-rated professionals with excellent reviews. Quality service guaranteed!",
            "best {service} {location}",
            "Top Rated {service|capitalize} in {location}",
            "Looking for the best {service} in {location}? \
             Check our reviews and see why we're the top choice!",
        ),
        _ => return None,
    };
    Some(SeoFields {
        title: title.to_string(),
        description: description.to_string(),
        focus_keyword: focus_keyword.to_string(),
        og_title: og_title.to_string(),
        og_description: og_description.to_string(),
        twitter_title: String::new(),
        twitter_description: String::new(),
    })
}
