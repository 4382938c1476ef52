//! # Feedback Module
//!
//! Turns classifications and the aggregate score into actionable feedback:
//! an ordered issues list, an ordered suggestions list, and a one-line
//! summary. The user should learn *what* is wrong and *what to do about
//! it*, never just "rejected".
//!
//! Evaluation order is fixed: brightness, contrast, sharpness, resolution,
//! file size. Every Poor mandatory dimension contributes exactly one issue
//! and one suggestion.

use crate::core::assessor::QualityDetails;
use crate::core::thresholds::{MetricClassification, MetricStatus, ThresholdConfig};

/// Minimum score for a capture to pass the gate (validity also requires an
/// empty issues list)
pub const VALID_SCORE_MIN: u8 = 60;

/// Generated feedback for one assessment
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    /// Poor-metric messages, in evaluation order
    pub issues: Vec<String>,
    /// One actionable suggestion per issue, in the same order
    pub suggestions: Vec<String>,
    /// One-line summary shown to the capturing user
    pub message: String,
}

/// The gate is a conjunction: a weighted score can clear 60 while a single
/// metric is still Poor, and that capture must not pass
pub fn is_valid(score: u8, issues: &[String]) -> bool {
    score >= VALID_SCORE_MIN && issues.is_empty()
}

/// Build issues, suggestions and the summary message
pub fn generate(score: u8, details: &QualityDetails, config: &ThresholdConfig) -> Feedback {
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    if details.brightness.status == MetricStatus::Poor {
        issues.push(details.brightness.message.clone());
        suggestions.push(brightness_suggestion(&details.brightness, config).to_string());
    }

    if details.contrast.status == MetricStatus::Poor {
        issues.push(details.contrast.message.clone());
        suggestions.push(
            "Improve the lighting so the document stands out from the background".to_string(),
        );
    }

    if details.sharpness.status == MetricStatus::Poor {
        issues.push(details.sharpness.message.clone());
        suggestions
            .push("Hold the camera steady and make sure the document is in focus".to_string());
    }

    if details.resolution.status == MetricStatus::Poor {
        issues.push(details.resolution.message.clone());
        suggestions
            .push("Use a higher camera resolution or move closer to the document".to_string());
    }

    if let Some(file_size) = &details.file_size {
        if file_size.status == MetricStatus::Poor {
            issues.push(file_size.message.clone());
            suggestions.push(file_size_suggestion(file_size, config).to_string());
        }
    }

    let message = summary_message(score, &issues, &suggestions);

    Feedback {
        issues,
        suggestions,
        message,
    }
}

/// Suggestion for a Poor brightness, keyed by which bound was violated
fn brightness_suggestion(
    classification: &MetricClassification,
    config: &ThresholdConfig,
) -> &'static str {
    if classification.raw_value < config.brightness_range.poor_below {
        "Retake the photo in better lighting"
    } else {
        "Reduce the exposure or move out of direct light"
    }
}

/// Suggestion for a Poor file size, keyed by which bound was violated
fn file_size_suggestion(
    classification: &MetricClassification,
    config: &ThresholdConfig,
) -> &'static str {
    if classification.raw_value < config.file_size_range.poor_below as f64 {
        "The file may be corrupted, try selecting a different image"
    } else {
        "Try reducing the image quality before uploading"
    }
}

/// Tiered one-line summary
fn summary_message(score: u8, issues: &[String], suggestions: &[String]) -> String {
    if score >= 90 {
        "Excellent image quality".to_string()
    } else if score >= 75 {
        "Good image quality".to_string()
    } else if score >= VALID_SCORE_MIN {
        "Acceptable image quality, see suggestions for improvement".to_string()
    } else if let (Some(issue), Some(suggestion)) = (issues.first(), suggestions.first()) {
        format!("{}. {}", issue, suggestion)
    } else {
        "Image quality is too low, please retake the photo".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(status: MetricStatus, message: &str, raw_value: f64) -> MetricClassification {
        MetricClassification {
            status,
            message: message.to_string(),
            raw_value,
        }
    }

    fn all_good_details() -> QualityDetails {
        QualityDetails {
            brightness: classified(MetricStatus::Good, "Brightness is good", 0.5),
            contrast: classified(MetricStatus::Good, "Contrast is good", 0.4),
            sharpness: classified(MetricStatus::Good, "Image is sharp", 350.0),
            resolution: classified(MetricStatus::Good, "Resolution is good (2.1MP)", 2.07),
            file_size: None,
        }
    }

    #[test]
    fn no_issues_for_clean_capture() {
        let feedback = generate(100, &all_good_details(), &ThresholdConfig::default());

        assert!(feedback.issues.is_empty());
        assert!(feedback.suggestions.is_empty());
        assert_eq!(feedback.message, "Excellent image quality");
    }

    #[test]
    fn dark_capture_gets_lighting_suggestion() {
        let mut details = all_good_details();
        details.brightness = classified(MetricStatus::Poor, "Image is too dark", 0.1);

        let feedback = generate(50, &details, &ThresholdConfig::default());

        assert_eq!(feedback.issues, vec!["Image is too dark"]);
        assert_eq!(feedback.suggestions, vec!["Retake the photo in better lighting"]);
    }

    #[test]
    fn bright_capture_gets_exposure_suggestion() {
        let mut details = all_good_details();
        details.brightness = classified(MetricStatus::Poor, "Image is too bright", 0.95);

        let feedback = generate(50, &details, &ThresholdConfig::default());

        assert_eq!(
            feedback.suggestions,
            vec!["Reduce the exposure or move out of direct light"]
        );
    }

    #[test]
    fn file_size_suggestion_depends_on_direction() {
        let config = ThresholdConfig::default();

        let mut details = all_good_details();
        details.file_size = Some(classified(
            MetricStatus::Poor,
            "File size too small (1000 bytes)",
            1_000.0,
        ));
        let small = generate(90, &details, &config);
        assert_eq!(
            small.suggestions,
            vec!["The file may be corrupted, try selecting a different image"]
        );

        details.file_size = Some(classified(
            MetricStatus::Poor,
            "File size too large (15.0 MB)",
            15_000_000.0,
        ));
        let large = generate(90, &details, &config);
        assert_eq!(
            large.suggestions,
            vec!["Try reducing the image quality before uploading"]
        );
    }

    #[test]
    fn issues_follow_evaluation_order() {
        let details = QualityDetails {
            brightness: classified(MetricStatus::Poor, "Image is too dark", 0.1),
            contrast: classified(MetricStatus::Poor, "Contrast is too low", 0.05),
            sharpness: classified(MetricStatus::Poor, "Image is too blurry", 20.0),
            resolution: classified(MetricStatus::Poor, "Resolution too low (0.3MP)", 0.31),
            file_size: Some(classified(
                MetricStatus::Poor,
                "File size too small (100 bytes)",
                100.0,
            )),
        };

        let feedback = generate(30, &details, &ThresholdConfig::default());

        assert_eq!(
            feedback.issues,
            vec![
                "Image is too dark",
                "Contrast is too low",
                "Image is too blurry",
                "Resolution too low (0.3MP)",
                "File size too small (100 bytes)",
            ]
        );
        assert_eq!(feedback.suggestions.len(), feedback.issues.len());
    }

    #[test]
    fn summary_tiers_by_score() {
        let details = all_good_details();
        let config = ThresholdConfig::default();

        assert_eq!(generate(95, &details, &config).message, "Excellent image quality");
        assert_eq!(generate(80, &details, &config).message, "Good image quality");
        assert_eq!(
            generate(65, &details, &config).message,
            "Acceptable image quality, see suggestions for improvement"
        );
    }

    #[test]
    fn low_score_with_issue_leads_with_the_issue() {
        let mut details = all_good_details();
        details.sharpness = classified(MetricStatus::Poor, "Image is too blurry", 20.0);

        let feedback = generate(45, &details, &ThresholdConfig::default());

        assert_eq!(
            feedback.message,
            "Image is too blurry. Hold the camera steady and make sure the document is in focus"
        );
    }

    #[test]
    fn low_score_without_issues_gets_generic_retake_message() {
        let feedback = generate(40, &all_good_details(), &ThresholdConfig::default());
        assert_eq!(feedback.message, "Image quality is too low, please retake the photo");
    }

    #[test]
    fn validity_is_a_conjunction_not_a_score_threshold() {
        assert!(is_valid(60, &[]));
        assert!(is_valid(100, &[]));
        assert!(!is_valid(59, &[]));
        // Score cleared the bar but an issue remains: still invalid
        assert!(!is_valid(82, &["Resolution too low (0.3MP)".to_string()]));
    }
}
