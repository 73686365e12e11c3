//! Page geometry and text styles shared by both documents.

use serde::{Deserialize, Serialize};

/// Size and vertical spacing of one class of text, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size_pt: f32,
    pub space_before_pt: f32,
    pub space_after_pt: f32,
    pub bold: bool,
}

/// Layout parameters for a generated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Typst paper name.
    pub paper: String,
    pub margin_left_pt: f32,
    pub margin_right_pt: f32,
    pub margin_top_pt: f32,
    pub margin_bottom_pt: f32,
    /// Candidate name at the top of the resume.
    pub title: TextStyle,
    /// Section headings, and the name on the cover letter.
    pub heading: TextStyle,
    pub body: TextStyle,
    /// Gap between consecutive lines of one resume entry.
    pub entry_line_gap_pt: f32,
}

/// A4 with 30pt side/top margins and an 18pt bottom margin.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        paper: "a4".to_string(),
        margin_left_pt: 30.0,
        margin_right_pt: 30.0,
        margin_top_pt: 30.0,
        margin_bottom_pt: 18.0,
        title: TextStyle {
            size_pt: 24.0,
            space_before_pt: 0.0,
            space_after_pt: 30.0,
            bold: true,
        },
        heading: TextStyle {
            size_pt: 14.0,
            space_before_pt: 20.0,
            space_after_pt: 12.0,
            bold: true,
        },
        body: TextStyle {
            size_pt: 10.0,
            space_before_pt: 0.0,
            space_after_pt: 2.0,
            bold: false,
        },
        entry_line_gap_pt: 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_config() {
        let config = default_page_config();
        assert_eq!(config.paper, "a4");
        assert_eq!(
            (
                config.margin_left_pt,
                config.margin_right_pt,
                config.margin_top_pt,
                config.margin_bottom_pt
            ),
            (30.0, 30.0, 30.0, 18.0)
        );
        assert!(config.title.size_pt > config.heading.size_pt);
        assert!(config.heading.size_pt > config.body.size_pt);
    }
}
