use std::fmt;

use serde::Serialize;

use super::stats::normalize_name;

// ---------------------------------------------------------------------------
// Category – thematic group of a stress factor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    School,
    SocialLife,
    Health,
    Personal,
}

const SCHOOL: &[&str] = &[
    "teacher_student_relationship",
    "study_load",
    "academic_performance",
    "extracurricular_performance",
];

const SOCIAL_LIFE: &[&str] = &[
    "peer_pressure",
    "social_support",
    "self_esteem",
    "noise_level",
    "bullying",
];

const HEALTH: &[&str] = &[
    "headache",
    "stress_level",
    "breathing_problem",
    "blood_pressure",
    "mental_health",
    "depression",
    "anxiety_level",
];

const PERSONAL: &[&str] = &[
    "future_career_concerns",
    "basic_needs",
    "living_conditions",
    "safety",
    "sleep_quality",
];

impl Category {
    pub const ALL: [Category; 4] = [
        Category::School,
        Category::SocialLife,
        Category::Health,
        Category::Personal,
    ];

    /// Category of a column; names not in any table are `Personal`.
    pub fn of(column: &str) -> Category {
        let key = normalize_name(column);
        let tables: [(&[&str], Category); 4] = [
            (SCHOOL, Category::School),
            (SOCIAL_LIFE, Category::SocialLife),
            (HEALTH, Category::Health),
            (PERSONAL, Category::Personal),
        ];
        tables
            .iter()
            .find(|(names, _)| names.contains(&key.as_str()))
            .map(|(_, cat)| *cat)
            .unwrap_or(Category::Personal)
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::School => "School",
            Category::SocialLife => "Social life",
            Category::Health => "Health",
            Category::Personal => "Personal",
        }
    }

    pub fn shape(self) -> MarkerShape {
        match self {
            Category::School => MarkerShape::Square,
            Category::SocialLife => MarkerShape::Circle,
            Category::Health => MarkerShape::TriangleUp,
            Category::Personal => MarkerShape::Diamond,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// MarkerShape – renderer-neutral point symbol
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MarkerShape {
    Square,
    Circle,
    TriangleUp,
    Diamond,
}

impl MarkerShape {
    /// Plotly `marker.symbol` name.
    pub fn plotly_symbol(self) -> &'static str {
        match self {
            MarkerShape::Square => "square",
            MarkerShape::Circle => "circle",
            MarkerShape::TriangleUp => "triangle-up",
            MarkerShape::Diamond => "diamond",
        }
    }

    /// Glyph used in legends.
    pub fn glyph(self) -> char {
        match self {
            MarkerShape::Square => '■',
            MarkerShape::Circle => '●',
            MarkerShape::TriangleUp => '▲',
            MarkerShape::Diamond => '◆',
        }
    }
}

/// One-line legend, e.g. `School: ■  Social life: ●  ...`.
pub fn shape_legend() -> String {
    Category::ALL
        .iter()
        .map(|c| format!("{}: {}", c.label(), c.shape().glyph()))
        .collect::<Vec<_>>()
        .join("  ")
}
