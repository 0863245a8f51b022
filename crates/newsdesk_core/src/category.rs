use std::fmt;
use std::str::FromStr;

/// Fixed set of category labels. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Ai,
    Robotics,
    Cybersecurity,
    Quantum,
    Tech,
}

/// Result of `categorize` when no keyword matches at all.
pub const DEFAULT_CATEGORY: Category = Category::Tech;

const KEYWORDS: [(Category, &[&str]); 5] = [
    (
        Category::Ai,
        &[
            "ai",
            "artificial intelligence",
            "machine learning",
            "deep learning",
            "neural network",
            "chatgpt",
            "gpt",
            "llm",
            "openai",
        ],
    ),
    (
        Category::Robotics,
        &[
            "robot",
            "robotics",
            "automation",
            "drone",
            "autonomous",
            "boston dynamics",
            "humanoid",
        ],
    ),
    (
        Category::Cybersecurity,
        &[
            "cyber",
            "security",
            "hack",
            "hacker",
            "encryption",
            "malware",
            "ransomware",
            "data breach",
        ],
    ),
    (
        Category::Quantum,
        &[
            "quantum",
            "qubit",
            "quantum computing",
            "quantum physics",
            "superposition",
        ],
    ),
    (
        Category::Tech,
        &[
            "technology",
            "tech",
            "innovation",
            "startup",
            "silicon valley",
            "tech news",
        ],
    ),
];

impl Category {
    /// All categories in table order.
    pub const ALL: [Category; 5] = [
        Category::Ai,
        Category::Robotics,
        Category::Cybersecurity,
        Category::Quantum,
        Category::Tech,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Ai => "ai",
            Category::Robotics => "robotics",
            Category::Cybersecurity => "cybersecurity",
            Category::Quantum => "quantum",
            Category::Tech => "tech",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Ai => "AI",
            Category::Robotics => "ROBOTICS",
            Category::Cybersecurity => "CYBERSECURITY",
            Category::Quantum => "QUANTUM",
            Category::Tech => "TECH",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        KEYWORDS
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category {:?}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Category part of the query state: everything, or one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn admits(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CategoryFilter::All => "ALL",
            CategoryFilter::Only(category) => category.display_name(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Assigns a category from keyword hits in the lowercased text.
///
/// Each keyword counts once if it occurs anywhere as a substring, so "ai"
/// also hits inside "again". The highest count wins, ties go to the
/// category declared first, and no hits at all yields [`DEFAULT_CATEGORY`].
pub fn categorize(title: &str, description: &str, content: &str) -> Category {
    let blob = format!(
        "{} {} {}",
        title.to_lowercase(),
        description.to_lowercase(),
        content.to_lowercase()
    );

    let mut best = DEFAULT_CATEGORY;
    let mut best_hits = 0;
    for (category, keywords) in KEYWORDS.iter() {
        let hits = keywords
            .iter()
            .filter(|keyword| blob.contains(*keyword))
            .count();
        if hits > best_hits {
            best_hits = hits;
            best = *category;
        }
    }
    best
}
