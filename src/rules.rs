//! Whole-line pattern rules. Each rule confirms a category for a line; the
//! stored value is always the original line, never the matched groups.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::classifier::LineContext;

const ROLE_NOUNS: &str = "Coordinator|Analyst|Architect|Consultant|Executive|Representative|Rep\
|Recruiter|Contractor|Specialist|Manager|Engineer|Developer|Designer|Director|Administrator\
|Assistant|Associate|Officer|Advisor|Adviser|Accountant|Scientist|Lead|Supervisor|Intern\
|Technician|Strategist|Generalist|Partner|Founder|Co-Founder|President|Producer|Editor|Writer\
|Programmer|Planner|Auditor|Clerk|Agent|Instructor|Teacher|Trainer|Controller|Buyer|Researcher\
|Fellow|Owner|Receptionist|Operator|Investigator|Paralegal|Attorney|Nurse";

static PROFESSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    let word = r"[A-Z][A-Za-z&/'-]*";
    let words = format!(r"{w}(?:\s+(?:(?:of|and|for|&)\s+)?{w})*", w = word);
    let pattern = format!(
        r"^(?:(?:Jr|Sr|Junior|Senior|Lead|Principal|Staff|Chief|Associate|Assistant|Acting|Interim|Deputy)\.?\s+)?(?:(?:Vice\s+President|President|SVP|EVP|AVP|VP|Director|Head|Manager|Chief)(?:\s+of\s+|,\s*){words}|(?:{word}\s+(?:(?:of|and|for|&)\s+)?)*(?:{roles})\b(?:,\s*{words})?)$",
        word = word,
        words = words,
        roles = ROLE_NOUNS,
    );
    Regex::new(&pattern).unwrap()
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+?1[-. ]?)?(?:\(\d{3}\)\s?|\d{3}[-. ])\d{3}[-. ]\d{4}$").unwrap()
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap()
});

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:professional\s+|career\s+|executive\s+)?(?:summary|profile|objective|experience|work\s+experience|employment(?:\s+history)?|work\s+history|education|skills|technical\s+skills|core\s+competencies|certifications?|projects|awards|achievements|publications|volunteer(?:\s+experience)?|languages|interests|references|qualifications)\s*:?$",
    )
    .unwrap()
});

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[•●▪◦‣∙·○■□➢►*\-–]\s*|\d{1,2}[.)]\s+)\S").unwrap());

static SKILL_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:technical\s+)?skills?\s*:\s*\S").unwrap());

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

/// Field categories a line can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Profession,
    Phone,
    Email,
    Skill,
    SectionHeader,
    Bullet,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Profession,
        Category::Phone,
        Category::Email,
        Category::Skill,
        Category::SectionHeader,
        Category::Bullet,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Profession => "profession",
            Category::Phone => "phone",
            Category::Email => "email",
            Category::Skill => "skill",
            Category::SectionHeader => "section_header",
            Category::Bullet => "bullet",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One slot per category. A line may fill several.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet: Option<String>,
}

impl Fields {
    fn slot_mut(&mut self, category: Category) -> &mut Option<String> {
        match category {
            Category::Profession => &mut self.profession,
            Category::Phone => &mut self.phone,
            Category::Email => &mut self.email,
            Category::Skill => &mut self.skill,
            Category::SectionHeader => &mut self.section_header,
            Category::Bullet => &mut self.bullet,
        }
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        match category {
            Category::Profession => self.profession.as_deref(),
            Category::Phone => self.phone.as_deref(),
            Category::Email => self.email.as_deref(),
            Category::Skill => self.skill.as_deref(),
            Category::SectionHeader => self.section_header.as_deref(),
            Category::Bullet => self.bullet.as_deref(),
        }
    }

    pub fn set(&mut self, category: Category, line: &str) {
        *self.slot_mut(category) = Some(line.to_string());
    }

    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.get(*c).is_some())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.into_iter().all(|c| self.get(c).is_none())
    }
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub category: Category,
    matcher: fn(&str) -> bool,
}

impl Rule {
    pub fn new(category: Category, matcher: fn(&str) -> bool) -> Self {
        Rule { category, matcher }
    }

    pub fn matches(&self, line: &str) -> bool {
        (self.matcher)(line)
    }

    /// The verbatim line when the rule confirms it.
    pub fn check<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.matches(line).then_some(line)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("category", &self.category).finish()
    }
}

/// Independent rules evaluated against every line. Registration order has
/// no effect on the outcome because every category writes its own slot.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn empty() -> Self {
        RuleSet::default()
    }

    pub fn standard() -> Self {
        let mut set = RuleSet::empty();
        set.register(Category::Profession, is_profession)
            .register(Category::Phone, is_phone)
            .register(Category::Email, is_email)
            .register(Category::Skill, is_skill_list)
            .register(Category::SectionHeader, is_section_header)
            .register(Category::Bullet, is_bullet);
        set
    }

    pub fn register(&mut self, category: Category, matcher: fn(&str) -> bool) -> &mut Self {
        self.rules.push(Rule::new(category, matcher));
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Record every category whose rule confirms the context's line.
    pub fn apply(&self, ctx: &mut LineContext) {
        for rule in &self.rules {
            if let Some(line) = rule.check(&ctx.text) {
                ctx.fields.set(rule.category, line);
            }
        }
    }
}

pub fn is_profession(line: &str) -> bool {
    PROFESSION_RE.is_match(line.trim())
}

pub fn is_phone(line: &str) -> bool {
    PHONE_RE.is_match(line.trim())
}

pub fn is_email(line: &str) -> bool {
    EMAIL_RE.is_match(line.trim())
}

pub fn is_section_header(line: &str) -> bool {
    HEADER_RE.is_match(line.trim())
}

pub fn is_bullet(line: &str) -> bool {
    BULLET_RE.is_match(line)
}

/// `Skills: ...`, or three or more short separated items with no year in
/// them (a year usually means an employment or education line). An item
/// led by a digit marks an address or a figure, not a skill.
pub fn is_skill_list(line: &str) -> bool {
    let line = line.trim();
    if SKILL_LABEL_RE.is_match(line) {
        return true;
    }
    if YEAR_RE.is_match(line) || line.contains(",,,,") {
        return false;
    }
    let items: Vec<&str> = line
        .split(|c| c == ',' || c == '|' || c == ';')
        .map(str::trim)
        .collect();
    items.len() >= 3
        && items
            .iter()
            .all(|item| is_skill_item(item))
}

fn is_skill_item(item: &str) -> bool {
    !item.is_empty()
        && !item.starts_with(|c: char| c.is_ascii_digit())
        && item.len() <= 30
        && item.split_whitespace().count() <= 3
}
