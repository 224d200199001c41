//! Ordered rule tables, one per derived field.
//!
//! Each table is scanned top to bottom and the first rule whose condition holds
//! decides the field. Every table ends in an `Always` rule, so a value is always produced.

use crate::enrichment::classify::{Role, RoleProfile};
use crate::models::JobType;

/// Everything a rule condition may look at.
#[derive(Debug, Clone)]
pub struct JobText<'a> {
    pub company: &'a str,
    /// Lower-cased effective description.
    pub description: String,
    pub roles: RoleProfile,
}

impl<'a> JobText<'a> {
    pub fn new(job_title: &str, company: &'a str, description: &str) -> Self {
        Self {
            company,
            description: description.to_lowercase(),
            roles: RoleProfile::classify(job_title),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum When {
    Always,
    Role(Role),
    /// Any of the keywords occurs in the lower-cased description.
    DescriptionMentions(&'static [&'static str]),
    /// Case-sensitive substring of the company name.
    CompanyContains(&'static str),
    AllOf(&'static [When]),
}

impl When {
    pub fn holds(&self, text: &JobText<'_>) -> bool {
        match self {
            When::Always => true,
            When::Role(role) => text.roles.has(*role),
            When::DescriptionMentions(keywords) => {
                keywords.iter().any(|k| text.description.contains(k))
            }
            When::CompanyContains(needle) => text.company.contains(needle),
            When::AllOf(conditions) => conditions.iter().all(|c| c.holds(text)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule<T> {
    pub when: When,
    pub then: T,
}

const fn rule<T>(when: When, then: T) -> Rule<T> {
    Rule { when, then }
}

/// The value of the first rule whose condition holds.
pub fn first_match<'r, T>(rules: &'r [Rule<T>], text: &JobText<'_>) -> Option<&'r T> {
    rules.iter().find(|r| r.when.holds(text)).map(|r| &r.then)
}

/// The values of every rule whose condition holds, in table order.
pub fn all_matches<'r, T>(rules: &'r [Rule<T>], text: &JobText<'_>) -> Vec<&'r T> {
    rules
        .iter()
        .filter(|r| r.when.holds(text))
        .map(|r| &r.then)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Location
// ────────────────────────────────────────────────────────────────────────────

pub const LOCATION_RULES: &[Rule<&str>] = &[
    rule(
        When::DescriptionMentions(&["göteborg", "goteborg"]),
        "Göteborg, Sweden",
    ),
    rule(
        When::DescriptionMentions(&["gerrards cross"]),
        "Gerrards Cross, UK",
    ),
    rule(When::DescriptionMentions(&["london"]), "London, UK"),
    rule(When::DescriptionMentions(&["stockholm"]), "Stockholm, Sweden"),
    rule(When::Role(Role::Nurse), "Various UK Locations"),
    rule(When::Role(Role::Tech), "Remote/Hybrid Available"),
    rule(When::Always, "Location not specified"),
];

// ────────────────────────────────────────────────────────────────────────────
// Salary
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Salary {
    /// First "£<figure>" in the description, quoted as an hourly rate.
    /// Falls through to the next rule when no figure follows the symbol.
    HourlyPoundFigure,
    Fixed(&'static str),
}

pub const NURSE_HOURLY_RANGE: &str = "£17.85 - £19.50 per hour";

pub const SALARY_RULES: &[Rule<Salary>] = &[
    rule(
        When::AllOf(&[When::Role(Role::Nurse), When::DescriptionMentions(&["£"])]),
        Salary::HourlyPoundFigure,
    ),
    rule(When::Role(Role::Nurse), Salary::Fixed(NURSE_HOURLY_RANGE)),
    rule(When::Role(Role::Tech), Salary::Fixed("$80,000 - $120,000")),
    rule(When::Role(Role::Manager), Salary::Fixed("$70,000 - $100,000")),
    rule(When::Role(Role::Admin), Salary::Fixed("$40,000 - $60,000")),
    rule(When::Always, Salary::Fixed("Competitive salary")),
];

pub fn resolve_salary(text: &JobText<'_>) -> String {
    for r in SALARY_RULES.iter().filter(|r| r.when.holds(text)) {
        match r.then {
            Salary::HourlyPoundFigure => {
                if let Some(figure) = pound_figure(&text.description) {
                    return format!("{figure} per hour");
                }
            }
            Salary::Fixed(value) => return value.to_string(),
        }
    }
    "Competitive salary".to_string()
}

/// The first '£' immediately followed by one or more digits, dots or commas.
fn pound_figure(text: &str) -> Option<&str> {
    text.match_indices('£').find_map(|(start, sign)| {
        let rest = &text[start + sign.len()..];
        let figure_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
            .unwrap_or(rest.len());
        (figure_len > 0).then(|| &text[start..start + sign.len() + figure_len])
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Job type and experience
// ────────────────────────────────────────────────────────────────────────────

pub const JOB_TYPE_RULES: &[Rule<JobType>] = &[
    rule(When::DescriptionMentions(&["part"]), JobType::PartTime),
    rule(When::Always, JobType::FullTime),
];

pub const EXPERIENCE_RULES: &[Rule<&str>] = &[
    rule(When::DescriptionMentions(&["senior"]), "5+ years"),
    rule(When::DescriptionMentions(&["junior"]), "1-2 years"),
    rule(
        When::DescriptionMentions(&["previous experience"]),
        "2+ years",
    ),
    rule(When::Role(Role::Nurse), "RGN/RMN qualification required"),
    rule(When::Always, "2-4 years"),
];

// ────────────────────────────────────────────────────────────────────────────
// Skills, requirements, benefits
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct SkillSet {
    pub base: &'static [&'static str],
    /// Appended after `base` for every matching rule.
    pub extras: &'static [Rule<&'static str>],
}

const ADMIN_SYSTEM_SKILLS: &[Rule<&str>] = &[
    rule(
        When::DescriptionMentions(&["unit4"]),
        "Unit4 Property Management",
    ),
    rule(When::DescriptionMentions(&["fastnet"]), "FastNet"),
];

pub const SKILL_RULES: &[Rule<SkillSet>] = &[
    rule(
        When::Role(Role::Nurse),
        SkillSet {
            base: &[
                "RGN/RMN Qualification",
                "Patient Care",
                "Clinical Skills",
                "Communication",
                "Teamwork",
            ],
            extras: &[],
        },
    ),
    rule(
        When::Role(Role::Admin),
        SkillSet {
            base: &[
                "Administration",
                "Customer Service",
                "Microsoft Office",
                "Organization",
                "Communication",
            ],
            extras: ADMIN_SYSTEM_SKILLS,
        },
    ),
    rule(
        When::Role(Role::Tech),
        SkillSet {
            base: &[
                "Programming",
                "Problem Solving",
                "Team Collaboration",
                "Technical Documentation",
            ],
            extras: &[],
        },
    ),
    rule(
        When::Always,
        SkillSet {
            base: &["Communication", "Organization", "Problem Solving", "Teamwork"],
            extras: &[],
        },
    ),
];

pub fn resolve_skills(text: &JobText<'_>) -> Vec<String> {
    let Some(set) = first_match(SKILL_RULES, text) else {
        return Vec::new();
    };
    set.base
        .iter()
        .copied()
        .chain(all_matches(set.extras, text).into_iter().copied())
        .map(String::from)
        .collect()
}

pub const REQUIREMENT_RULES: &[Rule<&[&str]>] = &[
    rule(
        When::Role(Role::Nurse),
        &[
            "Valid NMC pin number",
            "RGN/RMN qualification",
            "Excellent communication skills",
            "Flexible to work shifts",
        ],
    ),
    rule(
        When::Role(Role::Admin),
        &[
            "Previous administrative experience",
            "Strong organizational skills",
            "Customer service orientation",
            "Attention to detail",
        ],
    ),
    rule(
        When::Always,
        &[
            "Relevant experience",
            "Strong communication skills",
            "Team player",
        ],
    ),
];

pub const BENEFIT_RULES: &[Rule<&[&str]>] = &[
    rule(
        When::Role(Role::Nurse),
        &[
            "Annual NMC registration costs covered",
            "Clinical training support",
            "5.6 weeks annual leave",
            "SimplyHealth cover",
            "Pension plan",
        ],
    ),
    rule(
        When::CompanyContains("TNG"),
        &[
            "Kollektivavtal coverage",
            "Insurance benefits",
            "Career development opportunities",
            "Consultant support",
        ],
    ),
    rule(
        When::Always,
        &[
            "Competitive benefits package",
            "Professional development",
            "Health insurance",
        ],
    ),
];

pub fn resolve_list(rules: &[Rule<&[&str]>], text: &JobText<'_>) -> Vec<String> {
    first_match(rules, text)
        .map(|items| items.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text<'a>(title: &str, company: &'a str, description: &str) -> JobText<'a> {
        JobText::new(title, company, description)
    }

    #[test]
    fn test_every_table_ends_with_always() {
        assert!(matches!(LOCATION_RULES.last().unwrap().when, When::Always));
        assert!(matches!(SALARY_RULES.last().unwrap().when, When::Always));
        assert!(matches!(JOB_TYPE_RULES.last().unwrap().when, When::Always));
        assert!(matches!(EXPERIENCE_RULES.last().unwrap().when, When::Always));
        assert!(matches!(SKILL_RULES.last().unwrap().when, When::Always));
        assert!(matches!(REQUIREMENT_RULES.last().unwrap().when, When::Always));
        assert!(matches!(BENEFIT_RULES.last().unwrap().when, When::Always));
    }

    #[test]
    fn test_location_london_before_stockholm() {
        let t = text("Analyst", "Acme", "Offices in London and Stockholm");
        assert_eq!(first_match(LOCATION_RULES, &t), Some(&"London, UK"));

        let t = text("Analyst", "Acme", "Offices in Stockholm and London");
        assert_eq!(first_match(LOCATION_RULES, &t), Some(&"London, UK"));
    }

    #[test]
    fn test_location_city_beats_role_fallback() {
        let t = text("Staff Nurse", "CarePlus", "Ward based in Goteborg");
        assert_eq!(first_match(LOCATION_RULES, &t), Some(&"Göteborg, Sweden"));
    }

    #[test]
    fn test_location_role_fallbacks() {
        let nurse = text("Staff Nurse", "CarePlus", "");
        assert_eq!(first_match(LOCATION_RULES, &nurse), Some(&"Various UK Locations"));

        let tech = text("Backend Developer", "Acme", "");
        assert_eq!(first_match(LOCATION_RULES, &tech), Some(&"Remote/Hybrid Available"));

        let other = text("Barista", "Beans", "");
        assert_eq!(first_match(LOCATION_RULES, &other), Some(&"Location not specified"));
    }

    #[test]
    fn test_nurse_salary_extracts_pound_figure() {
        let t = text("Staff Nurse", "CarePlus", "Pay from £18.50 per hour, RGN");
        assert_eq!(resolve_salary(&t), "£18.50 per hour");
    }

    #[test]
    fn test_nurse_salary_without_figure_uses_range() {
        let t = text("Staff Nurse", "CarePlus", "Paid in £ sterling");
        assert_eq!(resolve_salary(&t), NURSE_HOURLY_RANGE);

        let t = text("Staff Nurse", "CarePlus", "No pay listed");
        assert_eq!(resolve_salary(&t), NURSE_HOURLY_RANGE);
    }

    #[test]
    fn test_pound_sign_ignored_for_non_nurse() {
        let t = text("Backend Developer", "Acme", "£60,000");
        assert_eq!(resolve_salary(&t), "$80,000 - $120,000");
    }

    #[test]
    fn test_salary_priority_tech_over_manager_over_admin() {
        assert_eq!(
            resolve_salary(&text("Engineering Manager", "Acme", "")),
            "$80,000 - $120,000"
        );
        assert_eq!(
            resolve_salary(&text("Admin Supervisor", "Acme", "")),
            "$70,000 - $100,000"
        );
        assert_eq!(
            resolve_salary(&text("Office Admin", "Acme", "")),
            "$40,000 - $60,000"
        );
        assert_eq!(
            resolve_salary(&text("Barista", "Beans", "")),
            "Competitive salary"
        );
    }

    #[test]
    fn test_pound_figure_skips_bare_symbols() {
        assert_eq!(pound_figure("£ then £12"), Some("£12"));
        assert_eq!(pound_figure("no money here"), None);
        assert_eq!(pound_figure("£1,250.00/month"), Some("£1,250.00"));
    }

    #[test]
    fn test_job_type_part_substring() {
        let t = text("Barista", "Beans", "Part-Time weekend role");
        assert_eq!(first_match(JOB_TYPE_RULES, &t), Some(&JobType::PartTime));

        let t = text("Barista", "Beans", "Weekend role");
        assert_eq!(first_match(JOB_TYPE_RULES, &t), Some(&JobType::FullTime));
    }

    #[test]
    fn test_experience_keywords_then_role() {
        assert_eq!(
            first_match(EXPERIENCE_RULES, &text("Staff Nurse", "C", "Senior and junior")),
            Some(&"5+ years")
        );
        assert_eq!(
            first_match(EXPERIENCE_RULES, &text("Staff Nurse", "C", "junior post")),
            Some(&"1-2 years")
        );
        assert_eq!(
            first_match(
                EXPERIENCE_RULES,
                &text("Clerk", "C", "Previous experience preferred")
            ),
            Some(&"2+ years")
        );
        assert_eq!(
            first_match(EXPERIENCE_RULES, &text("Staff Nurse", "C", "")),
            Some(&"RGN/RMN qualification required")
        );
        assert_eq!(
            first_match(EXPERIENCE_RULES, &text("Clerk", "C", "")),
            Some(&"2-4 years")
        );
    }

    #[test]
    fn test_admin_system_skills_appended_in_order() {
        let t = text("Property Admin", "Acme", "Uses FastNet and Unit4 daily");
        let skills = resolve_skills(&t);
        assert_eq!(skills.len(), 7);
        assert_eq!(skills[5], "Unit4 Property Management");
        assert_eq!(skills[6], "FastNet");
    }

    #[test]
    fn test_nurse_skills_win_over_admin() {
        let t = text("Nurse Administrator", "CarePlus", "unit4");
        let skills = resolve_skills(&t);
        assert_eq!(skills[0], "RGN/RMN Qualification");
        assert!(!skills.contains(&"Unit4 Property Management".to_string()));
    }

    #[test]
    fn test_tech_requirements_use_generic_list() {
        let t = text("Backend Developer", "Acme", "");
        assert_eq!(
            resolve_list(REQUIREMENT_RULES, &t),
            vec!["Relevant experience", "Strong communication skills", "Team player"]
        );
    }

    #[test]
    fn test_tng_benefits_are_case_sensitive() {
        let t = text("Consultant", "TNG Group", "");
        assert_eq!(resolve_list(BENEFIT_RULES, &t)[0], "Kollektivavtal coverage");

        let t = text("Consultant", "tng group", "");
        assert_eq!(resolve_list(BENEFIT_RULES, &t)[0], "Competitive benefits package");
    }

    #[test]
    fn test_nurse_benefits_win_over_tng() {
        let t = text("Staff Nurse", "TNG Care", "");
        assert_eq!(
            resolve_list(BENEFIT_RULES, &t)[0],
            "Annual NMC registration costs covered"
        );
    }
}
