use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Nurse,
    Admin,
    Tech,
    Manager,
}

/// Title keywords per role. Matching is a lower-cased substring test.
const ROLE_KEYWORDS: &[(Role, &[&str])] = &[
    (Role::Nurse, &["nurse", "rgn", "rmn"]),
    (Role::Admin, &["admin", "administrator"]),
    (Role::Tech, &["developer", "engineer", "programmer"]),
    (Role::Manager, &["manager", "supervisor"]),
];

/// Which roles a job title matches. Flags are independent: "Nurse Manager"
/// is both `Nurse` and `Manager`. No flags set means the generic "other" role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleProfile {
    pub nurse: bool,
    pub admin: bool,
    pub tech: bool,
    pub manager: bool,
}

impl RoleProfile {
    pub fn classify(job_title: &str) -> Self {
        let title = job_title.to_lowercase();
        let mut profile = RoleProfile::default();
        for (role, keywords) in ROLE_KEYWORDS {
            if keywords.iter().any(|k| title.contains(k)) {
                profile.set(*role);
            }
        }
        profile
    }

    pub fn has(&self, role: Role) -> bool {
        match role {
            Role::Nurse => self.nurse,
            Role::Admin => self.admin,
            Role::Tech => self.tech,
            Role::Manager => self.manager,
        }
    }

    fn set(&mut self, role: Role) {
        match role {
            Role::Nurse => self.nurse = true,
            Role::Admin => self.admin = true,
            Role::Tech => self.tech = true,
            Role::Manager => self.manager = true,
        }
    }
}
