//! Declarative dashboard configuration
//!
//! Branch rosters, service families, thresholds and chart colors are plain
//! data supplied by the caller — one parameterized table instead of a
//! hardcoded block per branch. The built-in default reproduces the deployment
//! the tool was written for; a YAML file overrides it wholesale.

use crate::error::{LensError, LensResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_sheet_name() -> String {
    "Table 1".to_string()
}

fn default_metric_column() -> String {
    "Average PCM".to_string()
}

/// One branch's ordered service-key list, melted together into one
/// multi-series trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchSpec {
    pub name: String,
    pub services: Vec<String>,
}

/// One branch's instance of a family service: the (possibly suffixed) row
/// key, the branch it belongs to, and its fixed chart color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub key: String,
    pub branch: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Same conceptual service across branches, compared by one aggregate metric
/// against one threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilySpec {
    pub name: String,
    #[serde(default = "default_metric_column")]
    pub metric_column: String,
    pub threshold: f64,
    pub members: Vec<FamilyMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    pub branches: Vec<BranchSpec>,
    pub families: Vec<FamilySpec>,
}

impl DashboardConfig {
    /// Load a config from a YAML file.
    pub fn load(path: &Path) -> LensResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DashboardConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Light sanity checks on caller-supplied tables.
    pub fn validate(&self) -> LensResult<()> {
        for branch in &self.branches {
            if branch.name.trim().is_empty() {
                return Err(LensError::Config("Branch with empty name".to_string()));
            }
        }
        for family in &self.families {
            if family.name.trim().is_empty() {
                return Err(LensError::Config("Family with empty name".to_string()));
            }
            if !family.threshold.is_finite() {
                return Err(LensError::Config(format!(
                    "Family '{}' has a non-finite threshold",
                    family.name
                )));
            }
            if family.members.is_empty() {
                return Err(LensError::Config(format!(
                    "Family '{}' has no members",
                    family.name
                )));
            }
        }
        Ok(())
    }

    /// Case-insensitive branch lookup.
    pub fn branch(&self, name: &str) -> Option<&BranchSpec> {
        self.branches
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Case-insensitive family lookup.
    pub fn family(&self, name: &str) -> Option<&FamilySpec> {
        self.families
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl Default for DashboardConfig {
    /// The deployment this tool was built for: four branches sharing one PCC
    /// sheet, with three families compared on Average PCM. Suffixes follow
    /// the sheet's row order; a handful of keys are unsuffixed or reuse a
    /// lower suffix because the corresponding branch rows share a spelling —
    /// that is data, not logic.
    fn default() -> Self {
        let branches = vec![
            branch(
                "JASMI LIMITED FRT03",
                &[
                    "NMS",
                    "BLOOD PRESSURE",
                    "P1 (NHS 111 & GP REFERRALS & CLIN PW)",
                    "P1 CLINICAL PATHWAYS",
                    "COVID VAC (TOTAL FOR SEASON)",
                    "Flu (TOTAL FOR SEASON)",
                    "ABPM",
                    "DMS",
                    "OC",
                    "LFD",
                    "CPCS",
                ],
            ),
            branch(
                "REVELSTOKE PHARMACY FE297",
                &[
                    "NMS_1",
                    "BLOOD PRESSURE_1",
                    "P1 (NHS 111 & GP REFERRALS & CLIN PW)_1",
                    "P1 CLINICAL PATHWAYS_1",
                    "COVID VAC (TOTAL FOR SEASON)_1",
                    "Flu (TOTAL FOR SEASON)",
                    "ABPM_1",
                    "DMS_1",
                    "OC_1",
                    "LFD_1",
                    "CPCS_1",
                ],
            ),
            branch(
                "TRINITY PHARMACY FKP10",
                &[
                    "NMS_2",
                    "BLOOD PRESSURE_2",
                    "P1 (NHS 111 & GP REFERRALS)",
                    "P1 CLINICAL PATHWAYS_1",
                    "COVID VAC (TOTAL FOR SEASON)_1",
                    "Flu (TOTAL FOR SEASON)",
                    "ABPM_2",
                    "DMS_2",
                    "OC_2",
                    "LFD_2",
                    "CPCS_2",
                ],
            ),
            branch(
                "WOODBRIDGE PHARMACY FLD83",
                &[
                    "NMS_3",
                    "BLOOD PRESSURE_3",
                    "P1 (NHS 111 & GP REFERRALS)_1",
                    "P1 CLINICAL PATHWAYS_3",
                    "COVID VAC (TOTAL FOR SEASON)_3",
                    "Flu (TOTAL FOR SEASON)",
                    "ABPM_3",
                    "DMS_3",
                    "OC_3",
                    "LFD_3",
                    "CPCS_3",
                ],
            ),
        ];

        let families = vec![
            family(
                "P1 (NHS 111 & GP referrals & Clin PW)",
                50.0,
                &[
                    ("P1 (NHS 111 & GP referrals & Clin PW)", "JASMI LIMITED FRT03", "red"),
                    ("P1 (NHS 111 & GP referrals & Clin PW)_1", "REVELSTOKE PHARMACY FE297", "orange"),
                    ("P1 (NHS 111 & GP referrals)", "TRINITY PHARMACY FKP10", "blue"),
                    ("P1 (NHS 111 & GP referrals)_1", "WOODBRIDGE PHARMACY FLD83", "green"),
                ],
            ),
            family(
                "Blood Pressure",
                30.0,
                &[
                    ("Blood Pressure", "JASMI LIMITED FRT03", "red"),
                    ("Blood Pressure_1", "REVELSTOKE PHARMACY FE297", "orange"),
                    ("Blood Pressure_2", "TRINITY PHARMACY FKP10", "blue"),
                    ("Blood Pressure_3", "WOODBRIDGE PHARMACY FLD83", "green"),
                ],
            ),
            family(
                "DMS",
                20.0,
                &[
                    ("DMS", "JASMI LIMITED FRT03", "red"),
                    ("DMS_1", "REVELSTOKE PHARMACY FE297", "orange"),
                    ("DMS_2", "TRINITY PHARMACY FKP10", "blue"),
                    ("DMS_3", "WOODBRIDGE PHARMACY FLD83", "green"),
                ],
            ),
        ];

        DashboardConfig {
            sheet_name: default_sheet_name(),
            branches,
            families,
        }
    }
}

fn branch(name: &str, services: &[&str]) -> BranchSpec {
    BranchSpec {
        name: name.to_string(),
        services: services.iter().map(|s| s.to_string()).collect(),
    }
}

fn family(name: &str, threshold: f64, members: &[(&str, &str, &str)]) -> FamilySpec {
    FamilySpec {
        name: name.to_string(),
        metric_column: default_metric_column(),
        threshold,
        members: members
            .iter()
            .map(|(key, branch, color)| FamilyMember {
                key: key.to_string(),
                branch: branch.to_string(),
                color: Some(color.to_string()),
            })
            .collect(),
    }
}
