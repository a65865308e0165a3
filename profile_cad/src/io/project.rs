use serde::{Deserialize, Serialize};

use crate::alignment::CurveInput;
use crate::error::Result;
use crate::reporting::ReportHeader;

/// Curve parameters plus report identification, stored as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileProject {
    #[serde(default)]
    pub header: ReportHeader,
    pub curve: CurveInput,
}

impl ProfileProject {
    pub fn new(header: ReportHeader, curve: CurveInput) -> Self {
        Self { header, curve }
    }
}

/// Reads a project file and validates its curve parameters.
pub fn read_project_json(path: &str) -> Result<ProfileProject> {
    let contents = crate::io::read_to_string(path)?;
    let project: ProfileProject = serde_json::from_str(&contents)?;
    project.curve.validate()?;
    log::info!("loaded project '{}' from {}", project.header.project, path);
    Ok(project)
}

pub fn write_project_json(path: &str, project: &ProfileProject) -> Result<()> {
    let json = serde_json::to_string_pretty(project)?;
    crate::io::write_string(path, &json)?;
    Ok(())
}
