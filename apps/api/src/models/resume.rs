//! Résumé schema. Field doc comments double as the descriptions the model sees
//! in the JSON Schema rendered by `parsing::format_instructions`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Contact information extracted from resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContactInformation {
    /// Full name of the candidate
    #[serde(default)]
    pub name: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Location/Address
    #[serde(default)]
    pub location: Option<String>,
    /// LinkedIn profile URL
    #[serde(default)]
    pub linkedin: Option<String>,
    /// GitHub profile URL
    #[serde(default)]
    pub github: Option<String>,
    /// Portfolio or personal website URL
    #[serde(default)]
    pub portfolio: Option<String>,
}

/// Work experience entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WorkExperience {
    /// Company name
    pub company: String,
    /// Job title/role
    pub role: String,
    /// Duration of employment
    pub duration: String,
    /// Job location
    #[serde(default)]
    pub location: Option<String>,
    /// List of responsibilities and achievements
    #[serde(default)]
    pub responsibilities: Option<Vec<String>>,
}

/// Project details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Project {
    /// Project name
    #[serde(default)]
    pub name: Option<String>,
    /// Technologies and skills used
    #[serde(default)]
    pub skills_used: Option<Vec<String>>,
    /// Project objective or aim
    #[serde(default)]
    pub aim: Option<String>,
    /// Project description
    #[serde(default)]
    pub description: Option<String>,
}

/// Education details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Education {
    /// Degree or qualification
    #[serde(default)]
    pub degree: Option<String>,
    /// Institution name
    #[serde(default)]
    pub institution: Option<String>,
    /// Year of completion or duration
    #[serde(default)]
    pub year: Option<String>,
    /// Institution location
    #[serde(default)]
    pub location: Option<String>,
}

/// Skills categorized by type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Skills {
    /// Technical skills (programming languages, frameworks, tools)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub technical: Vec<String>,
    /// Soft skills (leadership, communication, etc.)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub soft: Vec<String>,
}

/// Certification details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Certification {
    /// Certification name
    pub name: String,
    /// Issuing organization
    #[serde(default)]
    pub issuer: Option<String>,
    /// Date obtained
    #[serde(default)]
    pub date: Option<String>,
}

/// Complete structured resume data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResumeData {
    /// Contact information
    #[serde(default)]
    pub contact_information: Option<ContactInformation>,
    /// Professional summary or objective statement
    #[serde(default)]
    pub professional_summary: Option<String>,
    /// Work experience history
    #[serde(default, deserialize_with = "null_as_empty")]
    pub work_experience: Vec<WorkExperience>,
    /// Projects worked on
    #[serde(default, deserialize_with = "null_as_empty")]
    pub projects: Vec<Project>,
    /// Educational background
    #[serde(default, deserialize_with = "null_as_empty")]
    pub education: Vec<Education>,
    /// Skills and competencies
    #[serde(default)]
    pub skills: Option<Skills>,
    /// Professional certifications
    #[serde(default, deserialize_with = "null_as_empty")]
    pub certifications: Vec<Certification>,
}

/// API response for a parsed resume; also the stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeResponse {
    pub document_id: String,
    pub data: ResumeData,
    pub extracted_at: DateTime<Utc>,
    pub file_name: String,
}

/// Models routinely answer `null` for an empty list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
