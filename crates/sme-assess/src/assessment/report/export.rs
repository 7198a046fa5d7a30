use super::super::results::AssessmentResults;
use super::super::session::AssessmentSession;
use super::markdown::render_markdown;
use super::views::ExportDocument;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Markdown,
    Json,
    Csv,
    Pdf,
}

impl ExportFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Markdown => "text/markdown; charset=utf-8",
            Self::Json => "application/json",
            Self::Csv => "text/csv; charset=utf-8",
            Self::Pdf => "application/pdf",
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Markdown => "cyber-assessment.md",
            Self::Json => "sme_sim_results.json",
            Self::Csv => "sme_domain_scores.csv",
            Self::Pdf => "cyber-assessment.pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unknown export format `{0}` (expected markdown, json or csv)")]
    UnknownFormat(String),
    #[error("the {0} export engine is not available; use markdown instead")]
    EngineUnavailable(ExportFormat),
    #[error("failed to encode JSON export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to finish CSV export: {0}")]
    CsvBuffer(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedExport {
    pub format: ExportFormat,
    pub content_type: &'static str,
    pub file_name: &'static str,
    pub body: String,
}

#[derive(Serialize)]
struct DomainRow<'a> {
    #[serde(rename = "Domain")]
    domain: &'a str,
    #[serde(rename = "Score")]
    score: u8,
    #[serde(rename = "Label")]
    label: &'a str,
}

pub fn render_export(
    format: ExportFormat,
    session: &AssessmentSession,
    results: &AssessmentResults,
) -> Result<RenderedExport, ExportError> {
    let body = match format {
        ExportFormat::Markdown => render_markdown(session, results),
        ExportFormat::Json => {
            serde_json::to_string_pretty(&ExportDocument::new(session, results))?
        }
        ExportFormat::Csv => render_csv(results)?,
        ExportFormat::Pdf => return Err(ExportError::EngineUnavailable(format)),
    };

    Ok(RenderedExport {
        format,
        content_type: format.content_type(),
        file_name: format.file_name(),
        body,
    })
}

fn render_csv(results: &AssessmentResults) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for score in &results.scoreboard.scores {
        writer.serialize(DomainRow {
            domain: score.domain.label(),
            score: score.percent,
            label: score.tier.label(),
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::CsvBuffer(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ExportError::CsvBuffer(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_parse_case_insensitively() {
        assert_eq!(" MD ".parse::<ExportFormat>().ok(), Some(ExportFormat::Markdown));
        assert_eq!("Json".parse::<ExportFormat>().ok(), Some(ExportFormat::Json));
        assert!(matches!(
            "xlsx".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat(name)) if name == "xlsx"
        ));
    }

    #[test]
    fn each_format_has_a_download_name_and_type() {
        for format in [
            ExportFormat::Markdown,
            ExportFormat::Json,
            ExportFormat::Csv,
            ExportFormat::Pdf,
        ] {
            assert!(!format.file_name().is_empty());
            assert!(format.content_type().contains('/'));
        }
        assert_eq!(ExportFormat::Csv.file_name(), "sme_domain_scores.csv");
    }
}
