use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome class of an analysis, as reported by the service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Authentic,
    Uncertain,
    Suspicious,
    Fake,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedScore {
    pub raw_score: f64,
    pub weight: f64,
    pub weighted_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub score: f64,
    pub verdict: Verdict,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub breakdown: BTreeMap<String, WeightedScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerResult {
    pub score: f64,
    #[serde(default)]
    pub flags: Vec<String>,
    /// Data URI of an auxiliary visualisation, when the analyzer makes one.
    #[serde(default, alias = "ela_image")]
    pub image: Option<String>,
    #[serde(default)]
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub filename: Option<String>,
    pub overall: OverallScore,
    #[serde(default)]
    pub analyzers: BTreeMap<String, AnalyzerResult>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// The service answered with a non-success status.
    Service { status: u16, message: String },
    Network(String),
    Parse(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Service { status, message } => {
                write!(f, "analysis failed ({status}): {message}")
            }
            ReportError::Network(msg) => write!(f, "analysis request failed: {msg}"),
            ReportError::Parse(msg) => write!(f, "malformed analysis report: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {}

/// Interprets a response body from the analysis endpoint.
pub fn parse_response(status: u16, body: &str) -> Result<AnalysisReport, ReportError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|e| e.error)
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(ReportError::Service { status, message });
    }
    serde_json::from_str(body).map_err(|e| ReportError::Parse(e.to_string()))
}

/// Posts `file` as multipart field `file` and parses the returned report.
pub async fn upload_image(endpoint: &str, file: &web_sys::File) -> Result<AnalysisReport, ReportError> {
    let js_err = |e: wasm_bindgen::JsValue| ReportError::Network(format!("{e:?}"));

    let form = web_sys::FormData::new().map_err(js_err)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(js_err)?;

    let resp = Request::post(endpoint)
        .body(form)
        .map_err(|e| ReportError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ReportError::Network(e.to_string()))?;
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| ReportError::Network(e.to_string()))?;
    parse_response(status, &text)
}

#[cfg(test)]
mod tests {
    use super::{ReportError, Verdict, parse_response};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "status": "success",
        "filename": "shot.png",
        "overall": {
            "score": 41.5,
            "verdict": "SUSPICIOUS",
            "confidence": "Medium",
            "message": "notable anomalies",
            "breakdown": {
                "ela": { "raw_score": 70.0, "weight": 0.35, "weighted_score": 24.5 }
            }
        },
        "analyzers": {
            "ela": { "score": 70, "flags": ["edges"], "ela_image": "data:image/png;base64,AAAA", "details": {} },
            "hash": { "score": 10, "flags": [], "details": { "md5": "abc" } }
        }
    }"#;

    #[test]
    fn parses_full_report() {
        let report = parse_response(200, SAMPLE).unwrap();
        assert_eq!(report.filename.as_deref(), Some("shot.png"));
        assert_eq!(report.overall.verdict, Verdict::Suspicious);
        assert_eq!(report.overall.breakdown["ela"].weighted_score, 24.5);
        assert_eq!(report.analyzers.len(), 2);
        assert_eq!(
            report.analyzers["ela"].image.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
        assert_eq!(report.analyzers["hash"].image, None);
        assert_eq!(report.analyzers["hash"].details["md5"], "abc");
    }

    #[test]
    fn unknown_verdicts_do_not_fail_parsing() {
        let body = r#"{ "overall": { "score": 1, "verdict": "MAYBE" } }"#;
        let report = parse_response(200, body).unwrap();
        assert_eq!(report.overall.verdict, Verdict::Unknown);
        assert!(report.analyzers.is_empty());
    }

    #[test]
    fn error_bodies_surface_the_service_message() {
        let err = parse_response(400, r#"{ "error": "Empty filename." }"#).unwrap_err();
        assert_eq!(
            err,
            ReportError::Service {
                status: 400,
                message: "Empty filename.".to_string(),
            }
        );
        assert_eq!(err.to_string(), "analysis failed (400): Empty filename.");
    }

    #[test]
    fn non_json_error_bodies_are_kept_verbatim() {
        let err = parse_response(502, "Bad Gateway\n").unwrap_err();
        assert!(matches!(err, ReportError::Service { status: 502, ref message } if message == "Bad Gateway"));
    }

    #[test]
    fn garbage_success_body_is_a_parse_error() {
        assert!(matches!(parse_response(200, "<html>"), Err(ReportError::Parse(_))));
    }
}
