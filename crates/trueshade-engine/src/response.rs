//! Request and response wire types.
//!
//! ```json
//! {
//!   "skinLAB": [66.1, 14.85, 23.13],
//!   "undertone": "warm",
//!   "pantone_family": "3Y27",
//!   "colors": { "combined": [200,150,120], "l_channel": [...], "a_channel": [...], "b_channel": [...] },
//!   "fenty": ["260", "250", "240"],
//!   "nars": ["Stromboli", "..."]
//! }
//! ```
//!
//! Brand keys are flattened into the top level; catalog validation keeps them
//! from colliding with the fixed keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trueshade_core::{Error, PixelSample, Result, Undertone};

use crate::classify::ToneCode;
use crate::cluster::Extraction;
use crate::matcher::MatchResult;
use crate::profile::ChannelColors;

/// One analysis request.
///
/// Accepts either `{"samples": [...], "seed": 7}` or a bare sample array.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RequestRepr")]
pub struct AnalysisRequest {
    /// Region-tagged pixels
    pub samples: Vec<PixelSample>,
    /// Clustering seed overriding the configured one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RequestRepr {
    Full {
        samples: Vec<PixelSample>,
        #[serde(default)]
        seed: Option<u64>,
    },
    Bare(Vec<PixelSample>),
}

impl From<RequestRepr> for AnalysisRequest {
    fn from(repr: RequestRepr) -> Self {
        match repr {
            RequestRepr::Full { samples, seed } => Self { samples, seed },
            RequestRepr::Bare(samples) => Self { samples, seed: None },
        }
    }
}

impl AnalysisRequest {
    #[allow(missing_docs)]
    pub fn new(samples: Vec<PixelSample>) -> Self {
        Self { samples, seed: None }
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses a request document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::parse(format!("analysis request: {e}")))
    }
}

/// Response of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Representative color as `[L, A, B]`
    #[serde(rename = "skinLAB")]
    pub skin_lab: [f32; 3],
    /// Undertone class
    pub undertone: Undertone,
    /// Tone code
    pub pantone_family: ToneCode,
    /// Visualization swatches
    pub colors: ChannelColors,
    /// Ranked shade names per brand
    #[serde(flatten)]
    pub brands: BTreeMap<String, Vec<String>>,
}

impl AnalysisResponse {
    /// Serializes as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::parse(e.to_string()))
    }
}

/// Response plus clustering and ranking details.
#[derive(Debug, Clone, Serialize)]
pub struct DebugResponse {
    /// Regular response fields
    #[serde(flatten)]
    pub response: AnalysisResponse,
    /// Details
    pub debug: DebugDetails,
}

/// Diagnostic payload of a [`DebugResponse`].
#[derive(Debug, Clone, Serialize)]
pub struct DebugDetails {
    /// Samples received
    pub samples_total: usize,
    /// Samples kept by the aggregator
    pub samples_kept: usize,
    /// Clustering outcome
    pub extraction: Extraction,
    /// Matches with distances
    pub matches: MatchResult,
    /// Version of the snapshot matched against
    pub catalog_version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use trueshade_core::Region;

    #[test]
    fn test_request_forms() {
        let full = AnalysisRequest::from_json(
            r#"{"samples":[{"rgb":[1,2,3],"region":"chin"}],"seed":9}"#,
        )
        .unwrap();
        assert_eq!(full.seed, Some(9));
        assert_eq!(full.samples[0].region, Region::Chin);

        let bare = AnalysisRequest::from_json(r#"[{"rgb":[1,2,3],"region":"forehead"}]"#).unwrap();
        assert_eq!(bare.seed, None);
        assert_eq!(bare.samples.len(), 1);

        assert!(AnalysisRequest::from_json(r#"{"pixels":[]}"#).is_err());
    }

    #[test]
    fn test_response_shape() {
        let mut brands = BTreeMap::new();
        brands.insert("fenty".to_string(), vec!["310".to_string(), "330".to_string()]);
        let response = AnalysisResponse {
            skin_lab: [65.5, 12.25, 18.5],
            undertone: Undertone::Warm,
            pantone_family: "3Y22".parse().unwrap(),
            colors: ChannelColors {
                combined: [1, 2, 3],
                l_only: [2, 2, 2],
                a_only: [3, 2, 2],
                b_only: [2, 2, 1],
            },
            brands,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["skinLAB"], serde_json::json!([65.5, 12.25, 18.5]));
        assert_eq!(json["undertone"], "warm");
        assert_eq!(json["pantone_family"], "3Y22");
        assert_eq!(json["colors"]["l_channel"], serde_json::json!([2, 2, 2]));
        assert_eq!(json["fenty"], serde_json::json!(["310", "330"]));

        let back: AnalysisResponse = serde_json::from_value(json).unwrap();
        assert_eq!(back, response);
    }
}
