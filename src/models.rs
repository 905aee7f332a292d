// src/models.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decode::lenient;

/// Body of the create-record request.
#[derive(Serialize, Debug, Clone)]
pub struct CreateRecordRequest<'a> {
    pub name: &'a str,
}

/// Acknowledgement returned by a successful create-record call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub message: String,
}

/// The backend's classification output for one image.
///
/// Every field except `success` may be missing even when `success` is true,
/// so consumers must not assume `tumor_type` or `confidence` are present.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PredictionResult {
    #[serde(deserialize_with = "lenient::bool")]
    pub success: bool,

    #[serde(default, deserialize_with = "lenient::opt_i64", skip_serializing_if = "Option::is_none")]
    pub predicted_class: Option<i64>,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub tumor_type: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(default, deserialize_with = "lenient::opt_f64_list", skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<Vec<f64>>,

    #[serde(default, deserialize_with = "lenient::opt_f64_map", skip_serializing_if = "Option::is_none")]
    pub class_probabilities: Option<BTreeMap<String, f64>>,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One historical upload paired with its prediction, if any.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImageRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub name: String,

    #[serde(deserialize_with = "lenient::string")]
    pub url: String,

    #[serde(deserialize_with = "lenient::string")]
    pub uploaded_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information: Option<PredictionResult>,
}

/// Response of the upload call.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UploadResponse {
    #[serde(deserialize_with = "lenient::bool")]
    pub success: bool,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ImageRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<PredictionResult>,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub prediction_error: Option<String>,
}

/// Listing of past uploads. The server calls the record list `data`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HistoryPage {
    #[serde(default, deserialize_with = "lenient::i64")]
    pub count: i64,

    #[serde(rename = "data", default)]
    pub records: Vec<ImageRecord>,

    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub message: String,

    #[serde(deserialize_with = "lenient::bool")]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_json;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_full_prediction() {
        let json = r#"{
            "success": true,
            "predicted_class": 0,
            "tumor_type": "glioma",
            "confidence": 0.973,
            "probabilities": [0.973, 0.01, 0.012, 0.005],
            "class_probabilities": {"glioma": 0.973, "meningioma": 0.01, "notumor": 0.005, "pituitary": 0.012},
            "model_version": "v3"
        }"#;
        let p: PredictionResult = decode_json(json).unwrap();
        assert!(p.success);
        assert_eq!(p.predicted_class, Some(0));
        assert_eq!(p.tumor_type.as_deref(), Some("glioma"));
        assert_eq!(p.confidence, Some(0.973));
        assert_eq!(p.probabilities.as_ref().map(Vec::len), Some(4));
        assert_eq!(p.class_probabilities.unwrap()["pituitary"], 0.012);
    }

    #[test]
    fn prediction_serialization_omits_absent_fields() {
        let p = PredictionResult {
            success: false,
            error: Some("model offline".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&p).unwrap(),
            r#"{"success":false,"error":"model offline"}"#
        );
    }

    #[test]
    fn decodes_history_page_with_lenient_count() {
        let json = r#"{
            "success": true,
            "count": "1",
            "message": "ok",
            "data": [{
                "id": 17,
                "name": "scan.png",
                "url": "https://cdn.example/scan.png",
                "uploaded_at": "2025-03-05T10:11:12.123456+00:00",
                "information": {"success": true, "tumor_type": "notumor", "confidence": "0.88"}
            }]
        }"#;
        let page: HistoryPage = decode_json(json).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.records[0].id, "17");
        let info = page.records[0].information.as_ref().unwrap();
        assert_eq!(info.confidence, Some(0.88));
    }

    #[test]
    fn history_page_null_message_reads_as_empty() {
        let page: HistoryPage =
            decode_json(r#"{"success":true,"count":0,"data":[],"message":null}"#).unwrap();
        assert!(page.success);
        assert!(page.records.is_empty());
        assert_eq!(page.message, "");
    }

    #[test]
    fn upload_response_without_prediction() {
        let r: UploadResponse = decode_json(r#"{"success":true,"message":"ok"}"#).unwrap();
        assert!(r.success);
        assert_eq!(r.prediction, None);
        assert_eq!(r.data, None);
    }

    #[test]
    fn record_missing_url_fails() {
        let err = decode_json::<ImageRecord>(r#"{"id":"1","name":"a","uploaded_at":"x"}"#)
            .unwrap_err();
        assert!(err.message.contains("url"));
    }
}
