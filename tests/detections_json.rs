//! Validates post-processing against JSON detection documents.
//!
//! The fixture layout matches the detections files consumed by detpost-cli:
//! three parallel arrays with boxes as `[top, left, bottom, right]`
//! fractions, here bundled with the expected post-processed ground truth.

use detpost::{postprocess_batch, DetectionBatch, ImageGeometry, NormalizedBox};
use serde::Deserialize;

/// Detections file layout, as written by exporters and read by the CLI.
#[derive(Debug, Deserialize)]
struct DetectionsDoc {
    boxes: Vec<[f32; 4]>,
    scores: Vec<f32>,
    classes: Vec<u32>,
}

/// Expected survivors after filtering and denormalization.
#[derive(Debug, Deserialize)]
struct Expected {
    pixel_boxes: Vec<[f32; 4]>,
    scores: Vec<f32>,
    classes: Vec<u32>,
}

/// One self-contained validation case.
#[derive(Debug, Deserialize)]
struct Case {
    height: u32,
    width: u32,
    min_score: f32,
    detections: DetectionsDoc,
    expected: Expected,
}

fn batch_from_doc(doc: DetectionsDoc) -> DetectionBatch {
    let boxes = doc.boxes.into_iter().map(NormalizedBox::from_array).collect();
    DetectionBatch::new(boxes, doc.scores, doc.classes).expect("fixture arrays must align")
}

fn run_case(json: &str) {
    let case: Case = serde_json::from_str(json).expect("fixture must parse");
    let geometry = ImageGeometry::new(case.height, case.width).unwrap();
    let batch = batch_from_doc(case.detections);

    let result = postprocess_batch(&batch, case.min_score, geometry).unwrap();

    assert_eq!(result.batch.scores(), case.expected.scores.as_slice());
    assert_eq!(result.batch.classes(), case.expected.classes.as_slice());
    assert_eq!(result.pixel_boxes.len(), case.expected.pixel_boxes.len());
    for (got, want) in result.pixel_boxes.iter().zip(case.expected.pixel_boxes.iter()) {
        let got = [got.top, got.left, got.bottom, got.right];
        for (g, w) in got.iter().zip(want.iter()) {
            assert!((g - w).abs() < 1e-4, "pixel coordinate {g} != {w}");
        }
    }
}

#[test]
fn json_case_filters_and_denormalizes() {
    run_case(
        r#"{
            "height": 600,
            "width": 1000,
            "min_score": 0.6,
            "detections": {
                "boxes": [
                    [0.5, 0.25, 1.0, 0.75],
                    [0.0, 0.0, 0.2, 0.2],
                    [0.1, 0.3, 0.4, 0.6]
                ],
                "scores": [0.9, 0.4, 0.6],
                "classes": [3, 1, 7]
            },
            "expected": {
                "pixel_boxes": [
                    [300.0, 250.0, 600.0, 750.0],
                    [60.0, 300.0, 240.0, 600.0]
                ],
                "scores": [0.9, 0.6],
                "classes": [3, 7]
            }
        }"#,
    );
}

#[test]
fn json_case_with_no_survivors() {
    run_case(
        r#"{
            "height": 480,
            "width": 640,
            "min_score": 0.95,
            "detections": {
                "boxes": [[0.1, 0.1, 0.5, 0.5]],
                "scores": [0.9],
                "classes": [3]
            },
            "expected": {
                "pixel_boxes": [],
                "scores": [],
                "classes": []
            }
        }"#,
    );
}

#[test]
fn misaligned_json_document_is_rejected() {
    let doc: DetectionsDoc = serde_json::from_str(
        r#"{
            "boxes": [[0.1, 0.1, 0.5, 0.5]],
            "scores": [0.9, 0.8],
            "classes": [3]
        }"#,
    )
    .unwrap();

    let boxes: Vec<NormalizedBox> = doc.boxes.into_iter().map(NormalizedBox::from_array).collect();
    let err = DetectionBatch::new(boxes, doc.scores, doc.classes)
        .err()
        .unwrap();
    assert_eq!(
        err,
        detpost::DetPostError::LengthMismatch {
            boxes: 1,
            scores: 2,
            classes: 1,
        }
    );
}
