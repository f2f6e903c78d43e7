//! Tests for the IDX dataset loader
//!
//! This file covers:
//! - Loading a valid image/label pair (raw unnormalized pixels, one-hot
//!   labels)
//! - Magic number validation for both files
//! - Truncated payload detection
//! - Image/label count agreement
//! - Label range checking

use std::io::Write;
use tempfile::NamedTempFile;

use mnist_feedforward::dataset::Dataset;
use mnist_feedforward::Error;

const IMAGE_MAGIC: u32 = 2051;
const LABEL_MAGIC: u32 = 2049;

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(bytes).expect("failed to write temp file");
    file
}

fn image_file(magic: u32, count: u32, rows: u32, cols: u32, pixels: &[u8]) -> NamedTempFile {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&magic.to_be_bytes());
    bytes.extend_from_slice(&count.to_be_bytes());
    bytes.extend_from_slice(&rows.to_be_bytes());
    bytes.extend_from_slice(&cols.to_be_bytes());
    bytes.extend_from_slice(pixels);
    write_temp(&bytes)
}

fn label_file(magic: u32, count: u32, labels: &[u8]) -> NamedTempFile {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&magic.to_be_bytes());
    bytes.extend_from_slice(&count.to_be_bytes());
    bytes.extend_from_slice(labels);
    write_temp(&bytes)
}

// ============================================================================
// Valid Data
// ============================================================================

#[test]
fn test_load_valid_pair() {
    let images = image_file(IMAGE_MAGIC, 2, 2, 2, &[0, 128, 255, 7, 1, 2, 3, 4]);
    let labels = label_file(LABEL_MAGIC, 2, &[1, 0]);

    let dataset = Dataset::from_idx_files(images.path(), labels.path(), 3).unwrap();

    assert_eq!(dataset.len(), 2);
    // Pixels stay raw byte intensities; no 0-1 normalization happens here.
    assert_eq!(dataset.input(0), &[0.0, 128.0, 255.0, 7.0]);
    assert_eq!(dataset.input(1), &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(dataset.target(0), &[0.0, 1.0, 0.0]);
    assert_eq!(dataset.target(1), &[1.0, 0.0, 0.0]);
}

#[test]
fn test_iter_yields_aligned_pairs() {
    let images = image_file(IMAGE_MAGIC, 2, 1, 1, &[10, 20]);
    let labels = label_file(LABEL_MAGIC, 2, &[0, 1]);

    let dataset = Dataset::from_idx_files(images.path(), labels.path(), 2).unwrap();

    let pairs: Vec<_> = dataset.iter().collect();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].0, &[10.0]);
    assert_eq!(pairs[0].1, &[1.0, 0.0]);
    assert_eq!(pairs[1].0, &[20.0]);
    assert_eq!(pairs[1].1, &[0.0, 1.0]);
}

// ============================================================================
// Magic Numbers
// ============================================================================

#[test]
fn test_wrong_image_magic_is_rejected() {
    let images = image_file(1234, 1, 1, 1, &[0]);
    let labels = label_file(LABEL_MAGIC, 1, &[0]);

    let result = Dataset::from_idx_files(images.path(), labels.path(), 2);
    assert!(matches!(result, Err(Error::DatasetFormat(_))));
}

#[test]
fn test_wrong_label_magic_is_rejected() {
    let images = image_file(IMAGE_MAGIC, 1, 1, 1, &[0]);
    let labels = label_file(IMAGE_MAGIC, 1, &[0]);

    let result = Dataset::from_idx_files(images.path(), labels.path(), 2);
    assert!(matches!(result, Err(Error::DatasetFormat(_))));
}

// ============================================================================
// Truncation and Count Agreement
// ============================================================================

#[test]
fn test_truncated_image_payload_is_rejected() {
    // Header claims 2 images of 4 pixels but only 5 bytes follow.
    let images = image_file(IMAGE_MAGIC, 2, 2, 2, &[0, 1, 2, 3, 4]);
    let labels = label_file(LABEL_MAGIC, 2, &[0, 1]);

    let result = Dataset::from_idx_files(images.path(), labels.path(), 2);
    assert!(matches!(result, Err(Error::DatasetFormat(_))));
}

#[test]
fn test_truncated_label_payload_is_rejected() {
    let images = image_file(IMAGE_MAGIC, 2, 1, 1, &[0, 1]);
    let labels = label_file(LABEL_MAGIC, 2, &[0]);

    let result = Dataset::from_idx_files(images.path(), labels.path(), 2);
    assert!(matches!(result, Err(Error::DatasetFormat(_))));
}

#[test]
fn test_empty_image_file_is_rejected() {
    let images = write_temp(&[]);
    let labels = label_file(LABEL_MAGIC, 1, &[0]);

    let result = Dataset::from_idx_files(images.path(), labels.path(), 2);
    assert!(matches!(result, Err(Error::DatasetFormat(_))));
}

#[test]
fn test_disagreeing_counts_are_rejected() {
    let images = image_file(IMAGE_MAGIC, 2, 1, 1, &[0, 1]);
    let labels = label_file(LABEL_MAGIC, 3, &[0, 1, 0]);

    let result = Dataset::from_idx_files(images.path(), labels.path(), 2);
    assert!(matches!(result, Err(Error::DatasetFormat(_))));
}

// ============================================================================
// Label Range
// ============================================================================

#[test]
fn test_label_out_of_class_range_is_rejected() {
    let images = image_file(IMAGE_MAGIC, 1, 1, 1, &[0]);
    let labels = label_file(LABEL_MAGIC, 1, &[9]);

    let result = Dataset::from_idx_files(images.path(), labels.path(), 3);
    assert!(matches!(result, Err(Error::DatasetFormat(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let labels = label_file(LABEL_MAGIC, 1, &[0]);
    let result = Dataset::from_idx_files("/nonexistent/images", labels.path(), 2);
    assert!(matches!(result, Err(Error::Io(_))));
}
