//! IDX dataset loading
//!
//! Reads the MNIST binary image/label file pair: big-endian u32 headers
//! (magic number, counts, image dimensions) followed by raw unsigned bytes.
//! Pixels are handed to the network as f32 scalars in 0..=255 without
//! normalization; the input layer's sigmoid is applied to these raw
//! intensities downstream. Labels become one-hot vectors.

use std::path::Path;

use crate::error::{Error, Result};

/// Magic number opening an IDX image file.
const IMAGE_MAGIC: u32 = 2051;
/// Magic number opening an IDX label file.
const LABEL_MAGIC: u32 = 2049;

/// Paired input and expected-output vectors.
///
/// `inputs[i]` is a flattened image; `targets[i]` is the one-hot encoding of
/// its label. The two sequences always have equal length.
#[derive(Debug, Clone)]
pub struct Dataset {
    inputs: Vec<Vec<f32>>,
    targets: Vec<Vec<f32>>,
}

impl Dataset {
    /// Build a dataset from parallel input/target sequences.
    pub fn new(inputs: Vec<Vec<f32>>, targets: Vec<Vec<f32>>) -> Result<Self> {
        if inputs.len() != targets.len() {
            return Err(Error::ShapeMismatch {
                context: "dataset input/target pairing",
                expected: inputs.len(),
                actual: targets.len(),
            });
        }
        Ok(Self { inputs, targets })
    }

    /// Load an IDX image/label file pair.
    ///
    /// Both magic numbers are validated, the image and label counts must
    /// agree, and every payload must be complete. Labels must be smaller
    /// than `num_classes`.
    pub fn from_idx_files(
        images_path: impl AsRef<Path>,
        labels_path: impl AsRef<Path>,
        num_classes: usize,
    ) -> Result<Self> {
        let image_data = std::fs::read(images_path)?;
        let label_data = std::fs::read(labels_path)?;

        let mut offset = 0usize;
        let magic = read_be_u32(&image_data, &mut offset)?;
        if magic != IMAGE_MAGIC {
            return Err(Error::DatasetFormat(format!(
                "image file magic number is {}, expected {}",
                magic, IMAGE_MAGIC
            )));
        }
        let num_images = read_be_u32(&image_data, &mut offset)? as usize;
        let rows = read_be_u32(&image_data, &mut offset)? as usize;
        let cols = read_be_u32(&image_data, &mut offset)? as usize;
        let image_size = rows * cols;
        if image_data.len() < offset + num_images * image_size {
            return Err(Error::DatasetFormat(format!(
                "image file is truncated: {} images of {} pixels expected",
                num_images, image_size
            )));
        }

        let mut label_offset = 0usize;
        let label_magic = read_be_u32(&label_data, &mut label_offset)?;
        if label_magic != LABEL_MAGIC {
            return Err(Error::DatasetFormat(format!(
                "label file magic number is {}, expected {}",
                label_magic, LABEL_MAGIC
            )));
        }
        let num_labels = read_be_u32(&label_data, &mut label_offset)? as usize;
        if num_labels != num_images {
            return Err(Error::DatasetFormat(format!(
                "{} images but {} labels",
                num_images, num_labels
            )));
        }
        if label_data.len() < label_offset + num_labels {
            return Err(Error::DatasetFormat(format!(
                "label file is truncated: {} labels expected",
                num_labels
            )));
        }

        let mut inputs = Vec::with_capacity(num_images);
        let mut targets = Vec::with_capacity(num_images);
        for i in 0..num_images {
            let start = offset + i * image_size;
            let pixels: Vec<f32> = image_data[start..start + image_size]
                .iter()
                .map(|&p| p as f32)
                .collect();

            let label = label_data[label_offset + i] as usize;
            if label >= num_classes {
                return Err(Error::DatasetFormat(format!(
                    "label {} out of range for {} classes",
                    label, num_classes
                )));
            }
            let mut one_hot = vec![0.0f32; num_classes];
            one_hot[label] = 1.0;

            inputs.push(pixels);
            targets.push(one_hot);

            print_progress(i, num_images);
        }

        Ok(Self { inputs, targets })
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Flattened image i.
    pub fn input(&self, index: usize) -> &[f32] {
        &self.inputs[index]
    }

    /// One-hot label i.
    pub fn target(&self, index: usize) -> &[f32] {
        &self.targets[index]
    }

    /// Iterate (input, target) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f32], &[f32])> {
        self.inputs
            .iter()
            .map(Vec::as_slice)
            .zip(self.targets.iter().map(Vec::as_slice))
    }
}

/// Read a big-endian u32, advancing the offset.
fn read_be_u32(data: &[u8], offset: &mut usize) -> Result<u32> {
    let end = *offset + 4;
    if data.len() < end {
        return Err(Error::DatasetFormat(
            "file too short for IDX header".to_string(),
        ));
    }
    let bytes: [u8; 4] = data[*offset..end]
        .try_into()
        .map_err(|_| Error::DatasetFormat("file too short for IDX header".to_string()))?;
    *offset = end;
    Ok(u32::from_be_bytes(bytes))
}

fn print_progress(index: usize, total: usize) {
    if total == 0 {
        return;
    }
    if index == total / 4 {
        println!("25%");
    } else if index == total / 2 {
        println!("50%");
    } else if index == total * 3 / 4 {
        println!("75%");
    } else if index == total - 1 {
        println!("100%");
    }
}
