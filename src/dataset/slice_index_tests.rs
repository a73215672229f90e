use std::collections::HashSet;

use ndarray::{Array3, Axis};

use crate::config::SamplingConfig;
use crate::dataset::SliceIndex;
use crate::error::VolsegError;
use crate::traits::SliceDataset;
use crate::types::{SliceAddress, VolumeRecord};

// Test Helpers
/// Builds a volume whose image voxel value encodes `(volume, slice, row, col)` and
/// whose seg holds the slice position, so a fetched sample can be traced back.
fn make_volume(volume: usize, slices: usize, h: usize, w: usize) -> VolumeRecord<u16, u8> {
    let image = Array3::from_shape_fn((slices, h, w), |(s, r, c)| {
        (volume * 1000 + s * 100 + r * 10 + c) as u16
    });
    let seg = Array3::from_shape_fn((slices, h, w), |(s, _, _)| (s % 3) as u8);
    VolumeRecord::new(image, seg).unwrap()
}

fn make_dataset(slice_counts: &[usize]) -> Vec<VolumeRecord<u16, u8>> {
    slice_counts
        .iter()
        .enumerate()
        .map(|(i, &n)| make_volume(i, n, 4, 5))
        .collect()
}

#[test]
fn test_length_is_sum_of_slice_counts() {
    let data = make_dataset(&[3, 5, 2]);
    let index = SliceIndex::new(&data).unwrap();
    assert_eq!(index.len(), 10);
    assert_eq!(index.volume_count(), 3);
    assert!(!index.is_empty());
}

#[test]
fn test_every_index_maps_to_a_unique_address() {
    let data = make_dataset(&[4, 1, 3]);
    let index = SliceIndex::new(&data).unwrap();

    let mut seen = HashSet::new();
    for idx in 0..index.len() {
        let sample = index.get(idx).unwrap();
        assert_eq!(sample.id, idx);
        assert!(seen.insert(index.address(idx).unwrap()));
    }
    assert_eq!(seen.len(), index.len());
}

#[test]
fn test_table_is_in_ascending_volume_slice_order() {
    let data = make_dataset(&[2, 3]);
    let index = SliceIndex::new(&data).unwrap();
    let expected = vec![
        SliceAddress::new(0, 0),
        SliceAddress::new(0, 1),
        SliceAddress::new(1, 0),
        SliceAddress::new(1, 1),
        SliceAddress::new(1, 2),
    ];
    assert_eq!(index.addresses(), expected.as_slice());
}

#[test]
fn test_sample_shape_contract() {
    let data = vec![make_volume(0, 3, 6, 7), make_volume(1, 2, 2, 9)];
    let index = SliceIndex::new(&data).unwrap();

    let first = index.get(0).unwrap();
    assert_eq!(first.image.shape(), &[1, 6, 7]);
    assert_eq!(first.seg.shape(), &[1, 6, 7]);

    let last = index.get(4).unwrap();
    assert_eq!(last.image.shape(), &[1, 2, 9]);
    assert_eq!(last.seg.shape(), &[1, 2, 9]);
}

#[test]
fn test_sample_values_come_from_the_addressed_slice() {
    let data = make_dataset(&[2, 3]);
    let index = SliceIndex::new(&data).unwrap();

    // Global index 3 is volume 1, slice 1.
    let sample = index.get(3).unwrap();
    let expected_image = data[1]
        .image
        .index_axis(Axis(0), 1)
        .mapv(|v| v as f32)
        .insert_axis(Axis(0));
    assert_eq!(sample.image, expected_image);
    assert!(sample.seg.iter().all(|&v| v == 1));
    assert_eq!(sample.image[[0, 2, 3]], 1123.0);
}

#[test]
fn test_get_does_not_mutate_source() {
    let data = make_dataset(&[2]);
    let before = data.clone();
    let index = SliceIndex::new(&data).unwrap();
    let _ = index.get(0).unwrap();
    let _ = index.get(1).unwrap();
    assert_eq!(data, before);
}

#[test]
fn test_get_at_length_is_out_of_range() {
    let data = make_dataset(&[3, 2]);
    let index = SliceIndex::new(&data).unwrap();
    let result = index.get(index.len());
    assert!(matches!(
        result,
        Err(VolsegError::IndexOutOfRange { index: 5, len: 5 })
    ));
    assert!(index.address(usize::MAX).is_err());
}

#[test]
fn test_empty_input_yields_empty_index() {
    let data: Vec<VolumeRecord<f32, i32>> = Vec::new();
    let index = SliceIndex::new(&data).unwrap();
    assert!(index.is_empty());
    assert!(matches!(
        index.get(0),
        Err(VolsegError::IndexOutOfRange { index: 0, len: 0 })
    ));
}

#[test]
fn test_zero_slice_volume_is_skipped() {
    let data = make_dataset(&[2, 0, 1]);
    let index = SliceIndex::new(&data).unwrap();
    assert_eq!(index.len(), 3);
    assert_eq!(index.address(2).unwrap(), SliceAddress::new(2, 0));
}

#[test]
fn test_mismatched_record_is_precondition_error() {
    let mut data = make_dataset(&[2, 2]);
    data[1].seg = Array3::zeros((3, 4, 5));
    match SliceIndex::new(&data) {
        Err(VolsegError::Precondition(msg)) => assert!(msg.starts_with("volume 1:")),
        other => panic!("Expected Precondition error, got {:?}", other.map(|i| i.len())),
    }
}

#[test]
fn test_float_image_and_signed_labels() {
    let image = Array3::from_elem((2, 2, 2), 0.5f64);
    let seg = Array3::from_elem((2, 2, 2), -1i32);
    let data = vec![VolumeRecord::new(image, seg).unwrap()];
    let index = SliceIndex::new(&data).unwrap();
    let sample = index.get(1).unwrap();
    assert!(sample.image.iter().all(|&v| v == 0.5f32));
    assert!(sample.seg.iter().all(|&v| v == -1i64));
}

#[test]
fn test_usable_through_dataset_trait() {
    fn total_foreground<D>(dataset: &D) -> i64
    where
        D: SliceDataset<Item = crate::types::Sample>,
    {
        (0..dataset.len())
            .map(|i| dataset.get(i).unwrap().seg.sum())
            .sum()
    }

    let data = make_dataset(&[3]);
    let index = SliceIndex::new(&data).unwrap();
    // Slices 0, 1, 2 carry labels 0, 1, 2 over 4x5 pixels.
    assert_eq!(total_foreground(&index), 60);
    assert!(!SliceDataset::is_empty(&index));
}

#[test]
fn test_concurrent_reads() {
    let data = make_dataset(&[4, 4]);
    let index = SliceIndex::new(&data).unwrap();

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let index = &index;
            scope.spawn(move || {
                for idx in (worker..index.len()).step_by(4) {
                    assert_eq!(index.get(idx).unwrap().id, idx);
                }
            });
        }
    });
}

#[test]
fn test_sampler_covers_every_slice() {
    let data = make_dataset(&[3, 4]);
    let index = SliceIndex::new(&data).unwrap();
    let config = SamplingConfig {
        seed: Some(11),
        batch_size: 2,
        ..SamplingConfig::default()
    };
    let mut sampler = index.sampler(config).unwrap();
    let mut visited: Vec<usize> = sampler.batches().into_iter().flatten().collect();
    visited.sort_unstable();
    assert_eq!(visited, (0..index.len()).collect::<Vec<_>>());
}
