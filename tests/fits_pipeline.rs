use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fitsio::FitsFile;
use fitsio::hdu::HduInfo;
use fitsio::images::{ImageDescription, ImageType};
use fitsio::tables::{ColumnDataType, ColumnDescription};
use skipper_proc_rs::image_pipeline::{
    ContainerReader, ExtensionKind, FitsReader, OverscanLayout, ProcessingConfig, SkipperError,
    SkipperPipeline,
};

/// Interleaved raw rows: overscan 100 (left) and 200 (right), active
/// pixels 1000, every value repeated once per sample.
fn raw_pixels(layout: &OverscanLayout, height: usize, samples: usize) -> Vec<i32> {
    let cols = layout.image_cols();
    let mut data = Vec::with_capacity(cols * samples * height);
    for _ in 0..height {
        for c in 0..cols {
            let value = if layout.left_window().contains(&c) {
                100
            } else if layout.right_window().contains(&c) {
                200
            } else {
                1000
            };
            data.extend(std::iter::repeat(value).take(samples));
        }
    }
    data
}

/// Empty primary, a binary table, then a two-sample raw image of 10 rows.
fn write_raw_file(path: &Path, layout: &OverscanLayout) {
    let mut file = FitsFile::create(path).open().unwrap();

    let column = ColumnDescription::new("VALUE")
        .with_type(ColumnDataType::Double)
        .create()
        .unwrap();
    let table = file.create_table("RUNINFO".to_string(), &[column]).unwrap();
    table.write_col(&mut file, "VALUE", &[3.25f64, -1.0]).unwrap();

    let dimensions = [10, layout.image_cols() * 2];
    let description = ImageDescription {
        data_type: ImageType::Long,
        dimensions: &dimensions,
    };
    let image = file.create_image("RAW".to_string(), &description).unwrap();
    image
        .write_image(&mut file, &raw_pixels(layout, 10, 2))
        .unwrap();
}

#[test]
fn test_mean_output_matches_expected_levels() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.fits");
    let output = dir.path().join("proc.fits");
    let layout = OverscanLayout::SKIPPER;
    write_raw_file(&input, &layout);

    let pipeline = SkipperPipeline::new(ProcessingConfig::default());
    let report = pipeline.process_file(&input, &output).unwrap();

    let kinds: Vec<_> = report.extensions.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ExtensionKind::PassThrough, ExtensionKind::PassThrough, ExtensionKind::Image]);
    assert_eq!(report.extensions[2].sample_count, 2);
    assert!(report.sample_output.is_none());

    let mut file = FitsFile::open(&output).unwrap();
    let hdu = file.hdu(2).unwrap();
    assert!(matches!(
        hdu.info,
        HduInfo::ImageInfo { image_type: ImageType::Float, .. }
    ));
    let name: String = hdu.read_key(&mut file, "EXTNAME").unwrap();
    assert_eq!(name, "MEAN_2");

    let mut out = FitsReader.open_for_read(&output).unwrap();
    assert_eq!(FitsReader.plane_count(&out), 3);
    let mean = FitsReader.read_plane(&mut out, 2).unwrap();
    assert_eq!((mean.width(), mean.height()), (1000, 10));
    for row in mean.rows() {
        assert_eq!(row[0], 900.0);
        assert_eq!(row[layout.left_window().start], 0.0);
        assert_eq!(row[layout.half_width() - 1], 900.0);
        assert_eq!(row[layout.right_window().end], 800.0);
        assert_eq!(row[999], 800.0);
    }
}

#[test]
fn test_table_is_copied_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.fits");
    let output = dir.path().join("proc.fits");
    write_raw_file(&input, &OverscanLayout::SKIPPER);

    SkipperPipeline::new(ProcessingConfig::default())
        .process_file(&input, &output)
        .unwrap();

    let mut file = FitsFile::open(&output).unwrap();
    let hdu = file.hdu(1).unwrap();
    assert!(matches!(hdu.info, HduInfo::TableInfo { .. }));
    let name: String = hdu.read_key(&mut file, "EXTNAME").unwrap();
    assert_eq!(name, "RUNINFO");
    let values: Vec<f64> = hdu.read_col(&mut file, "VALUE").unwrap();
    assert_eq!(values, vec![3.25, -1.0]);
}

#[test]
fn test_sample_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.fits");
    let output = dir.path().join("proc.fits");
    write_raw_file(&input, &OverscanLayout::SKIPPER);

    let config = ProcessingConfig::builder().save_samples(true).verbose(false).build();
    let report = SkipperPipeline::new(config).process_file(&input, &output).unwrap();

    let samples_path = dir.path().join("samples_proc.fits");
    assert_eq!(report.sample_output.as_deref(), Some(samples_path.as_path()));

    let mut samples = FitsReader.open_for_read(&samples_path).unwrap();
    // primary, table, two samples, mean
    assert_eq!(FitsReader.plane_count(&samples), 5);
    for index in 2..5 {
        let plane = FitsReader.read_plane(&mut samples, index).unwrap();
        assert_eq!(plane.row(4)[10], 900.0);
    }

    let mut file = FitsFile::open(&samples_path).unwrap();
    let names: Vec<String> = (2..5)
        .map(|i| file.hdu(i).unwrap().read_key::<String>(&mut file, "EXTNAME").unwrap())
        .collect();
    assert_eq!(names, vec!["SAMPLE_2_0", "SAMPLE_2_1", "MEAN_2"]);
}

#[test]
fn test_existing_output_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.fits");
    let output = dir.path().join("proc.fits");
    write_raw_file(&input, &OverscanLayout::SKIPPER);
    fs::write(&output, b"stale contents").unwrap();

    SkipperPipeline::new(ProcessingConfig::default())
        .process_file(&input, &output)
        .unwrap();

    let out = FitsReader.open_for_read(&output).unwrap();
    assert_eq!(FitsReader.plane_count(&out), 3);
}

#[test]
fn test_primary_image_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("single.fits");
    let output = dir.path().join("proc.fits");
    let layout = OverscanLayout::SKIPPER;

    let mut data = Vec::new();
    for _ in 0..2 {
        for c in 0..1000 {
            let value: f32 = if layout.left_window().contains(&c) { 7.0 } else { 57.0 };
            data.extend(std::iter::repeat(value).take(3));
        }
    }
    let dimensions = [2, 3000];
    let description = ImageDescription {
        data_type: ImageType::Float,
        dimensions: &dimensions,
    };
    {
        let mut file = FitsFile::create(&input)
            .with_custom_primary(&description)
            .open()
            .unwrap();
        let primary = file.primary_hdu().unwrap();
        primary.write_image(&mut file, &data).unwrap();
    }

    let report = SkipperPipeline::new(ProcessingConfig::default())
        .process_file(&input, &output)
        .unwrap();
    assert_eq!(report.extensions[0].sample_count, 3);

    let mut out = FitsReader.open_for_read(&output).unwrap();
    assert_eq!(FitsReader.plane_count(&out), 1);
    let mean = FitsReader.read_plane(&mut out, 0).unwrap();
    assert_eq!(mean.row(1)[0], 50.0);
    assert_eq!(mean.row(1)[999], 0.0);
}

#[test]
fn test_trailing_zero_block_is_end_of_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("padded.fits");
    let output = dir.path().join("proc.fits");
    write_raw_file(&input, &OverscanLayout::SKIPPER);

    let mut file = OpenOptions::new().append(true).open(&input).unwrap();
    file.write_all(&[0u8; 2880]).unwrap();
    drop(file);

    let report = SkipperPipeline::new(ProcessingConfig::default())
        .process_file(&input, &output)
        .unwrap();

    assert_eq!(report.extensions.len(), 3);
    assert_eq!(report.image_extensions().count(), 1);
    let out = FitsReader.open_for_read(&output).unwrap();
    assert_eq!(FitsReader.plane_count(&out), 3);
}

#[test]
fn test_not_a_fits_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("junk.fits");
    fs::write(&input, vec![b'x'; 2880]).unwrap();

    let err = SkipperPipeline::new(ProcessingConfig::default())
        .process_file(&input, dir.path().join("proc.fits"))
        .unwrap_err();

    assert!(matches!(err, SkipperError::ContainerIo { .. }));
    assert_ne!(err.exit_code(), 0);
}
