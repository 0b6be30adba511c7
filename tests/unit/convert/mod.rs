use super::*;

fn sample_planes(count: usize, len: usize, maximum: f32, seed: u32) -> Vec<Vec<f32>> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..count)
        .map(|_| {
            (0..len)
                .map(|_| {
                    state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                    (state >> 8) as f32 / (1u32 << 24) as f32 * maximum
                })
                .collect()
        })
        .collect()
}

fn bits(planes: &[Vec<f32>]) -> Vec<Vec<u32>> {
    planes
        .iter()
        .map(|p| p.iter().map(|v| v.to_bits()).collect())
        .collect()
}

fn run_to_rgb(converter: &dyn ColorConverter, planes: &mut [Vec<f32>]) {
    let mut values = ComponentValues::new(planes.iter_mut().map(|p| p.as_mut_slice())).unwrap();
    converter.convert_in_place(&mut values).unwrap();
}

fn scalar_converter(space: ColorSpace, precision: u32) -> Box<dyn ColorConverter> {
    select_converter(space, precision, Capability::scalar()).unwrap()
}

#[test]
fn sample_scale_follows_precision() {
    let s8 = SampleScale::new(8).unwrap();
    assert_eq!(s8.maximum(), 255.0);
    assert_eq!(s8.half(), 128.0);
    assert_eq!(s8.scale(), 1.0 / 255.0);

    let s12 = SampleScale::new(12).unwrap();
    assert_eq!(s12.maximum(), 4095.0);
    assert_eq!(s12.half(), 2048.0);
    assert_eq!(s12.precision(), 12);
}

#[test]
fn sample_scale_rejects_out_of_range_precision() {
    assert!(SampleScale::new(1).is_err());
    assert!(SampleScale::new(17).is_err());
    assert!(select_converter(ColorSpace::YCbCr, 0, Capability::scalar()).is_err());
}

#[test]
fn select_converter_resolves_path_from_capability() {
    let scalar = scalar_converter(ColorSpace::YCbCr, 8);
    assert!(scalar.is_available());
    assert_eq!(scalar.color_space(), ColorSpace::YCbCr);
    assert_eq!(scalar.precision(), 8);

    let vector = select_converter(ColorSpace::Rgb, 12, Capability::new(true, 8).unwrap()).unwrap();
    assert!(vector.is_available());
    assert_eq!(vector.precision(), 12);
}

#[test]
fn vector_converter_reports_unavailable_capability() {
    let scale = SampleScale::new(8).unwrap();
    let converter = VectorConverter::new(YCbCrKernels::new(scale), Capability::scalar());
    assert!(!converter.is_available());
}

#[test]
fn wrong_component_count_is_rejected_before_mutation() {
    let capability = Capability::new(true, 4).unwrap();
    let converter = select_converter(ColorSpace::YCbCr, 8, capability).unwrap();
    let mut planes = vec![vec![10.0f32; 8]; 2];
    let mut values = ComponentValues::new(planes.iter_mut().map(|p| p.as_mut_slice())).unwrap();
    let err = converter.convert_in_place(&mut values).unwrap_err();
    assert!(err.to_string().contains("expects 3 components"));
    drop(values);
    assert!(planes.iter().flatten().all(|&v| v == 10.0));
}

#[test]
fn convert_back_rejects_short_rgb_planes() {
    let converter = scalar_converter(ColorSpace::Rgb, 8);
    let mut planes = vec![vec![0.0f32; 4]; 3];
    let mut values = ComponentValues::new(planes.iter_mut().map(|p| p.as_mut_slice())).unwrap();
    let short = [0.5f32; 3];
    let err = converter
        .convert_back(&mut values, &short, &short, &short)
        .unwrap_err();
    assert!(err.to_string().contains("rgb planes hold 3 samples"));
}

#[test]
fn empty_run_is_a_no_op() {
    let capability = Capability::new(true, 8).unwrap();
    let converter = select_converter(ColorSpace::YCbCr, 8, capability).unwrap();
    let mut planes = vec![Vec::<f32>::new(); 3];
    run_to_rgb(converter.as_ref(), &mut planes);
    assert!(planes.iter().all(Vec::is_empty));
}

#[test]
fn vector_and_scalar_paths_agree_for_every_color_space() {
    for space in [ColorSpace::Grayscale, ColorSpace::YCbCr, ColorSpace::Rgb] {
        for precision in [8u32, 12] {
            let maximum = SampleScale::new(precision).unwrap().maximum();
            let scalar = scalar_converter(space, precision);
            for lanes in [4usize, 8, 16] {
                let vector =
                    select_converter(space, precision, Capability::new(true, lanes).unwrap())
                        .unwrap();
                for len in [0usize, 1, 3, 4, 7, 8, 9, 16, 17, 31, 33] {
                    let source =
                        sample_planes(space.component_count(), len, maximum * 1.1, len as u32);
                    let mut via_vector = source.clone();
                    let mut via_scalar = source.clone();
                    run_to_rgb(vector.as_ref(), &mut via_vector);
                    run_to_rgb(scalar.as_ref(), &mut via_scalar);
                    assert_eq!(
                        bits(&via_vector),
                        bits(&via_scalar),
                        "{space:?} precision={precision} lanes={lanes} len={len}"
                    );
                }
            }
        }
    }
}

#[test]
fn convert_back_paths_agree() {
    for space in [ColorSpace::Grayscale, ColorSpace::YCbCr, ColorSpace::Rgb] {
        let scalar = scalar_converter(space, 8);
        let vector = select_converter(space, 8, Capability::new(true, 8).unwrap()).unwrap();
        for len in [5usize, 8, 21] {
            let rgb = sample_planes(3, len, 1.0, 7);
            let mut out_vector = vec![vec![0.0f32; len]; space.component_count()];
            let mut out_scalar = out_vector.clone();
            for (converter, out) in [
                (vector.as_ref(), &mut out_vector),
                (scalar.as_ref(), &mut out_scalar),
            ] {
                let mut values =
                    ComponentValues::new(out.iter_mut().map(|p| p.as_mut_slice())).unwrap();
                converter
                    .convert_back(&mut values, &rgb[0], &rgb[1], &rgb[2])
                    .unwrap();
            }
            assert_eq!(bits(&out_vector), bits(&out_scalar), "{space:?} len={len}");
        }
    }
}

#[test]
fn to_rgb_saturates_identically_on_both_paths() {
    let vector = select_converter(ColorSpace::Rgb, 8, Capability::new(true, 4).unwrap()).unwrap();
    let scalar = scalar_converter(ColorSpace::Rgb, 8);
    let row = vec![-40.0f32, 0.4, 254.5, 255.5, 300.0, 127.5, -0.3, -0.49];
    let mut via_vector = vec![row.clone(); 3];
    let mut via_scalar = vec![row; 3];
    run_to_rgb(vector.as_ref(), &mut via_vector);
    run_to_rgb(scalar.as_ref(), &mut via_scalar);
    assert_eq!(bits(&via_vector), bits(&via_scalar));
    assert_eq!(via_scalar[0][0].to_bits(), 0);
    assert_eq!(via_scalar[0][1].to_bits(), 0);
    assert_eq!(via_scalar[0][2], 254.0 * (1.0 / 255.0));
    assert_eq!(via_scalar[0][3], 1.0);
    assert_eq!(via_scalar[0][4], 1.0);
    assert_eq!(via_scalar[0][5], 128.0 * (1.0 / 255.0));
    assert_eq!(via_scalar[0][6].to_bits(), 0);
    assert_eq!(via_scalar[0][7].to_bits(), 0);
}

#[test]
fn quantize_folds_negative_zero() {
    let scale = 1.0 / 255.0;
    for v in [-0.0f32, -0.3, -0.5, -12.0] {
        assert_eq!(quantize_scalar(v, 255.0, scale).to_bits(), 0, "{v}");
    }
    let lanes = quantize_lanes(
        <f32x4 as Lanes>::load(&[-0.0, -0.3, -0.5, -12.0]),
        <f32x4 as Lanes>::splat(255.0),
        <f32x4 as Lanes>::splat(scale),
    );
    let mut out = [1.0f32; 4];
    Lanes::store(lanes, &mut out);
    assert_eq!(out.map(f32::to_bits), [0; 4]);
}

#[test]
fn color_space_uses_snake_case_names() {
    assert_eq!(
        serde_json::to_value(ColorSpace::YCbCr).unwrap(),
        serde_json::json!("ycbcr")
    );
    let gray: ColorSpace = serde_json::from_value(serde_json::json!("grayscale")).unwrap();
    assert_eq!(gray, ColorSpace::Grayscale);
}
