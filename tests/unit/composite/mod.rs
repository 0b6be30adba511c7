use super::*;
use ::wide::f32x8;

#[test]
fn every_blend_mode_agrees_between_scalar_and_lane_forms() {
    let backdrop = [Rgba::new(0.1, 0.6, 0.9, 1.0), Rgba::new(0.7, 0.3, 0.5, 0.4)];
    let source = [Rgba::new(0.8, 0.2, 0.4, 0.6), Rgba::new(0.3, 0.9, 0.6, 0.0)];
    let flat = |px: &[Rgba; 2]| -> Vec<f32> { px.iter().flat_map(|p| p.to_array()).collect() };

    for mode in BlendMode::ALL {
        let packed = mode.apply_wide(
            <f32x8 as Lanes>::load(&flat(&backdrop)),
            <f32x8 as Lanes>::load(&flat(&source)),
        );
        let mut got = [0.0f32; 8];
        Lanes::store(packed, &mut got);
        for (i, (b, s)) in backdrop.iter().zip(&source).enumerate() {
            assert_eq!(
                Rgba::load(&got[i * 4..]),
                mode.apply(*b, *s),
                "{mode:?} pixel {i}"
            );
        }
    }
}

#[test]
fn defaults_are_normal_over() {
    assert_eq!(BlendMode::default(), BlendMode::Normal);
    assert_eq!(AlphaComposition::default(), AlphaComposition::SrcOver);
}

#[test]
fn serde_names_are_snake_case() {
    assert_eq!(
        serde_json::to_string(&BlendMode::HardLight).unwrap(),
        "\"hard_light\""
    );
    assert_eq!(
        serde_json::to_string(&AlphaComposition::DestAtop).unwrap(),
        "\"dest_atop\""
    );
    let mode: BlendMode = serde_json::from_str("\"screen\"").unwrap();
    assert_eq!(mode, BlendMode::Screen);
    assert!(serde_json::from_str::<BlendMode>("\"dodge\"").is_err());
}
